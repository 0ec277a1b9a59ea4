//! Interface de linha de comando do agentstack baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (up, check, status)
//! e flags globais (--config, --frontend-only, --verbose). Sem subcomando,
//! o comportamento é o mesmo de `up`.

use clap::{Parser, Subcommand};

/// agentstack — supervisor de processos da stack de desenvolvimento.
#[derive(Debug, Parser)]
#[command(name = "agentstack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Caminho para um arquivo de configuração alternativo.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Pula o backend: não inicia o processo nem faz a sondagem de prontidão.
    #[arg(long, global = true, default_value_t = false)]
    pub frontend_only: bool,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia a stack completa: backend em segundo plano, frontend em primeiro.
    Up,

    /// Verifica apenas os pré-requisitos (executáveis no PATH).
    Check,

    /// Consulta o endpoint de saúde do backend uma única vez.
    Status,
}
