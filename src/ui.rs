//! Interface de terminal do agentstack — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner da sondagem de prontidão e
//! `console` para estilização com cores. O [`StackUi`] imprime as etapas
//! da inicialização; o [`PollProgress`] acompanha visualmente a espera
//! pelo backend.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Saída colorida das etapas do supervisor no terminal.
pub struct StackUi {
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para falhas fatais.
    red: Style,
    // Estilo amarelo para avisos não fatais.
    yellow: Style,
    // Estilo ciano para etapas em andamento.
    cyan: Style,
    // Saída detalhada habilitada via --verbose.
    verbose: bool,
}

impl StackUi {
    pub fn new(verbose: bool) -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            cyan: Style::new().cyan(),
            verbose,
        }
    }

    /// Imprime uma etapa da sequência de inicialização.
    pub fn step(&self, message: &str) {
        println!("{} {message}", self.cyan.apply_to("→"));
    }

    /// Imprime detalhes adicionais apenas em modo verbose.
    pub fn detail(&self, message: &str) {
        if self.verbose {
            println!("  {}", Style::new().dim().apply_to(message));
        }
    }

    /// Imprime uma confirmação de sucesso em verde.
    pub fn ok(&self, message: &str) {
        println!("{} {message}", self.green.apply_to("✓"));
    }

    /// Imprime um aviso não fatal em amarelo.
    pub fn warn(&self, message: &str) {
        println!("{} {message}", self.yellow.apply_to("!"));
    }

    /// Imprime uma falha fatal em vermelho (stderr).
    pub fn fail(&self, message: &str) {
        eprintln!("{} {message}", self.red.apply_to("✗"));
    }

    /// Imprime o payload de saúde do backend formatado em JSON.
    pub fn print_status(&self, payload: &serde_json::Value) {
        println!("{}", self.green.apply_to("─── Backend Status ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(payload).unwrap_or_default()
        );
    }
}

/// Indicador visual da sondagem de prontidão do backend.
pub struct PollProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    green: Style,
    yellow: Style,
}

impl PollProgress {
    /// Inicia o spinner apontando para a URL sondada.
    pub fn start(url: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Waiting for backend at {url}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Finaliza o spinner: backend respondeu na tentativa dada.
    pub fn ready(&self, attempt: u32) {
        self.pb.finish_and_clear();
        println!(
            "{} Backend ready (attempt {attempt})",
            self.green.apply_to("✓")
        );
    }

    /// Finaliza o spinner: tentativas esgotadas, seguindo mesmo assim.
    pub fn timed_out(&self, max_attempts: u32) {
        self.pb.finish_and_clear();
        println!(
            "{} Backend not ready after {max_attempts} attempts, continuing anyway",
            self.yellow.apply_to("!")
        );
    }

    /// Finaliza o spinner silenciosamente (interrupção durante a espera).
    pub fn interrupted(&self) {
        self.pb.finish_and_clear();
    }
}
