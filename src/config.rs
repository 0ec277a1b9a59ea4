//! Configuração do agentstack carregada a partir de `agentstack.toml`.
//!
//! A struct [`StackConfig`] contém todos os parâmetros configuráveis dos
//! processos backend e frontend. Valores não presentes no arquivo usam
//! defaults que espelham o script de inicialização original.
//! A variável de ambiente `AGENTSTACK_HEALTH_URL` tem precedência sobre o arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `agentstack.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackConfig {
    /// Processo backend (API) executado em segundo plano.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Processo frontend (UI) executado em primeiro plano.
    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Parâmetros da sondagem de prontidão do backend.
    #[serde(default)]
    pub poll: PollConfig,
}

/// Configuração do processo backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Se o backend deve ser iniciado junto com o frontend.
    #[serde(default = "default_backend_enabled")]
    pub enabled: bool,

    /// Executável do backend.
    #[serde(default = "default_backend_program")]
    pub program: String,

    /// Argumentos passados ao executável do backend.
    #[serde(default = "default_backend_args")]
    pub args: Vec<String>,

    /// URL sondada para verificar a prontidão do backend.
    #[serde(default = "default_health_url")]
    pub health_url: String,

    /// Diretório onde a saída combinada do backend é gravada.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

/// Configuração do processo frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Executável do frontend (interpretador obrigatório no PATH).
    #[serde(default = "default_frontend_program")]
    pub program: String,

    /// Argumentos passados ao executável do frontend.
    #[serde(default = "default_frontend_args")]
    pub args: Vec<String>,
}

/// Configuração da sondagem de prontidão.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Número máximo de tentativas antes de desistir (não fatal).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Intervalo em milissegundos entre tentativas.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

// Valor padrão: backend habilitado.
fn default_backend_enabled() -> bool {
    true
}

// Executável padrão do backend.
fn default_backend_program() -> String {
    "uvicorn".to_string()
}

// Argumentos padrão do backend: API na porta 8001.
fn default_backend_args() -> Vec<String> {
    vec![
        "src.backend.main:app".to_string(),
        "--port".to_string(),
        "8001".to_string(),
    ]
}

// URL padrão da sondagem de prontidão.
fn default_health_url() -> String {
    "http://localhost:8001/".to_string()
}

// Diretório padrão para logs do backend.
fn default_log_dir() -> String {
    "logs".to_string()
}

// Executável padrão do frontend.
fn default_frontend_program() -> String {
    "streamlit".to_string()
}

// Argumentos padrão do frontend: UI na porta 8501.
fn default_frontend_args() -> Vec<String> {
    vec![
        "run".to_string(),
        "src/frontend/app.py".to_string(),
        "--server.port".to_string(),
        "8501".to_string(),
    ]
}

// Valor padrão para tentativas máximas: 10.
fn default_max_attempts() -> u32 {
    10
}

// Valor padrão para o intervalo entre tentativas: 1000ms.
fn default_interval_ms() -> u64 {
    1000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: default_backend_enabled(),
            program: default_backend_program(),
            args: default_backend_args(),
            health_url: default_health_url(),
            log_dir: default_log_dir(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            program: default_frontend_program(),
            args: default_frontend_args(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl StackConfig {
    /// Carrega a configuração de `agentstack.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("agentstack.toml"))
    }

    /// Carrega a configuração do caminho fornecido (flag `--config`).
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<StackConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para a URL.
        if let Ok(url) = std::env::var("AGENTSTACK_HEALTH_URL")
            && !url.is_empty()
        {
            config.backend.health_url = url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = StackConfig::default();
        assert!(config.backend.enabled);
        assert_eq!(config.backend.program, "uvicorn");
        assert_eq!(config.backend.health_url, "http://localhost:8001/");
        assert_eq!(config.backend.log_dir, "logs");
        assert_eq!(config.frontend.program, "streamlit");
        assert_eq!(config.poll.max_attempts, 10);
        assert_eq!(config.poll.interval_ms, 1000);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            [backend]
            enabled = false
            health_url = "http://localhost:9001/health"

            [poll]
            max_attempts = 3
        "#;
        let config: StackConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.backend.enabled);
        assert_eq!(config.backend.health_url, "http://localhost:9001/health");
        assert_eq!(config.backend.program, "uvicorn");
        assert_eq!(config.poll.max_attempts, 3);
        assert_eq!(config.poll.interval_ms, 1000);
        assert_eq!(config.frontend.program, "streamlit");
    }

    #[test]
    fn frontend_args_keep_order() {
        let toml_str = r#"
            [frontend]
            program = "streamlit"
            args = ["run", "app.py", "--server.port", "8502"]
        "#;
        let config: StackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.frontend.args,
            vec!["run", "app.py", "--server.port", "8502"]
        );
    }

    #[test]
    fn load_falls_back_to_defaults() {
        // No ambiente de teste, tipicamente não há agentstack.toml no diretório de trabalho.
        let config = StackConfig::load_from(Path::new("does_not_exist.toml")).unwrap();
        assert_eq!(config.poll.max_attempts, 10);
    }
}
