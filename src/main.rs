mod cli;
mod config;
mod error;
mod health;
mod preflight;
mod supervisor;
mod ui;

use std::path::Path;

use clap::Parser;

use cli::{Cli, Command};
use config::StackConfig;
use health::HealthProbe;
use supervisor::{ShutdownSignal, Supervisor};
use ui::StackUi;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ui = StackUi::new(cli.verbose);

    if let Err(err) = run(cli, &ui).await {
        ui.fail(&format!("{err}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, ui: &StackUi) -> anyhow::Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => StackConfig::load_from(Path::new(path))?,
        None => StackConfig::load()?,
    };
    if cli.frontend_only {
        config.backend.enabled = false;
    }

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => {
            let shutdown = ShutdownSignal::new();
            shutdown.listen_for_ctrl_c();
            let mut supervisor = Supervisor::new(config, StackUi::new(cli.verbose), shutdown);
            supervisor.run().await
        }
        Command::Check => check(&config, ui),
        Command::Status => {
            let probe = HealthProbe::new(config.backend.health_url.clone());
            let payload = probe.fetch_status().await?;
            ui.print_status(&payload);
            Ok(())
        }
    }
}

/// Preflight only: the backend program missing is a warning, the frontend
/// interpreter missing is the exit-1 failure.
fn check(config: &StackConfig, ui: &StackUi) -> anyhow::Result<()> {
    match preflight::resolve_on_path(&config.backend.program) {
        Some(path) => ui.ok(&format!("{} ({})", config.backend.program, path.display())),
        None => ui.warn(&format!(
            "{} not found on PATH (backend will be skipped)",
            config.backend.program
        )),
    }

    let path = preflight::require(&config.frontend.program)?;
    ui.ok(&format!("{} ({})", config.frontend.program, path.display()));
    Ok(())
}
