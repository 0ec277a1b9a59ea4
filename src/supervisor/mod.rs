//! Launch sequence driver: preflight, backend spawn, readiness poll,
//! foreground frontend and best-effort teardown.

mod process;
mod shutdown;

pub use process::{ForegroundOutcome, ProcessSpec, run_foreground, spawn_background};
pub use shutdown::ShutdownSignal;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::process::Child;

use crate::config::StackConfig;
use crate::health::{HealthProbe, Readiness};
use crate::preflight;
use crate::ui::{PollProgress, StackUi};

/// Drives the stack through its lifecycle and owns the backend child handle.
///
/// The handle lives here, not in a global, so the same shutdown path serves
/// both a natural frontend exit and an interrupt.
pub struct Supervisor {
    config: StackConfig,
    ui: StackUi,
    shutdown: ShutdownSignal,
    backend: Option<Child>,
}

impl Supervisor {
    pub fn new(config: StackConfig, ui: StackUi, shutdown: ShutdownSignal) -> Self {
        Self {
            config,
            ui,
            shutdown,
            backend: None,
        }
    }

    /// Runs the full sequence. Returns Ok on natural frontend exit and on
    /// interrupt; only precondition and spawn failures are errors.
    pub async fn run(&mut self) -> Result<()> {
        // The frontend interpreter missing is the one fatal precondition.
        let frontend_path = preflight::require(&self.config.frontend.program)?;
        self.ui.detail(&format!(
            "{} resolved to {}",
            self.config.frontend.program,
            frontend_path.display()
        ));

        if self.config.backend.enabled {
            self.launch_backend().await?;
        } else {
            self.ui.step("Backend disabled, frontend-only run");
        }

        // An interrupt during the poll skips the frontend entirely.
        if self.shutdown.is_triggered() {
            self.shutdown_backend().await;
            return Ok(());
        }

        let spec = ProcessSpec::new(
            self.config.frontend.program.clone(),
            self.config.frontend.args.clone(),
        );
        self.ui.step(&format!("Starting frontend: {}", spec.command_line()));

        let mut shutdown = self.shutdown.clone();
        let outcome = run_foreground(&spec, &mut shutdown).await?;
        match outcome {
            ForegroundOutcome::Exited(status) if status.success() => {
                self.ui.ok("Frontend exited");
            }
            ForegroundOutcome::Exited(status) => {
                self.ui.warn(&format!("Frontend exited with {status}"));
            }
            ForegroundOutcome::Interrupted => {
                self.ui.step("Interrupt received, shutting down");
            }
        }

        self.shutdown_backend().await;
        self.ui.ok("Stack stopped");
        Ok(())
    }

    /// Spawns the backend with its output redirected to a log file, then
    /// polls the health URL. A missing backend program or an exhausted poll
    /// degrades the run instead of aborting it.
    async fn launch_backend(&mut self) -> Result<()> {
        let backend = self.config.backend.clone();

        if preflight::resolve_on_path(&backend.program).is_none() {
            self.ui.warn(&format!(
                "`{}` not found on PATH, skipping backend",
                backend.program
            ));
            return Ok(());
        }

        std::fs::create_dir_all(&backend.log_dir)?;
        let log_path = self.backend_log_path();
        let spec = ProcessSpec::new(backend.program.clone(), backend.args.clone());
        self.ui.step(&format!("Starting backend: {}", spec.command_line()));
        self.ui.detail(&format!("Backend log: {}", log_path.display()));

        let child = spawn_background(&spec, &log_path)?;
        self.backend = Some(child);

        let probe = HealthProbe::new(backend.health_url.clone());
        let spinner = PollProgress::start(&backend.health_url);
        let mut shutdown = self.shutdown.clone();
        let readiness = probe
            .wait_until_ready(
                self.config.poll.max_attempts,
                Duration::from_millis(self.config.poll.interval_ms),
                &mut shutdown,
            )
            .await;

        match readiness {
            Readiness::Ready { attempt } => spinner.ready(attempt),
            Readiness::TimedOut => spinner.timed_out(self.config.poll.max_attempts),
            Readiness::Interrupted => spinner.interrupted(),
        }
        Ok(())
    }

    // Log files are keyed by launch time so successive runs do not clobber
    // each other.
    fn backend_log_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        PathBuf::from(&self.config.backend.log_dir).join(format!("backend-{stamp}.log"))
    }

    /// Best-effort backend termination: at most one kill attempt, errors
    /// swallowed (the child may already be gone). Safe to call twice.
    pub async fn shutdown_backend(&mut self) {
        if let Some(mut child) = self.backend.take() {
            let _ = child.start_kill();
            let _ = child.wait().await;
            self.ui.ok("Backend stopped");
        }
    }
}
