use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};

use super::ShutdownSignal;
use crate::error::StackError;

/// Description of a child process: program plus fixed arguments.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Command line as it would be typed in a shell, for log lines.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How the foreground child ended.
#[derive(Debug)]
pub enum ForegroundOutcome {
    /// The child exited on its own.
    Exited(std::process::ExitStatus),
    /// The shutdown signal fired; the child was killed.
    Interrupted,
}

/// Spawns a detached child with stdout and stderr redirected to `log_path`.
///
/// Mirrors the shell redirect `>> file 2>&1`: one file handle shared by
/// both streams.
pub fn spawn_background(spec: &ProcessSpec, log_path: &Path) -> Result<Child, StackError> {
    let log = std::fs::File::create(log_path).map_err(|source| StackError::LogFile {
        path: log_path.to_path_buf(),
        source,
    })?;
    let log_err = log.try_clone().map_err(|source| StackError::LogFile {
        path: log_path.to_path_buf(),
        source,
    })?;

    Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| StackError::Spawn {
            program: spec.program.clone(),
            source,
        })
}

/// Runs the foreground child with inherited stdio, blocking until it exits
/// or the shutdown signal fires. On shutdown the child is killed and reaped
/// before returning.
pub async fn run_foreground(
    spec: &ProcessSpec,
    shutdown: &mut ShutdownSignal,
) -> Result<ForegroundOutcome, StackError> {
    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .spawn()
        .map_err(|source| StackError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

    tokio::select! {
        status = child.wait() => Ok(ForegroundOutcome::Exited(status?)),
        _ = shutdown.recv() => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            Ok(ForegroundOutcome::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sh(script: &str) -> ProcessSpec {
        ProcessSpec::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let spec = ProcessSpec::new(
            "uvicorn",
            vec!["src.backend.main:app".into(), "--port".into(), "8001".into()],
        );
        assert_eq!(spec.command_line(), "uvicorn src.backend.main:app --port 8001");
    }

    #[tokio::test]
    async fn background_child_writes_both_streams_to_log() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("backend.log");

        let spec = sh("echo out; echo err 1>&2");
        let mut child = spawn_background(&spec, &log_path).unwrap();
        child.wait().await.unwrap();

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("out"));
        assert!(contents.contains("err"));
    }

    #[tokio::test]
    async fn spawn_background_fails_for_missing_program() {
        let tmp = TempDir::new().unwrap();
        let spec = ProcessSpec::new("no_such_program_xyz", vec![]);

        let err = spawn_background(&spec, &tmp.path().join("x.log")).unwrap_err();
        assert!(matches!(err, StackError::Spawn { program, .. } if program == "no_such_program_xyz"));
    }

    #[tokio::test]
    async fn foreground_child_exit_is_reported() {
        let mut shutdown = ShutdownSignal::new();
        let outcome = run_foreground(&sh("exit 0"), &mut shutdown).await.unwrap();

        match outcome {
            ForegroundOutcome::Exited(status) => assert!(status.success()),
            ForegroundOutcome::Interrupted => panic!("expected natural exit"),
        }
    }

    #[tokio::test]
    async fn foreground_child_is_killed_on_shutdown() {
        let mut shutdown = ShutdownSignal::new();
        let trigger = shutdown.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.trigger();
        });

        let start = std::time::Instant::now();
        let outcome = run_foreground(&sh("sleep 60"), &mut shutdown).await.unwrap();

        assert!(matches!(outcome, ForegroundOutcome::Interrupted));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
