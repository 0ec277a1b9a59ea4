//! Readiness probe against the backend health endpoint.
//!
//! The poll is bounded: at most `max_attempts` GETs with a fixed interval
//! between them. Any HTTP response counts as ready; only connection
//! failures count as not-ready. Exhausting the attempts is a warning for
//! the caller, not an error.

use std::time::Duration;

use reqwest::Client;

use crate::error::StackError;
use crate::supervisor::ShutdownSignal;

/// Outcome of a bounded readiness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The endpoint answered on the given 1-based attempt.
    Ready { attempt: u32 },
    /// All attempts failed to connect.
    TimedOut,
    /// The shutdown signal fired before the poll finished.
    Interrupted,
}

pub struct HealthProbe {
    client: Client,
    url: String,
}

impl HealthProbe {
    pub fn new(url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");
        Self { client, url }
    }

    /// One GET against the health URL. Any response, whatever the status
    /// code, means the backend process is up and listening.
    pub async fn check(&self) -> bool {
        self.client.get(&self.url).send().await.is_ok()
    }

    /// Polls until the endpoint answers, the attempts are exhausted or the
    /// shutdown signal fires. Never blocks past
    /// `max_attempts * interval + request timeout`.
    pub async fn wait_until_ready(
        &self,
        max_attempts: u32,
        interval: Duration,
        shutdown: &mut ShutdownSignal,
    ) -> Readiness {
        for attempt in 1..=max_attempts {
            if shutdown.is_triggered() {
                return Readiness::Interrupted;
            }
            if self.check().await {
                return Readiness::Ready { attempt };
            }
            if attempt < max_attempts {
                tokio::select! {
                    _ = shutdown.recv() => return Readiness::Interrupted,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        }
        Readiness::TimedOut
    }

    /// Fetches the health payload for the `status` subcommand.
    pub async fn fetch_status(&self) -> Result<serde_json::Value, StackError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(StackError::Unreachable)?;

        let status = response.status();
        let text = response.text().await?;
        // Not every backend answers JSON on `/`; fall back to a synthetic payload.
        let value = serde_json::from_str(&text).unwrap_or_else(|_| {
            serde_json::json!({ "http_status": status.as_u16() })
        });
        Ok(value)
    }
}
