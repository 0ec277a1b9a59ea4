use std::sync::Arc;

use tokio::sync::watch;

/// Cancellation handle shared between the supervisor, the readiness poll
/// and the foreground child. Cloning is cheap; triggering is idempotent.
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Marks the signal as triggered. Later calls are no-ops.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Waits until the signal is triggered. Returns immediately if it
    /// already was.
    pub async fn recv(&mut self) {
        // The Arc in self keeps the sender alive, so wait_for cannot fail.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }

    /// Spawns a task that triggers this signal when Ctrl-C arrives.
    pub fn listen_for_ctrl_c(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal.trigger();
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn starts_untriggered() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_triggered());
    }

    #[tokio::test]
    async fn trigger_is_observed_by_clones() {
        let signal = ShutdownSignal::new();
        let mut observer = signal.clone();

        signal.trigger();
        assert!(observer.is_triggered());
        observer.recv().await; // must not hang
    }

    #[tokio::test]
    async fn trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn recv_wakes_pending_waiter() {
        let signal = ShutdownSignal::new();
        let mut waiter = signal.clone();

        let handle = tokio::spawn(async move {
            waiter.recv().await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.trigger();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should wake after trigger")
            .unwrap();
    }
}
