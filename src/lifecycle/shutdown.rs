//! Shutdown coordination for the relay.
//!
//! The trigger is level-triggered: a [`ShutdownSignal`] taken after
//! [`Shutdown::trigger`] still resolves, so a server started late cannot
//! miss the stop request.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::wait_for_signal;

/// Owner side of the shutdown flag.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Waiter side handed to the server and helper tasks.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every current and future subscriber to stop.
    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            tracing::debug!("Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Trigger once the process receives SIGINT or SIGTERM.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            shutdown.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered or every [`Shutdown`] handle is dropped.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_all_subscribers() {
        let shutdown = Shutdown::new();
        let a = shutdown.subscribe();
        let b = shutdown.subscribe();

        shutdown.trigger();
        a.wait().await;
        b.wait().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_earlier_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), late.wait())
            .await
            .expect("late subscriber should not block");
    }

    #[tokio::test]
    async fn test_dropping_owner_releases_waiters() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("waiter should resolve when the owner is gone");
    }

    #[tokio::test]
    async fn test_untriggered_signal_stays_pending() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();

        let waited = tokio::time::timeout(Duration::from_millis(50), signal.wait()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }

    #[test]
    fn test_trigger_without_subscribers_is_harmless() {
        let shutdown = Shutdown::default();
        shutdown.trigger();
        shutdown.trigger();
        assert!(shutdown.is_triggered());
    }
}
