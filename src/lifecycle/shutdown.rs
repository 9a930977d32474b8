//! Shutdown coordination for the service.

use tokio_util::sync::CancellationToken;

/// Root cancellation context for the process lifetime.
///
/// Cloning shares the same underlying token; [`subscribe`](Self::subscribe)
/// hands out child tokens that long-running tasks can wait on without being
/// able to cancel the root.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child token cancelled when the root shutdown is triggered.
    pub fn subscribe(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the shutdown is triggered.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let child = shutdown.subscribe();
        let clone = shutdown.clone();
        assert!(!child.is_cancelled());

        clone.trigger();
        child.cancelled().await;
        shutdown.cancelled().await;
        assert!(shutdown.is_triggered());
    }

    #[test]
    fn test_child_cannot_cancel_root() {
        let shutdown = Shutdown::new();
        shutdown.subscribe().cancel();
        assert!(!shutdown.is_triggered());
    }
}
