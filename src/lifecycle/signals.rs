//! OS signal handling.
//!
//! SIGINT (Ctrl+C) and, on Unix, SIGTERM trigger the root [`Shutdown`].
//! Signal handling only requests shutdown; the application decides how to
//! drain.

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Wait for the first termination signal.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Shutdown signal received"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Shutdown signal received"),
    }
}

/// Spawn a task that triggers `shutdown` on the first termination signal.
///
/// The task exits on its own once `shutdown` is triggered from elsewhere.
pub fn spawn_signal_handler(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = wait_for_signal() => shutdown.trigger(),
            _ = shutdown.cancelled() => {}
        }
    })
}

/// Wait for the signal task to finish, logging a panic or cancellation
/// instead of propagating it.
pub async fn join_signal_handler(handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        tracing::warn!(error = %e, "Signal handler task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_handler_exits_on_external_trigger() {
        let shutdown = Shutdown::new();
        let handle = spawn_signal_handler(shutdown.clone());
        shutdown.trigger();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_handler_task_is_logged() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer({
                let buffer = buffer.clone();
                move || Sink(buffer.clone())
            })
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let handle = tokio::spawn(async { panic!("handler crashed") });
        join_signal_handler(handle).await;

        let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Signal handler task failed"), "logs: {}", logs);
    }
}
