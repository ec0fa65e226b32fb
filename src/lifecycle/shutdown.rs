//! Signal handling for graceful shutdown

use tracing::{debug, warn};

/// Handles console shutdown requests (Ctrl-C / Ctrl-Break, SIGINT / SIGTERM)
pub struct ShutdownSignal;

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self
    }

    /// Wait for a shutdown signal
    ///
    /// Never resolves if the handlers cannot be registered, so the exit
    /// hotkey stays the only way out.
    pub async fn wait(&self) {
        if let Err(e) = Self::recv().await {
            warn!(?e, "failed to register shutdown signal handlers");
            std::future::pending::<()>().await;
        }
    }

    #[cfg(windows)]
    async fn recv() -> std::io::Result<()> {
        use tokio::signal::windows::{ctrl_break, ctrl_c};

        let mut ctrl_c = ctrl_c()?;
        let mut ctrl_break = ctrl_break()?;

        tokio::select! {
            _ = ctrl_c.recv() => {
                debug!("received Ctrl-C");
            }
            _ = ctrl_break.recv() => {
                debug!("received Ctrl-Break");
            }
        }
        Ok(())
    }

    #[cfg(unix)]
    async fn recv() -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                debug!("received SIGTERM");
            }
            _ = sigint.recv() => {
                debug!("received SIGINT");
            }
        }
        Ok(())
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
