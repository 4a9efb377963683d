//! OS signal handling for graceful shutdown

use std::io;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `cancel` on SIGINT or SIGTERM
///
/// Handlers are installed before returning so a failure surfaces at startup.
/// The task also exits quietly if the token is cancelled elsewhere.
pub fn spawn_signal_listener(cancel: CancellationToken) -> io::Result<JoinHandle<()>> {
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
            _ = cancel.cancelled() => return,
        };
        info!(signal = name, "received shutdown signal, gracefully shutting down");
        cancel.cancel();
    }))
}
