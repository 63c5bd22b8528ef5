//! Signal handling for graceful shutdown

use std::{future::Future, io};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Wait for SIGTERM or SIGINT
///
/// Falls back to Ctrl-C alone if the signal stream cannot be registered.
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handler: {}, waiting for Ctrl-C", e);
            ctrl_c_or_never(tokio::signal::ctrl_c()).await;
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    signals.handle().close();
}

/// Resolve when `ctrl_c` does; if it cannot be listened for, never resolve
async fn ctrl_c_or_never<F>(ctrl_c: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = ctrl_c.await {
        warn!("Failed to listen for Ctrl-C: {}, running until killed", e);
        std::future::pending::<()>().await;
    }
}
