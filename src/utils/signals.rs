//! Signal handling for terminal restoration on shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{info, warn};

/// Resolve once a termination signal (SIGTERM, SIGINT) arrives.
///
/// The UI event loop selects on this so the terminal is restored before the
/// process exits. If the handler cannot be installed the future never
/// resolves and shutdown falls back to the in-band quit keys.
pub async fn shutdown_signal() {
    match Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT]) {
        Ok(mut signals) => {
            if let Some(signal) = signals.next().await {
                info!("Received signal: {}", signal);
            }
        }
        Err(e) => {
            warn!("Failed to install signal handlers: {}", e);
            futures::future::pending::<()>().await;
        }
    }
}
