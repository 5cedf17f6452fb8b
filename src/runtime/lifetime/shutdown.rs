use tokio::signal;
use tracing::warn;

pub async fn listen_for_shutdown() {
    // Menunggu sinyal Ctrl+C
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
