use std::sync::Arc;

use nowsource::{CanvasClient, SettingsClient, StatusClient};
use nowstage::TracingStage;
use nowwidget::PollLoop;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("📡 Connecting to local status and settings files...");
    let status = Arc::new(StatusClient::new());
    let settings = Arc::new(SettingsClient::new());
    let canvas = Arc::new(CanvasClient::new());

    // No overlay page is wired up here; the tracing stage plays every
    // animation against the log.
    let stage = Arc::new(TracingStage::new());

    let poll = PollLoop::new(status, settings, canvas, stage);

    info!("✅ NowOverlay is ready, polling for playback changes");
    info!("Press Ctrl+C to stop...");
    tokio::select! {
        _ = poll.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
