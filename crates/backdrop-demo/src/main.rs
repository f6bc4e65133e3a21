//! Backdrop Demo — hosts the background-options form.
//!
//! Writes the form page to disk and serves its controller over a WebSocket
//! IPC bridge. Open the printed page in a browser; every control event is
//! handled by `backdrop-controller` and streamed back as element patches.

mod config;
mod embedded_ui;
mod file_dialog;
mod ipc;
mod remote_surface;
mod ws_bridge;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .init();

    if let Err(e) = run(&config).await {
        tracing::error!("backdrop-demo stopped: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig) -> Result<(), ws_bridge::BridgeError> {
    embedded_ui::write_page(&config.page_path, config.ws_port)?;
    tracing::info!("Form page written, open file://{}", config.page_path.display());

    ws_bridge::serve(config.ws_port).await
}
