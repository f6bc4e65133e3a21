//! Application configuration for the demo.

use std::path::PathBuf;

/// Default WebSocket port for the IPC bridge.
const DEFAULT_WS_PORT: u16 = 9410;
/// File name of the generated form page.
const DEFAULT_PAGE_NAME: &str = "backdrop.html";

/// Runtime configuration for the Backdrop demo application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebSocket port for page <-> controller IPC.
    pub ws_port: u16,
    /// Where the form page is written.
    pub page_path: PathBuf,
    /// Verbose logging.
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ws_port: std::env::var("BACKDROP_WS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WS_PORT),
            page_path: std::env::var_os("BACKDROP_PAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_PAGE_NAME)),
            dev_mode: std::env::var("BACKDROP_DEV").is_ok(),
        }
    }
}

impl AppConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.dev_mode {
            "backdrop_demo=debug,backdrop_controller=debug,backdrop_core=debug"
        } else {
            "backdrop_demo=info,backdrop_controller=info"
        }
    }
}
