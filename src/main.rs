//! console-bridge entry point.
//!
//! Opens the WebSocket connection, streams output to stdout and forwards
//! stdin lines as commands until the server closes or Ctrl-C.

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use console_bridge::config::{BridgeConfig, LogFormat};
use console_bridge::console;
use console_bridge::ws::{Connection, Endpoint, run_bridge};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = BridgeConfig::from_env();

    // Initialize tracing; stdout belongs to the display
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    let endpoint = match Endpoint::from_origin(&config.origin_url, &config.ws_path) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            if err.is_config() {
                tracing::error!(
                    origin = %config.origin_url,
                    code = err.error_code(),
                    error = %err,
                    "invalid BRIDGE_ORIGIN_URL / BRIDGE_WS_PATH"
                );
            }
            return Err(err.into());
        }
    };
    tracing::info!(%endpoint, secure = endpoint.is_secure(), "connecting");

    let connection = match Connection::open(&endpoint).await {
        Ok(connection) => connection,
        Err(err) => {
            tracing::error!(%endpoint, code = err.error_code(), error = %err, "connection failed");
            return Err(err.into());
        }
    };

    let (ui_tx, ui_rx) = mpsc::channel(config.input_capacity);
    console::spawn_stdin_reader(ui_tx)?;

    let mut stdout = tokio::io::stdout();
    tokio::select! {
        result = run_bridge(connection, config.viewport_height, ui_rx, &mut stdout) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    Ok(())
}
