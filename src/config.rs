//! Client configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparseable numeric values fall back to defaults;
//! the origin URL is validated later, when the endpoint is derived.

/// Default origin the console server listens on.
pub const DEFAULT_ORIGIN_URL: &str = "http://127.0.0.1:4242";

/// Default WebSocket path on the origin.
pub const DEFAULT_WS_PATH: &str = "/ws";

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per record.
    Json,
}

impl LogFormat {
    /// Parses `"json"` (case-insensitive) as [`LogFormat::Json`]; anything
    /// else is [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Top-level client configuration.
///
/// Loaded once at startup via [`BridgeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// URL of the origin serving the console (e.g. `http://host:4242`).
    /// Its scheme, host and port select the WebSocket endpoint.
    pub origin_url: String,

    /// Path of the WebSocket endpoint on the origin.
    pub ws_path: String,

    /// Number of display lines visible at once.
    pub viewport_height: usize,

    /// Capacity of the channel carrying console input to the bridge loop.
    pub input_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            origin_url: DEFAULT_ORIGIN_URL.to_string(),
            ws_path: DEFAULT_WS_PATH.to_string(),
            viewport_height: 24,
            input_capacity: 64,
            log_format: LogFormat::Pretty,
        }
    }
}

impl BridgeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let origin_url = std::env::var("BRIDGE_ORIGIN_URL").unwrap_or(defaults.origin_url);
        let ws_path = std::env::var("BRIDGE_WS_PATH").unwrap_or(defaults.ws_path);
        let viewport_height = parse_env("BRIDGE_VIEWPORT_HEIGHT", defaults.viewport_height);
        let input_capacity = parse_env("BRIDGE_INPUT_CAPACITY", defaults.input_capacity).max(1);
        let log_format = std::env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Self {
            origin_url,
            ws_path,
            viewport_height,
            input_capacity,
            log_format,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
