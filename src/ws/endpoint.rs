//! WebSocket endpoint derived from the origin URL.
//!
//! The console connects back to the same host and port that serve it. The
//! origin's scheme picks plain or secure WebSocket.

use std::fmt;

use tokio_tungstenite::tungstenite::http::Uri;

use crate::error::BridgeError;

/// A validated `ws://` or `wss://` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    uri: Uri,
}

impl Endpoint {
    /// Derives the endpoint from an origin URL and a WebSocket path.
    ///
    /// `http`/`ws` map to `ws`, `https`/`wss` map to `wss`. Host and port
    /// are kept as given; an origin without a port uses the scheme default.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidOrigin`] if the URL does not parse or
    /// has no scheme or host, and [`BridgeError::UnsupportedScheme`] for
    /// schemes other than the four above.
    pub fn from_origin(origin_url: &str, ws_path: &str) -> Result<Self, BridgeError> {
        let origin: Uri = origin_url
            .trim()
            .parse()
            .map_err(|e| BridgeError::InvalidOrigin(format!("{origin_url}: {e}")))?;

        let scheme = origin
            .scheme_str()
            .ok_or_else(|| BridgeError::InvalidOrigin(format!("{origin_url}: missing scheme")))?;
        let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(BridgeError::UnsupportedScheme(other.to_string())),
        };

        let authority = origin
            .authority()
            .filter(|a| !a.host().is_empty())
            .ok_or_else(|| BridgeError::InvalidOrigin(format!("{origin_url}: missing host")))?;

        let path = if ws_path.starts_with('/') {
            ws_path.to_string()
        } else {
            format!("/{ws_path}")
        };

        let uri: Uri = format!("{ws_scheme}://{authority}{path}")
            .parse()
            .map_err(|e| BridgeError::InvalidOrigin(format!("{origin_url}{path}: {e}")))?;

        Ok(Self { uri })
    }

    /// Returns the endpoint URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns `true` for `wss` endpoints.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.uri.scheme_str() == Some("wss")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn endpoint(origin: &str, path: &str) -> Endpoint {
        let Ok(ep) = Endpoint::from_origin(origin, path) else {
            panic!("expected {origin} to be accepted");
        };
        ep
    }

    #[test]
    fn http_origin_keeps_host_and_port() {
        let ep = endpoint("http://127.0.0.1:4242", "/ws");
        assert_eq!(ep.to_string(), "ws://127.0.0.1:4242/ws");
        assert!(!ep.is_secure());
    }

    #[test]
    fn https_origin_uses_secure_socket() {
        let ep = endpoint("https://console.example.com", "/ws");
        assert_eq!(ep.to_string(), "wss://console.example.com/ws");
        assert!(ep.is_secure());
    }

    #[test]
    fn origin_path_is_replaced() {
        let ep = endpoint("http://host:8080/servers/3/terminal", "socket");
        assert_eq!(ep.to_string(), "ws://host:8080/socket");
    }

    #[test]
    fn ws_schemes_pass_through() {
        assert_eq!(endpoint("ws://h:1", "/ws").to_string(), "ws://h:1/ws");
        assert_eq!(endpoint("WSS://h", "/ws").to_string(), "wss://h/ws");
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let Err(err) = Endpoint::from_origin("ftp://host", "/ws") else {
            panic!("ftp should be rejected");
        };
        assert!(matches!(err, BridgeError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[test]
    fn missing_scheme_is_rejected() {
        let Err(err) = Endpoint::from_origin("127.0.0.1:4242", "/ws") else {
            panic!("bare authority should be rejected");
        };
        assert!(matches!(err, BridgeError::InvalidOrigin(_)));
    }
}
