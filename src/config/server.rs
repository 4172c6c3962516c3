/// HTTP server configuration.
/// 
/// Defaults for the bind address and the public paths, plus the environment
/// variables that may override them at startup.
use log::warn;

/// Default interface the HTTP server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP port.
pub const DEFAULT_PORT: u16 = 5050;

/// Environment variable overriding the bind interface.
pub const HOST_ENV: &str = "RPS_HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "RPS_PORT";

/// Path of the real-time WebSocket endpoint.
pub const WS_PATH: &str = "/real-time";

/// Path of the HTTP trigger broadcasting a screen change to every client.
pub const CHANGE_SCREEN_PATH: &str = "/change-screen";

/// Interval (in seconds) between server pings on every WebSocket connection.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 5;

/// Time (in seconds) without any client frame before a connection is dropped.
pub const CLIENT_TIMEOUT_SECS: u64 = 10;

/// Resolved bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    pub host: String,
    pub port: u16,
}

impl BindConfig {
    /// Read the bind address from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_values(std::env::var(HOST_ENV).ok(), std::env::var(PORT_ENV).ok())
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let host = host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match port {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("[Config] Ignoring invalid {}={:?}, using {}", PORT_ENV, raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        Self { host, port }
    }
}
