/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 10 * 1024 * 1024; // 10MB

// HTTP client defaults
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ACCEPT: &str = "application/x-mpegurl, text/plain, */*";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024; // 64MB
pub const DEFAULT_HTTPS_FALLBACK: bool = false;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn default_user_agent() -> String {
    format!("m3u-catalog/{}", env!("CARGO_PKG_VERSION"))
}
