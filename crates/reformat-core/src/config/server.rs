//! Server and CORS configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Time allowed to fully receive a request, in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// Time allowed to produce and write a response, in seconds.
    /// Longer than the read timeout to accommodate conversion latency.
    #[serde(default = "default_write_timeout")]
    pub write_timeout_seconds: u64,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout_seconds: default_read_timeout(),
            write_timeout_seconds: default_write_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
///
/// The service answers preflight `OPTIONS` requests with permissive headers
/// restricted to the single configured origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// The single allowed origin (`"*"` for development only).
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Allowed HTTP methods.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    /// Allowed HTTP headers.
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache in seconds.
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            max_age_seconds: default_max_age(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_read_timeout() -> u64 {
    10
}

fn default_write_timeout() -> u64 {
    30
}

fn default_allowed_origin() -> String {
    "*".to_string()
}

fn default_allowed_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "OPTIONS".to_string(),
    ]
}

fn default_allowed_headers() -> Vec<String> {
    vec!["Content-Type".to_string()]
}

fn default_max_age() -> u64 {
    3600
}
