//! CORS layer configuration.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use reformat_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Preflight `OPTIONS` requests are answered by the layer itself; actual
/// requests get the configured origin echoed back.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origin == "*" {
        layer = layer.allow_origin(Any);
    } else if let Ok(origin) = config.allowed_origin.parse::<HeaderValue>() {
        layer = layer.allow_origin(origin);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
