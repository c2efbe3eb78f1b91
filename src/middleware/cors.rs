//! Middleware de CORS
//!
//! La lista de orígenes viene de la configuración; "*" habilita el modo
//! permisivo de desarrollo.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new();
    for origin in origins {
        if let Ok(value) = HeaderValue::from_str(origin) {
            cors = cors.allow_origin(value);
        } else {
            log::warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
        }
    }

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        HeaderName::from_static("authorization"),
        HeaderName::from_static("content-type"),
        HeaderName::from_static("accept"),
    ])
    .allow_credentials(true)
    .max_age(std::time::Duration::from_secs(3600))
}
