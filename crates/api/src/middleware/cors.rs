use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS for the editor front end: any origin, the methods the page routes
/// use, JSON bodies.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
