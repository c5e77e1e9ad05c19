use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// CORS policy that admits every origin. No credentials are involved, so the
/// wildcard is sent as-is.
pub fn any_origin_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
