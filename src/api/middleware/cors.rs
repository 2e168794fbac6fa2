//! Cross-origin policy for browser clients.

use tower_http::cors::{Any, CorsLayer};

/// Creates a CORS layer allowing any origin, method and header.
///
/// Preflight requests are answered by the layer.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
