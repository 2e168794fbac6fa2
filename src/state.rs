use std::sync::Arc;

use crate::application::services::LinkService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Prefix of issued short URLs, e.g. `https://sntg.it`.
    pub base_url: String,
    /// Where unresolvable codes are redirected.
    pub not_found_url: String,
    /// Whether creation checks `originalUrl` against the URL pattern.
    pub validate_url_syntax: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        base_url: impl Into<String>,
        not_found_url: impl Into<String>,
        validate_url_syntax: bool,
    ) -> Self {
        Self {
            link_service,
            base_url: base_url.into(),
            not_found_url: not_found_url.into(),
            validate_url_syntax,
        }
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
