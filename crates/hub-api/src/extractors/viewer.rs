//! Viewer id extractor

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header naming the anonymous viewer behind a reaction
pub const VIEWER_ID_HEADER: &str = "x-viewer-id";

/// Raw `x-viewer-id` header value
///
/// Absent, blank or non-UTF-8 values become `None`; the service layer
/// substitutes the configured default viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerId(pub Option<String>);

impl ViewerId {
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ViewerId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let viewer = parts
            .headers
            .get(VIEWER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);

        Ok(ViewerId(viewer))
    }
}
