//! Path parameter extractors
//!
//! Ids in paths are UUID strings; anything else is a 400.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use hub_core::EntityId;
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// Path extractor that renders rejections in the API error envelope
#[derive(Debug, Clone)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(IdPath(inner))
    }
}

/// `/families/:family_id`
#[derive(Debug, Deserialize)]
pub struct FamilyPath {
    pub family_id: EntityId,
}

/// `/families/:family_id/members/:node_id`
#[derive(Debug, Deserialize)]
pub struct MemberPath {
    pub family_id: EntityId,
    pub node_id: EntityId,
}

/// `/events/:event_id`
#[derive(Debug, Deserialize)]
pub struct EventPath {
    pub event_id: EntityId,
}

/// `/news/:news_id`
#[derive(Debug, Deserialize)]
pub struct NewsPath {
    pub news_id: EntityId,
}

/// `/comments/:comment_id`
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub comment_id: EntityId,
}
