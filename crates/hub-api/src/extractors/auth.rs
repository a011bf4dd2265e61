//! Session extractor
//!
//! Reads an optional bearer token. Requests without one act as guests;
//! a token that is present but invalid is rejected.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use hub_common::{Claims, Role};

use crate::response::ApiError;
use crate::state::AppState;

/// The capability a request acts under
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub role: Role,
    pub claims: Option<Claims>,
}

impl Session {
    /// A request without a token
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    fn from_claims(claims: Claims) -> Self {
        Self {
            role: claims.role,
            claims: Some(claims),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(rejection)
                if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) =>
            {
                return Ok(Session::guest());
            }
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Malformed authorization header");
                return Err(ApiError::InvalidAuthFormat);
            }
        };

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .jwt_service()
            .decode_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid session token");
                ApiError::App(e)
            })?;

        Ok(Session::from_claims(claims))
    }
}
