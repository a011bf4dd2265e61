//! Authentication handlers

use axum::{extract::State, Json};
use hub_service::dto::{LoginRequest, SessionInfoResponse, SessionResponse};
use hub_service::AuthService;

use crate::extractors::{Session, ValidatedJson, ViewerId};
use crate::response::ApiResult;
use crate::state::AppState;

/// Exchange the admin credentials for a session token
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Describe the role and viewer the request acts as
///
/// GET /auth/session
pub async fn session(
    State(state): State<AppState>,
    session: Session,
    viewer: ViewerId,
) -> Json<SessionInfoResponse> {
    let service = AuthService::new(state.service_context());
    Json(service.session(session.claims.as_ref(), viewer.as_deref()))
}
