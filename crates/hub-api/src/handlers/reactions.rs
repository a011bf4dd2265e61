//! Reaction handlers
//!
//! Viewers are identified by the `x-viewer-id` header, not by session.

use axum::{extract::State, Json};
use hub_service::dto::{
    ApplyReactionRequest, ItemQuery, MyReactionResponse, ReactionResponse, RecountResponse,
};
use hub_service::ReactionService;

use crate::extractors::{Session, ValidatedJson, ValidatedQuery, ViewerId};
use crate::response::ApiResult;
use crate::state::AppState;

/// Add, toggle off or switch the viewer's reaction
///
/// PUT /reactions
pub async fn apply_reaction(
    State(state): State<AppState>,
    viewer: ViewerId,
    ValidatedJson(request): ValidatedJson<ApplyReactionRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service.apply(viewer.as_deref(), request).await?;
    Ok(Json(response))
}

/// GET /reactions/me?item_type=&item_id=
pub async fn my_reaction(
    State(state): State<AppState>,
    viewer: ViewerId,
    ValidatedQuery(query): ValidatedQuery<ItemQuery>,
) -> ApiResult<Json<MyReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.my_reaction(viewer.as_deref(), query).await?))
}

/// Rebuild an item's counters from the ledger
///
/// POST /reactions/recount
pub async fn recount(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(query): ValidatedJson<ItemQuery>,
) -> ApiResult<Json<RecountResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.recount(session.role, query).await?))
}
