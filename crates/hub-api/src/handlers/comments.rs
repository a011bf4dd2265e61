//! Comment thread handlers

use axum::{extract::State, Json};
use hub_service::dto::{AddCommentRequest, CommentResponse, ItemQuery};
use hub_service::CommentService;

use crate::extractors::{CommentPath, IdPath, Session, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comments on an event or news item, oldest first
///
/// GET /comments?item_type=&item_id=
pub async fn list_comments(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ItemQuery>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(query).await?))
}

/// Open to guests; author and text must not be blank
///
/// POST /comments
pub async fn add_comment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AddCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.add_comment(request).await?;
    Ok(Created(Json(comment)))
}

/// DELETE /comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<CommentPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(session.role, path.comment_id).await?;
    Ok(NoContent)
}
