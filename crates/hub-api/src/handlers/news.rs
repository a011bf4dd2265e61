//! News handlers

use axum::{extract::State, Json};
use hub_service::dto::{CreateNewsRequest, NewsResponse, UpdateNewsRequest};
use hub_service::NewsService;

use crate::extractors::{IdPath, NewsPath, Session, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /news
pub async fn list_news(State(state): State<AppState>) -> ApiResult<Json<Vec<NewsResponse>>> {
    let service = NewsService::new(state.service_context());
    Ok(Json(service.list_news().await?))
}

/// POST /news
pub async fn create_news(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateNewsRequest>,
) -> ApiResult<Created<Json<NewsResponse>>> {
    let service = NewsService::new(state.service_context());
    let news = service.create_news(session.role, request).await?;
    Ok(Created(Json(news)))
}

/// GET /news/:news_id
pub async fn get_news(
    State(state): State<AppState>,
    IdPath(path): IdPath<NewsPath>,
) -> ApiResult<Json<NewsResponse>> {
    let service = NewsService::new(state.service_context());
    Ok(Json(service.get_news(path.news_id).await?))
}

/// PATCH /news/:news_id
pub async fn update_news(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<NewsPath>,
    ValidatedJson(request): ValidatedJson<UpdateNewsRequest>,
) -> ApiResult<Json<NewsResponse>> {
    let service = NewsService::new(state.service_context());
    let news = service
        .update_news(session.role, path.news_id, request)
        .await?;
    Ok(Json(news))
}

/// DELETE /news/:news_id
pub async fn delete_news(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<NewsPath>,
) -> ApiResult<NoContent> {
    let service = NewsService::new(state.service_context());
    service.delete_news(session.role, path.news_id).await?;
    Ok(NoContent)
}
