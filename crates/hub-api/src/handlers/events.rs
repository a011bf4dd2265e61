//! Event handlers

use axum::{extract::State, Json};
use hub_service::dto::{CreateEventRequest, EventResponse, UpdateEventRequest};
use hub_service::EventService;

use crate::extractors::{EventPath, IdPath, Session, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.list_events().await?))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let event = service.create_event(session.role, request).await?;
    Ok(Created(Json(event)))
}

/// GET /events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    IdPath(path): IdPath<EventPath>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.get_event(path.event_id).await?))
}

/// PATCH /events/:event_id
pub async fn update_event(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<EventPath>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let event = service
        .update_event(session.role, path.event_id, request)
        .await?;
    Ok(Json(event))
}

/// DELETE /events/:event_id
pub async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<EventPath>,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(session.role, path.event_id).await?;
    Ok(NoContent)
}
