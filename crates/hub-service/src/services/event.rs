//! Event service

use hub_common::Role;
use hub_core::entities::Event;
use hub_core::value_objects::{ItemRef, ItemType};
use hub_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{CreateEventRequest, EventResponse, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::require_admin;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All events, earliest date first
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> ServiceResult<Vec<EventResponse>> {
        let events = self.ctx.event_repo().list().await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: EntityId) -> ServiceResult<EventResponse> {
        let event = self.require_event(event_id).await?;
        Ok(EventResponse::from(event))
    }

    /// Create an event with zeroed reactions
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_event(
        &self,
        role: Role,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        require_admin(role, "create events")?;

        let mut event = Event::new(request.title, request.description, request.event_date);
        event.location = request.location;
        event.image_url = request.image_url;

        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, event_date = %event.event_date, "Event created");

        Ok(EventResponse::from(event))
    }

    /// Update event fields; reaction counters are never touched
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        role: Role,
        event_id: EntityId,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        require_admin(role, "update events")?;

        let mut event = self.require_event(event_id).await?;
        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(event_date) = request.event_date {
            event.event_date = event_date;
        }
        if let Some(location) = request.location {
            event.location = location;
        }
        if let Some(image_url) = request.image_url {
            event.image_url = image_url;
        }

        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event_id, "Event updated");

        Ok(EventResponse::from(event))
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, role: Role, event_id: EntityId) -> ServiceResult<()> {
        require_admin(role, "delete events")?;

        self.ctx.event_repo().delete(event_id).await?;

        info!(event_id = %event_id, "Event deleted");

        Ok(())
    }

    async fn require_event(&self, event_id: EntityId) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(ItemRef::new(event_id, ItemType::Event)).into())
    }
}
