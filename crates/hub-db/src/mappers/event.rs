//! Event and news entity <-> model mappers

use hub_core::entities::{Event, News};
use hub_core::value_objects::EntityId;

use crate::models::{EventModel, NewsModel};

impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: EntityId::from_uuid(model.id),
            title: model.title,
            description: model.description,
            event_date: model.event_date,
            location: model.location,
            image_url: model.image_url,
            reactions: model.counts.into(),
            created_at: model.created_at,
        }
    }
}

impl From<NewsModel> for News {
    fn from(model: NewsModel) -> Self {
        News {
            id: EntityId::from_uuid(model.id),
            title: model.title,
            content: model.content,
            published_date: model.published_date,
            image_url: model.image_url,
            reactions: model.counts.into(),
            created_at: model.created_at,
        }
    }
}
