//! Event and news entities - the two top-level reactable, commentable items

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{EntityId, ItemRef, ItemType};

use super::ReactionCounts;

/// A family event (birthday, reunion, trip)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new Event with zeroed reactions
    pub fn new(title: String, description: String, event_date: NaiveDate) -> Self {
        Self {
            id: EntityId::generate(),
            title,
            description,
            event_date,
            location: None,
            image_url: None,
            reactions: ReactionCounts::zero(),
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.id, ItemType::Event)
    }
}

/// A news post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

impl News {
    /// Create a new News post with zeroed reactions
    pub fn new(title: String, content: String, published_date: NaiveDate) -> Self {
        Self {
            id: EntityId::generate(),
            title,
            content,
            published_date,
            image_url: None,
            reactions: ReactionCounts::zero(),
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.id, ItemType::News)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_items_start_without_reactions() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let event = Event::new("Reunion".to_string(), "At the lake".to_string(), date);
        let news = News::new("Baby!".to_string(), "Welcome".to_string(), date);
        assert_eq!(event.reactions.total(), 0);
        assert_eq!(news.reactions.total(), 0);
        assert_eq!(event.item_ref().item_type, ItemType::Event);
        assert_eq!(news.item_ref().item_type, ItemType::News);
    }
}
