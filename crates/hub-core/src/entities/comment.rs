//! Comment entity - a visitor's note on an event or news post

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{CommentTarget, EntityId, ItemRef, ItemType};

use super::ReactionCounts;

/// Comment entity
///
/// Comments are reactable themselves, so they carry their own aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: EntityId,
    pub item_id: EntityId,
    pub item_type: CommentTarget,
    pub author: String,
    pub text: String,
    pub created_date: NaiveDate,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment dated today (UTC)
    pub fn new(item_id: EntityId, item_type: CommentTarget, author: String, text: String) -> Self {
        let now = Utc::now();
        Self::dated(item_id, item_type, author, text, now.date_naive())
    }

    /// Create a comment with an explicit date
    pub fn dated(
        item_id: EntityId,
        item_type: CommentTarget,
        author: String,
        text: String,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: EntityId::generate(),
            item_id,
            item_type,
            author,
            text,
            created_date,
            reactions: ReactionCounts::zero(),
            created_at: Utc::now(),
        }
    }

    /// The comment itself as a reactable item
    #[inline]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.id, ItemType::Comment)
    }

    /// The event or news post this comment belongs to
    #[inline]
    pub fn parent_ref(&self) -> ItemRef {
        ItemRef::new(self.item_id, self.item_type.into())
    }
}
