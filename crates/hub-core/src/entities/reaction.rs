//! Reaction entities - a viewer's active reaction and the per-item aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EntityId, ItemRef, ItemType, ReactionKind};

/// One viewer's currently active reaction on one item (a ledger row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReaction {
    pub id: EntityId,
    pub user_id: String,
    pub item_id: EntityId,
    pub item_type: ItemType,
    pub reaction_type: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserReaction {
    /// Create a new ledger row for `key`
    pub fn new(key: &ReactionKey, reaction_type: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            user_id: key.user_id.clone(),
            item_id: key.item.item_id,
            item_type: key.item.item_type,
            reaction_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// The item this reaction points at
    #[inline]
    pub fn item(&self) -> ItemRef {
        ItemRef::new(self.item_id, self.item_type)
    }

    /// Check if this row belongs to `key`
    pub fn matches(&self, key: &ReactionKey) -> bool {
        self.user_id == key.user_id && self.item() == key.item
    }
}

/// Uniqueness key of the ledger: one active reaction per viewer per item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReactionKey {
    pub user_id: String,
    pub item: ItemRef,
}

impl ReactionKey {
    pub fn new(user_id: impl Into<String>, item: ItemRef) -> Self {
        Self {
            user_id: user_id.into(),
            item,
        }
    }
}

/// Denormalized per-kind reaction counters stored on every item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like: u32,
    pub smile: u32,
    pub heart: u32,
    pub celebrate: u32,
}

impl ReactionCounts {
    /// All counters at zero
    pub const fn zero() -> Self {
        Self {
            like: 0,
            smile: 0,
            heart: 0,
            celebrate: 0,
        }
    }

    /// Counter for one kind
    pub const fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Smile => self.smile,
            ReactionKind::Heart => self.heart,
            ReactionKind::Celebrate => self.celebrate,
        }
    }

    fn slot(&mut self, kind: ReactionKind) -> &mut u32 {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Smile => &mut self.smile,
            ReactionKind::Heart => &mut self.heart,
            ReactionKind::Celebrate => &mut self.celebrate,
        }
    }

    /// Add one to a kind's counter
    pub fn increment(&mut self, kind: ReactionKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(1);
    }

    /// Remove one from a kind's counter, never going below zero
    pub fn decrement(&mut self, kind: ReactionKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_sub(1);
    }

    /// Sum over all kinds
    pub fn total(&self) -> u64 {
        ReactionKind::ALL
            .iter()
            .map(|kind| u64::from(self.get(*kind)))
            .sum()
    }

    /// Tally a set of ledger rows into counters
    pub fn tally<'a>(kinds: impl IntoIterator<Item = &'a ReactionKind>) -> Self {
        kinds.into_iter().fold(Self::zero(), |mut counts, kind| {
            counts.increment(*kind);
            counts
        })
    }
}
