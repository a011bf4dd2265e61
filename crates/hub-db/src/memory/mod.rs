//! In-process storage backend
//!
//! One `MemoryStore` implements every repository trait over a single
//! mutex-guarded state. Reaction application holds the lock across its
//! read-decide-write sequence, giving the same atomicity as the
//! PostgreSQL transaction. Rows are kept in `Vec`s in insertion order so
//! listings and tie-breaks match the `seq` ordering of the SQL backend.

mod content;
mod family;
mod reaction;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use hub_core::entities::{
    Comment, Event, Family, FamilyNode, News, ReactionCounts, ReactionKey, UserReaction,
};
use hub_core::value_objects::{ItemRef, ItemType};

#[derive(Debug, Default)]
struct State {
    families: Vec<Family>,
    nodes: Vec<FamilyNode>,
    events: Vec<Event>,
    news: Vec<News>,
    comments: Vec<Comment>,
    reactions: HashMap<ReactionKey, UserReaction>,
}

impl State {
    /// Mutable access to the counters of any reactable item
    fn counts_mut(&mut self, item: ItemRef) -> Option<&mut ReactionCounts> {
        let id = item.item_id;
        match item.item_type {
            ItemType::Event => self
                .events
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.reactions),
            ItemType::News => self
                .news
                .iter_mut()
                .find(|n| n.id == id)
                .map(|n| &mut n.reactions),
            ItemType::Comment => self
                .comments
                .iter_mut()
                .find(|c| c.id == id)
                .map(|c| &mut c.reactions),
        }
    }
}

/// Thread-safe in-memory implementation of all repositories
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store behind an `Arc`, ready to hand out as trait objects
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}
