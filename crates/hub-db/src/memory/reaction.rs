//! Reaction ledger on the memory store

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use hub_core::entities::{ReactionCounts, ReactionKey, UserReaction};
use hub_core::error::DomainError;
use hub_core::ledger::{transition, AppliedReaction, ReactionChange};
use hub_core::traits::{ReactionRepository, RepoResult};
use hub_core::value_objects::{ItemRef, ReactionKind};

use super::MemoryStore;

#[async_trait]
impl ReactionRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find(&self, key: &ReactionKey) -> RepoResult<Option<UserReaction>> {
        Ok(self.state.lock().reactions.get(key).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_item(&self, item: ItemRef) -> RepoResult<Vec<UserReaction>> {
        let mut rows: Vec<UserReaction> = self
            .state
            .lock()
            .reactions
            .values()
            .filter(|r| r.item() == item)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn counts(&self, item: ItemRef) -> RepoResult<ReactionCounts> {
        let mut state = self.state.lock();
        state
            .counts_mut(item)
            .map(|counts| *counts)
            .ok_or(DomainError::ItemNotFound(item))
    }

    #[instrument(skip(self), fields(user_id = %key.user_id, item = %key.item))]
    async fn apply(&self, key: &ReactionKey, kind: ReactionKind) -> RepoResult<AppliedReaction> {
        let mut state = self.state.lock();

        let current = *state
            .counts_mut(key.item)
            .ok_or(DomainError::ItemNotFound(key.item))?;
        let existing = state.reactions.get(key).map(|r| r.reaction_type);

        let applied = transition(existing, kind, current);
        match applied.change {
            ReactionChange::Added { kind } => {
                state
                    .reactions
                    .insert(key.clone(), UserReaction::new(key, kind));
            }
            ReactionChange::Removed { .. } => {
                state.reactions.remove(key);
            }
            ReactionChange::Switched { to, .. } => {
                if let Some(row) = state.reactions.get_mut(key) {
                    row.reaction_type = to;
                    row.updated_at = Utc::now();
                }
            }
        }
        if let Some(counts) = state.counts_mut(key.item) {
            *counts = applied.reactions;
        }

        debug!(change = ?applied.change, "Reaction applied");
        Ok(applied)
    }

    #[instrument(skip(self))]
    async fn recount(&self, item: ItemRef) -> RepoResult<ReactionCounts> {
        let mut state = self.state.lock();
        let kinds: Vec<ReactionKind> = state
            .reactions
            .values()
            .filter(|r| r.item() == item)
            .map(|r| r.reaction_type)
            .collect();
        let tallied = ReactionCounts::tally(&kinds);

        let counts = state
            .counts_mut(item)
            .ok_or(DomainError::ItemNotFound(item))?;
        *counts = tallied;
        Ok(tallied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use chrono::NaiveDate;
    use hub_core::entities::{Comment, Event};
    use hub_core::traits::{CommentRepository, EventRepository};
    use hub_core::value_objects::{CommentTarget, EntityId, ItemType};

    async fn store_with_event() -> (Arc<MemoryStore>, ItemRef) {
        let store = MemoryStore::shared();
        let event = Event::new(
            "Reunion".to_string(),
            String::new(),
            NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
        );
        EventRepository::create(store.as_ref(), &event).await.unwrap();
        (store, event.item_ref())
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let (store, item) = store_with_event().await;
        let key = ReactionKey::new("guest", item);

        let first = store.apply(&key, ReactionKind::Heart).await.unwrap();
        assert_eq!(first.reactions.heart, 1);
        assert!(store.find(&key).await.unwrap().is_some());

        let second = store.apply(&key, ReactionKind::Heart).await.unwrap();
        assert_eq!(second.reactions, ReactionCounts::zero());
        assert!(store.find(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_switch_moves_one_count() {
        let (store, item) = store_with_event().await;
        let key = ReactionKey::new("guest", item);

        store.apply(&key, ReactionKind::Like).await.unwrap();
        let switched = store.apply(&key, ReactionKind::Smile).await.unwrap();

        assert_eq!(switched.reactions.like, 0);
        assert_eq!(switched.reactions.smile, 1);
        assert_eq!(ReactionRepository::find_by_item(store.as_ref(), item).await.unwrap().len(), 1);
        assert_eq!(
            store.find(&key).await.unwrap().map(|r| r.reaction_type),
            Some(ReactionKind::Smile)
        );
    }

    #[tokio::test]
    async fn test_counts_equal_ledger_for_many_viewers() {
        let (store, item) = store_with_event().await;
        let kinds = [
            ReactionKind::Like,
            ReactionKind::Like,
            ReactionKind::Heart,
            ReactionKind::Celebrate,
        ];
        for (viewer, kind) in kinds.iter().enumerate() {
            let key = ReactionKey::new(format!("viewer-{viewer}"), item);
            store.apply(&key, *kind).await.unwrap();
        }

        let counts = store.counts(item).await.unwrap();
        let ledger: Vec<ReactionKind> = ReactionRepository::find_by_item(store.as_ref(), item)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.reaction_type)
            .collect();
        assert_eq!(counts, ReactionCounts::tally(&ledger));
        assert_eq!(counts.like, 2);
    }

    #[tokio::test]
    async fn test_missing_item_is_not_found_and_untouched() {
        let store = MemoryStore::shared();
        let item = ItemRef::new(EntityId::generate(), ItemType::News);
        let key = ReactionKey::new("guest", item);

        let err = store.apply(&key, ReactionKind::Like).await.unwrap_err();
        assert!(matches!(err, DomainError::ItemNotFound(i) if i == item));
        assert!(store.find(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recount_repairs_drift() {
        let (store, item) = store_with_event().await;
        let key = ReactionKey::new("guest", item);
        store.apply(&key, ReactionKind::Celebrate).await.unwrap();

        // Simulate drift from an older writer
        if let Some(counts) = store.state.lock().counts_mut(item) {
            counts.celebrate = 7;
            counts.like = 2;
        }

        let repaired = store.recount(item).await.unwrap();
        assert_eq!(repaired.celebrate, 1);
        assert_eq!(repaired.like, 0);
        assert_eq!(store.counts(item).await.unwrap(), repaired);
    }

    #[tokio::test]
    async fn test_comment_reactions_survive_comment_delete() {
        let store = MemoryStore::shared();
        let comment = Comment::new(
            EntityId::generate(),
            CommentTarget::Event,
            "Sam".to_string(),
            "Hi".to_string(),
        );
        CommentRepository::create(store.as_ref(), &comment).await.unwrap();
        let key = ReactionKey::new("guest", comment.item_ref());
        store.apply(&key, ReactionKind::Like).await.unwrap();

        CommentRepository::delete(store.as_ref(), comment.id).await.unwrap();

        // No cascade: the ledger row stays behind
        assert!(store.find(&key).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_keep_counts_consistent() {
        let (store, item) = store_with_event().await;

        let mut handles = Vec::new();
        for viewer in 0..8 {
            for _ in 0..24 {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    let key = ReactionKey::new(format!("viewer-{viewer}"), item);
                    store.apply(&key, ReactionKind::Like).await
                }));
            }
        }
        for result in futures::future::join_all(handles).await {
            result.unwrap().unwrap();
        }

        // Every viewer toggled an even number of times, so all end up off
        let counts = store.counts(item).await.unwrap();
        assert_eq!(counts, ReactionCounts::zero());
        assert!(ReactionRepository::find_by_item(store.as_ref(), item).await.unwrap().is_empty());
    }
}
