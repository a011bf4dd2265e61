//! Event, news and comment repositories on the memory store

use std::cmp::Reverse;

use async_trait::async_trait;
use tracing::instrument;

use hub_core::entities::{Comment, Event, News};
use hub_core::error::DomainError;
use hub_core::traits::{CommentRepository, EventRepository, NewsRepository, RepoResult};
use hub_core::value_objects::{CommentTarget, EntityId, ItemRef, ItemType};

use super::MemoryStore;

#[async_trait]
impl EventRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Event>> {
        let state = self.state.lock();
        Ok(state.events.iter().find(|e| e.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let mut events = self.state.lock().events.clone();
        // Stable sort keeps insertion order on equal dates
        events.sort_by_key(|e| e.event_date);
        Ok(events)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        self.state.lock().events.push(event.clone());
        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| DomainError::ItemNotFound(ItemRef::new(event.id, ItemType::Event)))?;

        stored.title.clone_from(&event.title);
        stored.description.clone_from(&event.description);
        stored.event_date = event.event_date;
        stored.location.clone_from(&event.location);
        stored.image_url.clone_from(&event.image_url);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Err(DomainError::ItemNotFound(ItemRef::new(id, ItemType::Event)));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<News>> {
        let state = self.state.lock();
        Ok(state.news.iter().find(|n| n.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<News>> {
        let mut news = self.state.lock().news.clone();
        news.sort_by_key(|n| Reverse(n.published_date));
        Ok(news)
    }

    #[instrument(skip(self, news), fields(news_id = %news.id))]
    async fn create(&self, news: &News) -> RepoResult<()> {
        self.state.lock().news.push(news.clone());
        Ok(())
    }

    #[instrument(skip(self, news), fields(news_id = %news.id))]
    async fn update(&self, news: &News) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .news
            .iter_mut()
            .find(|n| n.id == news.id)
            .ok_or_else(|| DomainError::ItemNotFound(ItemRef::new(news.id, ItemType::News)))?;

        stored.title.clone_from(&news.title);
        stored.content.clone_from(&news.content);
        stored.published_date = news.published_date;
        stored.image_url.clone_from(&news.image_url);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.news.len();
        state.news.retain(|n| n.id != id);
        if state.news.len() == before {
            return Err(DomainError::ItemNotFound(ItemRef::new(id, ItemType::News)));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let state = self.state.lock();
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_item(
        &self,
        item_id: EntityId,
        item_type: CommentTarget,
    ) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .state
            .lock()
            .comments
            .iter()
            .filter(|c| c.item_id == item_id && c.item_type == item_type)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_date);
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.state.lock().comments.push(comment.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        if state.comments.len() == before {
            return Err(DomainError::CommentNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_comments_sorted_by_date_then_insertion() {
        let store = MemoryStore::new();
        let event_id = EntityId::generate();
        let inputs = [
            ("first", date(2026, 1, 1)),
            ("second", date(2025, 12, 26)),
            ("third", date(2026, 1, 7)),
            ("fourth", date(2026, 1, 1)),
        ];
        for (text, created) in inputs {
            let comment = Comment::dated(
                event_id,
                CommentTarget::Event,
                "Sam".to_string(),
                text.to_string(),
                created,
            );
            CommentRepository::create(&store, &comment).await.unwrap();
        }
        // A comment on another item must not leak in
        let other = Comment::new(
            EntityId::generate(),
            CommentTarget::Event,
            "Sam".to_string(),
            "elsewhere".to_string(),
        );
        CommentRepository::create(&store, &other).await.unwrap();

        let texts: Vec<String> = store
            .find_by_item(event_id, CommentTarget::Event)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["second", "first", "fourth", "third"]);
    }

    #[tokio::test]
    async fn test_comment_thread_separates_item_types() {
        let store = MemoryStore::new();
        let shared_id = EntityId::generate();
        let on_news = Comment::new(shared_id, CommentTarget::News, "A".to_string(), "n".to_string());
        CommentRepository::create(&store, &on_news).await.unwrap();

        assert!(store
            .find_by_item(shared_id, CommentTarget::Event)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .find_by_item(shared_id, CommentTarget::News)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let store = MemoryStore::new();
        let err = CommentRepository::delete(&store, EntityId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CommentNotFound(_)));
    }

    #[tokio::test]
    async fn test_event_and_news_ordering() {
        let store = MemoryStore::new();
        for (title, d) in [("b", date(2026, 3, 1)), ("a", date(2026, 1, 1))] {
            let event = Event::new(title.to_string(), String::new(), d);
            EventRepository::create(&store, &event).await.unwrap();
            let news = News::new(title.to_string(), String::new(), d);
            NewsRepository::create(&store, &news).await.unwrap();
        }

        let events = EventRepository::list(&store).await.unwrap();
        assert_eq!(events[0].title, "a");
        let news = NewsRepository::list(&store).await.unwrap();
        assert_eq!(news[0].title, "b");
    }

    #[tokio::test]
    async fn test_update_keeps_reactions() {
        let store = MemoryStore::new();
        let mut event = Event::new("Picnic".to_string(), String::new(), date(2026, 6, 1));
        EventRepository::create(&store, &event).await.unwrap();
        store
            .state
            .lock()
            .events
            .iter_mut()
            .for_each(|e| e.reactions.like = 3);

        event.title = "Picnic (moved)".to_string();
        EventRepository::update(&store, &event).await.unwrap();

        let stored = EventRepository::find_by_id(&store, event.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "Picnic (moved)");
        assert_eq!(stored.reactions.like, 3);
    }
}
