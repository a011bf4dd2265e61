//! PostgreSQL implementations of EventRepository and NewsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::entities::{Event, News};
use hub_core::traits::{EventRepository, NewsRepository, RepoResult};
use hub_core::value_objects::{EntityId, ItemRef, ItemType};

use crate::models::{EventModel, NewsModel, ReactionCountsModel};

use super::error::{item_not_found, map_db_error};

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r#"
            SELECT id, title, description, event_date, location, image_url,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let results = sqlx::query_as::<_, EventModel>(
            r#"
            SELECT id, title, description, event_date, location, image_url,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM events
            ORDER BY event_date ASC, seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        let counts = ReactionCountsModel::from(event.reactions);

        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, event_date, location, image_url,
                                like_count, smile_count, heart_count, celebrate_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.location.as_deref())
        .bind(event.image_url.as_deref())
        .bind(counts.like_count)
        .bind(counts.smile_count)
        .bind(counts.heart_count)
        .bind(counts.celebrate_count)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, event_date = $4, location = $5, image_url = $6
            WHERE id = $1
            "#,
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.location.as_deref())
        .bind(event.image_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(ItemRef::new(event.id, ItemType::Event)));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM events WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(ItemRef::new(id, ItemType::Event)));
        }

        Ok(())
    }
}

/// PostgreSQL implementation of NewsRepository
#[derive(Clone)]
pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    /// Create a new PgNewsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<News>> {
        let result = sqlx::query_as::<_, NewsModel>(
            r#"
            SELECT id, title, content, published_date, image_url,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(News::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<News>> {
        let results = sqlx::query_as::<_, NewsModel>(
            r#"
            SELECT id, title, content, published_date, image_url,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM news
            ORDER BY published_date DESC, seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(News::from).collect())
    }

    #[instrument(skip(self, news), fields(news_id = %news.id))]
    async fn create(&self, news: &News) -> RepoResult<()> {
        let counts = ReactionCountsModel::from(news.reactions);

        sqlx::query(
            r#"
            INSERT INTO news (id, title, content, published_date, image_url,
                              like_count, smile_count, heart_count, celebrate_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(news.id.into_inner())
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.published_date)
        .bind(news.image_url.as_deref())
        .bind(counts.like_count)
        .bind(counts.smile_count)
        .bind(counts.heart_count)
        .bind(counts.celebrate_count)
        .bind(news.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, news), fields(news_id = %news.id))]
    async fn update(&self, news: &News) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE news
            SET title = $2, content = $3, published_date = $4, image_url = $5
            WHERE id = $1
            "#,
        )
        .bind(news.id.into_inner())
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.published_date)
        .bind(news.image_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(ItemRef::new(news.id, ItemType::News)));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM news WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(item_not_found(ItemRef::new(id, ItemType::News)));
        }

        Ok(())
    }
}
