//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::entities::Comment;
use hub_core::traits::{CommentRepository, RepoResult};
use hub_core::value_objects::{CommentTarget, EntityId};

use crate::models::{CommentModel, ReactionCountsModel};

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, item_id, item_type, author, text, created_date,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Comment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_item(
        &self,
        item_id: EntityId,
        item_type: CommentTarget,
    ) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, item_id, item_type, author, text, created_date,
                   like_count, smile_count, heart_count, celebrate_count, created_at
            FROM comments
            WHERE item_id = $1 AND item_type = $2
            ORDER BY created_date ASC, seq ASC
            "#,
        )
        .bind(item_id.into_inner())
        .bind(item_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Comment::try_from).collect()
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, item_id = %comment.item_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let counts = ReactionCountsModel::from(comment.reactions);

        sqlx::query(
            r#"
            INSERT INTO comments (id, item_id, item_type, author, text, created_date,
                                  like_count, smile_count, heart_count, celebrate_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.item_id.into_inner())
        .bind(comment.item_type.as_str())
        .bind(&comment.author)
        .bind(&comment.text)
        .bind(comment.created_date)
        .bind(counts.like_count)
        .bind(counts.smile_count)
        .bind(counts.heart_count)
        .bind(counts.celebrate_count)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}
