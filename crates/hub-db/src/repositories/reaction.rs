//! PostgreSQL implementation of ReactionRepository
//!
//! `apply` and `recount` run in one transaction that first locks the item
//! row, so concurrent reactions on the same item are serialized and the
//! ledger and the counters always move together.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use hub_core::entities::{ReactionCounts, ReactionKey, UserReaction};
use hub_core::error::DomainError;
use hub_core::ledger::{transition, AppliedReaction, ReactionChange};
use hub_core::traits::{ReactionRepository, RepoResult};
use hub_core::value_objects::{ItemRef, ItemType, ReactionKind};

use crate::models::{ReactionCountsModel, UserReactionModel};

use super::error::{item_not_found, map_db_error, map_unique_violation};

/// Table holding the counters for an item type
const fn item_table(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Event => "events",
        ItemType::News => "news",
        ItemType::Comment => "comments",
    }
}

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the item row and read its counters
    async fn lock_counts(conn: &mut PgConnection, item: ItemRef) -> RepoResult<ReactionCounts> {
        let sql = format!(
            "SELECT like_count, smile_count, heart_count, celebrate_count FROM {} WHERE id = $1 FOR UPDATE",
            item_table(item.item_type)
        );

        let counts = sqlx::query_as::<_, ReactionCountsModel>(&sql)
            .bind(item.item_id.into_inner())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        counts.map(ReactionCounts::from).ok_or_else(|| item_not_found(item))
    }

    async fn store_counts(
        conn: &mut PgConnection,
        item: ItemRef,
        counts: ReactionCounts,
    ) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {} SET like_count = $2, smile_count = $3, heart_count = $4, celebrate_count = $5 WHERE id = $1",
            item_table(item.item_type)
        );
        let columns = ReactionCountsModel::from(counts);

        sqlx::query(&sql)
            .bind(item.item_id.into_inner())
            .bind(columns.like_count)
            .bind(columns.smile_count)
            .bind(columns.heart_count)
            .bind(columns.celebrate_count)
            .execute(&mut *conn)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    /// Write the ledger side of a decided change
    async fn write_ledger(
        conn: &mut PgConnection,
        key: &ReactionKey,
        change: ReactionChange,
    ) -> RepoResult<()> {
        let item_id = key.item.item_id.into_inner();
        let item_type = key.item.item_type.as_str();

        match change {
            ReactionChange::Added { kind } => {
                let row = UserReaction::new(key, kind);
                sqlx::query(
                    r#"
                    INSERT INTO user_reactions (id, user_id, item_id, item_type, reaction_type,
                                                created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(row.id.into_inner())
                .bind(&row.user_id)
                .bind(item_id)
                .bind(item_type)
                .bind(kind.as_str())
                .bind(row.created_at)
                .bind(row.updated_at)
                .execute(&mut *conn)
                .await
                .map_err(|e| map_unique_violation(e, || DomainError::ReactionConflict))?;
            }
            ReactionChange::Removed { .. } => {
                sqlx::query(
                    r#"
                    DELETE FROM user_reactions
                    WHERE user_id = $1 AND item_id = $2 AND item_type = $3
                    "#,
                )
                .bind(&key.user_id)
                .bind(item_id)
                .bind(item_type)
                .execute(&mut *conn)
                .await
                .map_err(map_db_error)?;
            }
            ReactionChange::Switched { to, .. } => {
                sqlx::query(
                    r#"
                    UPDATE user_reactions
                    SET reaction_type = $4, updated_at = $5
                    WHERE user_id = $1 AND item_id = $2 AND item_type = $3
                    "#,
                )
                .bind(&key.user_id)
                .bind(item_id)
                .bind(item_type)
                .bind(to.as_str())
                .bind(Utc::now())
                .execute(&mut *conn)
                .await
                .map_err(map_db_error)?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, key: &ReactionKey) -> RepoResult<Option<UserReaction>> {
        let result = sqlx::query_as::<_, UserReactionModel>(
            r#"
            SELECT id, user_id, item_id, item_type, reaction_type, created_at, updated_at
            FROM user_reactions
            WHERE user_id = $1 AND item_id = $2 AND item_type = $3
            "#,
        )
        .bind(&key.user_id)
        .bind(key.item.item_id.into_inner())
        .bind(key.item.item_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(UserReaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_item(&self, item: ItemRef) -> RepoResult<Vec<UserReaction>> {
        let results = sqlx::query_as::<_, UserReactionModel>(
            r#"
            SELECT id, user_id, item_id, item_type, reaction_type, created_at, updated_at
            FROM user_reactions
            WHERE item_id = $1 AND item_type = $2
            ORDER BY created_at
            "#,
        )
        .bind(item.item_id.into_inner())
        .bind(item.item_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserReaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn counts(&self, item: ItemRef) -> RepoResult<ReactionCounts> {
        let sql = format!(
            "SELECT like_count, smile_count, heart_count, celebrate_count FROM {} WHERE id = $1",
            item_table(item.item_type)
        );

        let counts = sqlx::query_as::<_, ReactionCountsModel>(&sql)
            .bind(item.item_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        counts.map(ReactionCounts::from).ok_or_else(|| item_not_found(item))
    }

    #[instrument(skip(self), fields(user_id = %key.user_id, item = %key.item))]
    async fn apply(&self, key: &ReactionKey, kind: ReactionKind) -> RepoResult<AppliedReaction> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Dropping `tx` on an early return rolls back
        let counts = Self::lock_counts(&mut tx, key.item).await?;

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT reaction_type
            FROM user_reactions
            WHERE user_id = $1 AND item_id = $2 AND item_type = $3
            "#,
        )
        .bind(&key.user_id)
        .bind(key.item.item_id.into_inner())
        .bind(key.item.item_type.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|stored| stored.parse::<ReactionKind>())
        .transpose()
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let applied = transition(existing, kind, counts);
        Self::write_ledger(&mut tx, key, applied.change).await?;
        Self::store_counts(&mut tx, key.item, applied.reactions).await?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(change = ?applied.change, "Reaction applied");
        Ok(applied)
    }

    #[instrument(skip(self))]
    async fn recount(&self, item: ItemRef) -> RepoResult<ReactionCounts> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let stored = Self::lock_counts(&mut tx, item).await?;

        let kinds = sqlx::query_scalar::<_, String>(
            r#"
            SELECT reaction_type
            FROM user_reactions
            WHERE item_id = $1 AND item_type = $2
            "#,
        )
        .bind(item.item_id.into_inner())
        .bind(item.item_type.as_str())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .iter()
        .map(|stored| stored.parse::<ReactionKind>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        let counts = ReactionCounts::tally(&kinds);
        Self::store_counts(&mut tx, item, counts).await?;

        tx.commit().await.map_err(map_db_error)?;

        if counts != stored {
            debug!(before = ?stored, after = ?counts, "Reaction counters repaired");
        }
        Ok(counts)
    }
}
