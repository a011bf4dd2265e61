//! PostgreSQL implementations of FamilyRepository and FamilyNodeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::entities::{Family, FamilyNode};
use hub_core::error::DomainError;
use hub_core::traits::{FamilyNodeRepository, FamilyRepository, RepoResult};
use hub_core::tree::validate_structure;
use hub_core::value_objects::EntityId;

use crate::mappers::FamilyNodeRow;
use crate::models::{FamilyModel, FamilyNodeModel};

use super::error::{
    family_not_found, is_unique_violation_on, map_db_error, member_not_found, SINGLE_ROOT_INDEX,
};

/// PostgreSQL implementation of FamilyRepository
#[derive(Clone)]
pub struct PgFamilyRepository {
    pool: PgPool,
}

impl PgFamilyRepository {
    /// Create a new PgFamilyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FamilyRepository for PgFamilyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Family>> {
        let result = sqlx::query_as::<_, FamilyModel>(
            r#"
            SELECT id, name, image_url, created_at
            FROM families
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Family::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Family>> {
        let results = sqlx::query_as::<_, FamilyModel>(
            r#"
            SELECT id, name, image_url, created_at
            FROM families
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Family::from).collect())
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn create(&self, family: &Family) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO families (id, name, image_url, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(family.id.into_inner())
        .bind(&family.name)
        .bind(family.image_url.as_deref())
        .bind(family.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        // family_nodes cascade through the foreign key
        let result = sqlx::query(
            r#"
            DELETE FROM families WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(family_not_found(id));
        }

        Ok(())
    }
}

/// PostgreSQL implementation of FamilyNodeRepository
#[derive(Clone)]
pub struct PgFamilyNodeRepository {
    pool: PgPool,
}

impl PgFamilyNodeRepository {
    /// Create a new PgFamilyNodeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map a failed write, turning a single-root violation into `SecondRoot`
    async fn map_write_error(&self, e: sqlx::Error, node: &FamilyNode) -> DomainError {
        if !is_unique_violation_on(&e, SINGLE_ROOT_INDEX) {
            return map_db_error(e);
        }

        let existing = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id FROM family_nodes
            WHERE family_id = $1 AND parent_id IS NULL AND id <> $2
            LIMIT 1
            "#,
        )
        .bind(node.family_id.into_inner())
        .bind(node.id.into_inner())
        .fetch_optional(&self.pool)
        .await;

        match existing {
            Ok(Some(id)) => DomainError::SecondRoot {
                existing: EntityId::from(id),
            },
            Ok(None) => map_db_error(e),
            Err(lookup) => map_db_error(lookup),
        }
    }
}

#[async_trait]
impl FamilyNodeRepository for PgFamilyNodeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<FamilyNode>> {
        let result = sqlx::query_as::<_, FamilyNodeModel>(
            r#"
            SELECT id, family_id, name, image_url, birth_year, note,
                   parent_id, father_id, mother_id, created_at
            FROM family_nodes
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FamilyNode::from))
    }

    #[instrument(skip(self))]
    async fn find_by_family(&self, family_id: EntityId) -> RepoResult<Vec<FamilyNode>> {
        let results = sqlx::query_as::<_, FamilyNodeModel>(
            r#"
            SELECT id, family_id, name, image_url, birth_year, note,
                   parent_id, father_id, mother_id, created_at
            FROM family_nodes
            WHERE family_id = $1
            ORDER BY seq
            "#,
        )
        .bind(family_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FamilyNode::from).collect())
    }

    #[instrument(skip(self, node), fields(node_id = %node.id, family_id = %node.family_id))]
    async fn create(&self, node: &FamilyNode) -> RepoResult<()> {
        let row = FamilyNodeRow::new(node);

        let result = sqlx::query(
            r#"
            INSERT INTO family_nodes (id, family_id, name, image_url, birth_year, note,
                                      parent_id, father_id, mother_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(row.id)
        .bind(row.family_id)
        .bind(row.name)
        .bind(row.image_url)
        .bind(row.birth_year)
        .bind(row.note)
        .bind(row.parent_id)
        .bind(row.father_id)
        .bind(row.mother_id)
        .bind(node.created_at)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            return Err(self.map_write_error(e, node).await);
        }

        Ok(())
    }

    /// Update a member while holding the family row lock
    ///
    /// The family is re-read and re-validated inside the transaction, so two
    /// concurrent parent changes cannot together close a cycle.
    #[instrument(skip(self, node), fields(node_id = %node.id))]
    async fn update(&self, node: &FamilyNode) -> RepoResult<()> {
        let row = FamilyNodeRow::new(node);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id FROM families WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(row.family_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| family_not_found(node.family_id))?;

        let mut members: Vec<FamilyNode> = sqlx::query_as::<_, FamilyNodeModel>(
            r#"
            SELECT id, family_id, name, image_url, birth_year, note,
                   parent_id, father_id, mother_id, created_at
            FROM family_nodes
            WHERE family_id = $1
            ORDER BY seq
            "#,
        )
        .bind(row.family_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(FamilyNode::from)
        .collect();

        let slot = members
            .iter_mut()
            .find(|n| n.id == node.id)
            .ok_or_else(|| member_not_found(node.id))?;
        slot.clone_from(node);
        validate_structure(&members)?;

        let result = sqlx::query(
            r#"
            UPDATE family_nodes
            SET name = $2, image_url = $3, birth_year = $4, note = $5,
                parent_id = $6, father_id = $7, mother_id = $8
            WHERE id = $1
            "#,
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.image_url)
        .bind(row.birth_year)
        .bind(row.note)
        .bind(row.parent_id)
        .bind(row.father_id)
        .bind(row.mother_id)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            return Err(self.map_write_error(e, node).await);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM family_nodes WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }

        Ok(())
    }
}
