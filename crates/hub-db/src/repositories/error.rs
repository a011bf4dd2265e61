//! Error handling utilities for repositories

use hub_core::error::DomainError;
use hub_core::value_objects::{EntityId, ItemRef};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Unique index holding the single-root rule of a family
pub const SINGLE_ROOT_INDEX: &str = "uq_family_nodes_single_root";

/// Check whether `e` is a unique violation of `constraint`
pub fn is_unique_violation_on(e: &SqlxError, constraint: &str) -> bool {
    e.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
    })
}

pub fn family_not_found(id: EntityId) -> DomainError {
    DomainError::FamilyNotFound(id)
}

pub fn member_not_found(id: EntityId) -> DomainError {
    DomainError::MemberNotFound(id)
}

pub fn comment_not_found(id: EntityId) -> DomainError {
    DomainError::CommentNotFound(id)
}

pub fn item_not_found(item: ItemRef) -> DomainError {
    DomainError::ItemNotFound(item)
}
