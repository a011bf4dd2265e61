//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EntityId, ItemRef};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Item not found: {0}")]
    ItemNotFound(ItemRef),

    #[error("Family not found: {0}")]
    FamilyNotFound(EntityId),

    #[error("Family member not found: {0}")]
    MemberNotFound(EntityId),

    #[error("Comment not found: {0}")]
    CommentNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid item type: {0}")]
    InvalidItemType(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    // =========================================================================
    // Structural Errors (family tree shape)
    // =========================================================================
    #[error("Cycle detected in family tree through: {}", format_ids(.0))]
    CycleDetected(Vec<EntityId>),

    #[error("Family member listed more than once: {0}")]
    DuplicateNode(EntityId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Family already has a root member: {existing}")]
    SecondRoot { existing: EntityId },

    #[error("Reaction changed concurrently, retry the request")]
    ReactionConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn format_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ItemNotFound(_) => "UNKNOWN_ITEM",
            Self::FamilyNotFound(_) => "UNKNOWN_FAMILY",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidItemType(_) => "INVALID_ITEM_TYPE",
            Self::InvalidId(_) => "INVALID_ID",

            // Structural
            Self::CycleDetected(_) => "CYCLE_DETECTED",
            Self::DuplicateNode(_) => "DUPLICATE_NODE",

            // Conflict
            Self::SecondRoot { .. } => "SECOND_ROOT",
            Self::ReactionConflict => "REACTION_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound(_)
                | Self::FamilyNotFound(_)
                | Self::MemberNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidReactionKind(_) | Self::InvalidItemType(_) | Self::InvalidId(_))
    }

    /// Check if the family tree data has an impossible shape
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::CycleDetected(_) | Self::DuplicateNode(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SecondRoot { .. } | Self::ReactionConflict)
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_structural() {
            422
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ItemType;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ItemNotFound(ItemRef::new(EntityId::generate(), ItemType::Event));
        assert_eq!(err.code(), "UNKNOWN_ITEM");

        let err = DomainError::InvalidReactionKind("angry".to_string());
        assert_eq!(err.code(), "INVALID_REACTION_KIND");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::FamilyNotFound(EntityId::generate()).status_code(), 404);
        assert_eq!(DomainError::InvalidItemType("x".to_string()).status_code(), 400);
        assert_eq!(DomainError::CycleDetected(vec![]).status_code(), 422);
        assert_eq!(
            DomainError::SecondRoot { existing: EntityId::generate() }.status_code(),
            409
        );
        assert_eq!(DomainError::DatabaseError("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_is_structural() {
        assert!(DomainError::DuplicateNode(EntityId::generate()).is_structural());
        assert!(!DomainError::MemberNotFound(EntityId::generate()).is_structural());
    }

    #[test]
    fn test_cycle_display_lists_path() {
        let a = EntityId::generate();
        let b = EntityId::generate();
        let err = DomainError::CycleDetected(vec![a, b, a]);
        assert_eq!(
            err.to_string(),
            format!("Cycle detected in family tree through: {a} -> {b} -> {a}")
        );
    }

    #[test]
    fn test_item_not_found_display() {
        let id = EntityId::generate();
        let err = DomainError::ItemNotFound(ItemRef::new(id, ItemType::News));
        assert_eq!(err.to_string(), format!("Item not found: news:{id}"));
    }
}
