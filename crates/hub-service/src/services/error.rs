//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use hub_common::AppError;
use hub_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, config, etc.)
    App(AppError),

    /// Operation needs an admin session
    AdminRequired { action: &'static str },

    /// Validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::AdminRequired { action } => write!(f, "Admin session required to {action}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an admin-required error
    pub fn admin_required(action: &'static str) -> Self {
        Self::AdminRequired { action }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::AdminRequired { .. } => 403,
            Self::Validation(_) => 400,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::AdminRequired { .. } => "ADMIN_REQUIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::value_objects::{EntityId, ItemRef, ItemType};

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("parent_id is not a member of this family");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(
            err.to_string(),
            "Validation error: parent_id is not a member of this family"
        );
    }

    #[test]
    fn test_admin_required_error() {
        let err = ServiceError::admin_required("delete comments");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "ADMIN_REQUIRED");
    }

    #[test]
    fn test_domain_errors_keep_their_status() {
        let missing: ServiceError =
            DomainError::ItemNotFound(ItemRef::new(EntityId::generate(), ItemType::News)).into();
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.error_code(), "UNKNOWN_ITEM");

        let cycle: ServiceError = DomainError::CycleDetected(vec![EntityId::generate()]).into();
        assert_eq!(cycle.status_code(), 422);

        let second_root: ServiceError = DomainError::SecondRoot {
            existing: EntityId::generate(),
        }
        .into();
        assert_eq!(second_root.status_code(), 409);
    }

    #[test]
    fn test_app_errors_keep_their_status() {
        let err: ServiceError = AppError::InvalidCredentials.into();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }
}
