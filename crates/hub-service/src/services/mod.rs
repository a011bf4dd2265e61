//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod event;
pub mod family;
pub mod news;
pub mod permission;
pub mod reaction;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use family::FamilyService;
pub use news::NewsService;
pub use permission::require_admin;
pub use reaction::ReactionService;

use hub_core::{DomainError, EntityId};

/// Parse an id received as a string, naming the offending field
///
/// # Errors
/// Returns `DomainError::InvalidId` when `raw` is not a UUID
pub fn parse_id(field: &'static str, raw: &str) -> ServiceResult<EntityId> {
    EntityId::parse(raw).map_err(|_| DomainError::InvalidId(format!("{field}: {raw}")).into())
}

/// Parse an optional id field
///
/// # Errors
/// Returns `DomainError::InvalidId` when a present value is not a UUID
pub fn parse_opt_id(field: &'static str, raw: Option<&str>) -> ServiceResult<Option<EntityId>> {
    raw.map(|r| parse_id(field, r)).transpose()
}
