//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in hub-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod event;
mod family;
mod reaction;

pub use comment::PgCommentRepository;
pub use event::{PgEventRepository, PgNewsRepository};
pub use family::{PgFamilyNodeRepository, PgFamilyRepository};
pub use reaction::PgReactionRepository;
