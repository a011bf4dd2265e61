//! Axum extractors for request handling
//!
//! Custom extractors for sessions, viewer ids, path ids and validated bodies.

mod auth;
mod path;
mod validated;
mod viewer;

pub use auth::Session;
pub use path::{CommentPath, EventPath, FamilyPath, IdPath, MemberPath, NewsPath};
pub use validated::{ValidatedJson, ValidatedQuery};
pub use viewer::{ViewerId, VIEWER_ID_HEADER};
