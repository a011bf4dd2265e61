//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod event;
mod family;
mod reaction;

pub use comment::CommentModel;
pub use event::{EventModel, NewsModel};
pub use family::{FamilyModel, FamilyNodeModel};
pub use reaction::{ReactionCountsModel, UserReactionModel};
