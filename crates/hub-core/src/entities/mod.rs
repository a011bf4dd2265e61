//! Domain entities - core business objects

mod comment;
mod event;
mod family;
mod reaction;

pub use comment::Comment;
pub use event::{Event, News};
pub use family::{Family, FamilyNode};
pub use reaction::{ReactionCounts, ReactionKey, UserReaction};
