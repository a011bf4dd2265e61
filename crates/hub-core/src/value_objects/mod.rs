//! Value objects - immutable types that represent domain concepts

mod id;
mod item_type;
mod reaction_kind;

pub use id::{EntityId, IdParseError};
pub use item_type::{CommentTarget, ItemRef, ItemType};
pub use reaction_kind::ReactionKind;
