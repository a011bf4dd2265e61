//! # hub-core
//!
//! Domain layer containing entities, value objects, repository traits, the
//! family tree builder and the reaction ledger transitions.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod ledger;
pub mod traits;
pub mod tree;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Event, Family, FamilyNode, News, ReactionCounts, ReactionKey, UserReaction,
};
pub use error::DomainError;
pub use ledger::{AppliedReaction, ReactionChange};
pub use traits::{
    CommentRepository, EventRepository, FamilyNodeRepository, FamilyRepository, NewsRepository,
    ReactionRepository, RepoResult,
};
pub use tree::{build_forest, build_tree, validate_structure, FamilyTree, TreeNode};
pub use value_objects::{CommentTarget, EntityId, IdParseError, ItemRef, ItemType, ReactionKind};
