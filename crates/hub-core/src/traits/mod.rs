//! Ports implemented by the storage layer

mod repositories;

pub use repositories::{
    CommentRepository, EventRepository, FamilyNodeRepository, FamilyRepository, NewsRepository,
    ReactionRepository, RepoResult,
};
