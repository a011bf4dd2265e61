//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `hub-db` provides PostgreSQL and
//! in-memory implementations. Updates and deletes of a missing row fail
//! with the matching not-found error.

use async_trait::async_trait;

use crate::entities::{
    Comment, Event, Family, FamilyNode, News, ReactionCounts, ReactionKey, UserReaction,
};
use crate::error::DomainError;
use crate::ledger::AppliedReaction;
use crate::value_objects::{CommentTarget, EntityId, ItemRef, ReactionKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Family Repository
// ============================================================================

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Find family by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Family>>;

    /// List all families in creation order
    async fn list(&self) -> RepoResult<Vec<Family>>;

    /// Create a new family
    async fn create(&self, family: &Family) -> RepoResult<()>;

    /// Delete a family together with all of its members
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Family Node Repository
// ============================================================================

#[async_trait]
pub trait FamilyNodeRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<FamilyNode>>;

    /// All members of a family in insertion order
    async fn find_by_family(&self, family_id: EntityId) -> RepoResult<Vec<FamilyNode>>;

    /// Create a new member
    async fn create(&self, node: &FamilyNode) -> RepoResult<()>;

    /// Update an existing member
    async fn update(&self, node: &FamilyNode) -> RepoResult<()>;

    /// Delete a member; children keep their parent link
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Event>>;

    /// All events, ascending by event date
    async fn list(&self) -> RepoResult<Vec<Event>>;

    /// Create a new event
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update descriptive fields (never the reaction counters)
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Delete an event
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// News Repository
// ============================================================================

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Find news post by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<News>>;

    /// All posts, newest published first
    async fn list(&self) -> RepoResult<Vec<News>>;

    /// Create a new post
    async fn create(&self, news: &News) -> RepoResult<()>;

    /// Update descriptive fields (never the reaction counters)
    async fn update(&self, news: &News) -> RepoResult<()>;

    /// Delete a post
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>>;

    /// Comments on an item, ascending by date, ties in insertion order
    async fn find_by_item(
        &self,
        item_id: EntityId,
        item_type: CommentTarget,
    ) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment; its ledger rows are left in place
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The viewer's active reaction on an item
    async fn find(&self, key: &ReactionKey) -> RepoResult<Option<UserReaction>>;

    /// All active reactions on an item
    async fn find_by_item(&self, item: ItemRef) -> RepoResult<Vec<UserReaction>>;

    /// Current aggregate stored on the item
    async fn counts(&self, item: ItemRef) -> RepoResult<ReactionCounts>;

    /// Apply a reaction kind for a viewer as one atomic unit
    ///
    /// Reads the ledger row, decides add / toggle-off / switch, writes the
    /// ledger and the item's counters, and returns the stored aggregate.
    /// Fails with `ItemNotFound` without mutating anything when the item
    /// does not exist.
    async fn apply(&self, key: &ReactionKey, kind: ReactionKind) -> RepoResult<AppliedReaction>;

    /// Recompute an item's counters from the ledger and store them
    async fn recount(&self, item: ItemRef) -> RepoResult<ReactionCounts>;
}
