//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as UUID strings, calendar days as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use hub_common::Role;
use hub_core::ledger::ReactionChange;
use hub_core::tree::TreeNode;
use hub_core::value_objects::{CommentTarget, EntityId, ItemType, ReactionKind};
use hub_core::ReactionCounts;

// ============================================================================
// Auth Responses
// ============================================================================

/// Issued session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: Role,
}

/// Who the current request acts as
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfoResponse {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub viewer_id: String,
}

// ============================================================================
// Family Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FamilyResponse {
    pub id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored family member with its raw links
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: EntityId,
    pub family_id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub parent_id: Option<EntityId>,
    pub father_id: Option<EntityId>,
    pub mother_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
}

/// Whether a family has a tree to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeStatus {
    Empty,
    Ready,
}

/// Family tree rooted at the first root member
#[derive(Debug, Serialize)]
pub struct TreeResponse {
    pub family_id: EntityId,
    pub status: TreeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<TreeNode>,
    /// Number of members reachable from the root
    pub size: usize,
}

/// Every root of a family with its subtree
#[derive(Debug, Serialize)]
pub struct ForestResponse {
    pub family_id: EntityId,
    pub roots: Vec<TreeNode>,
}

#[derive(Debug, Serialize)]
pub struct SubtreeResponse {
    pub node: TreeNode,
    pub descendant_count: usize,
}

// ============================================================================
// Event / News Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub published_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub reactions: ReactionCounts,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: EntityId,
    pub item_id: EntityId,
    pub item_type: CommentTarget,
    pub author: String,
    pub text: String,
    pub created_date: NaiveDate,
    pub reactions: ReactionCounts,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Outcome of applying a reaction
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub item_id: EntityId,
    pub item_type: ItemType,
    pub change: ReactionChange,
    /// The viewer's reaction after the change
    pub reaction_type: Option<ReactionKind>,
    pub reactions: ReactionCounts,
}

/// The viewer's active reaction on one item
#[derive(Debug, Clone, Serialize)]
pub struct MyReactionResponse {
    pub item_id: EntityId,
    pub item_type: ItemType,
    pub viewer_id: String,
    pub reaction_type: Option<ReactionKind>,
}

/// Counters recomputed from the ledger
#[derive(Debug, Clone, Serialize)]
pub struct RecountResponse {
    pub item_id: EntityId,
    pub item_type: ItemType,
    pub reactions: ReactionCounts,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for the storage backend
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub backend: String,
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(backend: &str, storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                backend: backend.to_string(),
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
