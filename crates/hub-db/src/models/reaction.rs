//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for user_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct UserReactionModel {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: Uuid,
    pub item_type: String,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four counter columns every reactable table carries
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct ReactionCountsModel {
    pub like_count: i32,
    pub smile_count: i32,
    pub heart_count: i32,
    pub celebrate_count: i32,
}
