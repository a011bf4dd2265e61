//! Comment database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ReactionCountsModel;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_type: String,
    pub author: String,
    pub text: String,
    pub created_date: NaiveDate,
    #[sqlx(flatten)]
    pub counts: ReactionCountsModel,
    pub created_at: DateTime<Utc>,
}
