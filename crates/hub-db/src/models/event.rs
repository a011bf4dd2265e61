//! Event and news database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ReactionCountsModel;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub image_url: Option<String>,
    #[sqlx(flatten)]
    pub counts: ReactionCountsModel,
    pub created_at: DateTime<Utc>,
}

/// Database model for news table
#[derive(Debug, Clone, FromRow)]
pub struct NewsModel {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
    #[sqlx(flatten)]
    pub counts: ReactionCountsModel,
    pub created_at: DateTime<Utc>,
}
