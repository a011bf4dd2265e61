//! Family and family member database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for families table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyModel {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database model for family_nodes table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyNodeModel {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub birth_year: Option<i32>,
    pub note: Option<String>,
    pub parent_id: Option<Uuid>,
    pub father_id: Option<Uuid>,
    pub mother_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
