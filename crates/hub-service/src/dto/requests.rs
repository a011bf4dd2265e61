//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Ids travel as strings and are parsed by the services.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Reject strings that are empty once trimmed
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Tell an absent field (`None`) apart from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Family Requests
// ============================================================================

/// Create family request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamilyRequest {
    #[validate(
        length(min = 1, max = 100, message = "Family name must be 1-100 characters"),
        custom(function = "non_blank")
    )]
    pub name: String,

    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<String>,
}

/// Add family member request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "non_blank")
    )]
    pub name: String,

    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<String>,

    #[validate(range(min = 1, max = 9999, message = "Birth year must be 1-9999"))]
    pub birth_year: Option<i32>,

    #[validate(length(max = 2000, message = "Note must be at most 2000 characters"))]
    pub note: Option<String>,

    /// Parent in the tree; omitted for the root
    pub parent_id: Option<String>,

    pub father_id: Option<String>,

    pub mother_id: Option<String>,
}

/// Update family member request
///
/// Absent fields are left alone; an explicit `null` clears the field.
/// Setting `parent_id` to `null` turns the member into a root.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "non_blank")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 1, max = 9999, message = "Birth year must be 1-9999"))]
    pub birth_year: Option<Option<i32>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000, message = "Note must be at most 2000 characters"))]
    pub note: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub father_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub mother_id: Option<Option<String>>,
}

// ============================================================================
// Event / News Requests
// ============================================================================

/// Create event request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "non_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,

    /// Calendar day, `YYYY-MM-DD`
    pub event_date: NaiveDate,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<String>,
}

/// Update event request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "non_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    pub event_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<Option<String>>,
}

/// Create news request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "non_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    pub content: String,

    /// Calendar day, `YYYY-MM-DD`
    pub published_date: NaiveDate,

    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<String>,
}

/// Update news request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNewsRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "non_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    pub content: Option<String>,

    pub published_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub image_url: Option<Option<String>>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    pub item_id: String,

    /// `event` or `news`
    pub item_type: String,

    #[validate(
        length(max = 100, message = "Author must be at most 100 characters"),
        custom(function = "non_blank")
    )]
    pub author: String,

    #[validate(
        length(max = 5000, message = "Text must be at most 5000 characters"),
        custom(function = "non_blank")
    )]
    pub text: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Apply (toggle / switch) reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyReactionRequest {
    pub item_id: String,

    /// `event`, `news` or `comment`
    pub item_type: String,

    /// `like`, `smile`, `heart` or `celebrate`
    pub reaction_type: String,
}

/// Identifies one item by type and id, used in query strings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ItemQuery {
    pub item_type: String,
    pub item_id: String,
}
