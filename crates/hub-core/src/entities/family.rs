//! Family entities - a named family and the people in its tree

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// A named collection of family members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub id: EntityId,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Family {
    /// Create a new Family
    pub fn new(name: String, image_url: Option<String>) -> Self {
        Self {
            id: EntityId::generate(),
            name,
            image_url,
            created_at: Utc::now(),
        }
    }
}

/// One person in a family tree
///
/// `parent_id` is the link the tree is built from. It is a weak reference:
/// nothing guarantees the parent still exists or belongs to the same family.
/// `father_id` / `mother_id` are informational and need not agree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyNode {
    pub id: EntityId,
    pub family_id: EntityId,
    pub name: String,
    pub image_url: Option<String>,
    pub birth_year: Option<i32>,
    pub note: Option<String>,
    pub parent_id: Option<EntityId>,
    pub father_id: Option<EntityId>,
    pub mother_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
}

impl FamilyNode {
    /// Create a new member of `family_id`
    pub fn new(family_id: EntityId, name: String, parent_id: Option<EntityId>) -> Self {
        Self {
            id: EntityId::generate(),
            family_id,
            name,
            image_url: None,
            birth_year: None,
            note: None,
            parent_id,
            father_id: None,
            mother_id: None,
            created_at: Utc::now(),
        }
    }

    /// Check if this member has no parent link
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
