//! Family entity <-> model mappers

use hub_core::entities::{Family, FamilyNode};
use hub_core::value_objects::EntityId;
use uuid::Uuid;

use crate::models::{FamilyModel, FamilyNodeModel};

impl From<FamilyModel> for Family {
    fn from(model: FamilyModel) -> Self {
        Family {
            id: EntityId::from_uuid(model.id),
            name: model.name,
            image_url: model.image_url,
            created_at: model.created_at,
        }
    }
}

impl From<FamilyNodeModel> for FamilyNode {
    fn from(model: FamilyNodeModel) -> Self {
        FamilyNode {
            id: EntityId::from_uuid(model.id),
            family_id: EntityId::from_uuid(model.family_id),
            name: model.name,
            image_url: model.image_url,
            birth_year: model.birth_year,
            note: model.note,
            parent_id: model.parent_id.map(EntityId::from_uuid),
            father_id: model.father_id.map(EntityId::from_uuid),
            mother_id: model.mother_id.map(EntityId::from_uuid),
            created_at: model.created_at,
        }
    }
}

/// Column values of a family member for insert and update
pub struct FamilyNodeRow<'a> {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: &'a str,
    pub image_url: Option<&'a str>,
    pub birth_year: Option<i32>,
    pub note: Option<&'a str>,
    pub parent_id: Option<Uuid>,
    pub father_id: Option<Uuid>,
    pub mother_id: Option<Uuid>,
}

impl<'a> FamilyNodeRow<'a> {
    pub fn new(node: &'a FamilyNode) -> Self {
        Self {
            id: node.id.into_inner(),
            family_id: node.family_id.into_inner(),
            name: &node.name,
            image_url: node.image_url.as_deref(),
            birth_year: node.birth_year,
            note: node.note.as_deref(),
            parent_id: node.parent_id.map(EntityId::into_inner),
            father_id: node.father_id.map(EntityId::into_inner),
            mother_id: node.mother_id.map(EntityId::into_inner),
        }
    }
}
