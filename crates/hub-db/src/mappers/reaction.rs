//! User reaction entity <-> model mapper

use hub_core::entities::UserReaction;
use hub_core::error::DomainError;
use hub_core::value_objects::EntityId;

use crate::models::UserReactionModel;

impl TryFrom<UserReactionModel> for UserReaction {
    type Error = DomainError;

    fn try_from(model: UserReactionModel) -> Result<Self, Self::Error> {
        let item_type = model
            .item_type
            .parse()
            .map_err(|_| {
                DomainError::DatabaseError(format!("Bad item_type: {}", model.item_type))
            })?;
        let reaction_type = model.reaction_type.parse().map_err(|_| {
            DomainError::DatabaseError(format!("Bad reaction_type: {}", model.reaction_type))
        })?;

        Ok(UserReaction {
            id: EntityId::from_uuid(model.id),
            user_id: model.user_id,
            item_id: EntityId::from_uuid(model.item_id),
            item_type,
            reaction_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
