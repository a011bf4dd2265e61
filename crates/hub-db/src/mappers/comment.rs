//! Comment entity <-> model mapper

use hub_core::entities::Comment;
use hub_core::error::DomainError;
use hub_core::value_objects::EntityId;

use crate::models::CommentModel;

impl TryFrom<CommentModel> for Comment {
    type Error = DomainError;

    fn try_from(model: CommentModel) -> Result<Self, Self::Error> {
        let item_type = model
            .item_type
            .parse()
            .map_err(|_| {
                DomainError::DatabaseError(format!("Bad comment item_type: {}", model.item_type))
            })?;

        Ok(Comment {
            id: EntityId::from_uuid(model.id),
            item_id: EntityId::from_uuid(model.item_id),
            item_type,
            author: model.author,
            text: model.text,
            created_date: model.created_date,
            reactions: model.counts.into(),
            created_at: model.created_at,
        })
    }
}
