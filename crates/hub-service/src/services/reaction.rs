//! Reaction service
//!
//! Applies viewer reactions to events, news and comments and exposes the
//! explicit counter repair.

use hub_common::Role;
use hub_core::entities::ReactionKey;
use hub_core::value_objects::{ItemRef, ItemType, ReactionKind};
use tracing::{info, instrument};

use crate::dto::{
    ApplyReactionRequest, ItemQuery, MyReactionResponse, ReactionResponse, RecountResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::parse_id;
use super::permission::require_admin;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add, toggle off or switch the viewer's reaction on an item
    #[instrument(skip(self, request), fields(item_type = %request.item_type, item_id = %request.item_id))]
    pub async fn apply(
        &self,
        viewer_id: Option<&str>,
        request: ApplyReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        let item = parse_item(&request.item_type, &request.item_id)?;
        let kind: ReactionKind = request.reaction_type.parse()?;
        let key = ReactionKey::new(self.ctx.viewer_or_default(viewer_id), item);

        let applied = self.ctx.reaction_repo().apply(&key, kind).await?;

        info!(
            item = %item,
            user_id = %key.user_id,
            change = ?applied.change,
            "Reaction applied"
        );

        Ok(ReactionResponse {
            item_id: item.item_id,
            item_type: item.item_type,
            change: applied.change,
            reaction_type: applied.current(),
            reactions: applied.reactions,
        })
    }

    /// The viewer's active reaction on an item, if any
    #[instrument(skip(self, query))]
    pub async fn my_reaction(
        &self,
        viewer_id: Option<&str>,
        query: ItemQuery,
    ) -> ServiceResult<MyReactionResponse> {
        let item = parse_item(&query.item_type, &query.item_id)?;
        // Unknown items answer 404 rather than "no reaction"
        self.ctx.reaction_repo().counts(item).await?;

        let viewer_id = self.ctx.viewer_or_default(viewer_id);
        let key = ReactionKey::new(viewer_id.clone(), item);
        let reaction = self.ctx.reaction_repo().find(&key).await?;

        Ok(MyReactionResponse {
            item_id: item.item_id,
            item_type: item.item_type,
            viewer_id,
            reaction_type: reaction.map(|r| r.reaction_type),
        })
    }

    /// Recompute an item's counters from the ledger
    #[instrument(skip(self, query))]
    pub async fn recount(&self, role: Role, query: ItemQuery) -> ServiceResult<RecountResponse> {
        require_admin(role, "recount reactions")?;

        let item = parse_item(&query.item_type, &query.item_id)?;
        let reactions = self.ctx.reaction_repo().recount(item).await?;

        info!(item = %item, total = reactions.total(), "Reaction counters recounted");

        Ok(RecountResponse {
            item_id: item.item_id,
            item_type: item.item_type,
            reactions,
        })
    }
}

fn parse_item(item_type: &str, item_id: &str) -> ServiceResult<ItemRef> {
    let item_type: ItemType = item_type.parse()?;
    let item_id = parse_id("item_id", item_id)?;
    Ok(ItemRef::new(item_id, item_type))
}
