//! Comment service
//!
//! Flat comment threads under events and news.

use hub_common::Role;
use hub_core::entities::Comment;
use hub_core::value_objects::CommentTarget;
use hub_core::EntityId;
use tracing::{info, instrument};

use crate::dto::{AddCommentRequest, CommentResponse, ItemQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::parse_id;
use super::permission::require_admin;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments on an item, oldest day first
    #[instrument(skip(self, query), fields(item_type = %query.item_type, item_id = %query.item_id))]
    pub async fn list_comments(&self, query: ItemQuery) -> ServiceResult<Vec<CommentResponse>> {
        let item_type: CommentTarget = query.item_type.parse()?;
        let item_id = parse_id("item_id", &query.item_id)?;

        let comments = self
            .ctx
            .comment_repo()
            .find_by_item(item_id, item_type)
            .await?;

        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Add a comment dated today
    ///
    /// Author and text are stored as given; the target item is not looked up.
    #[instrument(skip(self, request), fields(item_type = %request.item_type, item_id = %request.item_id))]
    pub async fn add_comment(&self, request: AddCommentRequest) -> ServiceResult<CommentResponse> {
        let item_type: CommentTarget = request.item_type.parse()?;
        let item_id = parse_id("item_id", &request.item_id)?;

        let comment = Comment::new(item_id, item_type, request.author, request.text);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, "Comment added");

        Ok(CommentResponse::from(comment))
    }

    /// Delete a comment; its reactions stay in the ledger
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, role: Role, comment_id: EntityId) -> ServiceResult<()> {
        require_admin(role, "delete comments")?;

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }
}
