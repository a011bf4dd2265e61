//! Family service
//!
//! Families, their members and the trees built from them. The single-root
//! rule and acyclicity are enforced here at write time; the read path
//! still tolerates legacy data that breaks them.

use hub_common::Role;
use hub_core::entities::{Family, FamilyNode};
use hub_core::tree::{build_forest, build_tree, validate_structure, FamilyTree};
use hub_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{
    CreateFamilyRequest, CreateMemberRequest, FamilyResponse, ForestResponse, MemberResponse,
    SubtreeResponse, TreeResponse, TreeStatus, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::require_admin;
use super::parse_opt_id;

/// Family service
pub struct FamilyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyService<'a> {
    /// Create a new FamilyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Families
    // ========================================================================

    /// Create a family
    #[instrument(skip(self, request))]
    pub async fn create_family(
        &self,
        role: Role,
        request: CreateFamilyRequest,
    ) -> ServiceResult<FamilyResponse> {
        require_admin(role, "create families")?;

        let family = Family::new(request.name, request.image_url);
        self.ctx.family_repo().create(&family).await?;

        info!(family_id = %family.id, "Family created");

        Ok(FamilyResponse::from(family))
    }

    /// List all families in creation order
    #[instrument(skip(self))]
    pub async fn list_families(&self) -> ServiceResult<Vec<FamilyResponse>> {
        let families = self.ctx.family_repo().list().await?;
        Ok(families.into_iter().map(FamilyResponse::from).collect())
    }

    /// Get one family
    #[instrument(skip(self))]
    pub async fn get_family(&self, family_id: EntityId) -> ServiceResult<FamilyResponse> {
        let family = self.require_family(family_id).await?;
        Ok(FamilyResponse::from(family))
    }

    /// Delete a family and all of its members
    #[instrument(skip(self))]
    pub async fn delete_family(&self, role: Role, family_id: EntityId) -> ServiceResult<()> {
        require_admin(role, "delete families")?;

        self.ctx.family_repo().delete(family_id).await?;

        info!(family_id = %family_id, "Family deleted");

        Ok(())
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// List the members of a family in insertion order
    #[instrument(skip(self))]
    pub async fn list_members(&self, family_id: EntityId) -> ServiceResult<Vec<MemberResponse>> {
        self.require_family(family_id).await?;
        let nodes = self.ctx.member_repo().find_by_family(family_id).await?;
        Ok(nodes.into_iter().map(MemberResponse::from).collect())
    }

    /// Get one member of a family
    #[instrument(skip(self))]
    pub async fn get_member(
        &self,
        family_id: EntityId,
        node_id: EntityId,
    ) -> ServiceResult<MemberResponse> {
        let node = self.require_member(family_id, node_id).await?;
        Ok(MemberResponse::from(node))
    }

    /// Add a member to a family
    ///
    /// A member without `parent_id` becomes the root; a family that already
    /// has one rejects a second.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn add_member(
        &self,
        role: Role,
        family_id: EntityId,
        request: CreateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        require_admin(role, "add family members")?;
        self.require_family(family_id).await?;

        let parent_id = parse_opt_id("parent_id", request.parent_id.as_deref())?;
        let father_id = parse_opt_id("father_id", request.father_id.as_deref())?;
        let mother_id = parse_opt_id("mother_id", request.mother_id.as_deref())?;

        let existing = self.ctx.member_repo().find_by_family(family_id).await?;
        for (field, link) in [
            ("parent_id", parent_id),
            ("father_id", father_id),
            ("mother_id", mother_id),
        ] {
            ensure_in_family(&existing, field, link)?;
        }
        if parent_id.is_none() {
            if let Some(root) = existing.iter().find(|n| n.is_root()) {
                return Err(DomainError::SecondRoot { existing: root.id }.into());
            }
        }

        let mut node = FamilyNode::new(family_id, request.name, parent_id);
        node.image_url = request.image_url;
        node.birth_year = request.birth_year;
        node.note = request.note;
        node.father_id = father_id;
        node.mother_id = mother_id;

        self.ctx.member_repo().create(&node).await?;

        info!(
            family_id = %family_id,
            node_id = %node.id,
            is_root = node.is_root(),
            "Family member added"
        );

        Ok(MemberResponse::from(node))
    }

    /// Update a member
    ///
    /// Rejects parent changes that would close a cycle or leave the family
    /// with two roots.
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        role: Role,
        family_id: EntityId,
        node_id: EntityId,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        require_admin(role, "update family members")?;

        let mut node = self.require_member(family_id, node_id).await?;
        let was_root = node.is_root();

        if let Some(name) = request.name {
            node.name = name;
        }
        if let Some(image_url) = request.image_url {
            node.image_url = image_url;
        }
        if let Some(birth_year) = request.birth_year {
            node.birth_year = birth_year;
        }
        if let Some(note) = request.note {
            node.note = note;
        }

        // Only links set by this request are checked; stored links may
        // dangle after a parent was deleted.
        let mut changed_links = Vec::new();
        if let Some(parent_id) = request.parent_id {
            node.parent_id = parse_opt_id("parent_id", parent_id.as_deref())?;
            changed_links.push(("parent_id", node.parent_id));
        }
        if let Some(father_id) = request.father_id {
            node.father_id = parse_opt_id("father_id", father_id.as_deref())?;
            changed_links.push(("father_id", node.father_id));
        }
        if let Some(mother_id) = request.mother_id {
            node.mother_id = parse_opt_id("mother_id", mother_id.as_deref())?;
            changed_links.push(("mother_id", node.mother_id));
        }

        let mut members = self.ctx.member_repo().find_by_family(family_id).await?;
        for (field, link) in changed_links {
            ensure_in_family(&members, field, link)?;
        }
        if node.is_root() && !was_root {
            if let Some(root) = members.iter().find(|n| n.is_root() && n.id != node.id) {
                return Err(DomainError::SecondRoot { existing: root.id }.into());
            }
        }

        // Check the family as it would look after the update
        if let Some(slot) = members.iter_mut().find(|n| n.id == node.id) {
            slot.clone_from(&node);
        }
        validate_structure(&members)?;

        self.ctx.member_repo().update(&node).await?;

        info!(family_id = %family_id, node_id = %node_id, "Family member updated");

        Ok(MemberResponse::from(node))
    }

    /// Delete a member
    ///
    /// Children are left in place with a dangling `parent_id`.
    #[instrument(skip(self))]
    pub async fn delete_member(
        &self,
        role: Role,
        family_id: EntityId,
        node_id: EntityId,
    ) -> ServiceResult<()> {
        require_admin(role, "delete family members")?;

        self.require_member(family_id, node_id).await?;
        self.ctx.member_repo().delete(node_id).await?;

        info!(family_id = %family_id, node_id = %node_id, "Family member deleted");

        Ok(())
    }

    // ========================================================================
    // Trees
    // ========================================================================

    /// Build the tree of a family from its first root
    #[instrument(skip(self))]
    pub async fn family_tree(&self, family_id: EntityId) -> ServiceResult<TreeResponse> {
        self.require_family(family_id).await?;
        let nodes = self.ctx.member_repo().find_by_family(family_id).await?;

        let tree = build_tree(&nodes)?;
        let size = tree.size();
        let response = match tree {
            FamilyTree::Empty => TreeResponse {
                family_id,
                status: TreeStatus::Empty,
                root: None,
                size,
            },
            rooted => TreeResponse {
                family_id,
                status: TreeStatus::Ready,
                root: rooted.into_root(),
                size,
            },
        };

        Ok(response)
    }

    /// Build one tree per root member
    #[instrument(skip(self))]
    pub async fn family_forest(&self, family_id: EntityId) -> ServiceResult<ForestResponse> {
        self.require_family(family_id).await?;
        let nodes = self.ctx.member_repo().find_by_family(family_id).await?;

        let roots = build_forest(&nodes)?;

        Ok(ForestResponse { family_id, roots })
    }

    /// Subtree below one member, whether or not it is reachable from the root
    #[instrument(skip(self))]
    pub async fn member_subtree(
        &self,
        family_id: EntityId,
        node_id: EntityId,
    ) -> ServiceResult<SubtreeResponse> {
        self.require_member(family_id, node_id).await?;
        let mut nodes = self.ctx.member_repo().find_by_family(family_id).await?;

        // Detach the member so it roots its own tree in the forest
        if let Some(target) = nodes.iter_mut().find(|n| n.id == node_id) {
            target.parent_id = None;
        }
        let node = build_forest(&nodes)?
            .into_iter()
            .find(|root| root.id == node_id)
            .ok_or_else(|| ServiceError::from(DomainError::MemberNotFound(node_id)))?;
        let descendant_count = node.descendant_count();

        Ok(SubtreeResponse {
            node,
            descendant_count,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn require_family(&self, family_id: EntityId) -> ServiceResult<Family> {
        self.ctx
            .family_repo()
            .find_by_id(family_id)
            .await?
            .ok_or_else(|| DomainError::FamilyNotFound(family_id).into())
    }

    async fn require_member(
        &self,
        family_id: EntityId,
        node_id: EntityId,
    ) -> ServiceResult<FamilyNode> {
        self.require_family(family_id).await?;
        self.ctx
            .member_repo()
            .find_by_id(node_id)
            .await?
            .filter(|node| node.family_id == family_id)
            .ok_or_else(|| DomainError::MemberNotFound(node_id).into())
    }
}

/// Links may only point at members of the same family
fn ensure_in_family(
    members: &[FamilyNode],
    field: &'static str,
    link: Option<EntityId>,
) -> ServiceResult<()> {
    match link {
        Some(id) if !members.iter().any(|n| n.id == id) => Err(ServiceError::validation(
            format!("{field} {id} is not a member of this family"),
        )),
        _ => Ok(()),
    }
}
