//! Family and member repositories on the memory store

use async_trait::async_trait;
use tracing::instrument;

use hub_core::entities::{Family, FamilyNode};
use hub_core::error::DomainError;
use hub_core::traits::{FamilyNodeRepository, FamilyRepository, RepoResult};
use hub_core::tree::validate_structure;
use hub_core::value_objects::EntityId;

use super::MemoryStore;

#[async_trait]
impl FamilyRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Family>> {
        let state = self.state.lock();
        Ok(state.families.iter().find(|f| f.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Family>> {
        Ok(self.state.lock().families.clone())
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn create(&self, family: &Family) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.families.iter().any(|f| f.id == family.id) {
            return Err(DomainError::DatabaseError(format!(
                "Duplicate family id {}",
                family.id
            )));
        }
        state.families.push(family.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.families.len();
        state.families.retain(|f| f.id != id);
        if state.families.len() == before {
            return Err(DomainError::FamilyNotFound(id));
        }
        state.nodes.retain(|n| n.family_id != id);
        Ok(())
    }
}

#[async_trait]
impl FamilyNodeRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<FamilyNode>> {
        let state = self.state.lock();
        Ok(state.nodes.iter().find(|n| n.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_family(&self, family_id: EntityId) -> RepoResult<Vec<FamilyNode>> {
        let state = self.state.lock();
        Ok(state
            .nodes
            .iter()
            .filter(|n| n.family_id == family_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, node), fields(node_id = %node.id))]
    async fn create(&self, node: &FamilyNode) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.families.iter().any(|f| f.id == node.family_id) {
            return Err(DomainError::FamilyNotFound(node.family_id));
        }
        if state.nodes.iter().any(|n| n.id == node.id) {
            return Err(DomainError::DatabaseError(format!(
                "Duplicate member id {}",
                node.id
            )));
        }
        if node.is_root() {
            ensure_single_root(&state.nodes, node)?;
        }
        state.nodes.push(node.clone());
        Ok(())
    }

    #[instrument(skip(self, node), fields(node_id = %node.id))]
    async fn update(&self, node: &FamilyNode) -> RepoResult<()> {
        let mut state = self.state.lock();
        if node.is_root() {
            ensure_single_root(&state.nodes, node)?;
        }

        // Validate the family as it would look after the write
        let after: Vec<FamilyNode> = state
            .nodes
            .iter()
            .filter(|n| n.family_id == node.family_id)
            .map(|n| if n.id == node.id { node.clone() } else { n.clone() })
            .collect();
        validate_structure(&after)?;

        let stored = state
            .nodes
            .iter_mut()
            .find(|n| n.id == node.id)
            .ok_or(DomainError::MemberNotFound(node.id))?;

        // Identity, family and creation time are fixed at insert
        stored.name.clone_from(&node.name);
        stored.image_url.clone_from(&node.image_url);
        stored.birth_year = node.birth_year;
        stored.note.clone_from(&node.note);
        stored.parent_id = node.parent_id;
        stored.father_id = node.father_id;
        stored.mother_id = node.mother_id;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let before = state.nodes.len();
        state.nodes.retain(|n| n.id != id);
        if state.nodes.len() == before {
            return Err(DomainError::MemberNotFound(id));
        }
        Ok(())
    }
}

/// A family holds at most one rootless member
fn ensure_single_root(nodes: &[FamilyNode], node: &FamilyNode) -> RepoResult<()> {
    match nodes
        .iter()
        .find(|n| n.family_id == node.family_id && n.is_root() && n.id != node.id)
    {
        Some(root) => Err(DomainError::SecondRoot { existing: root.id }),
        None => Ok(()),
    }
}
