//! Rebuilds a family tree from the flat list of stored members
//!
//! Nodes are indexed once, the whole parent graph is checked for cycles,
//! then the tree is assembled bottom-up from an explicit work list. No
//! step recurses, so the call stack does not grow with tree depth.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::entities::FamilyNode;
use crate::error::DomainError;
use crate::value_objects::EntityId;

use super::node::{FamilyTree, TreeNode};

/// Flat input indexed by id, with child lists in input order
struct ParentGraph<'a> {
    nodes: &'a [FamilyNode],
    /// Index of each node's parent, when that parent is in the input
    parent_of: Vec<Option<usize>>,
    children_of: Vec<Vec<usize>>,
}

impl<'a> ParentGraph<'a> {
    fn index(nodes: &'a [FamilyNode]) -> Result<Self, DomainError> {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if by_id.insert(node.id, idx).is_some() {
                return Err(DomainError::DuplicateNode(node.id));
            }
        }

        let mut parent_of = Vec::with_capacity(nodes.len());
        let mut children_of = vec![Vec::new(); nodes.len()];
        for (idx, node) in nodes.iter().enumerate() {
            let parent = node.parent_id.and_then(|id| by_id.get(&id).copied());
            if let Some(parent) = parent {
                children_of[parent].push(idx);
            } else if let Some(dangling) = node.parent_id {
                debug!(
                    node_id = %node.id,
                    parent_id = %dangling,
                    "Parent not in family, node unreachable"
                );
            }
            parent_of.push(parent);
        }

        Ok(Self {
            nodes,
            parent_of,
            children_of,
        })
    }

    /// Walk every parent chain once; fail on the first chain that loops
    fn check_acyclic(&self) -> Result<(), DomainError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut path: Vec<usize> = Vec::new();

        for start in 0..self.nodes.len() {
            let mut current = Some(start);
            while let Some(idx) = current {
                match marks[idx] {
                    Mark::Done => break,
                    Mark::OnPath => {
                        let loop_start = path.iter().position(|&p| p == idx).unwrap_or(0);
                        let cycle = path[loop_start..]
                            .iter()
                            .map(|&p| self.nodes[p].id)
                            .collect();
                        return Err(DomainError::CycleDetected(cycle));
                    }
                    Mark::Unvisited => {
                        marks[idx] = Mark::OnPath;
                        path.push(idx);
                        current = self.parent_of[idx];
                    }
                }
            }
            for idx in path.drain(..) {
                marks[idx] = Mark::Done;
            }
        }
        Ok(())
    }

    fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_root())
            .map(|(idx, _)| idx)
    }

    /// Assemble the subtree under `root`. Requires an acyclic graph.
    fn assemble(&self, root: usize) -> TreeNode {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.children_of[idx].iter().copied());
        }

        // Reverse discovery order puts every child before its parent
        let mut built: HashMap<usize, TreeNode> = HashMap::with_capacity(order.len());
        for &idx in order.iter().rev() {
            let mut node = TreeNode::leaf(&self.nodes[idx]);
            node.children = self.children_of[idx]
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(idx, node);
        }

        built
            .remove(&root)
            .unwrap_or_else(|| TreeNode::leaf(&self.nodes[root]))
    }
}

/// Check a member list for duplicate ids and parent cycles
pub fn validate_structure(nodes: &[FamilyNode]) -> Result<(), DomainError> {
    ParentGraph::index(nodes)?.check_acyclic()
}

/// Build the tree rooted at the first parentless node
///
/// Additional parentless nodes and their subtrees are left out. Nodes whose
/// parent is missing from the input are unreachable.
pub fn build_tree(nodes: &[FamilyNode]) -> Result<FamilyTree, DomainError> {
    let graph = ParentGraph::index(nodes)?;
    graph.check_acyclic()?;

    let mut roots = graph.roots();
    let Some(root) = roots.next() else {
        return Ok(FamilyTree::Empty);
    };

    let dropped: Vec<EntityId> = roots.map(|idx| nodes[idx].id).collect();
    if !dropped.is_empty() {
        warn!(
            root_id = %nodes[root].id,
            dropped = ?dropped,
            "Family has more than one root, keeping the first"
        );
    }

    Ok(FamilyTree::Rooted(graph.assemble(root)))
}

/// Build one tree per parentless node, in input order
pub fn build_forest(nodes: &[FamilyNode]) -> Result<Vec<TreeNode>, DomainError> {
    let graph = ParentGraph::index(nodes)?;
    graph.check_acyclic()?;
    Ok(graph.roots().map(|root| graph.assemble(root)).collect())
}
