//! Built tree shapes

use serde::Serialize;

use crate::entities::FamilyNode;
use crate::value_objects::EntityId;

/// One person in a built tree, with their children in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Leaf node carrying the display fields of `node`
    pub fn leaf(node: &FamilyNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            image_url: node.image_url.clone(),
            birth_year: node.birth_year,
            note: node.note.clone(),
            children: Vec::new(),
        }
    }

    /// Every node in this subtree, pre-order, starting with `self`
    pub fn flatten(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Locate a node in this subtree
    pub fn find(&self, id: EntityId) -> Option<&TreeNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Number of nodes strictly below this one
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TreeNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

// Long ancestor chains would otherwise recurse once per generation on drop.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Result of building one family's tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyTree {
    /// No nodes, or no node without a parent
    Empty,
    Rooted(TreeNode),
}

impl FamilyTree {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn root(&self) -> Option<&TreeNode> {
        match self {
            Self::Empty => None,
            Self::Rooted(root) => Some(root),
        }
    }

    pub fn into_root(self) -> Option<TreeNode> {
        match self {
            Self::Empty => None,
            Self::Rooted(root) => Some(root),
        }
    }

    /// Total number of reachable nodes
    pub fn size(&self) -> usize {
        self.root().map_or(0, |root| root.descendant_count() + 1)
    }
}
