//! Family tree reconstruction from flat member lists

mod builder;
mod node;

pub use builder::{build_forest, build_tree, validate_structure};
pub use node::{FamilyTree, TreeNode};
