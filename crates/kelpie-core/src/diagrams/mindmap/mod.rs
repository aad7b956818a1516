//! Radial-hierarchy (mind map) family: data shape and tree walks.
//!
//! Nodes form a tree through `parent` links; the declared root carries no
//! parent. All walks are iterative with owned visited sets so malformed
//! (cyclic) input terminates.

mod analyze;
mod validate;

#[cfg(test)]
mod tests;

pub use analyze::{analyze, branch_balance, optimize, suggest};
pub use validate::validate;

use crate::config::StyleMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DIAGRAM_TYPE: &str = "mindmap";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindmapAlgorithm {
    Tree,
    Force,
    Circular,
}

/// Layout advice attached by the optimizer; the radial engine itself does not
/// read it (the host's alternative layout backends do).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapLayoutHints {
    pub algorithm: MindmapAlgorithm,
    pub spacing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapDiagram {
    /// Id of the declared root node.
    pub root: String,
    pub nodes: Vec<MindmapNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<MindmapLayoutHints>,
}

impl MindmapDiagram {
    /// First match wins; duplicate ids are a validation error, so valid
    /// diagrams never observe the difference.
    pub fn node(&self, id: &str) -> Option<&MindmapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Children discovered by linear scan. The data sizes this engine targets
    /// do not justify a precomputed adjacency index.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MindmapNode> {
        self.nodes
            .iter()
            .filter(move |n| n.parent.as_deref() == Some(id))
    }

    /// Longest root-to-leaf chain, counted in nodes (a lone root has depth 1,
    /// a missing root depth 0). Re-visitation is guarded so malformed graphs
    /// cannot loop.
    pub fn max_depth(&self) -> usize {
        if self.node(&self.root).is_none() {
            return 0;
        }
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<(&str, usize)> = vec![(self.root.as_str(), 1)];
        let mut max = 0usize;
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            max = max.max(depth);
            for child in self.children_of(id) {
                stack.push((child.id.as_str(), depth + 1));
            }
        }
        max
    }

    /// Size of the subtree rooted at `id`, including `id` itself.
    pub fn subtree_size(&self, id: &str) -> usize {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<&str> = vec![id];
        let mut count = 0usize;
        while let Some(cur) = stack.pop() {
            if !visited.insert(cur) {
                continue;
            }
            count += 1;
            for child in self.children_of(cur) {
                stack.push(child.id.as_str());
            }
        }
        count
    }
}
