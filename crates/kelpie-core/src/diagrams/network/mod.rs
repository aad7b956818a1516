//! Entity/relationship network family: data shape and graph helpers.

mod analyze;
mod validate;


pub use analyze::{analyze, clusters, connectivity, optimize, suggest};
pub use validate::validate;

use crate::config::StyleMap;
use crate::geom::{Position, Size};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

pub const DIAGRAM_TYPE: &str = "network";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkNodeType {
    Server,
    Client,
    Router,
    Switch,
    Database,
    User,
    #[serde(other)]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkEdgeType {
    #[default]
    Wired,
    Wireless,
    Logical,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkLayoutKind {
    #[default]
    Force,
    Hierarchical,
    Circular,
    Grid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NetworkNodeType,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub edge_type: NetworkEdgeType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDiagram {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    #[serde(default)]
    pub layout: NetworkLayoutKind,
}

impl NetworkDiagram {
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// True when every node already carries a nonzero position, in which case
    /// the layout engine passes positions through unchanged.
    pub fn is_fully_positioned(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|n| !n.position.is_zero())
    }

    /// Ids of nodes touched by no edge.
    pub fn isolated_nodes(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| {
                !self
                    .edges
                    .iter()
                    .any(|e| e.source == n.id || e.target == n.id)
            })
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Breadth-first level assignment for the hierarchical layout: roots are
    /// nodes with no incoming edge, levels follow outgoing edges, and a node
    /// reached again keeps the larger level. Nodes unreachable from any root
    /// (cycles, isolated nodes) stay at level 0.
    pub fn hierarchy_levels(&self) -> FxHashMap<&str, usize> {
        let mut incoming: FxHashMap<&str, usize> = FxHashMap::default();
        let mut outgoing: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for node in &self.nodes {
            incoming.entry(node.id.as_str()).or_insert(0);
            outgoing.entry(node.id.as_str()).or_default();
        }
        for edge in &self.edges {
            if let Some(count) = incoming.get_mut(edge.target.as_str()) {
                *count += 1;
            }
            if let Some(out) = outgoing.get_mut(edge.source.as_str()) {
                if self.node(&edge.target).is_some() {
                    out.push(edge.target.as_str());
                }
            }
        }

        let mut levels: FxHashMap<&str, usize> = FxHashMap::default();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        for node in &self.nodes {
            levels.insert(node.id.as_str(), 0);
            if incoming[node.id.as_str()] == 0 {
                queue.push_back((node.id.as_str(), 0));
            }
        }

        // The level cap bounds traversal on cyclic input, where "take the
        // larger level on revisit" would otherwise never converge.
        let max_level = self.nodes.len();
        while let Some((id, level)) = queue.pop_front() {
            if level > 0 && levels[id] >= level {
                continue;
            }
            levels.insert(id, level);
            if level >= max_level {
                continue;
            }
            if let Some(next) = outgoing.get(id) {
                for &target in next {
                    queue.push_back((target, level + 1));
                }
            }
        }
        levels
    }
}
