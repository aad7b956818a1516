//! Lane-based process-flow (swimlane) family: data shape and lookups.
//!
//! Lanes are ordered and partition the canvas into horizontal bands; phases
//! overlay named vertical intervals across every lane.

mod analyze;
mod validate;


pub use analyze::{analyze, optimize, suggest};
pub use validate::validate;

use crate::config::StyleMap;
use crate::geom::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DIAGRAM_TYPE: &str = "swimlane";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneType {
    Pool,
    #[default]
    Lane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowNodeType {
    Start,
    End,
    Decision,
    #[default]
    #[serde(other)]
    Process,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub id: String,
    pub label: String,
    #[serde(default, rename = "type")]
    pub lane_type: LaneType,
}

/// A named vertical interval overlaid across all lanes, in phase units from
/// the left edge of the working area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub label: String,
    pub start_position: f64,
    pub end_position: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub lane_id: String,
    #[serde(default, rename = "type")]
    pub node_type: FlowNodeType,
    /// Lane-local offset supplied by the host; the layout engine adds the
    /// lane band origin, it does not auto-place flow nodes.
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDiagram {
    pub lanes: Vec<Lane>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowDiagram {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn lane(&self, id: &str) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id == id)
    }

    /// Position of `id` in the lane ordering (lanes stack top-to-bottom).
    pub fn lane_index(&self, id: &str) -> Option<usize> {
        self.lanes.iter().position(|l| l.id == id)
    }

    pub fn has_node_type(&self, node_type: FlowNodeType) -> bool {
        self.nodes.iter().any(|n| n.node_type == node_type)
    }
}
