//! Per-family diagram shapes behind one closed tagged union.
//!
//! The engine never dispatches on loosely-typed payloads: the host hands over
//! one of these three shapes and the tag decides which plugin may touch it.

pub mod flow;
pub mod mindmap;
pub mod network;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "diagramType")]
pub enum DiagramData {
    #[serde(rename = "mindmap")]
    Mindmap(mindmap::MindmapDiagram),
    #[serde(rename = "network")]
    Network(network::NetworkDiagram),
    #[serde(rename = "swimlane")]
    Flow(flow::FlowDiagram),
}

impl DiagramData {
    pub fn diagram_type(&self) -> &'static str {
        match self {
            DiagramData::Mindmap(_) => mindmap::DIAGRAM_TYPE,
            DiagramData::Network(_) => network::DIAGRAM_TYPE,
            DiagramData::Flow(_) => flow::DIAGRAM_TYPE,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            DiagramData::Mindmap(d) => d.nodes.len(),
            DiagramData::Network(d) => d.nodes.len(),
            DiagramData::Flow(d) => d.nodes.len(),
        }
    }

    /// Mindmaps have no explicit edge collection; their parent links induce
    /// one edge per non-root node.
    pub fn edge_count(&self) -> usize {
        match self {
            DiagramData::Mindmap(d) => d.nodes.iter().filter(|n| n.parent.is_some()).count(),
            DiagramData::Network(d) => d.edges.len(),
            DiagramData::Flow(d) => d.edges.len(),
        }
    }
}
