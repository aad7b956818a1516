use super::FlowDiagram;
use crate::validation::ValidationResult;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Structural checks for a swimlane flow: at least one lane, resolvable lane
/// references, resolvable edge endpoints (checked independently per side).
pub fn validate(diagram: &FlowDiagram) -> ValidationResult {
    debug!(
        lane_count = diagram.lanes.len(),
        node_count = diagram.nodes.len(),
        "validating swimlane diagram"
    );
    let mut result = ValidationResult::new();

    if diagram.lanes.is_empty() {
        result.error("Swimlane diagram must contain at least one lane");
    }

    let mut seen_lanes: FxHashSet<&str> = FxHashSet::default();
    let mut reported_lanes: FxHashSet<&str> = FxHashSet::default();
    for lane in &diagram.lanes {
        if !seen_lanes.insert(lane.id.as_str()) && reported_lanes.insert(lane.id.as_str()) {
            result.error(format!("Duplicate lane id '{}'", lane.id));
        }
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reported: FxHashSet<&str> = FxHashSet::default();
    for node in &diagram.nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            result.error(format!("Duplicate node id '{}'", node.id));
        }
        if diagram.lane(&node.lane_id).is_none() {
            result.error(format!(
                "Node '{}' references missing lane '{}'",
                node.id, node.lane_id
            ));
        }
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        if diagram.node(&edge.source).is_none() {
            result.error(format!(
                "Edge #{index} references missing source node '{}'",
                edge.source
            ));
        }
        if diagram.node(&edge.target).is_none() {
            result.error(format!(
                "Edge #{index} references missing target node '{}'",
                edge.target
            ));
        }
    }

    result
}
