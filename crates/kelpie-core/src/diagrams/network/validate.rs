use super::NetworkDiagram;
use crate::validation::ValidationResult;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Referential integrity for a network graph. Each edge endpoint is checked
/// independently so an edge dangling on both sides reports two errors.
pub fn validate(diagram: &NetworkDiagram) -> ValidationResult {
    debug!(
        node_count = diagram.nodes.len(),
        edge_count = diagram.edges.len(),
        "validating network diagram"
    );
    let mut result = ValidationResult::new();

    if diagram.nodes.is_empty() {
        result.error("Network diagram must contain at least one node");
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reported: FxHashSet<&str> = FxHashSet::default();
    for node in &diagram.nodes {
        if node.id.is_empty() {
            result.error(format!("Node '{}' is missing an id", node.label));
            continue;
        }
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            result.error(format!("Duplicate node id '{}'", node.id));
        }
        if node.label.is_empty() {
            result.error(format!("Node '{}' is missing a label", node.id));
        }
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        if edge.source.is_empty() {
            result.error(format!("Edge #{index} is missing a source"));
        } else if diagram.node(&edge.source).is_none() {
            result.error(format!(
                "Edge #{index} references missing source node '{}'",
                edge.source
            ));
        }
        if edge.target.is_empty() {
            result.error(format!("Edge #{index} is missing a target"));
        } else if diagram.node(&edge.target).is_none() {
            result.error(format!(
                "Edge #{index} references missing target node '{}'",
                edge.target
            ));
        }
    }

    // One aggregate warning, not one per node.
    let isolated = diagram.isolated_nodes();
    if !isolated.is_empty() {
        result.warning(format!(
            "{} isolated node(s) have no connections",
            isolated.len()
        ));
    }

    result
}
