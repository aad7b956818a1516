use super::MindmapDiagram;
use crate::validation::ValidationResult;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Structural checks for a radial hierarchy, accumulated in order: duplicate
/// ids, root presence, parent resolution, cycle detection, depth limit.
///
/// `max_depth` is the host-configured soft limit
/// ([`crate::config::MindmapConfig::max_depth`]); exceeding it is a warning.
pub fn validate(diagram: &MindmapDiagram, max_depth: Option<u32>) -> ValidationResult {
    debug!(
        node_count = diagram.nodes.len(),
        root = %diagram.root,
        "validating mindmap diagram"
    );
    let mut result = ValidationResult::new();

    check_duplicate_ids(diagram, &mut result);
    check_root(diagram, &mut result);
    check_parents(diagram, &mut result);
    check_cycles(diagram, &mut result);

    if let Some(limit) = max_depth {
        let actual = diagram.max_depth();
        if actual > limit as usize {
            result.warning(format!(
                "Hierarchy depth {actual} exceeds the configured limit of {limit}"
            ));
        }
    }

    result
}

fn check_duplicate_ids(diagram: &MindmapDiagram, result: &mut ValidationResult) {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reported: FxHashSet<&str> = FxHashSet::default();
    for node in &diagram.nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            result.error(format!("Duplicate node id '{}'", node.id));
        }
    }
}

fn check_root(diagram: &MindmapDiagram, result: &mut ValidationResult) {
    if diagram.root.is_empty() {
        result.error("No root node declared");
        return;
    }
    if diagram.node(&diagram.root).is_none() {
        result.error(format!(
            "Declared root '{}' does not exist in the node collection",
            diagram.root
        ));
    }
}

fn check_parents(diagram: &MindmapDiagram, result: &mut ValidationResult) {
    for node in &diagram.nodes {
        if let Some(parent) = &node.parent {
            if diagram.node(parent).is_none() {
                result.error(format!(
                    "Node '{}' references missing parent '{}'",
                    node.id, parent
                ));
            }
        }
    }
}

/// Walks every parent chain with an explicit per-node state machine
/// (unvisited / in-progress / done). Reaching an in-progress node is a cycle.
/// A single error covers the whole diagram no matter how many back-edges
/// exist.
fn check_cycles(diagram: &MindmapDiagram, result: &mut ValidationResult) {
    let mut state: FxHashMap<&str, VisitState> = FxHashMap::default();
    let mut cycle_found = false;

    for node in &diagram.nodes {
        if state.contains_key(node.id.as_str()) {
            continue;
        }
        let mut path: Vec<&str> = Vec::new();
        let mut cursor = Some(node.id.as_str());
        while let Some(id) = cursor {
            match state.get(id) {
                Some(VisitState::Done) => break,
                Some(VisitState::InProgress) => {
                    cycle_found = true;
                    break;
                }
                None => {
                    state.insert(id, VisitState::InProgress);
                    path.push(id);
                    cursor = diagram.node(id).and_then(|n| n.parent.as_deref());
                }
            }
        }
        for id in path {
            state.insert(id, VisitState::Done);
        }
    }

    if cycle_found {
        result.error("Circular reference detected in the node hierarchy");
    }
}
