use super::{NetworkDiagram, NetworkLayoutKind, NetworkNodeType};
use crate::analysis::{
    AiAnalysis, AiOptimization, AiSuggestion, Priority, SuggestionAction, SuggestionKind,
    clamp_score,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::debug;

/// Edges per node; 0 for an empty diagram, never NaN.
pub fn connectivity(diagram: &NetworkDiagram) -> f64 {
    diagram.edges.len() as f64 / diagram.nodes.len().max(1) as f64
}

pub fn analyze(diagram: &NetworkDiagram) -> AiAnalysis {
    let node_count = diagram.nodes.len();
    let connectivity = connectivity(diagram);
    debug!(node_count, connectivity, "analyzing network diagram");

    let mut complexity = 0.3;
    if node_count > 30 {
        complexity += 0.2;
    }
    if connectivity > 2.0 {
        complexity += 0.2;
    }
    if diagram
        .nodes
        .iter()
        .any(|n| n.node_type == NetworkNodeType::Custom)
    {
        complexity += 0.2;
    }

    let readability = if node_count <= 40 && connectivity <= 2.0 {
        0.9
    } else {
        0.5
    };

    let completeness = if node_count <= 1 {
        1.0
    } else {
        let isolated = diagram.isolated_nodes().len();
        (node_count - isolated) as f64 / node_count as f64
    };

    AiAnalysis {
        complexity: clamp_score(complexity),
        readability,
        completeness: clamp_score(completeness),
        suggestions: suggest(diagram),
        optimizations: optimizations(diagram),
    }
}

pub fn suggest(diagram: &NetworkDiagram) -> Vec<AiSuggestion> {
    let node_count = diagram.nodes.len();
    let connectivity = connectivity(diagram);
    let mut out = Vec::new();
    if node_count == 0 {
        return out;
    }

    if connectivity < 0.5 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Connectivity,
            priority: Priority::Medium,
            message: "The network is sparsely connected; consider adding connections".to_string(),
            confidence: 0.8,
            action: SuggestionAction::AddConnections,
        });
    }
    if node_count > 40 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Layout,
            priority: Priority::High,
            message: format!(
                "{node_count} nodes crowd a flat layout; a hierarchical layout would read better"
            ),
            confidence: 0.85,
            action: SuggestionAction::UseHierarchicalLayout,
        });
    }
    let distinct_types: FxHashSet<_> = diagram.nodes.iter().map(|n| n.node_type).collect();
    if distinct_types.len() == 1 && node_count > 5 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Content,
            priority: Priority::Low,
            message: "Every node shares one type; distinct types make roles visible".to_string(),
            confidence: 0.6,
            action: SuggestionAction::DiversifyNodeTypes,
        });
    }

    out
}

/// Returns a copy of the diagram with the layout switched to the heuristic
/// best fit; node positions are untouched.
pub fn optimize(diagram: &NetworkDiagram) -> NetworkDiagram {
    let mut out = diagram.clone();
    out.layout = best_layout(diagram);
    out
}

fn best_layout(diagram: &NetworkDiagram) -> NetworkLayoutKind {
    let connectivity = connectivity(diagram);
    if connectivity > 1.5 {
        return NetworkLayoutKind::Force;
    }
    if has_clear_hierarchy(diagram) {
        return NetworkLayoutKind::Hierarchical;
    }
    if diagram.nodes.len() > 50 {
        return NetworkLayoutKind::Grid;
    }
    NetworkLayoutKind::Circular
}

/// A clear multi-level hierarchy has more than two levels but far fewer
/// levels than nodes (a long chain is not a hierarchy worth a tree layout).
fn has_clear_hierarchy(diagram: &NetworkDiagram) -> bool {
    if diagram.nodes.is_empty() {
        return false;
    }
    let levels = diagram.hierarchy_levels();
    let distinct: FxHashSet<usize> = levels.values().copied().collect();
    distinct.len() > 2 && (distinct.len() as f64) < 0.8 * diagram.nodes.len() as f64
}

/// Connected components over the undirected edge set, breadth-first with an
/// explicit frontier queue. Components of size 1 are not reported.
pub fn clusters(diagram: &NetworkDiagram) -> Vec<Vec<String>> {
    let mut adjacency: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for node in &diagram.nodes {
        adjacency.entry(node.id.as_str()).or_default();
    }
    for edge in &diagram.edges {
        if diagram.node(&edge.source).is_none() || diagram.node(&edge.target).is_none() {
            continue;
        }
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        adjacency
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();
    for node in &diagram.nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }
        let mut component = Vec::new();
        let mut frontier: VecDeque<&str> = VecDeque::new();
        frontier.push_back(node.id.as_str());
        visited.insert(node.id.as_str());
        while let Some(id) = frontier.pop_front() {
            component.push(id.to_string());
            if let Some(neighbors) = adjacency.get(id) {
                for &neighbor in neighbors {
                    if visited.insert(neighbor) {
                        frontier.push_back(neighbor);
                    }
                }
            }
        }
        if component.len() > 1 {
            out.push(component);
        }
    }
    out
}

fn optimizations(diagram: &NetworkDiagram) -> Vec<AiOptimization> {
    let layout = match best_layout(diagram) {
        NetworkLayoutKind::Force => "force",
        NetworkLayoutKind::Hierarchical => "hierarchical",
        NetworkLayoutKind::Circular => "circular",
        NetworkLayoutKind::Grid => "grid",
    };
    let mut out = vec![AiOptimization {
        target: "layout".to_string(),
        description: format!("Use the {layout} layout for this topology"),
    }];
    let clusters = clusters(diagram);
    if clusters.len() > 1 {
        out.push(AiOptimization {
            target: "clustering".to_string(),
            description: format!(
                "{} separate clusters detected; grouping them visually would help",
                clusters.len()
            ),
        });
    }
    out
}
