use super::{MindmapAlgorithm, MindmapDiagram, MindmapLayoutHints};
use crate::analysis::{
    AiAnalysis, AiOptimization, AiSuggestion, Priority, SuggestionAction, SuggestionKind,
    clamp_score, population_stddev,
};
use tracing::debug;

pub fn analyze(diagram: &MindmapDiagram) -> AiAnalysis {
    let node_count = diagram.nodes.len();
    let depth = diagram.max_depth();
    debug!(node_count, depth, "analyzing mindmap diagram");

    let mut complexity = 0.3;
    if node_count > 20 {
        complexity += 0.2;
    }
    if node_count > 50 {
        complexity += 0.2;
    }
    if depth > 4 {
        complexity += 0.2;
    }

    let readability = if node_count <= 30 && depth <= 4 {
        0.9
    } else {
        0.5
    };

    let labeled = diagram
        .nodes
        .iter()
        .filter(|n| !n.label.trim().is_empty())
        .count();
    let completeness = if node_count == 0 {
        0.0
    } else {
        labeled as f64 / node_count as f64
    };

    AiAnalysis {
        complexity: clamp_score(complexity),
        readability,
        completeness: clamp_score(completeness),
        suggestions: suggest(diagram),
        optimizations: optimizations(diagram),
    }
}

pub fn suggest(diagram: &MindmapDiagram) -> Vec<AiSuggestion> {
    let node_count = diagram.nodes.len();
    let depth = diagram.max_depth();
    let mut out = Vec::new();

    if depth > 5 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Structure,
            priority: Priority::High,
            message: format!(
                "The hierarchy is {depth} levels deep; consider restructuring deep branches"
            ),
            confidence: 0.9,
            action: SuggestionAction::Restructure,
        });
    }
    if node_count > 40 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Structure,
            priority: Priority::Medium,
            message: format!("{node_count} nodes is a lot for one map; consider splitting into sub-maps"),
            confidence: 0.8,
            action: SuggestionAction::SplitDiagram,
        });
    }
    let balance = branch_balance(diagram);
    if balance < 0.5 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Layout,
            priority: Priority::Low,
            message: "Root branches are unbalanced; consider redistributing topics".to_string(),
            confidence: 0.7,
            action: SuggestionAction::RebalanceBranches,
        });
    }
    let root_label_len = diagram
        .node(&diagram.root)
        .map_or(0, |root| root.label.chars().count());
    if root_label_len > 30 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Content,
            priority: Priority::Low,
            message: "The root label is long; a shorter central topic reads better".to_string(),
            confidence: 0.6,
            action: SuggestionAction::ShortenRootLabel,
        });
    }

    out
}

/// How evenly the root's direct branches carry the tree: `max(0, 1 - σ/μ)`
/// over the per-branch subtree sizes, `1.0` when the root has at most one
/// child.
pub fn branch_balance(diagram: &MindmapDiagram) -> f64 {
    let counts: Vec<f64> = diagram
        .children_of(&diagram.root)
        .map(|child| diagram.subtree_size(&child.id) as f64)
        .collect();
    if counts.len() <= 1 {
        return 1.0;
    }
    let mean = counts.iter().sum::<f64>() / counts.len() as f64;
    if mean == 0.0 {
        return 1.0;
    }
    (1.0 - population_stddev(&counts) / mean).max(0.0)
}

/// Returns a copy of the diagram with layout hints chosen from node count and
/// depth; node positions are untouched (the radial engine derives them).
pub fn optimize(diagram: &MindmapDiagram) -> MindmapDiagram {
    let mut out = diagram.clone();
    out.layout = Some(layout_hints(diagram));
    out
}

fn layout_hints(diagram: &MindmapDiagram) -> MindmapLayoutHints {
    let node_count = diagram.nodes.len();
    let depth = diagram.max_depth();
    let algorithm = if depth > 4 {
        MindmapAlgorithm::Tree
    } else if node_count > 30 {
        MindmapAlgorithm::Force
    } else {
        MindmapAlgorithm::Circular
    };
    // Denser maps get tighter spacing.
    let spacing = (2000.0 / node_count.max(1) as f64).clamp(50.0, 200.0);
    MindmapLayoutHints { algorithm, spacing }
}

fn optimizations(diagram: &MindmapDiagram) -> Vec<AiOptimization> {
    let hints = layout_hints(diagram);
    let algorithm = match hints.algorithm {
        MindmapAlgorithm::Tree => "tree",
        MindmapAlgorithm::Force => "force",
        MindmapAlgorithm::Circular => "circular",
    };
    vec![
        AiOptimization {
            target: "layout".to_string(),
            description: format!("Use the {algorithm} layout for this map's size and depth"),
        },
        AiOptimization {
            target: "spacing".to_string(),
            description: format!("Set node spacing to {:.0}px", hints.spacing),
        },
    ]
}
