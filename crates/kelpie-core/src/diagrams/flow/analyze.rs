use super::{FlowDiagram, FlowNodeType};
use crate::analysis::{
    AiAnalysis, AiOptimization, AiSuggestion, Priority, SuggestionAction, SuggestionKind,
    clamp_score,
};
use crate::geom::Position;
use rustc_hash::FxHashMap;
use tracing::debug;

pub fn analyze(diagram: &FlowDiagram) -> AiAnalysis {
    let lane_count = diagram.lanes.len();
    let node_count = diagram.nodes.len();
    debug!(lane_count, node_count, "analyzing swimlane diagram");

    let mut complexity = 0.3;
    if lane_count > 3 {
        complexity += 0.2;
    }
    if node_count > 10 {
        complexity += 0.2;
    }
    if !diagram.phases.is_empty() {
        complexity += 0.2;
    }

    let readability = if lane_count <= 5 && node_count <= 15 {
        0.9
    } else {
        0.5
    };

    let mut completeness = 0.5;
    if diagram.has_node_type(FlowNodeType::Start) {
        completeness += 0.25;
    }
    if diagram.has_node_type(FlowNodeType::End) {
        completeness += 0.25;
    }

    AiAnalysis {
        complexity: clamp_score(complexity),
        readability,
        completeness: clamp_score(completeness),
        suggestions: suggest(diagram),
        optimizations: optimizations(diagram),
    }
}

pub fn suggest(diagram: &FlowDiagram) -> Vec<AiSuggestion> {
    let mut out = Vec::new();

    if diagram.lanes.len() > 5 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Structure,
            priority: Priority::Medium,
            message: format!(
                "{} lanes make narrow bands; consider merging responsibilities",
                diagram.lanes.len()
            ),
            confidence: 0.7,
            action: SuggestionAction::ReduceLanes,
        });
    }
    if diagram.phases.is_empty() && diagram.nodes.len() > 8 {
        out.push(AiSuggestion {
            kind: SuggestionKind::Structure,
            priority: Priority::Low,
            message: "Phases would segment this flow into readable stages".to_string(),
            confidence: 0.6,
            action: SuggestionAction::AddPhases,
        });
    }
    if !diagram.has_node_type(FlowNodeType::Start) {
        out.push(AiSuggestion {
            kind: SuggestionKind::Content,
            priority: Priority::Medium,
            message: "The flow has no start node".to_string(),
            confidence: 0.85,
            action: SuggestionAction::AddStartNode,
        });
    }
    if !diagram.has_node_type(FlowNodeType::End) {
        out.push(AiSuggestion {
            kind: SuggestionKind::Content,
            priority: Priority::Medium,
            message: "The flow has no end node".to_string(),
            confidence: 0.85,
            action: SuggestionAction::AddEndNode,
        });
    }

    out
}

/// Returns a copy with every node packed left-to-right within its lane:
/// `x = index * 150 + 50` in lane order of appearance, at a fixed lane-local
/// `y`. Deliberately not a crossing-minimizing layout.
pub fn optimize(diagram: &FlowDiagram) -> FlowDiagram {
    let mut out = diagram.clone();
    let mut per_lane: FxHashMap<String, usize> = FxHashMap::default();
    for node in &mut out.nodes {
        let index = per_lane.entry(node.lane_id.clone()).or_insert(0);
        node.position = Position::new(*index as f64 * 150.0 + 50.0, 50.0);
        *index += 1;
    }
    out
}

fn optimizations(diagram: &FlowDiagram) -> Vec<AiOptimization> {
    let mut out = vec![AiOptimization {
        target: "spacing".to_string(),
        description: "Pack nodes left-to-right within each lane at 150px intervals".to_string(),
    }];
    if diagram.phases.is_empty() && diagram.nodes.len() > 8 {
        out.push(AiOptimization {
            target: "phases".to_string(),
            description: "Introduce phases to group steps by stage".to_string(),
        });
    }
    out
}
