//! Heuristic quality assessment output.
//!
//! Analyzers are best-effort: scores land in `[0, 1]` and suggestion lists
//! degrade to empty rather than failing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Structure,
    Layout,
    Content,
    Connectivity,
}

/// Machine-readable handle the host assistant maps to an editor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionAction {
    Restructure,
    SplitDiagram,
    RebalanceBranches,
    ShortenRootLabel,
    AddConnections,
    UseHierarchicalLayout,
    DiversifyNodeTypes,
    ReduceLanes,
    AddPhases,
    AddStartNode,
    AddEndNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub message: String,
    pub confidence: f64,
    pub action: SuggestionAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiOptimization {
    /// What the optimization touches ("layout", "spacing", "clustering", ...).
    pub target: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub complexity: f64,
    pub readability: f64,
    pub completeness: f64,
    pub suggestions: Vec<AiSuggestion>,
    pub optimizations: Vec<AiOptimization>,
}

/// All scores share one clamp. The source material left complexity unclamped
/// while clamping the other two; that asymmetry was not a contract.
pub(crate) fn clamp_score(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Sample standard deviation is not wanted here: heuristics treat the child
/// counts as the full population.
pub(crate) fn population_stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
