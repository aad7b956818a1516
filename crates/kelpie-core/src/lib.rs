#![forbid(unsafe_code)]

//! Diagram semantics for the kelpie plugin engine.
//!
//! Design goals:
//! - one typed data shape per diagram family, closed over a tagged union
//! - validators and analyzers accumulate findings instead of failing fast
//! - deterministic, testable outputs (no hidden randomness, no shared state)

pub mod analysis;
pub mod config;
pub mod diagrams;
pub mod error;
pub mod geom;
pub mod validation;

pub use analysis::{
    AiAnalysis, AiOptimization, AiSuggestion, Priority, SuggestionAction, SuggestionKind,
};
pub use config::{FlowConfig, MindmapConfig, NetworkConfig, RenderConfig, StyleMap, StyleValue};
pub use diagrams::DiagramData;
pub use error::{Error, Result};
pub use geom::{Bounds, Position, Size};
pub use validation::{Severity, ValidationIssue, ValidationResult};
