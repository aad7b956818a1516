#![forbid(unsafe_code)]

//! Headless layout + SVG scene markup for the kelpie plugin engine.
//!
//! Layout is total: every engine is defensively bounded (cycle guards, level
//! caps), so structurally-broken input degrades to a partial scene instead of
//! hanging or failing. Structural findings belong to the validators in
//! `kelpie-core`.

pub mod flow;
pub mod mindmap;
pub mod model;
pub mod network;
pub mod svg;
pub mod text;

use crate::model::Scene;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use kelpie_core::{DiagramData, RenderConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Computes the scene for any diagram family. Stateless and deterministic:
/// identical data + config yields byte-identical output.
pub fn layout_diagram(data: &DiagramData, config: &RenderConfig, options: &LayoutOptions) -> Scene {
    match data {
        DiagramData::Mindmap(d) => {
            mindmap::layout_mindmap(d, config, options.text_measurer.as_ref())
        }
        DiagramData::Network(d) => network::layout_network(d, config),
        DiagramData::Flow(d) => flow::layout_flow(d, config),
    }
}
