//! Render configuration supplied by the host per call.
//!
//! Every field is serde-defaulted so a partial host config (e.g. `{"width":
//! 900}`) deserializes cleanly onto the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open-ended style bags are an explicit string-key → constrained-value map,
/// never a raw JSON blob.
pub type StyleMap = BTreeMap<String, StyleValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    pub mindmap: MindmapConfig,
    pub network: NetworkConfig,
    pub flow: FlowConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            mindmap: MindmapConfig::default(),
            network: NetworkConfig::default(),
            flow: FlowConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn canvas_center(&self) -> crate::geom::Position {
        crate::geom::Position::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindmapConfig {
    /// Radius of the first ring of children around the root. Each deeper level
    /// shrinks by a fixed factor.
    pub initial_radius: f64,
    /// Soft depth limit; exceeding it is a validation warning, not an error.
    pub max_depth: Option<u32>,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            initial_radius: 200.0,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    /// Overrides the layout requested by the diagram data when set.
    pub layout: Option<crate::diagrams::network::NetworkLayoutKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowConfig {
    /// Width of the lane header column on the left edge of the canvas.
    pub lane_header_width: f64,
    /// Height of the per-lane header strip inside each band.
    pub lane_header_height: f64,
    /// Horizontal extent of one phase unit; phase dividers sit at
    /// `lane_header_width + startPosition * phase_width`.
    pub phase_width: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            lane_header_width: 250.0,
            lane_header_height: 40.0,
            phase_width: 200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_deserializes_onto_defaults() {
        let cfg: RenderConfig = serde_json::from_str(r#"{"width": 900}"#).unwrap();
        assert_eq!(cfg.width, 900.0);
        assert_eq!(cfg.height, 800.0);
        assert_eq!(cfg.flow.lane_header_width, 250.0);
    }

    #[test]
    fn style_value_accepts_the_three_shapes() {
        let m: StyleMap =
            serde_json::from_str(r##"{"stroke":"#333","opacity":0.5,"dashed":true}"##).unwrap();
        assert_eq!(m["stroke"], StyleValue::Text("#333".to_string()));
        assert_eq!(m["opacity"], StyleValue::Number(0.5));
        assert_eq!(m["dashed"], StyleValue::Flag(true));
    }
}
