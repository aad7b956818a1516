//! Scene model: the renderer-facing geometry produced by the layout engines.
//!
//! A `Scene` is freshly allocated per call and owned by the caller; nothing
//! here aliases the input diagram.

use kelpie_core::geom::{Bounds, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    Circle,
    Ellipse,
    Diamond,
    Rounded,
    Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    /// Center of the node.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: NodeShape,
    pub fill: String,
    /// Pre-wrapped label lines, top to bottom.
    pub label_lines: Vec<String>,
    pub css_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EdgePath {
    Line,
    /// Quadratic Bézier with one control point (wireless network links).
    Quadratic { control: Position },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub from: Position,
    pub to: Position,
    pub path: EdgePath,
    pub stroke_width: f64,
    pub arrowhead: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub css_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLane {
    pub id: String,
    pub label: String,
    /// Full horizontal band the lane occupies.
    pub band: Bounds,
    /// Header strip at the left edge of the band.
    pub header: Bounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePhase {
    pub label: String,
    /// X coordinate of the vertical divider.
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lanes: Vec<SceneLane>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<ScenePhase>,
    pub bounds: Option<Bounds>,
}

impl Scene {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            lanes: Vec::new(),
            phases: Vec::new(),
            bounds: None,
        }
    }
}

/// Bounds over node boxes, edge endpoints/controls, lane bands, and phase
/// dividers. `None` for an empty scene.
pub fn compute_scene_bounds(scene: &Scene) -> Option<Bounds> {
    let mut pts: Vec<(f64, f64)> = Vec::new();
    for n in &scene.nodes {
        pts.push((n.x - n.width / 2.0, n.y - n.height / 2.0));
        pts.push((n.x + n.width / 2.0, n.y + n.height / 2.0));
    }
    for e in &scene.edges {
        pts.push((e.from.x, e.from.y));
        pts.push((e.to.x, e.to.y));
        if let EdgePath::Quadratic { control } = e.path {
            pts.push((control.x, control.y));
        }
    }
    for l in &scene.lanes {
        pts.push((l.band.x, l.band.y));
        pts.push((l.band.x + l.band.width, l.band.y + l.band.height));
    }
    for p in &scene.phases {
        pts.push((p.x, p.y));
        pts.push((p.x, p.y + p.height));
    }
    Bounds::from_points(pts)
}
