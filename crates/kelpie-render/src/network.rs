//! Layouts for the network family: deterministic circular approximation for
//! force/circular, BFS-level grid for hierarchical, near-square grid, and a
//! pass-through for pre-positioned diagrams.

use crate::model::{EdgePath, NodeShape, Scene, SceneEdge, SceneNode, compute_scene_bounds};
use indexmap::IndexMap;
use kelpie_core::RenderConfig;
use kelpie_core::diagrams::network::{
    NetworkDiagram, NetworkEdgeType, NetworkLayoutKind, NetworkNodeType,
};
use kelpie_core::geom::{Position, Size};
use std::f64::consts::TAU;
use tracing::debug;

/// Fallback box for nodes whose host-supplied size is zero.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 80.0,
    height: 50.0,
};

/// Maximum perpendicular bow of a wireless edge's control point.
const MAX_WIRELESS_BOW: f64 = 100.0;

/// Position of every node, keyed by id in node order. Pre-positioned
/// diagrams (every node nonzero) pass through unchanged, which makes the
/// engine idempotent for re-renders.
pub fn compute_positions(
    diagram: &NetworkDiagram,
    config: &RenderConfig,
) -> IndexMap<String, Position> {
    let mut positions: IndexMap<String, Position> = IndexMap::new();
    if diagram.nodes.is_empty() {
        return positions;
    }

    if diagram.is_fully_positioned() {
        for node in &diagram.nodes {
            positions.insert(node.id.clone(), node.position);
        }
        return positions;
    }

    let layout = config.network.layout.unwrap_or(diagram.layout);
    debug!(
        node_count = diagram.nodes.len(),
        ?layout,
        "computing network layout"
    );
    match layout {
        // Deterministic circular approximation, not an iterative simulation.
        NetworkLayoutKind::Force | NetworkLayoutKind::Circular => {
            let center = config.canvas_center();
            let radius = 0.8 * (config.width.min(config.height) / 2.0);
            let n = diagram.nodes.len() as f64;
            for (i, node) in diagram.nodes.iter().enumerate() {
                let angle = TAU * i as f64 / n;
                positions.insert(
                    node.id.clone(),
                    Position::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ),
                );
            }
        }
        NetworkLayoutKind::Hierarchical => {
            let levels = diagram.hierarchy_levels();
            let level_count = levels.values().copied().max().unwrap_or(0) + 1;
            let mut per_level: Vec<Vec<&str>> = vec![Vec::new(); level_count];
            for node in &diagram.nodes {
                per_level[levels[node.id.as_str()]].push(node.id.as_str());
            }
            for (level, ids) in per_level.iter().enumerate() {
                let y = (level as f64 + 1.0) * config.height / (level_count as f64 + 1.0);
                for (i, id) in ids.iter().enumerate() {
                    let x = (i as f64 + 1.0) * config.width / (ids.len() as f64 + 1.0);
                    positions.insert((*id).to_string(), Position::new(x, y));
                }
            }
        }
        NetworkLayoutKind::Grid => {
            let n = diagram.nodes.len();
            let cols = (n as f64).sqrt().ceil() as usize;
            let rows = n.div_ceil(cols);
            let cell_w = config.width / cols as f64;
            let cell_h = config.height / rows as f64;
            for (i, node) in diagram.nodes.iter().enumerate() {
                let row = i / cols;
                let col = i % cols;
                positions.insert(
                    node.id.clone(),
                    Position::new(
                        (col as f64 + 0.5) * cell_w,
                        (row as f64 + 0.5) * cell_h,
                    ),
                );
            }
        }
    }
    positions
}

fn node_shape(node_type: NetworkNodeType) -> NodeShape {
    match node_type {
        NetworkNodeType::Server => NodeShape::Rounded,
        NetworkNodeType::Database => NodeShape::Ellipse,
        NetworkNodeType::Router | NetworkNodeType::Switch => NodeShape::Diamond,
        NetworkNodeType::User => NodeShape::Circle,
        _ => NodeShape::Circle,
    }
}

fn node_fill(node_type: NetworkNodeType) -> &'static str {
    match node_type {
        NetworkNodeType::Server => "#4f86c6",
        NetworkNodeType::Client => "#58b368",
        NetworkNodeType::Router => "#d9a547",
        NetworkNodeType::Switch => "#c8a24b",
        NetworkNodeType::Database => "#8c6bb8",
        // Users get a distinct color so people stand out from machines.
        NetworkNodeType::User => "#c65f5f",
        NetworkNodeType::Custom => "#7f8c9b",
    }
}

fn edge_stroke_width(edge_type: NetworkEdgeType) -> f64 {
    match edge_type {
        NetworkEdgeType::Physical => 3.0,
        _ => 1.5,
    }
}

pub fn layout_network(diagram: &NetworkDiagram, config: &RenderConfig) -> Scene {
    let positions = compute_positions(diagram, config);

    let mut scene = Scene::empty();
    for node in &diagram.nodes {
        let Some(position) = positions.get(node.id.as_str()) else {
            continue;
        };
        let size = if node.size.is_zero() {
            DEFAULT_NODE_SIZE
        } else {
            node.size
        };
        scene.nodes.push(SceneNode {
            id: node.id.clone(),
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            shape: node_shape(node.node_type),
            fill: node_fill(node.node_type).to_string(),
            label_lines: vec![node.label.clone()],
            css_class: "network-node".to_string(),
        });
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        let (Some(from), Some(to)) = (
            positions.get(edge.source.as_str()),
            positions.get(edge.target.as_str()),
        ) else {
            // Dangling endpoints are a validator finding, not a layout one.
            continue;
        };
        let path = if edge.edge_type == NetworkEdgeType::Wireless {
            EdgePath::Quadratic {
                control: wireless_control(*from, *to),
            }
        } else {
            EdgePath::Line
        };
        scene.edges.push(SceneEdge {
            id: format!("edge_{index}"),
            source: edge.source.clone(),
            target: edge.target.clone(),
            from: *from,
            to: *to,
            path,
            stroke_width: edge_stroke_width(edge.edge_type),
            arrowhead: false,
            label: edge.label.clone(),
            css_class: format!("network-edge network-edge-{:?}", edge.edge_type).to_lowercase(),
        });
    }

    scene.bounds = compute_scene_bounds(&scene);
    scene
}

/// Control point for a wireless link: the midpoint pushed perpendicular to
/// the segment by `min(distance * 0.3, 100)`.
fn wireless_control(from: Position, to: Position) -> Position {
    let mid = from.midpoint(to);
    let distance = from.distance_to(to);
    if distance == 0.0 {
        return mid;
    }
    let bow = (distance * 0.3).min(MAX_WIRELESS_BOW);
    let nx = -(to.y - from.y) / distance;
    let ny = (to.x - from.x) / distance;
    Position::new(mid.x + nx * bow, mid.y + ny * bow)
}
