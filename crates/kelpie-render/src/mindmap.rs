//! Radial layout for the mind-map family.
//!
//! The declared root sits at the canvas center; each node's children fan out
//! evenly around the parent's own angle, and every level shrinks the ring
//! radius by a fixed factor so the tree radiates outward with decreasing
//! step size.

use crate::model::{EdgePath, NodeShape, Scene, SceneEdge, SceneNode, compute_scene_bounds};
use crate::text::{TextMeasurer, TextStyle, stack_label};
use indexmap::IndexMap;
use kelpie_core::RenderConfig;
use kelpie_core::diagrams::mindmap::MindmapDiagram;
use kelpie_core::geom::Position;
use rustc_hash::FxHashSet;
use std::f64::consts::TAU;
use tracing::debug;

/// Ring shrink factor per recursion level.
pub const RADIUS_DECAY: f64 = 0.8;

/// Fill palette for non-root nodes; indexed by [`palette_color`]. Pinned
/// because visual regression tests depend on exact colors.
pub const PALETTE: [&str; 8] = [
    "#4f86c6", "#58b368", "#d9a547", "#c65f5f", "#8c6bb8", "#47a8a3", "#c678a8", "#7d8b4e",
];

/// The root never takes a palette color.
pub const ROOT_COLOR: &str = "#2d3a52";

const NODE_PADDING: f64 = 12.0;

/// Polynomial rolling hash of the node id into the palette: `h = h*31 + code`
/// (wrapping), taken modulo the palette length. Color-stable across renders
/// and across reimplementations.
pub fn palette_color(id: &str) -> &'static str {
    let mut h: u32 = 0;
    for ch in id.chars() {
        h = h.wrapping_mul(31).wrapping_add(ch as u32);
    }
    PALETTE[h as usize % PALETTE.len()]
}

/// Position of every node reachable from the declared root, keyed by node id
/// in placement order. Children are discovered by linear scan; a visited
/// guard keeps malformed (cyclic) input bounded without changing output for
/// valid trees.
pub fn compute_positions(
    diagram: &MindmapDiagram,
    config: &RenderConfig,
) -> IndexMap<String, Position> {
    let mut positions: IndexMap<String, Position> = IndexMap::new();
    let Some(root) = diagram.node(&diagram.root) else {
        return positions;
    };
    debug!(node_count = diagram.nodes.len(), "computing mindmap layout");

    let center = config.canvas_center();
    positions.insert(root.id.clone(), center);

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(root.id.as_str());

    struct Frame<'a> {
        id: &'a str,
        position: Position,
        radius: f64,
        angle: f64,
    }
    let mut stack = vec![Frame {
        id: root.id.as_str(),
        position: center,
        radius: config.mindmap.initial_radius,
        angle: 0.0,
    }];

    while let Some(frame) = stack.pop() {
        let children: Vec<&str> = diagram
            .children_of(frame.id)
            .map(|c| c.id.as_str())
            .filter(|id| !visited.contains(id))
            .collect();
        if children.is_empty() {
            continue;
        }

        // Siblings fan out symmetrically around the parent's own angle.
        let angle_step = TAU / children.len() as f64;
        let start_angle = frame.angle - angle_step * (children.len() - 1) as f64 / 2.0;

        for (i, child) in children.into_iter().enumerate() {
            let angle = start_angle + angle_step * i as f64;
            let position = Position::new(
                frame.position.x + frame.radius * angle.cos(),
                frame.position.y + frame.radius * angle.sin(),
            );
            visited.insert(child);
            positions.insert(child.to_string(), position);
            stack.push(Frame {
                id: child,
                position,
                radius: frame.radius * RADIUS_DECAY,
                angle,
            });
        }
    }

    positions
}

pub fn layout_mindmap(
    diagram: &MindmapDiagram,
    config: &RenderConfig,
    measurer: &dyn TextMeasurer,
) -> Scene {
    let positions = compute_positions(diagram, config);
    let style = TextStyle::default();

    let mut scene = Scene::empty();
    for (id, position) in &positions {
        let Some(node) = diagram.node(id) else {
            continue;
        };
        let is_root = *id == diagram.root;

        // Root and single-word labels render unwrapped; other multi-word
        // labels stack one word per line.
        let label_lines = if is_root {
            vec![node.label.clone()]
        } else {
            stack_label(&node.label)
        };
        let metrics = measurer.measure(&label_lines, &style);

        let (shape, width, height) = if is_root {
            let d = metrics.width.max(metrics.height) + NODE_PADDING * 2.0;
            (NodeShape::Circle, d, d)
        } else {
            (
                NodeShape::Rounded,
                metrics.width + NODE_PADDING * 2.0,
                metrics.height + NODE_PADDING,
            )
        };

        scene.nodes.push(SceneNode {
            id: id.clone(),
            x: position.x,
            y: position.y,
            width,
            height,
            shape,
            fill: if is_root {
                ROOT_COLOR.to_string()
            } else {
                palette_color(id).to_string()
            },
            label_lines,
            css_class: if is_root {
                "mindmap-node mindmap-root".to_string()
            } else {
                "mindmap-node".to_string()
            },
        });
    }

    // Parent links induce the edges; both endpoints must have been placed.
    for (id, position) in &positions {
        let Some(parent_id) = diagram.node(id).and_then(|n| n.parent.as_deref()) else {
            continue;
        };
        let Some(parent_pos) = positions.get(parent_id) else {
            continue;
        };
        scene.edges.push(SceneEdge {
            id: format!("edge_{parent_id}_{id}"),
            source: parent_id.to_string(),
            target: id.clone(),
            from: *parent_pos,
            to: *position,
            path: EdgePath::Line,
            stroke_width: 1.5,
            arrowhead: false,
            label: None,
            css_class: "mindmap-edge".to_string(),
        });
    }

    scene.bounds = compute_scene_bounds(&scene);
    scene
}
