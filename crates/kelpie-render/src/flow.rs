//! Layout for the swimlane family.
//!
//! Lanes stack top-to-bottom in equal bands; phases are full-height vertical
//! dividers painted behind the lanes; node coordinates are host-supplied
//! lane-local offsets shifted into the lane band (the engine does not
//! auto-place flow nodes; the optimizer does).

use crate::model::{
    EdgePath, NodeShape, Scene, SceneEdge, SceneLane, SceneNode, ScenePhase, compute_scene_bounds,
};
use indexmap::IndexMap;
use kelpie_core::RenderConfig;
use kelpie_core::diagrams::flow::{FlowDiagram, FlowNodeType};
use kelpie_core::geom::{Bounds, Position, Size};
use tracing::debug;

const START_END_DIAMETER: f64 = 40.0;
const DECISION_SIZE: f64 = 60.0;
const PROCESS_SIZE: Size = Size {
    width: 120.0,
    height: 50.0,
};

pub const START_COLOR: &str = "#22a05a";
pub const END_COLOR: &str = "#c0392b";
const DECISION_COLOR: &str = "#d9a547";
const PROCESS_COLOR: &str = "#4f86c6";

/// Absolute center of every node whose lane resolves, keyed by id in node
/// order: `(headerWidth + local.x, laneTop + headerHeight + local.y)`.
pub fn compute_positions(
    diagram: &FlowDiagram,
    config: &RenderConfig,
) -> IndexMap<String, Position> {
    let mut positions: IndexMap<String, Position> = IndexMap::new();
    if diagram.lanes.is_empty() {
        return positions;
    }
    let band_height = config.height / diagram.lanes.len() as f64;
    for node in &diagram.nodes {
        let Some(lane_index) = diagram.lane_index(&node.lane_id) else {
            continue;
        };
        let lane_top = lane_index as f64 * band_height;
        positions.insert(
            node.id.clone(),
            Position::new(
                config.flow.lane_header_width + node.position.x,
                lane_top + config.flow.lane_header_height + node.position.y,
            ),
        );
    }
    positions
}

fn node_geometry(node_type: FlowNodeType) -> (NodeShape, Size, &'static str) {
    match node_type {
        FlowNodeType::Start => (
            NodeShape::Circle,
            Size::new(START_END_DIAMETER, START_END_DIAMETER),
            START_COLOR,
        ),
        FlowNodeType::End => (
            NodeShape::Circle,
            Size::new(START_END_DIAMETER, START_END_DIAMETER),
            END_COLOR,
        ),
        FlowNodeType::Decision => (
            NodeShape::Diamond,
            Size::new(DECISION_SIZE, DECISION_SIZE),
            DECISION_COLOR,
        ),
        FlowNodeType::Process => (NodeShape::Rounded, PROCESS_SIZE, PROCESS_COLOR),
    }
}

pub fn layout_flow(diagram: &FlowDiagram, config: &RenderConfig) -> Scene {
    let mut scene = Scene::empty();
    if diagram.lanes.is_empty() {
        return scene;
    }
    debug!(
        lane_count = diagram.lanes.len(),
        node_count = diagram.nodes.len(),
        "computing swimlane layout"
    );

    // Phases first: they paint behind everything.
    for phase in &diagram.phases {
        scene.phases.push(ScenePhase {
            label: phase.label.clone(),
            x: config.flow.lane_header_width + phase.start_position * config.flow.phase_width,
            y: 0.0,
            height: config.height,
        });
    }

    let band_height = config.height / diagram.lanes.len() as f64;
    for (index, lane) in diagram.lanes.iter().enumerate() {
        let top = index as f64 * band_height;
        scene.lanes.push(SceneLane {
            id: lane.id.clone(),
            label: lane.label.clone(),
            band: Bounds::new(0.0, top, config.width, band_height),
            header: Bounds::new(0.0, top, config.flow.lane_header_width, band_height),
        });
    }

    let positions = compute_positions(diagram, config);
    for node in &diagram.nodes {
        let Some(position) = positions.get(node.id.as_str()) else {
            continue;
        };
        let (shape, size, fill) = node_geometry(node.node_type);
        scene.nodes.push(SceneNode {
            id: node.id.clone(),
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            shape,
            fill: fill.to_string(),
            label_lines: vec![node.label.clone()],
            css_class: "flow-node".to_string(),
        });
    }

    for (index, edge) in diagram.edges.iter().enumerate() {
        let (Some(from), Some(to)) = (
            positions.get(edge.source.as_str()),
            positions.get(edge.target.as_str()),
        ) else {
            continue;
        };
        scene.edges.push(SceneEdge {
            id: format!("edge_{index}"),
            source: edge.source.clone(),
            target: edge.target.clone(),
            from: *from,
            to: *to,
            path: EdgePath::Line,
            stroke_width: 1.5,
            arrowhead: true,
            label: edge.label.clone(),
            css_class: "flow-edge".to_string(),
        });
    }

    scene.bounds = compute_scene_bounds(&scene);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelpie_core::config::StyleMap;
    use kelpie_core::diagrams::flow::{FlowEdge, FlowNode, Lane, LaneType, Phase};

    fn lane(id: &str) -> Lane {
        Lane {
            id: id.to_string(),
            label: id.to_uppercase(),
            lane_type: LaneType::Lane,
        }
    }

    fn node(id: &str, lane_id: &str, ty: FlowNodeType, x: f64, y: f64) -> FlowNode {
        FlowNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            lane_id: lane_id.to_string(),
            node_type: ty,
            position: Position::new(x, y),
            style: StyleMap::default(),
        }
    }

    #[test]
    fn two_lane_scenario_places_nodes_in_their_bands() {
        let d = FlowDiagram {
            lanes: vec![lane("l1"), lane("l2")],
            phases: Vec::new(),
            nodes: vec![
                node("a", "l1", FlowNodeType::Start, 30.0, 60.0),
                node("b", "l2", FlowNodeType::End, 30.0, 60.0),
            ],
            edges: vec![FlowEdge {
                source: "a".to_string(),
                target: "b".to_string(),
                label: None,
            }],
        };
        let config = RenderConfig::default();
        let positions = compute_positions(&d, &config);

        // Bands are 400px tall; both nodes sit at the header offset plus the
        // host-supplied lane-local coordinates.
        assert_eq!(positions["a"], Position::new(280.0, 100.0));
        assert_eq!(positions["b"], Position::new(280.0, 500.0));

        let scene = layout_flow(&d, &config);
        assert_eq!(scene.lanes.len(), 2);
        assert_eq!(scene.lanes[1].band, Bounds::new(0.0, 400.0, 1200.0, 400.0));
        assert_eq!(scene.lanes[1].header.width, 250.0);
        assert_eq!(scene.edges.len(), 1);
        assert!(scene.edges[0].arrowhead);
    }

    #[test]
    fn phase_dividers_span_full_height_at_scaled_offsets() {
        let d = FlowDiagram {
            lanes: vec![lane("l1")],
            phases: vec![
                Phase {
                    label: "Intake".to_string(),
                    start_position: 0.0,
                    end_position: 1.0,
                },
                Phase {
                    label: "Review".to_string(),
                    start_position: 1.0,
                    end_position: 2.0,
                },
            ],
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let scene = layout_flow(&d, &RenderConfig::default());
        assert_eq!(scene.phases.len(), 2);
        assert_eq!(scene.phases[0].x, 250.0);
        assert_eq!(scene.phases[1].x, 450.0);
        assert_eq!(scene.phases[1].height, 800.0);
    }

    #[test]
    fn node_shapes_and_colors_follow_type() {
        let d = FlowDiagram {
            lanes: vec![lane("l1")],
            phases: Vec::new(),
            nodes: vec![
                node("s", "l1", FlowNodeType::Start, 0.0, 0.0),
                node("e", "l1", FlowNodeType::End, 100.0, 0.0),
                node("q", "l1", FlowNodeType::Decision, 200.0, 0.0),
                node("p", "l1", FlowNodeType::Process, 300.0, 0.0),
            ],
            edges: Vec::new(),
        };
        let scene = layout_flow(&d, &RenderConfig::default());
        let by_id = |id: &str| scene.nodes.iter().find(|n| n.id == id).unwrap();
        assert_eq!(by_id("s").shape, NodeShape::Circle);
        assert_eq!(by_id("s").fill, START_COLOR);
        assert_eq!(by_id("e").fill, END_COLOR);
        assert_eq!(by_id("q").shape, NodeShape::Diamond);
        assert_eq!(by_id("p").shape, NodeShape::Rounded);
    }

    #[test]
    fn nodes_in_unknown_lanes_are_skipped() {
        let d = FlowDiagram {
            lanes: vec![lane("l1")],
            phases: Vec::new(),
            nodes: vec![node("x", "nope", FlowNodeType::Process, 0.0, 0.0)],
            edges: Vec::new(),
        };
        let scene = layout_flow(&d, &RenderConfig::default());
        assert!(scene.nodes.is_empty());
    }

    #[test]
    fn empty_lane_list_yields_an_empty_scene() {
        let d = FlowDiagram {
            lanes: Vec::new(),
            phases: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let scene = layout_flow(&d, &RenderConfig::default());
        assert!(scene.nodes.is_empty());
        assert!(scene.bounds.is_none());
    }
}
