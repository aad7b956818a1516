use futures::executor::block_on;
use kelpie::diagrams::flow::{FlowDiagram, FlowEdge, FlowNode, FlowNodeType, Lane, LaneType};
use kelpie::diagrams::mindmap::{MindmapDiagram, MindmapNode};
use kelpie::diagrams::network::{
    NetworkDiagram, NetworkEdge, NetworkEdgeType, NetworkLayoutKind, NetworkNode, NetworkNodeType,
};
use kelpie::geom::Position;
use kelpie::{DiagramData, HeadlessEditor, PluginRegistry, RenderConfig, render_diagram};

fn mindmap_fixture() -> DiagramData {
    let node = |id: &str, label: &str, parent: Option<&str>| MindmapNode {
        id: id.to_string(),
        label: label.to_string(),
        parent: parent.map(|p| p.to_string()),
        style: Default::default(),
    };
    DiagramData::Mindmap(MindmapDiagram {
        root: "r".to_string(),
        nodes: vec![
            node("r", "Project", None),
            node("a", "Scope", Some("r")),
            node("b", "Timeline", Some("r")),
            node("c", "Budget", Some("r")),
        ],
        layout: None,
    })
}

fn network_fixture() -> DiagramData {
    let node = |id: &str, ty: NetworkNodeType| NetworkNode {
        id: id.to_string(),
        label: id.to_uppercase(),
        node_type: ty,
        position: Position::default(),
        size: Default::default(),
        style: Default::default(),
    };
    DiagramData::Network(NetworkDiagram {
        nodes: vec![
            node("gw", NetworkNodeType::Router),
            node("app", NetworkNodeType::Server),
            node("db", NetworkNodeType::Database),
        ],
        edges: vec![
            NetworkEdge {
                source: "gw".to_string(),
                target: "app".to_string(),
                label: None,
                edge_type: NetworkEdgeType::Wired,
            },
            NetworkEdge {
                source: "app".to_string(),
                target: "db".to_string(),
                label: None,
                edge_type: NetworkEdgeType::Physical,
            },
        ],
        layout: NetworkLayoutKind::Circular,
    })
}

fn flow_fixture() -> DiagramData {
    let node = |id: &str, lane: &str, ty: FlowNodeType| FlowNode {
        id: id.to_string(),
        label: id.to_uppercase(),
        lane_id: lane.to_string(),
        node_type: ty,
        position: Position::new(30.0, 60.0),
        style: Default::default(),
    };
    DiagramData::Flow(FlowDiagram {
        lanes: vec![
            Lane {
                id: "sales".to_string(),
                label: "Sales".to_string(),
                lane_type: LaneType::Lane,
            },
            Lane {
                id: "ops".to_string(),
                label: "Operations".to_string(),
                lane_type: LaneType::Lane,
            },
        ],
        phases: Vec::new(),
        nodes: vec![
            node("lead", "sales", FlowNodeType::Start),
            node("fulfil", "ops", FlowNodeType::End),
        ],
        edges: vec![FlowEdge {
            source: "lead".to_string(),
            target: "fulfil".to_string(),
            label: None,
        }],
    })
}

#[test]
fn registry_resolves_all_three_families() {
    let registry = PluginRegistry::with_default_plugins();
    assert!(registry.get("mindmap").is_some());
    assert!(registry.get("network").is_some());
    assert!(registry.get("swimlane").is_some());
    assert!(registry.get("gantt").is_none());

    let ids: Vec<&str> = registry.descriptors().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["kelpie.mindmap", "kelpie.network", "kelpie.swimlane"]);
}

#[test]
fn type_mismatch_is_an_error_not_a_cast() {
    let registry = PluginRegistry::with_default_plugins();
    let plugin = registry.get("mindmap").unwrap();
    let err = plugin.render(&network_fixture(), &RenderConfig::default());
    assert!(err.is_err());
    assert!(err.unwrap_err().to_string().contains("type mismatch"));
}

#[test]
fn mindmap_render_centers_root_and_counts_entities() {
    let editor = HeadlessEditor::new();
    let output = editor.render_sync(&mindmap_fixture()).unwrap();

    assert_eq!(output.metadata.node_count, 4);
    assert_eq!(output.metadata.edge_count, 3);
    assert!(output.metadata.errors.is_empty());

    let root = output.scene.nodes.iter().find(|n| n.id == "r").unwrap();
    assert_eq!((root.x, root.y), (600.0, 400.0));

    // Three children on the first ring at the configured radius.
    for id in ["a", "b", "c"] {
        let child = output.scene.nodes.iter().find(|n| n.id == id).unwrap();
        let dist = ((child.x - 600.0).powi(2) + (child.y - 400.0).powi(2)).sqrt();
        assert!((dist - 200.0).abs() < 1e-9);
    }
}

#[test]
fn markup_keeps_edges_behind_nodes_and_exposes_node_ids() {
    let editor = HeadlessEditor::new();
    let output = editor.render_sync(&mindmap_fixture()).unwrap();
    let markup = &output.scene_markup;
    let edges_at = markup.find(r#"<g class="edges">"#).unwrap();
    let nodes_at = markup.find(r#"<g class="nodes">"#).unwrap();
    assert!(edges_at < nodes_at);
    assert!(markup.contains(r#"data-node-id="r""#));
    assert!(markup.contains(r#"data-node-id="a""#));
}

#[test]
fn render_is_deterministic_across_calls() {
    let editor = HeadlessEditor::new();
    let first = editor.render_sync(&network_fixture()).unwrap();
    let second = editor.render_sync(&network_fixture()).unwrap();
    assert_eq!(first.scene_markup, second.scene_markup);
}

#[test]
fn broken_input_renders_with_errors_in_metadata() {
    let data = DiagramData::Network(NetworkDiagram {
        nodes: Vec::new(),
        edges: Vec::new(),
        layout: NetworkLayoutKind::Circular,
    });
    let editor = HeadlessEditor::new();
    let output = editor.render_sync(&data).unwrap();
    assert!(!output.metadata.errors.is_empty());
    assert!(output.scene.nodes.is_empty());

    // Analysis still degrades gracefully on the same input.
    let analysis = editor.analyze(&data).unwrap();
    assert!(analysis.suggestions.is_empty());
}

#[test]
fn flow_scenario_validates_and_lands_in_lane_bands() {
    let editor = HeadlessEditor::new();
    let data = flow_fixture();

    let validation = editor.validate(&data).unwrap();
    assert!(validation.is_valid);

    let output = editor.render_sync(&data).unwrap();
    let by_id = |id: &str| output.scene.nodes.iter().find(|n| n.id == id).unwrap();
    // Bands are 400px tall; y = laneTop + headerHeight + local y.
    assert_eq!(by_id("lead").y, 100.0);
    assert_eq!(by_id("fulfil").y, 500.0);
    assert_eq!(by_id("lead").x, 280.0);
    assert!(output.scene.edges[0].arrowhead);
    assert_eq!(output.scene.lanes.len(), 2);
}

#[test]
fn update_replaces_prior_output_in_place() {
    let editor = HeadlessEditor::new();
    let plugin = editor.registry.get("mindmap").unwrap();
    let mut output = plugin
        .render(&mindmap_fixture(), &editor.config)
        .unwrap();

    let mut smaller = mindmap_fixture();
    if let DiagramData::Mindmap(d) = &mut smaller {
        d.nodes.truncate(2);
    }
    plugin
        .update(&mut output, &smaller, &editor.config)
        .unwrap();
    assert_eq!(output.metadata.node_count, 2);
    assert_eq!(output.scene.nodes.len(), 2);

    // Teardown is uniform even though scenes hold no external resources.
    plugin.destroy(output);
}

#[test]
fn get_bounds_matches_rendered_scene() {
    let editor = HeadlessEditor::new();
    let plugin = editor.registry.get("network").unwrap();
    let data = network_fixture();
    let bounds = plugin.get_bounds(&data, &editor.config).unwrap();
    let output = plugin.render(&data, &editor.config).unwrap();
    assert_eq!(Some(bounds), output.bounds);
}

#[test]
fn optimize_round_trips_through_the_same_family() {
    let editor = HeadlessEditor::new();
    let optimized = editor.optimize(&network_fixture()).unwrap();
    match optimized {
        DiagramData::Network(d) => assert_eq!(d.nodes.len(), 3),
        other => panic!("optimize changed family to {}", other.diagram_type()),
    }

    let optimized = editor.optimize(&mindmap_fixture()).unwrap();
    match optimized {
        DiagramData::Mindmap(d) => assert!(d.layout.is_some()),
        other => panic!("optimize changed family to {}", other.diagram_type()),
    }
}

#[test]
fn schemas_are_served_per_plugin() {
    let registry = PluginRegistry::with_default_plugins();
    for (tag, id) in [
        ("mindmap", "kelpie/mindmap"),
        ("network", "kelpie/network"),
        ("swimlane", "kelpie/swimlane"),
    ] {
        let schema = registry.get(tag).unwrap().schema();
        assert_eq!(schema["$id"], id);
        assert!(schema["properties"].is_object());
    }
}

#[test]
fn async_render_matches_sync_render() {
    let registry = PluginRegistry::with_default_plugins();
    let config = RenderConfig::default();
    let data = flow_fixture();
    let via_async = block_on(render_diagram(&registry, &data, &config)).unwrap();
    let via_sync = kelpie::render_diagram_sync(&registry, &data, &config).unwrap();
    assert_eq!(via_async.scene_markup, via_sync.scene_markup);
}

#[test]
fn suggestions_surface_missing_start_and_end() {
    let mut data = flow_fixture();
    if let DiagramData::Flow(d) = &mut data {
        for node in &mut d.nodes {
            node.node_type = FlowNodeType::Process;
        }
    }
    let editor = HeadlessEditor::new();
    let suggestions = editor.suggest(&data).unwrap();
    let actions: Vec<_> = suggestions.iter().map(|s| s.action).collect();
    assert!(actions.contains(&kelpie::SuggestionAction::AddStartNode));
    assert!(actions.contains(&kelpie::SuggestionAction::AddEndNode));
}
