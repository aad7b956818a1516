use super::*;

fn node(id: &str, label: &str, parent: Option<&str>) -> MindmapNode {
    MindmapNode {
        id: id.to_string(),
        label: label.to_string(),
        parent: parent.map(|p| p.to_string()),
        style: StyleMap::default(),
    }
}

fn map(root: &str, nodes: Vec<MindmapNode>) -> MindmapDiagram {
    MindmapDiagram {
        root: root.to_string(),
        nodes,
        layout: None,
    }
}

fn chain(len: usize) -> MindmapDiagram {
    let mut nodes = vec![node("n0", "root", None)];
    for i in 1..len {
        nodes.push(node(
            &format!("n{i}"),
            &format!("level {i}"),
            Some(&format!("n{}", i - 1)),
        ));
    }
    map("n0", nodes)
}

#[test]
fn valid_tree_passes() {
    let d = map(
        "r",
        vec![
            node("r", "Root", None),
            node("a", "A", Some("r")),
            node("b", "B", Some("r")),
        ],
    );
    let result = validate(&d, None);
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let d = map("ghost", vec![node("a", "A", None)]);
    let result = validate(&d, None);
    assert!(!result.is_valid);
    assert!(
        result
            .error_messages()
            .iter()
            .any(|m| m.contains("Declared root 'ghost'"))
    );
}

#[test]
fn dangling_parent_is_an_error() {
    let d = map(
        "r",
        vec![node("r", "Root", None), node("a", "A", Some("nope"))],
    );
    let result = validate(&d, None);
    assert!(!result.is_valid);
    assert!(
        result
            .error_messages()
            .iter()
            .any(|m| m.contains("missing parent 'nope'"))
    );
}

#[test]
fn acyclic_input_reports_no_cycle() {
    let d = chain(6);
    let result = validate(&d, None);
    assert!(result.is_valid);
}

#[test]
fn cycle_is_reported_exactly_once() {
    // Two disjoint cycles plus extra back-edges still yield a single error.
    let d = map(
        "r",
        vec![
            node("r", "Root", None),
            node("a", "A", Some("b")),
            node("b", "B", Some("a")),
            node("c", "C", Some("d")),
            node("d", "D", Some("c")),
        ],
    );
    let result = validate(&d, None);
    let cycle_errors: Vec<_> = result
        .error_messages()
        .into_iter()
        .filter(|m| m.contains("Circular reference"))
        .collect();
    assert_eq!(cycle_errors.len(), 1);
}

#[test]
fn self_parent_is_a_cycle() {
    let d = map(
        "r",
        vec![node("r", "Root", None), node("a", "A", Some("a"))],
    );
    let result = validate(&d, None);
    assert!(
        result
            .error_messages()
            .iter()
            .any(|m| m.contains("Circular reference"))
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let d = map(
        "r",
        vec![
            node("r", "Root", None),
            node("a", "A", Some("r")),
            node("a", "A again", Some("r")),
        ],
    );
    let result = validate(&d, None);
    assert_eq!(
        result
            .error_messages()
            .iter()
            .filter(|m| m.contains("Duplicate node id 'a'"))
            .count(),
        1
    );
}

#[test]
fn depth_limit_warns_but_stays_valid() {
    let d = chain(6);
    let result = validate(&d, Some(4));
    assert!(result.is_valid);
    assert!(
        result
            .warning_messages()
            .iter()
            .any(|m| m.contains("depth 6 exceeds the configured limit of 4"))
    );
}

#[test]
fn max_depth_counts_nodes_on_longest_chain() {
    assert_eq!(chain(1).max_depth(), 1);
    assert_eq!(chain(5).max_depth(), 5);
    assert_eq!(map("ghost", vec![node("a", "A", None)]).max_depth(), 0);
}

#[test]
fn max_depth_terminates_on_cyclic_input() {
    let mut d = chain(3);
    d.nodes[0].parent = Some("n2".to_string());
    assert!(d.max_depth() <= 3);
}

#[test]
fn balance_is_perfect_for_equal_branches() {
    // Two branches of 10 nodes each (child + 9 descendants).
    let mut nodes = vec![node("r", "Root", None)];
    for branch in ["a", "b"] {
        nodes.push(node(branch, branch, Some("r")));
        for i in 1..10 {
            nodes.push(node(&format!("{branch}{i}"), "leaf", Some(branch)));
        }
    }
    let d = map("r", nodes);
    assert_eq!(branch_balance(&d), 1.0);
}

#[test]
fn balance_is_low_for_lopsided_branches() {
    // Branch sizes {1, 19}.
    let mut nodes = vec![node("r", "Root", None), node("a", "A", Some("r"))];
    nodes.push(node("b", "B", Some("r")));
    for i in 1..19 {
        nodes.push(node(&format!("b{i}"), "leaf", Some("b")));
    }
    let d = map("r", nodes);
    let balance = branch_balance(&d);
    assert!(balance < 0.5, "expected lopsided balance, got {balance}");
}

#[test]
fn balance_defaults_to_one_for_single_child() {
    let d = map(
        "r",
        vec![node("r", "Root", None), node("a", "A", Some("r"))],
    );
    assert_eq!(branch_balance(&d), 1.0);
}

#[test]
fn analysis_scores_stay_in_unit_range() {
    let mut nodes = vec![node("r", "Root", None)];
    for i in 0..60 {
        nodes.push(node(&format!("n{i}"), "leaf", Some("r")));
    }
    let d = map("r", nodes);
    let analysis = analyze(&d);
    assert!(analysis.complexity <= 1.0);
    assert!(analysis.complexity > 0.5);
    assert_eq!(analysis.readability, 0.5);
    assert_eq!(analysis.completeness, 1.0);
}

#[test]
fn deep_map_suggests_restructuring() {
    let d = chain(7);
    let suggestions = suggest(&d);
    assert!(
        suggestions
            .iter()
            .any(|s| s.action == crate::analysis::SuggestionAction::Restructure
                && s.priority == crate::analysis::Priority::High)
    );
}

#[test]
fn long_root_label_suggests_shortening() {
    let d = map(
        "r",
        vec![node(
            "r",
            "An extremely long central topic label for the map",
            None,
        )],
    );
    assert!(
        suggest(&d)
            .iter()
            .any(|s| s.action == crate::analysis::SuggestionAction::ShortenRootLabel)
    );
}

#[test]
fn optimize_attaches_layout_hints_without_touching_nodes() {
    let d = chain(3);
    let optimized = optimize(&d);
    assert_eq!(optimized.nodes.len(), d.nodes.len());
    let hints = optimized.layout.unwrap();
    assert_eq!(hints.algorithm, MindmapAlgorithm::Circular);
    assert!(hints.spacing >= 50.0 && hints.spacing <= 200.0);
}

#[test]
fn optimize_prefers_tree_for_deep_maps() {
    let d = chain(6);
    assert_eq!(
        optimize(&d).layout.unwrap().algorithm,
        MindmapAlgorithm::Tree
    );
}
