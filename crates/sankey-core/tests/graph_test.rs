use sankey_core::{DEFAULT_PALETTE, DataTable, build_graph, parse_csv_table};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join("sankey").join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

#[test]
fn csv_fixture_builds_a_conserving_graph() {
    let table = parse_csv_table(&fixture("energy.csv")).expect("csv ok");
    assert_eq!(table.row_count(), 8);

    let graph = build_graph(&table, DEFAULT_PALETTE);
    let names: Vec<&str> = graph.nodes().iter().map(|n| n.label.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Coal",
            "Natural gas",
            "Solar",
            "Electricity grid",
            "Heating",
            "Homes, offices",
            "Industry",
            "Losses",
        ]
    );

    for node in graph.nodes() {
        let out: f64 = graph.outgoing(node.id).map(|l| l.weight).sum();
        assert_eq!(out, node.output_weight, "{}", node.label.name);
        let inp: f64 = node
            .links
            .iter()
            .map(|&l| graph.link(l))
            .filter(|l| l.destination == node.id)
            .map(|l| l.weight)
            .sum();
        assert_eq!(inp, node.input_weight, "{}", node.label.name);
    }

    let grid = graph.node_by_label("Electricity grid").unwrap();
    assert_eq!(grid.input_weight, 64.0);
    assert_eq!(grid.output_weight, 64.0);
}

#[test]
fn json_fixture_applies_row_and_visual_styling() {
    let table = DataTable::from_json_str(&fixture("basic.json")).expect("json ok");
    let settings = table.settings();
    assert!(settings.show_labels);
    assert_eq!(settings.font_size, 10.0);
    assert_eq!(settings.link_color, "gray");

    let graph = build_graph(&table, DEFAULT_PALETTE);
    assert_eq!(graph.links()[0].color, "#ff0000");
    assert_eq!(graph.links()[1].color, "gray");
}

#[test]
fn graph_serializes_nodes_and_links() {
    let table = parse_csv_table(&fixture("cycle.csv")).expect("csv ok");
    let graph = build_graph(&table, DEFAULT_PALETTE);
    let value = serde_json::to_value(&graph).expect("serialize");
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["links"][0]["source"], 0);
    assert_eq!(value["links"][0]["destination"], 1);
    assert!(value.get("index").is_none());
}
