//! End-to-end tests for the graph store surface
//!
//! This test exercises:
//! - Node and edge creation, including rejection of unknown endpoints
//! - Cascading deletion
//! - Property and relationship lookups
//! - Summaries and the renderer's read-only view

use kgraph::graph::{Direction, EdgeFilter, GraphError, GraphStore, Label, NodeId, PropertyValue};
use kgraph::props;
use kgraph::render::to_dot;
use kgraph::RenderConfig;

fn name(value: &str) -> PropertyValue {
    PropertyValue::from(value)
}

#[test]
fn test_rival_deletion_scenario() {
    let mut store = GraphStore::new();
    let a = store.create_node("Team", props! { "name" => "Alpha" });
    let b = store.create_node("Team", props! { "name" => "Beta" });

    assert!(store.create_edge(a, "RIVAL", b).is_ok());
    store.delete_node(a).unwrap();

    assert!(store.find_edges(&EdgeFilter::any().subject(a)).is_empty());
    assert!(store.find_edges(&EdgeFilter::any().object(a)).is_empty());

    let team = Label::new("Team");
    assert!(store.query_by_property(&team, "name", &name("Alpha")).is_empty());
    let beta = store.query_by_property(&team, "name", &name("Beta"));
    assert_eq!(beta.len(), 1);
    assert_eq!(beta[0].0, b);
}

#[test]
fn test_edge_to_unknown_token_is_rejected() {
    let mut store = GraphStore::new();
    let n1 = store.create_node("Team", props! { "name" => "Alpha" });
    assert_eq!(n1.to_string(), "N1");

    let ghost: NodeId = "N999".parse().unwrap();
    let before = store.edge_count();
    assert_eq!(
        store.create_edge(ghost, "X", n1),
        Err(GraphError::InvalidEdgeSubject(ghost))
    );
    assert_eq!(store.edge_count(), before);
}

#[test]
fn test_query_unaffected_by_unrelated_nodes() {
    let mut store = GraphStore::new();
    let p = store.create_node("Player", props! { "name" => "Ana", "position" => "Keeper" });
    let label = Label::new("Player");
    let keeper = name("Keeper");

    let first: Vec<NodeId> = store
        .query_by_property(&label, "position", &keeper)
        .iter()
        .map(|(id, _)| *id)
        .collect();

    store.create_node("Player", props! { "name" => "Bia", "position" => "Forward" });
    store.create_node("Coach", props! { "position" => "Keeper" });
    store.create_node("Player", props! { "name" => "Cris" });

    let second: Vec<NodeId> = store
        .query_by_property(&label, "position", &keeper)
        .iter()
        .map(|(id, _)| *id)
        .collect();

    assert_eq!(first, vec![p]);
    assert_eq!(first, second);

    store.delete_node(p).unwrap();
    assert!(store.query_by_property(&label, "position", &keeper).is_empty());
}

#[test]
fn test_reads_are_idempotent() {
    let mut store = GraphStore::new();
    let a = store.create_node("Team", props! { "name" => "Alpha" });
    let b = store.create_node("Team", props! { "name" => "Beta" });
    store.create_edge(a, "RIVAL", b).unwrap();

    assert_eq!(store.summarize(), store.summarize());

    let label = Label::new("Team");
    let q1: Vec<NodeId> = store.query_by_property(&label, "name", &name("Beta")).iter().map(|(id, _)| *id).collect();
    let q2: Vec<NodeId> = store.query_by_property(&label, "name", &name("Beta")).iter().map(|(id, _)| *id).collect();
    assert_eq!(q1, q2);
}

#[test]
fn test_inverse_lookup() {
    let mut store = GraphStore::new();
    let team = store.create_node("Team", props! { "name" => "Lions" });
    let other = store.create_node("Team", props! { "name" => "Falcons" });
    let ana = store.create_node("Player", props! { "name" => "Ana" });
    let bia = store.create_node("Player", props! { "name" => "Bia" });
    store.create_edge(ana, "PLAYS_FOR", team).unwrap();
    store.create_edge(bia, "PLAYS_FOR", other).unwrap();
    store.create_edge(bia, "FAN_OF", team).unwrap();

    let edges = store.find_edges(&EdgeFilter::incoming(team).predicate("PLAYS_FOR"));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].subject, ana);

    let names: Vec<String> = store
        .neighbors(team, "PLAYS_FOR", Direction::Incoming)
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, vec!["Ana".to_string()]);
}

#[test]
fn test_renderer_sees_every_node_and_edge() {
    let mut store = GraphStore::new();
    let a = store.create_node("Team", props! { "name" => "Alpha" });
    let b = store.create_node("Tournament", props! { "name" => "Cup" });
    store.create_edge(a, "PARTICIPATES_IN", b).unwrap();

    assert_eq!(store.nodes().count(), 2);
    assert_eq!(store.edges().count(), 1);

    let dot = to_dot(&store, &RenderConfig::default());
    assert!(dot.contains("fillcolor=\"#FFD700\""));
    assert!(dot.contains("fillcolor=\"#00BFFF\""));
    assert!(dot.contains("\"N1\" -> \"N2\" [label=\"PARTICIPATES_IN\""));
}

#[test]
fn test_summary_distribution() {
    let mut store = GraphStore::new();
    for i in 0..3 {
        store.create_node("Player", props! { "n" => i as i64 });
    }
    let t = store.create_node("Team", props! {});
    store.delete_node(t).unwrap();

    let summary = store.summarize();
    assert_eq!(summary.node_count, 3);
    assert_eq!(summary.edge_count, 0);
    assert_eq!(summary.label_distribution.len(), 1);
    assert_eq!(summary.label_distribution[&Label::new("Player")], 3);
}
