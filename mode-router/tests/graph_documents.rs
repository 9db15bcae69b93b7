//! End-to-end searches over graphs loaded from JSON files.

use std::io::Write;

use mode_router::domain::Cost;
use mode_router::graph::{GraphDocument, GraphError};
use mode_router::planner::{PathOutcome, Planner, SearchConfig, SearchError};
use mode_router::weighting::Weighting;
use tempfile::NamedTempFile;

const WALK_TRANSIT: &str = r#"{
    "edges": [
        {"from": 1, "to": 2, "mode": "walk", "weight": 2},
        {"from": 1, "to": 3, "mode": "walk", "weight": 5},
        {"from": 2, "to": 4, "mode": "walk", "weight": 10},
        {"from": 2, "to": 3, "mode": "transit", "weight": 3},
        {"from": 3, "to": 4, "mode": "transit", "weight": 2}
    ]
}"#;

fn write_doc(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn ids(nodes: &[&str]) -> Vec<String> {
    nodes.iter().map(|s| s.to_string()).collect()
}

#[test]
fn walk_then_transit_from_file() {
    let file = write_doc(WALK_TRANSIT);
    let doc = GraphDocument::from_path(file.path()).unwrap();
    let weighting = Weighting::new(Cost::from(5));
    let config = SearchConfig::default();
    let planner = Planner::new(doc.graph(), &weighting, &config);

    let result = planner.find_path(&"1".to_string(), &"4".to_string()).unwrap();
    let route = result.route().unwrap();
    assert_eq!(route.nodes(), ids(&["1", "2", "3", "4"]).as_slice());
    assert_eq!(route.total_cost(), Cost::from(12));
    assert_eq!(route.mode_switches(), 1);

    let json = serde_json::to_value(route).unwrap();
    assert_eq!(json["modes"], serde_json::json!(["walk", "transit", "transit"]));
}

#[test]
fn document_weighting_is_used() {
    let json = WALK_TRANSIT.replacen(
        "\"edges\"",
        "\"weighting\": {\"transition\": {\"kind\": \"uniform\", \"penalty\": 100}},\n    \"edges\"",
        1,
    );
    let file = write_doc(&json);
    let (graph, weighting) = GraphDocument::from_path(file.path()).unwrap().into_parts();
    let weighting = weighting.unwrap();
    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &weighting, &config);

    let result = planner.find_path(&"1".to_string(), &"4".to_string()).unwrap();
    assert_eq!(result.path(), Some(ids(&["1", "2", "4"]).as_slice()));
    assert_eq!(result.total_cost(), 12.0);
}

#[test]
fn unknown_and_unreachable_nodes() {
    let file = write_doc(WALK_TRANSIT);
    let doc = GraphDocument::from_path(file.path()).unwrap();
    let weighting = Weighting::default();
    let config = SearchConfig::default();
    let planner = Planner::new(doc.graph(), &weighting, &config);

    assert_eq!(
        planner.find_path(&"1".to_string(), &"9".to_string()),
        Err(SearchError::UnknownGoal("\"9\"".to_string()))
    );

    let result = planner.find_path(&"4".to_string(), &"1".to_string()).unwrap();
    assert_eq!(result.outcome, PathOutcome::Unreachable);
}

#[test]
fn malformed_file_is_rejected() {
    let file = write_doc(r#"{"edges": [{"from": 1, "to": 2, "weight": "heavy"}]}"#);
    assert!(matches!(
        GraphDocument::from_path(file.path()),
        Err(GraphError::Json(_))
    ));
}
