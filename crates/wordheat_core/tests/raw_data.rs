use serde_json::json;
use std::time::Duration;
use wordheat_core::scores::{list_score_runs, next_run_number, score_file_path};
use wordheat_core::service::{extract_labels_file, fetch_raw_data_file};
use wordheat_core::store::{read_json, write_json, JsonIndent};
use wordheat_core::{FetchConfig, RawGraph, ScoreRunError, StageError, StoreError};

#[test]
fn extract_labels_normalizes_in_node_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw-data.json");
    let output = dir.path().join("extracted_labels.txt");
    let raw = json!({
        "data": { "nodes": [
            { "id": 1, "label": " Teollinen_Internet ", "group": "1", "value": 3 },
            { "id": 2, "label": "CNC", "group": "2", "value": 1, "sources": [{ "title": "t" }] },
            { "id": 3, "label": "cnc", "group": 3, "value": 2 }
        ]}
    });
    write_json(&input, &raw, JsonIndent::Four).unwrap();

    let count = extract_labels_file(&input, &output).unwrap();
    assert_eq!(count, 3);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "teollinen internet\ncnc\ncnc\n"
    );
}

#[test]
fn extract_labels_reads_only_labels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw-data.json");
    let output = dir.path().join("extracted_labels.txt");
    let raw = json!({
        "data": { "nodes": [
            { "id": 1, "label": "Robotiikka", "group": "1", "value": 3, "sources": [] },
            { "id": 2, "label": "Muu_Sana", "group": "2", "sources": [] },
            { "label": "Kone", "group": "9" }
        ]}
    });
    write_json(&input, &raw, JsonIndent::Four).unwrap();

    assert_eq!(extract_labels_file(&input, &output).unwrap(), 3);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "robotiikka\nmuu sana\nkone\n"
    );
}

#[test]
fn raw_snapshot_keeps_unknown_keys_and_non_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw-data.json");
    let raw = json!({
        "data": {
            "nodes": [{ "id": 1, "label": "sähkö", "group": "2", "value": 1, "weight": 0.5 }],
            "links": []
        },
        "meta": { "generated": "2024-01-01" }
    });
    write_json(&path, &raw, JsonIndent::Four).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"sähkö\""));
    assert!(text.contains("\n    \"data\""));

    let graph: RawGraph = read_json(&path).unwrap();
    assert_eq!(graph.nodes()[0].extra.get("weight"), Some(&json!(0.5)));
    assert!(graph.data.extra.contains_key("links"));
}

#[test]
fn malformed_json_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw-data.json");
    std::fs::write(&path, "{ \"data\": ").unwrap();

    let err = read_json::<RawGraph>(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
    assert!(err.to_string().contains("raw-data.json"));
}

#[test]
fn failed_fetch_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("raw-data.json");
    let config = FetchConfig {
        url: "http://127.0.0.1:9/data.json".to_string(),
        timeout: Duration::from_secs(2),
    };

    let err = fetch_raw_data_file(config, &output).unwrap_err();
    assert!(matches!(err, StageError::Fetch(_)));
    assert!(!output.exists());
}

#[test]
fn score_runs_are_listed_and_next_number_follows_highest() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(next_run_number(dir.path()).unwrap(), 1);

    for name in [
        "manufacturing-scores-run-1.json",
        "manufacturing-scores-run-3.json",
        "manufacturing-scores-run-final.json",
        "README.md",
    ] {
        std::fs::write(dir.path().join(name), "{}").unwrap();
    }

    assert_eq!(list_score_runs(dir.path()).unwrap(), vec![1, 3]);
    assert_eq!(next_run_number(dir.path()).unwrap(), 4);
    assert_eq!(
        score_file_path(dir.path(), "3").unwrap(),
        dir.path().join("manufacturing-scores-run-3.json")
    );
}

#[test]
fn listing_missing_score_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("ai-generated-scores");
    assert!(matches!(
        list_score_runs(&missing),
        Err(ScoreRunError::Io { .. })
    ));
}
