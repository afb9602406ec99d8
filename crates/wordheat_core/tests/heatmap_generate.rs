use serde_json::json;
use wordheat_core::service::{generate_heatmap_file, GenerateRequest};
use wordheat_core::store::read_entries;
use wordheat_core::{
    generate_heatmap, GeneratorConfig, Group, HeatmapEntry, RawGraph, RawNode, ScoreMap,
    SourceFilterMode,
};

fn titles(range: std::ops::RangeInclusive<u32>) -> serde_json::Value {
    range
        .map(|index| json!({ "title": format!("t{index}"), "url": format!("https://example.com/{index}") }))
        .collect()
}

fn raw_graph() -> serde_json::Value {
    json!({
        "data": {
            "nodes": [
                {
                    "id": 1, "label": "Robotiikka", "group": "1", "value": 10,
                    "sources": titles(1..=6),
                    "weight": 0.3, "search_center": true, "explain_api_call": "x",
                    "color": "green"
                },
                { "id": 2, "label": "Hitsaus_Robotti", "group": "2", "value": 5, "sources": titles(1..=5) },
                {
                    "id": 3, "label": "kone", "group": "3", "value": 8,
                    "sources": [{ "title": "t1" }, { "title": "t2" }, { "title": "t3" }, { "title": "t7" }]
                },
                { "id": 4, "label": "laser", "group": "3", "value": 8, "sources": titles(1..=6) },
                { "id": 5, "label": "Anturi", "group": "3", "value": 8, "sources": [] },
                { "id": 6, "label": "CNC_Koneistus", "group": "2", "value": 9 }
            ]
        }
    })
}

fn scores() -> ScoreMap {
    serde_json::from_value(json!({
        "robotiikka": 0.9,
        "hitsaus robotti": 0.8,
        "kone": 0.75,
        "laser": 0.2,
        "anturi": 0.7,
        "cnc koneistus": 0.8,
        "Automaatio": 0.95
    }))
    .unwrap()
}

fn nodes() -> Vec<RawNode> {
    serde_json::from_value::<RawGraph>(raw_graph())
        .unwrap()
        .into_nodes()
}

fn config(min_similar_sources: usize, mode: SourceFilterMode) -> GeneratorConfig {
    GeneratorConfig {
        min_score: 0.7,
        min_similar_sources,
        source_filter_mode: mode,
    }
}

fn entry<'a>(entries: &'a [HeatmapEntry], word: &str) -> &'a HeatmapEntry {
    entries
        .iter()
        .find(|entry| entry.word == word)
        .unwrap_or_else(|| panic!("missing entry {word}"))
}

fn similar(entry: &HeatmapEntry) -> Vec<(&str, u64)> {
    entry
        .similar_sources_found
        .as_ref()
        .expect("generated entries carry similar sources")
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect()
}

#[test]
fn keeps_only_qualifying_nodes_in_sorted_order() {
    let report = generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::All));

    let order: Vec<(&str, Group)> = report
        .entries
        .iter()
        .map(|entry| (entry.word.as_str(), entry.group))
        .collect();
    assert_eq!(
        order,
        vec![
            ("robotiikka", Group::JobsAndInvestments),
            ("cnc koneistus", Group::JobListings),
            ("hitsaus robotti", Group::JobListings),
            ("anturi", Group::Investments),
            ("kone", Group::Investments),
        ]
    );
    assert_eq!(report.qualifying_count, 6);
}

#[test]
fn records_pairs_meeting_threshold_sorted_by_count_then_word() {
    let report = generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::All));

    assert_eq!(
        similar(entry(&report.entries, "robotiikka")),
        vec![("laser", 6), ("hitsaus robotti", 5)]
    );
    assert_eq!(
        similar(entry(&report.entries, "hitsaus robotti")),
        vec![("laser", 5), ("robotiikka", 5)]
    );
    assert!(similar(entry(&report.entries, "kone")).is_empty());
    assert!(similar(entry(&report.entries, "anturi")).is_empty());
}

#[test]
fn lower_threshold_adds_pairs_and_breaks_ties_by_word() {
    let report = generate_heatmap(nodes(), &scores(), &config(3, SourceFilterMode::All));

    assert_eq!(
        similar(entry(&report.entries, "kone")),
        vec![("hitsaus robotti", 3), ("laser", 3), ("robotiikka", 3)]
    );
}

#[test]
fn heatmap_only_excludes_pairs_with_non_qualifying_nodes() {
    let all = generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::All));
    let heatmap_only =
        generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::HeatmapOnly));
    let non_heatmap_only =
        generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::NonHeatmapOnly));

    assert!(similar(entry(&all.entries, "robotiikka")).contains(&("laser", 6)));
    assert_eq!(
        similar(entry(&heatmap_only.entries, "robotiikka")),
        vec![("hitsaus robotti", 5)]
    );
    assert_eq!(
        similar(entry(&non_heatmap_only.entries, "robotiikka")),
        vec![("laser", 6)]
    );
}

#[test]
fn strips_source_only_keys_and_adds_legend_fields() {
    let report = generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::All));
    let json = serde_json::to_value(entry(&report.entries, "robotiikka")).unwrap();
    let object = json.as_object().unwrap();

    for key in ["sources", "weight", "id", "search_center", "explain_api_call", "label"] {
        assert!(!object.contains_key(key), "{key} should be stripped");
    }
    assert_eq!(json["group"], "1");
    assert_eq!(json["group_name"], "job listings and investments");
    assert_eq!(json["correlation"], true);
    assert_eq!(json["value"], 10);
    assert_eq!(json["color"], "green");

    let job = serde_json::to_value(entry(&report.entries, "hitsaus robotti")).unwrap();
    assert_eq!(job["group_name"], "job listings");
    assert_eq!(job["correlation"], false);
}

#[test]
fn reports_qualifying_labels_without_matching_node() {
    let report = generate_heatmap(nodes(), &scores(), &config(5, SourceFilterMode::All));
    assert_eq!(report.missing_words, vec!["Automaatio".to_string()]);
}

#[test]
fn never_lists_own_word_as_similar_source() {
    let graph = json!({
        "data": { "nodes": [
            { "id": "a", "label": "Kone", "group": "3", "value": 2, "sources": titles(1..=5) },
            { "id": "b", "label": "kone", "group": "2", "value": 1, "sources": titles(1..=5) },
            { "id": "c", "label": "laser", "group": "3", "value": 1, "sources": titles(1..=5) }
        ]}
    });
    let nodes = serde_json::from_value::<RawGraph>(graph).unwrap().into_nodes();
    let scores: ScoreMap = serde_json::from_value(json!({ "kone": 1.0, "laser": 1.0 })).unwrap();

    let report = generate_heatmap(nodes, &scores, &config(1, SourceFilterMode::All));
    assert_eq!(report.entries.len(), 3);
    for entry in &report.entries {
        assert!(
            entry.similar_words().all(|word| word != entry.word),
            "{} lists itself",
            entry.word
        );
    }
}

#[test]
fn generating_twice_produces_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw-data.json");
    let scores_path = dir.path().join("manufacturing-scores-run-1.json");
    std::fs::write(&raw_path, serde_json::to_vec(&raw_graph()).unwrap()).unwrap();
    std::fs::write(&scores_path, serde_json::to_vec(&scores()).unwrap()).unwrap();

    let mut request = GenerateRequest {
        raw_data_path: raw_path,
        scores_path,
        output_path: dir.path().join("first.json"),
        config: config(3, SourceFilterMode::All),
    };
    generate_heatmap_file(&request).unwrap();
    request.output_path = dir.path().join("second.json");
    generate_heatmap_file(&request).unwrap();

    let first = std::fs::read(dir.path().join("first.json")).unwrap();
    let second = std::fs::read(dir.path().join("second.json")).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    assert!(text.starts_with("[\n  {"), "expected two-space indentation");
}

#[test]
fn nodes_without_value_do_not_abort_generation() {
    let raw = json!({
        "data": { "nodes": [
            { "id": 1, "label": "Robotiikka", "group": "1", "value": 4, "sources": titles(1..=2) },
            { "id": 2, "label": "Kone", "group": "3", "sources": titles(1..=2) },
            { "id": 3, "label": "Muu_Sana", "group": "2", "sources": [] }
        ]}
    });
    let nodes = serde_json::from_value::<RawGraph>(raw).unwrap().into_nodes();
    assert_eq!(nodes[2].value, None);

    let report = generate_heatmap(nodes, &scores(), &config(1, SourceFilterMode::All));
    let words: Vec<&str> = report.entries.iter().map(|entry| entry.word.as_str()).collect();
    assert_eq!(words, vec!["robotiikka", "kone"]);
    assert_eq!(entry(&report.entries, "kone").value, 0.0);
    assert_eq!(similar(entry(&report.entries, "robotiikka")), vec![("kone", 2)]);
}

#[test]
fn raw_keys_named_like_entry_fields_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw-data.json");
    let scores_path = dir.path().join("manufacturing-scores-run-1.json");
    let output_path = dir.path().join("heatmap-data.json");
    let raw = json!({
        "data": { "nodes": [{
            "id": 3, "label": "kone", "group": "3", "value": 8, "sources": titles(1..=2),
            "word": "Kone", "correlation": 0, "group_name": "old",
            "similar_sources_found": { "x": 1 }, "replaced_words": ["y"], "color": "red"
        }]}
    });
    std::fs::write(&raw_path, serde_json::to_vec(&raw).unwrap()).unwrap();
    std::fs::write(&scores_path, serde_json::to_vec(&scores()).unwrap()).unwrap();

    let request = GenerateRequest {
        raw_data_path: raw_path,
        scores_path,
        output_path: output_path.clone(),
        config: config(1, SourceFilterMode::All),
    };
    generate_heatmap_file(&request).unwrap();

    let written = read_entries(&output_path).unwrap();
    assert_eq!(written.len(), 1);
    let kone = &written[0];
    assert_eq!(kone.word, "kone");
    assert!(!kone.correlation);
    assert_eq!(kone.group_name, Group::Investments.legend());
    assert_eq!(kone.similar_sources_found.as_ref().map(|similar| similar.len()), Some(0));
    assert_eq!(kone.replaced_words, None);
    assert_eq!(kone.extra.keys().collect::<Vec<_>>(), vec!["color"]);
}
