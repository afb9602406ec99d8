//! Heatmap dataset stages: generate, cluster, ring sort, swap, focus.

use super::StageResult;
use crate::model::group::Group;
use crate::model::raw::RawGraph;
use crate::scores::ScoreMap;
use crate::store::{read_entries, read_json, write_entries, write_lines};
use crate::transform::cluster::{cluster_words, clustered_terms, ClusterReport, ClusterRule};
use crate::transform::heatmap::{generate_heatmap, GeneratorConfig, HeatmapReport};
use crate::transform::ring::{ring_sort, RingLayout};
use crate::transform::subgraph::extract_subgraph;
use crate::transform::swap::swap_entries;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Inputs and thresholds for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub raw_data_path: PathBuf,
    pub scores_path: PathBuf,
    pub output_path: PathBuf,
    pub config: GeneratorConfig,
}

/// Generates heatmap data from raw nodes and a score file.
///
/// # Side effects
/// - Replaces `output_path`.
/// - Logs qualifying labels that matched no node.
pub fn generate_heatmap_file(request: &GenerateRequest) -> StageResult<HeatmapReport> {
    let started_at = Instant::now();
    let scores: ScoreMap = read_json(&request.scores_path)?;
    let graph: RawGraph = read_json(&request.raw_data_path)?;

    let report = generate_heatmap(graph.into_nodes(), &scores, &request.config);
    write_entries(&request.output_path, &report.entries)?;

    info!(
        "event=heatmap_generate module=service status=ok entries={} qualifying={} missing={} path={} duration_ms={}",
        report.entries.len(),
        report.qualifying_count,
        report.missing_words.len(),
        request.output_path.display(),
        started_at.elapsed().as_millis()
    );
    Ok(report)
}

/// Inputs for one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rules: Vec<ClusterRule>,
    /// Group whose words are clustered; other groups pass through.
    pub group: Group,
    /// Optional sorted word list of `group` after clustering.
    pub terms_path: Option<PathBuf>,
}

/// Loads an ordered rule table: a JSON array of `{pattern, canonical}`.
pub fn load_cluster_rules(path: impl AsRef<Path>) -> StageResult<Vec<ClusterRule>> {
    Ok(read_json(path)?)
}

pub fn cluster_heatmap_file(request: &ClusterRequest) -> StageResult<ClusterReport> {
    let started_at = Instant::now();
    let entries = read_entries(&request.input_path)?;
    let report = cluster_words(entries, &request.rules, request.group);

    write_entries(&request.output_path, &report.entries)?;
    if let Some(terms_path) = &request.terms_path {
        write_lines(terms_path, clustered_terms(&report.entries, request.group))?;
    }

    info!(
        "event=cluster_words module=service status=ok entries={} clusters={} path={} duration_ms={}",
        report.entries.len(),
        report.clusters.len(),
        request.output_path.display(),
        started_at.elapsed().as_millis()
    );
    Ok(report)
}

/// Rewrites `path` in ring layout order. Returns the entry count.
pub fn ring_sort_file(path: impl AsRef<Path>, layout: &RingLayout) -> StageResult<usize> {
    let path = path.as_ref();
    let entries = read_entries(path)?;
    let sorted = ring_sort(entries, layout);
    write_entries(path, &sorted)?;
    Ok(sorted.len())
}

/// Result of a successful swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub first_word: String,
    pub second_word: String,
    pub first_position: usize,
    pub second_position: usize,
}

/// Swaps two entries in `path` in place. The file is untouched on error.
pub fn swap_in_file(path: impl AsRef<Path>, first: &str, second: &str) -> StageResult<SwapOutcome> {
    let path = path.as_ref();
    let mut entries = read_entries(path)?;
    let (first_position, second_position) = swap_entries(&mut entries, first, second)?;
    write_entries(path, &entries)?;

    Ok(SwapOutcome {
        first_word: entries[second_position].word.clone(),
        second_word: entries[first_position].word.clone(),
        first_position,
        second_position,
    })
}

/// Default output file for a focused subgraph: `heatmap-data-<word>.json`.
pub fn subgraph_output_path(dir: impl AsRef<Path>, word: &str) -> PathBuf {
    dir.as_ref().join(format!("heatmap-data-{word}.json"))
}

/// Writes the subgraph around `word` to `output`. Returns the entry count.
///
/// Fails without writing when `input` is missing or `word` is unknown.
pub fn extract_subgraph_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    word: &str,
) -> StageResult<usize> {
    let entries = read_entries(input)?;
    let subgraph = extract_subgraph(&entries, word)?;
    write_entries(output, &subgraph)?;
    Ok(subgraph.len())
}
