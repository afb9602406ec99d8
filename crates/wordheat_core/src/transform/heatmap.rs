//! Heatmap data generation.
//!
//! # Responsibility
//! - Keep nodes whose score reaches the threshold.
//! - Count shared citation titles between each kept node and every other
//!   admitted node.
//! - Strip raw-only keys and sort for persistence.
//!
//! # Invariants
//! - Output is deterministic for identical inputs.
//! - A node never correlates with its own id or its own word.
//! - Output order: group ascending, value descending, word ascending.
//!
//! # Complexity
//! Correlation counting is O(n² · t) for n nodes with t titles each. Title
//! sets are built once per node, so each pair costs one set intersection.
//! Datasets hold hundreds to low thousands of nodes.

use crate::defaults;
use crate::model::entry::{HeatmapEntry, SimilarSources};
use crate::model::group::Group;
use crate::model::raw::RawNode;
use crate::scores::ScoreMap;
use crate::transform::labels::derive_word;
use log::{info, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Raw keys that only matter to the source system.
pub const STRIPPED_NODE_KEYS: &[&str] = &["weight", "search_center", "explain_api_call"];

const SOURCE_FILTER_MODE_ALL: &str = "all";
const SOURCE_FILTER_MODE_HEATMAP_ONLY: &str = "heatmap-only";
const SOURCE_FILTER_MODE_NON_HEATMAP_ONLY: &str = "non-heatmap-only";

/// Which other nodes take part in similar-sources counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilterMode {
    /// Every other node.
    #[default]
    All,
    /// Only nodes that are themselves in the heatmap.
    HeatmapOnly,
    /// Only nodes that did not make it into the heatmap.
    NonHeatmapOnly,
}

impl SourceFilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => SOURCE_FILTER_MODE_ALL,
            Self::HeatmapOnly => SOURCE_FILTER_MODE_HEATMAP_ONLY,
            Self::NonHeatmapOnly => SOURCE_FILTER_MODE_NON_HEATMAP_ONLY,
        }
    }

    /// Whether a node with `word` may be counted as a correlation partner.
    pub fn admits(self, word: &str, qualifying: &HashSet<String>) -> bool {
        match self {
            Self::All => true,
            Self::HeatmapOnly => qualifying.contains(word),
            Self::NonHeatmapOnly => !qualifying.contains(word),
        }
    }
}

impl Display for SourceFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFilterMode {
    type Err = FilterModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            SOURCE_FILTER_MODE_ALL => Ok(Self::All),
            SOURCE_FILTER_MODE_HEATMAP_ONLY => Ok(Self::HeatmapOnly),
            SOURCE_FILTER_MODE_NON_HEATMAP_ONLY => Ok(Self::NonHeatmapOnly),
            other => Err(FilterModeError(other.to_string())),
        }
    }
}

/// Unrecognized source filter mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterModeError(pub String);

impl Display for FilterModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid source filter mode `{}`; expected all|heatmap-only|non-heatmap-only",
            self.0
        )
    }
}

impl Error for FilterModeError {}

/// Thresholds for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Minimum confidence score for a label to enter the heatmap.
    pub min_score: f64,
    /// Minimum shared titles for a pair to be recorded.
    pub min_similar_sources: usize,
    pub source_filter_mode: SourceFilterMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_score: defaults::MIN_SCORE,
            min_similar_sources: defaults::MIN_SIMILAR_SOURCES,
            source_filter_mode: SourceFilterMode::All,
        }
    }
}

/// Generator output plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapReport {
    pub entries: Vec<HeatmapEntry>,
    /// Number of labels at or above the score threshold.
    pub qualifying_count: usize,
    /// Qualifying labels that matched no node word, sorted.
    ///
    /// Usually a casing or underscore mismatch between the score file and
    /// the raw labels.
    pub missing_words: Vec<String>,
}

/// Labels whose score reaches `min_score`.
pub fn qualifying_words(scores: &ScoreMap, min_score: f64) -> HashSet<String> {
    scores
        .iter()
        .filter(|(_, score)| **score >= min_score)
        .map(|(label, _)| label.clone())
        .collect()
}

/// Builds the sorted heatmap dataset from raw nodes and scores.
pub fn generate_heatmap(
    nodes: Vec<RawNode>,
    scores: &ScoreMap,
    config: &GeneratorConfig,
) -> HeatmapReport {
    let qualifying = qualifying_words(scores, config.min_score);
    info!(
        "event=heatmap_generate module=transform status=start nodes={} qualifying={} mode={} min_similar_sources={}",
        nodes.len(),
        qualifying.len(),
        config.source_filter_mode,
        config.min_similar_sources
    );

    let words: Vec<String> = nodes.iter().map(|node| derive_word(&node.label)).collect();
    let correlations = count_similar_sources(&nodes, &words, &qualifying, config);

    let mut entries: Vec<HeatmapEntry> = nodes
        .into_iter()
        .zip(words)
        .zip(correlations)
        .filter_map(|((node, word), similar)| {
            similar.map(|similar| into_entry(node, word, similar))
        })
        .collect();

    let present: HashSet<&str> = entries.iter().map(|entry| entry.word.as_str()).collect();
    let missing_words: Vec<String> = qualifying
        .iter()
        .filter(|word| !present.contains(word.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if missing_words.is_empty() {
        info!("event=heatmap_missing_words module=transform status=ok missing=0");
    } else {
        warn!(
            "event=heatmap_missing_words module=transform status=warn missing={} words={:?} hint=check_casing_or_underscores",
            missing_words.len(),
            missing_words
        );
    }

    sort_heatmap_entries(&mut entries);
    info!(
        "event=heatmap_generate module=transform status=ok entries={}",
        entries.len()
    );

    HeatmapReport {
        entries,
        qualifying_count: qualifying.len(),
        missing_words,
    }
}

/// Sorts by group ascending, value descending, word ascending.
pub fn sort_heatmap_entries(entries: &mut [HeatmapEntry]) {
    entries.sort_by(|a, b| {
        a.group
            .cmp(&b.group)
            .then_with(|| b.value.total_cmp(&a.value))
            .then_with(|| a.word.cmp(&b.word))
    });
}

/// `Some(correlations)` for qualifying nodes, `None` for nodes to drop.
fn count_similar_sources(
    nodes: &[RawNode],
    words: &[String],
    qualifying: &HashSet<String>,
    config: &GeneratorConfig,
) -> Vec<Option<SimilarSources>> {
    let titles: Vec<HashSet<&str>> = nodes
        .iter()
        .map(|node| node.sources.iter().map(|source| source.title.as_str()).collect())
        .collect();
    let admitted: Vec<bool> = words
        .iter()
        .map(|word| config.source_filter_mode.admits(word, qualifying))
        .collect();

    (0..nodes.len())
        .map(|index| {
            if !qualifying.contains(&words[index]) {
                return None;
            }

            let mut similar = SimilarSources::new();
            for other in 0..nodes.len() {
                if other == index
                    || !admitted[other]
                    || nodes[other].id == nodes[index].id
                    || words[other] == words[index]
                {
                    continue;
                }

                let shared = shared_count(&titles[index], &titles[other]);
                if shared > 0 && shared >= config.min_similar_sources {
                    similar.insert(words[other].clone(), shared as u64);
                }
            }

            similar.sort_by(|word_a, count_a, word_b, count_b| {
                count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
            });
            Some(similar)
        })
        .collect()
}

fn shared_count(left: &HashSet<&str>, right: &HashSet<&str>) -> usize {
    let (small, large) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    small.iter().filter(|title| large.contains(*title)).count()
}

fn into_entry(node: RawNode, word: String, similar: SimilarSources) -> HeatmapEntry {
    let mut extra = node.extra;
    for key in STRIPPED_NODE_KEYS.iter().chain(HeatmapEntry::FIELD_NAMES) {
        extra.remove(*key);
    }

    let value = node.value.unwrap_or_else(|| {
        warn!(
            "event=heatmap_generate module=transform status=warn word={} reason=missing_value",
            word
        );
        0.0
    });

    HeatmapEntry {
        word,
        group: node.group,
        group_name: node.group.legend().to_string(),
        value,
        correlation: node.group == Group::JobsAndInvestments,
        similar_sources_found: Some(similar),
        replaced_words: None,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::{shared_count, FilterModeError, SourceFilterMode};
    use std::collections::HashSet;

    #[test]
    fn filter_mode_parses_known_values_and_rejects_others() {
        assert_eq!("all".parse::<SourceFilterMode>(), Ok(SourceFilterMode::All));
        assert_eq!(
            "heatmap-only".parse::<SourceFilterMode>(),
            Ok(SourceFilterMode::HeatmapOnly)
        );
        assert_eq!(
            " non-heatmap-only ".parse::<SourceFilterMode>(),
            Ok(SourceFilterMode::NonHeatmapOnly)
        );
        assert_eq!(
            "everything".parse::<SourceFilterMode>(),
            Err(FilterModeError("everything".to_string()))
        );
    }

    #[test]
    fn filter_mode_admits_by_membership() {
        let qualifying: HashSet<String> = ["robotiikka".to_string()].into_iter().collect();
        assert!(SourceFilterMode::All.admits("kone", &qualifying));
        assert!(SourceFilterMode::HeatmapOnly.admits("robotiikka", &qualifying));
        assert!(!SourceFilterMode::HeatmapOnly.admits("kone", &qualifying));
        assert!(SourceFilterMode::NonHeatmapOnly.admits("kone", &qualifying));
        assert!(!SourceFilterMode::NonHeatmapOnly.admits("robotiikka", &qualifying));
    }

    #[test]
    fn shared_count_is_symmetric() {
        let left: HashSet<&str> = ["a", "b", "c"].into_iter().collect();
        let right: HashSet<&str> = ["b", "c"].into_iter().collect();
        assert_eq!(shared_count(&left, &right), 2);
        assert_eq!(shared_count(&right, &left), 2);
    }
}
