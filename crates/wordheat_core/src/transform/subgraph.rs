//! Word-focused subgraph extraction.

use crate::model::entry::HeatmapEntry;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubgraphError {
    WordNotFound(String),
}

impl Display for SubgraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WordNotFound(word) => write!(f, "no entry found for word: {word}"),
        }
    }
}

impl Error for SubgraphError {}

/// Returns the target entry and every entry it correlates with, in dataset
/// order.
///
/// A target without `similar_sources_found` yields just itself.
pub fn extract_subgraph(
    entries: &[HeatmapEntry],
    target: &str,
) -> Result<Vec<HeatmapEntry>, SubgraphError> {
    let Some(focus) = entries.iter().find(|entry| entry.word == target) else {
        return Err(SubgraphError::WordNotFound(target.to_string()));
    };

    if focus.similar_sources_found.is_none() {
        warn!(
            "event=subgraph_extract module=transform status=warn word={} reason=missing_similar_sources_found",
            target
        );
    }

    let mut wanted: HashSet<&str> = focus.similar_words().collect();
    info!(
        "event=subgraph_extract module=transform status=start word={} similar={}",
        target,
        wanted.len()
    );
    wanted.insert(focus.word.as_str());

    let subgraph: Vec<HeatmapEntry> = entries
        .iter()
        .filter(|entry| wanted.contains(entry.word.as_str()))
        .cloned()
        .collect();

    info!(
        "event=subgraph_extract module=transform status=ok word={} entries={}",
        target,
        subgraph.len()
    );
    Ok(subgraph)
}
