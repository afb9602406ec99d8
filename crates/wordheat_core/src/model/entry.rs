//! Heatmap entry, the record persisted by every stage after generation.
//!
//! # Invariants
//! - `word` is unique once the clusterer has deduplicated the dataset.
//! - `similar_sources_found` never holds the entry's own word as a key.
//! - `replaced_words` is present only on clustered entries.

use super::group::Group;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Correlated word → number of shared citation titles, in display order.
pub type SimilarSources = IndexMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub word: String,
    pub group: Group,
    #[serde(default)]
    pub group_name: String,
    /// Aggregate weight; summed when words are clustered.
    #[serde(serialize_with = "serialize_weight")]
    pub value: f64,
    /// True for group "1" words, which link both halves of the ring.
    #[serde(default)]
    pub correlation: bool,
    /// Absent on records that never went through correlation counting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_sources_found: Option<SimilarSources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_words: Option<Vec<String>>,
    /// Remaining raw keys carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HeatmapEntry {
    /// Keys owned by the typed fields; never carried in `extra`.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "word",
        "group",
        "group_name",
        "value",
        "correlation",
        "similar_sources_found",
        "replaced_words",
    ];

    /// Creates an unclustered entry with legend fields derived from `group`.
    pub fn new(word: impl Into<String>, group: Group, value: f64) -> Self {
        Self {
            word: word.into(),
            group,
            group_name: group.legend().to_string(),
            value,
            correlation: group == Group::JobsAndInvestments,
            similar_sources_found: None,
            replaced_words: None,
            extra: Map::new(),
        }
    }

    /// Builder-style setter used by fixtures and the generator.
    pub fn with_similar_sources(mut self, similar: SimilarSources) -> Self {
        self.similar_sources_found = Some(similar);
        self
    }

    /// Words this entry correlates with, empty when never computed.
    pub fn similar_words(&self) -> impl Iterator<Item = &str> {
        self.similar_sources_found
            .iter()
            .flat_map(|similar| similar.keys().map(String::as_str))
    }
}

/// Writes integral weights as JSON integers so counts keep their raw shape.
fn serialize_weight<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
