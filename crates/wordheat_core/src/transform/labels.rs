//! Label normalization.

use crate::model::raw::LabelGraph;

/// Normalizes a label for manual review and scoring: trimmed, lowercased,
/// underscores replaced with spaces.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace('_', " ")
}

/// Heatmap word for a raw label: underscores to spaces, lowercased.
///
/// Unlike [`normalize_label`] this does not trim, so labels with stray
/// whitespace show up as missing words in the generator report.
pub fn derive_word(label: &str) -> String {
    label.replace('_', " ").to_lowercase()
}

/// Normalized labels in node order, duplicates kept.
pub fn extract_labels(graph: &LabelGraph) -> Vec<String> {
    graph.labels().map(normalize_label).collect()
}
