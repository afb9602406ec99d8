//! Raw node graph as served by the remote data endpoint.
//!
//! Only the keys the pipeline reads are typed; everything else lands in
//! `extra` so the heatmap generator can decide what to keep.

use super::group::Group;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level raw document: `{ "data": { "nodes": [...] } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    pub data: RawGraphData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGraphData {
    pub nodes: Vec<RawNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One labelled node with its citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    /// Opaque node identity; numeric or string depending on the export.
    pub id: Value,
    /// Label as written by the source, possibly with underscores and casing.
    pub label: String,
    pub group: Group,
    /// Frequency weight of the word. Only read for qualifying nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Citations; titles are compared across nodes to find similar sources.
    #[serde(default)]
    pub sources: Vec<RawSource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSource {
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Label-only view of the raw document, for stages that ignore the rest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelGraph {
    pub data: LabelGraphData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelGraphData {
    pub nodes: Vec<LabelNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelNode {
    pub label: String,
}

impl LabelGraph {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.data.nodes.iter().map(|node| node.label.as_str())
    }
}

impl RawGraph {
    pub fn nodes(&self) -> &[RawNode] {
        &self.data.nodes
    }

    pub fn into_nodes(self) -> Vec<RawNode> {
        self.data.nodes
    }
}
