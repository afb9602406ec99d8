//! Stage services: read inputs, run one transformation, write outputs.
//!
//! # Responsibility
//! - Provide one entry point per pipeline stage for the CLI.
//! - Emit `event=<stage> status=start|ok|error` lines with durations.
//!
//! # Invariants
//! - Every output is built fully in memory before an atomic replace.
//! - Lookup misses abort before anything is written.

use crate::fetch::FetchError;
use crate::scores::ScoreRunError;
use crate::store::StoreError;
use crate::transform::subgraph::SubgraphError;
use crate::transform::swap::SwapError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod heatmap_service;
pub mod raw_data_service;

pub use heatmap_service::{
    cluster_heatmap_file, extract_subgraph_file, generate_heatmap_file, load_cluster_rules,
    ring_sort_file, subgraph_output_path, swap_in_file, ClusterRequest, GenerateRequest,
    SwapOutcome,
};
pub use raw_data_service::{extract_labels_file, fetch_raw_data_file};

pub type StageResult<T> = Result<T, StageError>;

/// Failure of one stage run.
#[derive(Debug)]
pub enum StageError {
    Store(StoreError),
    Fetch(FetchError),
    ScoreRun(ScoreRunError),
    Swap(SwapError),
    Subgraph(SubgraphError),
}

impl Display for StageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Fetch(err) => write!(f, "{err}"),
            Self::ScoreRun(err) => write!(f, "{err}"),
            Self::Swap(err) => write!(f, "{err}"),
            Self::Subgraph(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Fetch(err) => Some(err),
            Self::ScoreRun(err) => Some(err),
            Self::Swap(err) => Some(err),
            Self::Subgraph(err) => Some(err),
        }
    }
}

impl From<StoreError> for StageError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<FetchError> for StageError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<ScoreRunError> for StageError {
    fn from(value: ScoreRunError) -> Self {
        Self::ScoreRun(value)
    }
}

impl From<SwapError> for StageError {
    fn from(value: SwapError) -> Self {
        Self::Swap(value)
    }
}

impl From<SubgraphError> for StageError {
    fn from(value: SubgraphError) -> Self {
        Self::Subgraph(value)
    }
}
