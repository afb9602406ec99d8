//! Core transformation logic for the word heatmap pipeline.
//! This crate is the single source of truth for dataset invariants; the CLI
//! only maps flags onto the stage services exposed here.

pub mod defaults;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod scores;
pub mod service;
pub mod store;
pub mod transform;

pub use fetch::{FetchConfig, FetchError, FetchResult, RawDataClient};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{HeatmapEntry, SimilarSources};
pub use model::group::{Group, GroupError};
pub use model::raw::{LabelGraph, RawGraph, RawNode, RawSource};
pub use scores::{ScoreMap, ScoreRunError, ScoreRunResult};
pub use service::{StageError, StageResult};
pub use store::{StoreError, StoreResult};
pub use transform::cluster::{cluster_words, default_job_listing_rules, ClusterReport, ClusterRule};
pub use transform::heatmap::{
    generate_heatmap, FilterModeError, GeneratorConfig, HeatmapReport, SourceFilterMode,
};
pub use transform::ring::{ring_sort, RingLayout};
pub use transform::subgraph::{extract_subgraph, SubgraphError};
pub use transform::swap::{swap_entries, SwapError, WordIndex};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
