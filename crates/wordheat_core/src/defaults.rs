//! Default file names and tuning values shared by the library and the CLI.
//!
//! Every stage reads and writes whole files relative to the working
//! directory unless the caller overrides the path.

/// Raw node graph persisted by the fetch stage.
pub const RAW_DATA_FILE: &str = "raw-data.json";
/// Normalized labels written by the label extractor.
pub const EXTRACTED_LABELS_FILE: &str = "extracted_labels.txt";
/// Directory holding `manufacturing-scores-run-<id>.json` files.
pub const SCORES_DIR: &str = "ai-generated-scores";
/// Output of the heatmap generator.
pub const HEATMAP_DATA_FILE: &str = "heatmap-data.json";
/// Input of the clusterer, a copy of the generator output.
pub const CLUSTER_INPUT_FILE: &str = "originalData.json";
/// Visualization dataset consumed by the sorter and the swapper.
pub const VISUAL_DATA_FILE: &str = "data.json";
/// Sorted group "2" word list written after clustering.
pub const CLUSTERED_TERMS_FILE: &str = "job_listing_words_modified.txt";
/// Directory receiving word-focused subgraph files.
pub const SUBGRAPH_OUTPUT_DIR: &str = ".";

/// Environment variable read by the CLI for the raw data endpoint.
pub const RAW_DATA_URL_ENV: &str = "WORDHEAT_RAW_DATA_URL";
/// Fetch request timeout.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

pub const MIN_SCORE: f64 = 0.7;
pub const MIN_SIMILAR_SOURCES: usize = 5;
pub const AI_RUN_ID: &str = "1";

/// Target word used by the subgraph extractor when none is given.
pub const SUBGRAPH_TARGET_WORD: &str = "robotiikka";

pub const RING_INITIAL_CAPACITY: usize = 12;
pub const RING_CAPACITY_INCREMENT: usize = 6;
