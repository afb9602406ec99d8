//! `wordheat` command-line entry point.
//!
//! # Responsibility
//! - Map one subcommand per pipeline stage onto `wordheat_core` services.
//! - Print a short human summary; details go to the log.
//!
//! Every failure prints `error: <message>` and exits with status 1.

mod flags;

use clap::{Parser, Subcommand};
use flags::SourceFilterModeFlag;
use log::error;
use std::path::PathBuf;
use std::time::Duration;
use wordheat_core::scores::{list_score_runs, next_run_number, score_file_path};
use wordheat_core::service::{
    cluster_heatmap_file, extract_labels_file, extract_subgraph_file, fetch_raw_data_file,
    generate_heatmap_file, load_cluster_rules, ring_sort_file, subgraph_output_path, swap_in_file,
    ClusterRequest, GenerateRequest,
};
use wordheat_core::{
    default_job_listing_rules, default_log_level, defaults, init_logging, FetchConfig,
    GeneratorConfig, Group, RingLayout, StageError, StageResult, StoreError,
};

#[derive(Parser)]
#[command(name = "wordheat", version, about = "Word heatmap data pipeline")]
struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files (default: stderr)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the raw node graph
    Fetch {
        /// Raw data endpoint
        #[arg(long, env = defaults::RAW_DATA_URL_ENV)]
        url: String,

        #[arg(long, default_value = defaults::RAW_DATA_FILE)]
        output: PathBuf,

        #[arg(long, default_value_t = defaults::FETCH_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
    /// Write normalized node labels, one per line
    ExtractLabels {
        #[arg(long, default_value = defaults::RAW_DATA_FILE)]
        input: PathBuf,

        #[arg(long, default_value = defaults::EXTRACTED_LABELS_FILE)]
        output: PathBuf,
    },
    /// Generate heatmap data from raw data and AI confidence scores
    Generate {
        /// The minimum confidence score to include entries
        #[arg(long, default_value_t = defaults::MIN_SCORE)]
        min_score: f64,

        /// The minimum number of sources two words must share to be recorded
        #[arg(long, default_value_t = defaults::MIN_SIMILAR_SOURCES)]
        min_similar_sources: usize,

        /// Which words take part in similar-sources counting
        #[arg(long, value_enum, default_value = "all")]
        source_filter_mode: SourceFilterModeFlag,

        /// The AI run id whose score file is used
        #[arg(long, default_value = defaults::AI_RUN_ID)]
        ai_run_id: String,

        #[arg(long, default_value = defaults::HEATMAP_DATA_FILE)]
        output_file: PathBuf,

        #[arg(long, default_value = defaults::RAW_DATA_FILE)]
        raw_data: PathBuf,

        #[arg(long, default_value = defaults::SCORES_DIR)]
        scores_dir: PathBuf,
    },
    /// Merge near-duplicate job listing words into canonical words
    Cluster {
        #[arg(long, default_value = defaults::CLUSTER_INPUT_FILE)]
        input: PathBuf,

        #[arg(long, default_value = defaults::VISUAL_DATA_FILE)]
        output: PathBuf,

        /// JSON array of {"pattern", "canonical"} rules (default: built-in table)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Also write the sorted clustered job listing words here
        #[arg(long, num_args = 0..=1, default_missing_value = defaults::CLUSTERED_TERMS_FILE)]
        terms_file: Option<PathBuf>,
    },
    /// Reorder the visual dataset into ring layout, in place
    Sort {
        #[arg(long, default_value = defaults::VISUAL_DATA_FILE)]
        file: PathBuf,
    },
    /// Swap the positions of two entries, in place
    Swap {
        first: String,
        second: String,

        #[arg(long, default_value = defaults::VISUAL_DATA_FILE)]
        file: PathBuf,
    },
    /// Extract one word and its correlated words into a separate file
    Focus {
        #[arg(default_value = defaults::SUBGRAPH_TARGET_WORD)]
        word: String,

        #[arg(long, default_value = defaults::HEATMAP_DATA_FILE)]
        input: PathBuf,

        /// Output file (default: <output-dir>/heatmap-data-<word>.json)
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, default_value = defaults::SUBGRAPH_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
    /// List AI score runs and the next free run number
    Runs {
        #[arg(long, default_value = defaults::SCORES_DIR)]
        scores_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let is_focus = matches!(cli.command, Commands::Focus { .. });
    if let Err(err) = run(cli.command) {
        error!("event=cli_run module=cli status=error error={err}");
        eprintln!("error: {err}");
        if is_focus && matches!(err, StageError::Store(StoreError::NotFound { .. })) {
            eprintln!(
                "Run the following command first: wordheat generate --min-similar-sources 1 --source-filter-mode heatmap-only"
            );
        }
        std::process::exit(1);
    }
}

fn run(command: Commands) -> StageResult<()> {
    match command {
        Commands::Fetch {
            url,
            output,
            timeout_secs,
        } => {
            let config = FetchConfig {
                url,
                timeout: Duration::from_secs(timeout_secs),
            };
            println!("Downloading from {}...", config.url);
            fetch_raw_data_file(config, &output)?;
            println!("Saved as {}", output.display());
        }
        Commands::ExtractLabels { input, output } => {
            let count = extract_labels_file(&input, &output)?;
            println!("Extracted {count} labels to {}", output.display());
        }
        Commands::Generate {
            min_score,
            min_similar_sources,
            source_filter_mode,
            ai_run_id,
            output_file,
            raw_data,
            scores_dir,
        } => {
            let request = GenerateRequest {
                raw_data_path: raw_data,
                scores_path: score_file_path(&scores_dir, &ai_run_id)?,
                output_path: output_file,
                config: GeneratorConfig {
                    min_score,
                    min_similar_sources,
                    source_filter_mode: source_filter_mode.as_domain(),
                },
            };
            let report = generate_heatmap_file(&request)?;
            println!("Manufacturing words: {}", report.qualifying_count);
            if report.missing_words.is_empty() {
                println!("All manufacturing words are present in the nodes.");
            } else {
                println!("Missing words from nodes: {:?}", report.missing_words);
                println!("This is likely an issue with either casing or underscores instead of spaces.");
            }
            println!(
                "Saved {} nodes for heatmap in {}",
                report.entries.len(),
                request.output_path.display()
            );
        }
        Commands::Cluster {
            input,
            output,
            rules,
            terms_file,
        } => {
            let rules = match rules {
                Some(path) => load_cluster_rules(path)?,
                None => default_job_listing_rules(),
            };
            let request = ClusterRequest {
                input_path: input,
                output_path: output,
                rules,
                group: Group::JobListings,
                terms_path: terms_file,
            };
            let report = cluster_heatmap_file(&request)?;
            for word in &report.missing_similar_sources {
                println!("Entry {word} does not have 'similar_sources_found' key.");
            }
            println!(
                "Clustered {} groups; {} entries written to {}",
                report.clusters.len(),
                report.entries.len(),
                request.output_path.display()
            );
        }
        Commands::Sort { file } => {
            let count = ring_sort_file(&file, &RingLayout::default())?;
            println!("Sorted {count} entries in {}", file.display());
        }
        Commands::Swap {
            first,
            second,
            file,
        } => {
            let outcome = swap_in_file(&file, &first, &second)?;
            println!(
                "Swapped entries containing '{}' and '{}'.",
                outcome.first_word, outcome.second_word
            );
        }
        Commands::Focus {
            word,
            input,
            output,
            output_dir,
        } => {
            let output = output.unwrap_or_else(|| subgraph_output_path(&output_dir, &word));
            let count = extract_subgraph_file(&input, &output, &word)?;
            println!("Filtered data contains {count} items");
            println!("Filtered data written to {}", output.display());
        }
        Commands::Runs { scores_dir } => {
            let runs = list_score_runs(&scores_dir)?;
            if runs.is_empty() {
                println!("No score runs in {}", scores_dir.display());
            }
            for run in runs {
                println!("{}", score_file_path(&scores_dir, &run.to_string())?.display());
            }
            println!("Next run number: {}", next_run_number(&scores_dir)?);
        }
    }
    Ok(())
}
