//! AI confidence score files.
//!
//! Scores are produced outside this workspace, one file per scoring run,
//! named `manufacturing-scores-run-<id>.json` and holding a flat
//! label → score (0.0..=1.0) object.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Label → confidence score, in file order.
pub type ScoreMap = IndexMap<String, f64>;

const SCORE_FILE_PREFIX: &str = "manufacturing-scores-run-";

static SCORE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^manufacturing-scores-run-(\d+)\.json$").expect("valid score file regex"));

pub type ScoreRunResult<T> = Result<T, ScoreRunError>;

#[derive(Debug)]
pub enum ScoreRunError {
    EmptyRunId,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ScoreRunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRunId => write!(f, "ai run id cannot be empty"),
            Self::Io { path, source } => {
                write!(f, "cannot list score runs in {}: {source}", path.display())
            }
        }
    }
}

impl Error for ScoreRunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyRunId => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// File name for one scoring run.
pub fn score_file_name(run_id: &str) -> ScoreRunResult<String> {
    let run_id = run_id.trim();
    if run_id.is_empty() {
        return Err(ScoreRunError::EmptyRunId);
    }
    Ok(format!("{SCORE_FILE_PREFIX}{run_id}.json"))
}

pub fn score_file_path(dir: impl AsRef<Path>, run_id: &str) -> ScoreRunResult<PathBuf> {
    Ok(dir.as_ref().join(score_file_name(run_id)?))
}

/// Numeric run ids present in `dir`, ascending. Non-matching files are ignored.
pub fn list_score_runs(dir: impl AsRef<Path>) -> ScoreRunResult<Vec<u64>> {
    let dir = dir.as_ref();
    let io_error = |source| ScoreRunError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut runs = Vec::new();
    for dir_entry in std::fs::read_dir(dir).map_err(io_error)? {
        let dir_entry = dir_entry.map_err(io_error)?;
        let file_name = dir_entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(run) = parse_run_number(name) {
            runs.push(run);
        }
    }
    runs.sort_unstable();
    runs.dedup();
    Ok(runs)
}

/// Next free run number: highest existing run + 1, or 1 when none exist.
pub fn next_run_number(dir: impl AsRef<Path>) -> ScoreRunResult<u64> {
    let runs = list_score_runs(dir)?;
    Ok(runs.last().map_or(1, |last| last + 1))
}

fn parse_run_number(file_name: &str) -> Option<u64> {
    SCORE_FILE_RE
        .captures(file_name)
        .and_then(|captures| captures.get(1))
        .and_then(|run| run.as_str().parse().ok())
}
