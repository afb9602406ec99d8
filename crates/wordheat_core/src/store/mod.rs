//! Whole-file JSON and text storage for pipeline artifacts.
//!
//! # Responsibility
//! - Read complete JSON documents with errors naming the offending path.
//! - Replace output files atomically: temp file in the destination
//!   directory, then rename.
//!
//! # Invariants
//! - A failed write never truncates or partially overwrites the destination.
//! - Written JSON keeps non-ASCII characters verbatim.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::{
    read_entries, read_json, write_entries, write_json, write_lines, JsonIndent,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Input file does not exist.
    NotFound { path: PathBuf },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File exists but is not valid JSON for the expected shape.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "file not found: {}", path.display()),
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid JSON in {}: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
