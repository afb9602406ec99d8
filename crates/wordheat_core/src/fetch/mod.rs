//! Raw data download over HTTP.
//!
//! # Responsibility
//! - Issue the single blocking GET that retrieves the raw node graph.
//! - Turn transport, status and decode failures into typed errors.
//!
//! # Invariants
//! - No retries; a failed fetch is terminal for the run.
//! - Callers persist the body only after a successful decode.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;

pub use client::{FetchConfig, RawDataClient};

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug)]
pub enum FetchError {
    /// URL or client settings are unusable.
    InvalidConfig(String),
    Transport {
        url: String,
        source: reqwest::Error,
    },
    /// Server answered with a non-success status.
    Status { url: String, status: u16 },
    /// Body is not JSON.
    Decode {
        url: String,
        source: reqwest::Error,
    },
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(message) => write!(f, "invalid fetch config: {message}"),
            Self::Transport { url, source } => write!(f, "failed to download {url}: {source}"),
            Self::Status { url, status } => {
                write!(f, "failed to download {url}, status code: {status}")
            }
            Self::Decode { url, source } => {
                write!(f, "failed to process JSON from {url}: {source}")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(_) | Self::Status { .. } => None,
            Self::Transport { source, .. } | Self::Decode { source, .. } => Some(source),
        }
    }
}
