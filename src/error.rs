use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ChatStatsError>;

/// Everything that can abort an analysis run.
///
/// There is no retry anywhere: this is a single-pass batch tool, so the first
/// error surfaces to the caller and the run stops. Absent reply targets and
/// unmarked question lookups are *not* errors; they default to false.
#[derive(Debug, Error)]
pub enum ChatStatsError {
    /// An input file (chat export or stopword list) could not be read.
    #[error("file not found or unreadable: {path}")]
    FileNotFound { path: PathBuf },

    /// The chat export was readable but is not the expected JSON document.
    #[error("invalid JSON in chat export: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A message lacks a field the current operation needs (`id` or `from`).
    #[error("message at index {index} is missing required field `{field}`")]
    MissingField { field: &'static str, index: usize },

    /// The font file or the output directory is inaccessible.
    #[error("resource not found or inaccessible: {path}")]
    ResourceNotFound { path: PathBuf },

    /// Stopword filtering left no tokens to draw.
    #[error("no tokens survived filtering; cannot build a word cloud")]
    EmptyCorpus,
}
