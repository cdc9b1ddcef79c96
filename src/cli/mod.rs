//! CLI support for rjson
//!
//! Provides programmatic access to the `rjson` command so other tools can
//! embed the same query flow.

mod query;

pub use query::{QueryOptions, QueryOutcome, execute_query, load_json_file};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::QueryError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --file, --input or pipe JSON to stdin.")]
    NoInput,
}
