//! Execute path queries against JSON input

use std::fs;
use std::path::Path as FilePath;

use serde::de::IgnoredAny;

use super::CliError;
use crate::{Path, QueryError, Value, executor::execute, parse_json};

/// Options for the query command
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// The path to extract
    pub path: String,
    /// JSON input string
    pub input: Option<String>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a query operation
#[derive(Debug)]
pub enum QueryOutcome {
    /// Syntax validation passed
    SyntaxValid(Path),
    /// Query executed successfully
    Success(Value),
}

/// Execute a query operation
pub fn execute_query(options: &QueryOptions) -> Result<QueryOutcome, CliError> {
    let path = Path::parse(&options.path).map_err(QueryError::from)?;

    if options.syntax_only {
        return Ok(QueryOutcome::SyntaxValid(path));
    }

    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let root = parse_json(json.as_bytes())?;

    let result = execute(&root, &path)?;
    Ok(QueryOutcome::Success(result))
}

/// Read a JSON file, rejecting it up front if it does not parse.
pub fn load_json_file(path: impl AsRef<FilePath>) -> Result<String, CliError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str::<IgnoredAny>(&data)?;
    Ok(data)
}
