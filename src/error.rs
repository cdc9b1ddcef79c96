//! Error types for tokenizing, querying and binding.
//!
//! Every error maps onto one [`ErrorKind`]. Callers that need to decide
//! whether a failure is recoverable match on the kind rather than on the
//! individual error values.

use thiserror::Error;

/// Closed classification of everything that can go wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed path text
    Syntax,
    /// An object lacks the requested key, or the value was not an object
    FieldNotFound,
    /// Index past the end of an array, or no array to index
    InvalidIndex,
    /// The extracted value does not fit the destination type
    TypeMismatch,
    /// The input bytes are not valid JSON
    InvalidJson,
}

/// Malformed path text. Positions are character offsets into the path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unclosed '[' at position {position}")]
    UnclosedBracket { position: usize },

    #[error("unexpected ']' at position {position}")]
    UnexpectedClose { position: usize },

    #[error("bracket opened at position {open} already holds a value, found '{found}' at position {position}")]
    ExtraBracketContent {
        open: usize,
        found: char,
        position: usize,
    },

    #[error("invalid bracket content '{found}' at position {position}; expected an index, '-' or ']'")]
    InvalidBracketContent { found: char, position: usize },

    #[error("'[' at position {position} must directly follow a field name")]
    MisplacedBracket { position: usize },

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: char, position: usize },

    #[error("index '{digits}' at position {position} is too large")]
    IndexOverflow { digits: String, position: usize },
}

/// Why a field lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("no such key")]
    Missing,

    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("expected an array to iterate, found {found}")]
    NotAnArray { found: &'static str },
}

/// Errors produced while executing a path against a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("malformed path: {0}")]
    MalformedSyntax(#[from] SyntaxError),

    #[error("field '{field}' not found")]
    FieldNotFound {
        field: String,
        #[source]
        reason: LookupFailure,
    },

    #[error("invalid index {0}")]
    InvalidIndex(usize),

    #[error("no last element: {found}")]
    NoLastElement { found: &'static str },

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::MalformedSyntax(_) => ErrorKind::Syntax,
            QueryError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            QueryError::InvalidIndex(_) | QueryError::NoLastElement { .. } => {
                ErrorKind::InvalidIndex
            }
            QueryError::InvalidJson(_) => ErrorKind::InvalidJson,
        }
    }

    pub(crate) fn field_not_found(field: &str, reason: LookupFailure) -> Self {
        QueryError::FieldNotFound {
            field: field.to_string(),
            reason,
        }
    }
}

/// Errors produced while binding JSON into a [`Record`](crate::binder::Record).
#[derive(Debug, Error)]
pub enum BindError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("field `{field}` at '{path}': {source}")]
    Query {
        field: &'static str,
        path: String,
        #[source]
        source: QueryError,
    },

    #[error("field `{field}` at '{path}' has the wrong type: {source}")]
    TypeMismatch {
        field: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field `{field}` at '{path}' expects an array of records, found {found}")]
    NotAnArray {
        field: &'static str,
        path: String,
        found: &'static str,
    },
}

impl BindError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::InvalidJson(_) => ErrorKind::InvalidJson,
            BindError::Query { source, .. } => source.kind(),
            BindError::TypeMismatch { .. } | BindError::NotAnArray { .. } => {
                ErrorKind::TypeMismatch
            }
        }
    }

    /// Missing data, as opposed to malformed paths or badly shaped values.
    pub fn is_missing_value(&self) -> bool {
        match self.kind() {
            ErrorKind::FieldNotFound | ErrorKind::InvalidIndex => true,
            ErrorKind::Syntax | ErrorKind::TypeMismatch | ErrorKind::InvalidJson => false,
        }
    }
}
