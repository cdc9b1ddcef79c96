//! Extract values from JSON with a compact path language, and populate typed
//! records from per-field path annotations.
//!
//! ```text
//! user.name            field lookup
//! items[0]             array index
//! items[-]             last element
//! items[].name         the name of every element
//! groups[].users[].id  nested iteration keeps the nesting
//! ```

pub mod binder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod error;
pub mod executor;
pub mod lexer;
mod macros;
pub mod token;
pub mod value;

pub use binder::{BindOptions, Binder, FieldKind, FieldSpec, Record, bind, bind_value};
pub use convert::parse_json;
pub use error::{BindError, ErrorKind, LookupFailure, QueryError, SyntaxError};
pub use executor::{execute, query, query_json};
pub use lexer::{Lexer, Path, tokenize};
pub use token::Token;
pub use value::Value;
