//! Path execution over a [`Value`] tree.
//!
//! Steps are applied strictly left to right. The document is only ever
//! borrowed: plain lookups narrow to a descendant, and iteration builds a
//! fresh array from the per-element results.

use std::borrow::Cow;

use log::trace;

use crate::{
    convert::parse_json,
    error::{LookupFailure, QueryError},
    lexer::Path,
    token::Token,
    value::Value,
};

/// Extracts the value at `path` from `root`.
///
/// # Examples
///
/// ```
/// use rjson::{query, Value};
///
/// let doc = Value::from(serde_json::json!({"items": [{"name": "a"}, {"name": "b"}]}));
///
/// let names = query(&doc, "items[].name").unwrap();
/// assert_eq!(
///     names,
///     Value::Array(vec![Value::String("a".into()), Value::String("b".into())])
/// );
/// ```
pub fn query(root: &Value, path: &str) -> Result<Value, QueryError> {
    let path = Path::parse(path)?;
    execute(root, &path)
}

/// Parses `data` as JSON and extracts the value at `path`.
pub fn query_json(data: &[u8], path: &str) -> Result<Value, QueryError> {
    let path = Path::parse(path)?;
    let root = parse_json(data).map_err(|e| QueryError::InvalidJson(e.to_string()))?;
    execute(&root, &path)
}

/// Runs an already tokenized path against `root`.
pub fn execute(root: &Value, path: &Path) -> Result<Value, QueryError> {
    trace!("executing {} with {} iteration levels", path, path.iterator_count());
    let mut cursor = Cursor::new(root);
    for token in path.tokens() {
        cursor.step(token)?;
    }
    Ok(cursor.current.into_owned())
}

/// Position of an in-flight execution.
struct Cursor<'a> {
    current: Cow<'a, Value>,
    /// Iteration levels opened so far.
    level: usize,
}

enum Step<'t> {
    Field(&'t str),
    Index(usize),
    Last,
}

impl<'a> Cursor<'a> {
    fn new(root: &'a Value) -> Self {
        Cursor {
            current: Cow::Borrowed(root),
            level: 0,
        }
    }

    fn step(&mut self, token: &Token) -> Result<(), QueryError> {
        trace!(
            "step {} at iteration level {} on {}",
            token,
            self.level,
            self.current.type_name()
        );

        match token {
            Token::Iterator => self.level += 1,
            Token::Literal(name) if self.level > 0 => {
                let mapped = map_field(&self.current, name, self.level)?;
                self.current = Cow::Owned(mapped);
            }
            Token::Literal(name) => self.narrow(Step::Field(name))?,
            Token::Index(i) => self.narrow(Step::Index(*i))?,
            Token::Last => self.narrow(Step::Last)?,
        }
        Ok(())
    }

    fn narrow(&mut self, step: Step<'_>) -> Result<(), QueryError> {
        self.current = match &self.current {
            Cow::Borrowed(value) => Cow::Borrowed(select(*value, &step)?),
            Cow::Owned(value) => Cow::Owned(select(value, &step)?.clone()),
        };
        Ok(())
    }
}

fn select<'v>(value: &'v Value, step: &Step<'_>) -> Result<&'v Value, QueryError> {
    match step {
        Step::Field(name) => lookup(value, name),
        Step::Index(i) => value
            .as_array()
            .and_then(|items| items.get(*i))
            .ok_or(QueryError::InvalidIndex(*i)),
        Step::Last => match value {
            Value::Array(items) => items.last().ok_or(QueryError::NoLastElement {
                found: "empty array",
            }),
            other => Err(QueryError::NoLastElement {
                found: other.type_name(),
            }),
        },
    }
}

fn lookup<'v>(value: &'v Value, name: &str) -> Result<&'v Value, QueryError> {
    match value {
        Value::Object(map) => map
            .get(name)
            .ok_or_else(|| QueryError::field_not_found(name, LookupFailure::Missing)),
        other => Err(QueryError::field_not_found(
            name,
            LookupFailure::NotAnObject {
                found: other.type_name(),
            },
        )),
    }
}

/// Looks up `name` in every element `depth` array layers down, keeping the
/// nesting of the input.
fn map_field(value: &Value, name: &str, depth: usize) -> Result<Value, QueryError> {
    let Value::Array(items) = value else {
        return Err(QueryError::field_not_found(
            name,
            LookupFailure::NotAnArray {
                found: value.type_name(),
            },
        ));
    };

    items
        .iter()
        .map(|item| {
            if depth > 1 {
                map_field(item, name, depth - 1)
            } else {
                lookup(item, name).cloned()
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
