//! Typed binding of JSON into records.
//!
//! A [`Record`] lists its annotated fields once, as a table of
//! [`FieldSpec`]s. The [`Binder`] walks that table, runs each field's path
//! through the executor and hands the result to the field's setter:
//!
//! - plain fields decode the extracted value with serde,
//! - record fields recurse with the field path as prefix, so the nested
//!   record keeps resolving against the original document,
//! - record-array fields bind every element of the extracted array as a
//!   document of its own.
//!
//! Missing data under a nested record or record array leaves that field
//! untouched; missing data for a plain field aborts the bind.

use std::fmt;

use log::{debug, trace};
use serde::de::DeserializeOwned;

use crate::{
    convert::parse_json,
    error::BindError,
    executor::query,
    lexer::DIVIDER,
    value::Value,
};

/// A type whose fields can be populated from path annotations.
///
/// Usually implemented through the [`record!`](crate::record) macro.
pub trait Record: Default + 'static {
    fn fields() -> &'static [FieldSpec<Self>];
}

/// How a field is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Decoded directly from the extracted value
    Value,
    /// A nested record resolved relative to the field path
    Record,
    /// An array of records, each bound against its own element
    Records,
}

type DecodeFn<R> = Box<dyn Fn(&mut R, Value) -> Result<(), serde_json::Error> + Send + Sync>;
type NestedFn<R> =
    Box<dyn Fn(&Binder, &mut R, &Value, &str) -> Result<(), BindError> + Send + Sync>;
type ElementsFn<R> =
    Box<dyn Fn(&Binder, &mut R, Vec<Value>) -> Result<(), BindError> + Send + Sync>;

enum Slot<R> {
    Value(DecodeFn<R>),
    Record(NestedFn<R>),
    Records(ElementsFn<R>),
}

/// One annotated field of a record: its name, its path and how to set it.
pub struct FieldSpec<R> {
    name: &'static str,
    path: &'static str,
    slot: Slot<R>,
}

impl<R: Record> FieldSpec<R> {
    /// A field decoded from the extracted value with serde.
    pub fn value<T: DeserializeOwned + 'static>(
        name: &'static str,
        path: &'static str,
        set: fn(&mut R, T),
    ) -> Self {
        let apply = move |record: &mut R, value: Value| -> Result<(), serde_json::Error> {
            set(record, decode(value)?);
            Ok(())
        };
        FieldSpec {
            name,
            path,
            slot: Slot::Value(Box::new(apply)),
        }
    }

    /// A numeric field. Besides plain numbers it accepts numbers written as
    /// JSON strings, e.g. `"42"`, also inside arrays (`["1", "2"]`).
    pub fn number<T: DeserializeOwned + 'static>(
        name: &'static str,
        path: &'static str,
        set: fn(&mut R, T),
    ) -> Self {
        let apply = move |record: &mut R, value: Value| -> Result<(), serde_json::Error> {
            set(record, decode(unquote(value)?)?);
            Ok(())
        };
        FieldSpec {
            name,
            path,
            slot: Slot::Value(Box::new(apply)),
        }
    }

    /// A nested record. Its own annotations are appended to `path`.
    pub fn record<T: Record>(name: &'static str, path: &'static str, set: fn(&mut R, T)) -> Self {
        let bind = move |binder: &Binder,
                         record: &mut R,
                         root: &Value,
                         prefix: &str|
              -> Result<(), BindError> {
            let mut nested = T::default();
            binder.bind_fields(root, &mut nested, prefix)?;
            set(record, nested);
            Ok(())
        };
        FieldSpec {
            name,
            path,
            slot: Slot::Record(Box::new(bind)),
        }
    }

    /// An array of records. `path` must select an array; every element is
    /// bound as a document of its own.
    pub fn records<T: Record>(
        name: &'static str,
        path: &'static str,
        set: fn(&mut R, Vec<T>),
    ) -> Self {
        let bind = move |binder: &Binder,
                         record: &mut R,
                         items: Vec<Value>|
              -> Result<(), BindError> {
            let mut elements = Vec::with_capacity(items.len());
            for item in &items {
                let mut element = T::default();
                binder.bind_fields(item, &mut element, "")?;
                elements.push(element);
            }
            set(record, elements);
            Ok(())
        };
        FieldSpec {
            name,
            path,
            slot: Slot::Records(Box::new(bind)),
        }
    }
}

impl<R> FieldSpec<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn kind(&self) -> FieldKind {
        match self.slot {
            Slot::Value(_) => FieldKind::Value,
            Slot::Record(_) => FieldKind::Record,
            Slot::Records(_) => FieldKind::Records,
        }
    }
}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("kind", &self.kind())
            .finish()
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::from(value))
}

/// Reads strings as the JSON they contain, descending into arrays.
fn unquote(value: Value) -> Result<Value, serde_json::Error> {
    match value {
        Value::String(text) => serde_json::from_str(&text),
        Value::Array(items) => items
            .into_iter()
            .map(unquote)
            .collect::<Result<_, _>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

/// Joins a field path onto the path of the record that contains it.
fn compose(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}{}{}", prefix, DIVIDER, path),
    }
}

/// Settings for [`Binder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Also leave plain fields untouched when their path finds nothing,
    /// instead of failing the bind.
    pub tolerate_missing_scalars: bool,
}

/// Populates [`Record`]s from JSON.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BindOptions) -> Self {
        Binder { options }
    }

    pub fn options(&self) -> BindOptions {
        self.options
    }

    /// Parses `data` as JSON and binds it into `destination`.
    pub fn bind<R: Record>(&self, data: &[u8], destination: &mut R) -> Result<(), BindError> {
        let root = parse_json(data)?;
        self.bind_value(&root, destination)
    }

    /// Binds an already parsed document into `destination`.
    pub fn bind_value<R: Record>(&self, root: &Value, destination: &mut R) -> Result<(), BindError> {
        self.bind_fields(root, destination, "")
    }

    fn bind_fields<R: Record>(
        &self,
        root: &Value,
        destination: &mut R,
        prefix: &str,
    ) -> Result<(), BindError> {
        for field in R::fields() {
            let path = compose(prefix, field.path);
            trace!("binding field `{}` from '{}'", field.name, path);

            match self.bind_field(field, root, destination, &path) {
                Err(err) if err.is_missing_value() && self.tolerates(field.kind()) => {
                    debug!("leaving field `{}` unset: {}", field.name, err);
                }
                result => result?,
            }
        }
        Ok(())
    }

    fn tolerates(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Record | FieldKind::Records => true,
            FieldKind::Value => self.options.tolerate_missing_scalars,
        }
    }

    fn bind_field<R: Record>(
        &self,
        field: &FieldSpec<R>,
        root: &Value,
        destination: &mut R,
        path: &str,
    ) -> Result<(), BindError> {
        match &field.slot {
            Slot::Value(apply) => {
                let value = extract(field, root, path)?;
                apply(destination, value).map_err(|source| BindError::TypeMismatch {
                    field: field.name,
                    path: path.to_string(),
                    source,
                })
            }
            Slot::Record(bind) => bind(self, destination, root, path),
            Slot::Records(bind) => match extract(field, root, path)? {
                Value::Array(items) => bind(self, destination, items),
                other => Err(BindError::NotAnArray {
                    field: field.name,
                    path: path.to_string(),
                    found: other.type_name(),
                }),
            },
        }
    }
}

fn extract<R>(field: &FieldSpec<R>, root: &Value, path: &str) -> Result<Value, BindError> {
    query(root, path).map_err(|source| BindError::Query {
        field: field.name,
        path: path.to_string(),
        source,
    })
}

/// Parses `data` as JSON and binds it into `destination` with default options.
///
/// # Examples
///
/// ```
/// use rjson::record;
///
/// #[derive(Debug, Default)]
/// struct Release {
///     name: String,
///     downloads: u64,
/// }
///
/// record!(Release {
///     name: value "project.name",
///     downloads: number "stats.downloads",
/// });
///
/// let json = br#"{"project": {"name": "rjson"}, "stats": {"downloads": "1200"}}"#;
/// let mut release = Release::default();
/// rjson::bind(json, &mut release).unwrap();
///
/// assert_eq!(release.name, "rjson");
/// assert_eq!(release.downloads, 1200);
/// ```
pub fn bind<R: Record>(data: &[u8], destination: &mut R) -> Result<(), BindError> {
    Binder::new().bind(data, destination)
}

/// Binds an already parsed document into `destination` with default options.
pub fn bind_value<R: Record>(root: &Value, destination: &mut R) -> Result<(), BindError> {
    Binder::new().bind_value(root, destination)
}

#[test]
fn test_compose() {
    assert_eq!(compose("", "a.b"), "a.b");
    assert_eq!(compose("items[]", "name"), "items[].name");
    assert_eq!(compose("one", ""), "one");
}
