/// Implements [`Record`](crate::Record) for a struct from a list of
/// `field: kind "path"` annotations.
///
/// `kind` is one of the [`FieldSpec`](crate::FieldSpec) constructors:
///
/// - `value` decodes the extracted value into the field type with serde,
/// - `number` does the same but also accepts numbers written as strings,
/// - `record` binds a nested record whose paths are relative to `path`,
/// - `records` binds a `Vec` of records, one per element of the array at `path`.
///
/// Fields that are not listed keep whatever value they had.
///
/// # Examples
///
/// ```
/// use rjson::record;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Author {
///     name: String,
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Post {
///     title: String,
///     author: Author,
///     tags: Vec<String>,
/// }
///
/// record!(Author { name: value "name" });
/// record!(Post {
///     title: value "post.title",
///     author: record "post.author",
///     tags: value "post.tags[].label",
/// });
///
/// let json = br#"{"post": {
///     "title": "Hello",
///     "author": {"name": "Ada"},
///     "tags": [{"label": "intro"}, {"label": "rust"}]
/// }}"#;
///
/// let mut post = Post::default();
/// rjson::bind(json, &mut post).unwrap();
///
/// assert_eq!(post.title, "Hello");
/// assert_eq!(post.author.name, "Ada");
/// assert_eq!(post.tags, vec!["intro", "rust"]);
/// ```
#[macro_export]
macro_rules! record {
    ($record:ty { $($field:ident : $kind:ident $path:literal),* $(,)? }) => {
        impl $crate::Record for $record {
            fn fields() -> &'static [$crate::FieldSpec<Self>] {
                static FIELDS: ::std::sync::OnceLock<::std::vec::Vec<$crate::FieldSpec<$record>>> =
                    ::std::sync::OnceLock::new();

                FIELDS.get_or_init(|| {
                    ::std::vec![
                        $(
                            $crate::FieldSpec::$kind(
                                ::std::stringify!($field),
                                $path,
                                |record: &mut $record, value| record.$field = value,
                            ),
                        )*
                    ]
                })
            }
        }
    };
}
