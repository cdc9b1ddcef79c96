use std::fs;

use rjson::cli::{CliError, QueryOptions, QueryOutcome, execute_query, load_json_file};
use rjson::{QueryError, Value};

fn run(path: &str, input: Option<&str>) -> Result<QueryOutcome, CliError> {
    let options = QueryOptions {
        path: path.to_string(),
        input: input.map(str::to_string),
        syntax_only: false,
    };
    execute_query(&options)
}

#[test]
fn test_query_success() {
    let result = run("user.name", Some(r#"{"user": {"name": "Alice"}}"#)).unwrap();
    match result {
        QueryOutcome::Success(value) => assert_eq!(value, Value::String("Alice".into())),
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn test_syntax_only() {
    let options = QueryOptions {
        path: "items[].name".to_string(),
        input: None,
        syntax_only: true,
    };
    match execute_query(&options).unwrap() {
        QueryOutcome::SyntaxValid(path) => {
            assert_eq!(path.to_string(), "items[].name");
            assert_eq!(path.iterator_count(), 1);
        }
        other => panic!("expected syntax check, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_reported_before_input() {
    let err = run("a[1", None).unwrap_err();
    assert!(matches!(err, CliError::Query(QueryError::MalformedSyntax(_))));
    assert!(err.to_string().starts_with("Query error: malformed path"));
}

#[test]
fn test_no_input() {
    let err = run("a", None).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_invalid_json_input() {
    let err = run("a", Some("{oops")).unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}

#[test]
fn test_query_error() {
    let err = run("arr[5]", Some(r#"{"arr": [10, 20, 30]}"#)).unwrap_err();
    assert!(matches!(err, CliError::Query(QueryError::InvalidIndex(5))));
    assert_eq!(err.to_string(), "Query error: invalid index 5");
}

#[test]
fn test_load_json_file() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("rjson-cli-good-{}.json", std::process::id()));
    let bad = dir.join(format!("rjson-cli-bad-{}.json", std::process::id()));
    fs::write(&good, r#"{"a": [1, 2]}"#).unwrap();
    fs::write(&bad, "{not json").unwrap();

    let data = load_json_file(&good).unwrap();
    assert_eq!(data, r#"{"a": [1, 2]}"#);
    assert!(matches!(load_json_file(&bad), Err(CliError::Json(_))));

    fs::remove_file(&good).unwrap();
    fs::remove_file(&bad).unwrap();
}

#[test]
fn test_load_missing_file() {
    let missing = std::env::temp_dir().join("rjson-cli-does-not-exist.json");
    let err = load_json_file(&missing).unwrap_err();
    assert!(matches!(err, CliError::ReadFile { .. }));
    assert!(err.to_string().starts_with("Failed to read file"));
}
