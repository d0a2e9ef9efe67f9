//! Tests for the JSON record source

use std::path::PathBuf;

use tempfile::TempDir;

use orgchart::domain::build;
use orgchart::infrastructure::source::{decode_records, JsonFileSource};
use orgchart::infrastructure::traits::RecordSource;
use orgchart::infrastructure::InfraError;
use orgchart::util::testing::init_test_setup;

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

#[test]
fn given_graphql_response_when_fetching_then_builds_chart() {
    // Arrange
    init_test_setup();
    let source = JsonFileSource::new(resource("org_tiers.json"));

    // Act
    let records = source.fetch().unwrap();
    let tree = build(&records).unwrap();

    // Assert
    assert_eq!(records.len(), 5);
    let root = tree.root_node();
    assert_eq!(root.id, "a1");
    assert_eq!(root.display_name, "Theresa Tam");
    assert_eq!(root.titles, vec!["President".to_string()]);
    let science = tree.find("b1").unwrap();
    assert_eq!(science.accounts.len(), 2);
    assert!(tree.find("b2").unwrap().is_account());
}

#[test]
fn given_native_records_when_fetching_then_keeps_order_and_fields() {
    let records = JsonFileSource::new(resource("records.json")).fetch().unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(records[1].owner.titles, vec!["COO".to_string()]);
    assert_eq!(records[2].parent_id.as_deref(), Some("2"));
    assert_eq!(records[2].tier_level, 2);
}

#[test]
fn given_missing_file_when_fetching_then_not_found_io_error() {
    let temp = TempDir::new().unwrap();
    let source = JsonFileSource::new(temp.path().join("absent.json"));

    let err = source.fetch().unwrap_err();

    assert!(err.is_not_found());
    assert!(source.describe().ends_with("absent.json"));
}

#[test]
fn given_invalid_json_when_fetching_then_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "[{\"id\": ").unwrap();

    let err = JsonFileSource::new(&path).fetch().unwrap_err();

    assert!(matches!(err, InfraError::Decode { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn given_record_without_owner_when_decoding_then_errors() {
    assert!(decode_records(r#"[{"id": "1"}]"#).is_err());
}

#[test]
fn given_empty_array_when_decoding_then_no_records() {
    assert!(decode_records("[]").unwrap().is_empty());
}
