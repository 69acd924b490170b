//! Validates error rendering and source chains for map persistence

use std::error::Error;
use std::path::PathBuf;
use tileweave::io::error::{MapError, Result};

fn malformed_json_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{ not json")
        .expect_err("fixture input must not parse")
}

#[test]
fn test_filesystem_error_names_path_and_operation() {
    let error = MapError::FileSystem {
        path: PathBuf::from("maps/dungeon.json"),
        operation: "open",
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let rendered = error.to_string();
    assert!(rendered.contains("maps/dungeon.json"));
    assert!(rendered.contains("open"));
}

#[test]
fn test_serialization_error_names_the_document() {
    let error = MapError::Serialization {
        path: PathBuf::from("maps/overworld.json"),
        source: malformed_json_error(),
    };
    assert!(error.to_string().contains("maps/overworld.json"));
}

#[test]
fn test_source_chain_exposes_the_underlying_error() {
    let filesystem = MapError::FileSystem {
        path: PathBuf::from("a.json"),
        operation: "create",
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(filesystem.source().is_some());

    let serialization = MapError::Serialization {
        path: PathBuf::from("b.json"),
        source: malformed_json_error(),
    };
    assert!(serialization.source().is_some());
}

#[test]
fn test_result_alias_carries_map_errors() {
    let failure: Result<()> = Err(MapError::FileSystem {
        path: PathBuf::from("c.json"),
        operation: "open",
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    });
    assert!(failure.is_err());
}
