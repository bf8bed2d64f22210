// riwayat/src/helpers/fixture_helper.rs
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture must be a JSON array of records")]
    NotAList,
}

/// Load a mock collection from a JSON file holding an array of records.
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<Value>, FixtureError> {
    let raw = fs::read_to_string(path.as_ref())?;
    parse_fixture(&raw)
}

pub fn parse_fixture(raw: &str) -> Result<Vec<Value>, FixtureError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => {
            log::debug!("Loaded fixture with {} records", items.len());
            Ok(items)
        }
        _ => Err(FixtureError::NotAList),
    }
}
