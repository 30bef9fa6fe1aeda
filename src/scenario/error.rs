use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid scenario file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Scenario '{scenario}': unknown field '{field}'")]
    UnknownField { scenario: String, field: String },
    #[error("Scenario '{scenario}': field '{field}' must be a string or number, found {kind}")]
    UnsupportedValue {
        scenario: String,
        field: String,
        kind: &'static str,
    },
    #[error("Duplicate scenario name '{0}'")]
    DuplicateName(String),
}
