use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the dashboard's launch context.
///
/// All of them are fatal at startup: the dashboard never serves a partially
/// loaded table.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("failed to load dataset {path}: {reason}")]
    DatasetLoadFailure { path: PathBuf, reason: String },

    #[error("row {row}: malformed payload mass '{value}'")]
    MalformedPayloadValue { row: usize, value: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashError {
    pub(crate) fn load(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        DashError::DatasetLoadFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
