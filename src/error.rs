// src/error.rs
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectError {
    /// An input could not be opened/read, or the output could not be created/written.
    #[error("cannot access {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required column is absent from a header row.
    #[error("{path:?} is missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("malformed CSV in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The records could not be represented as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl InjectError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InjectError>;
