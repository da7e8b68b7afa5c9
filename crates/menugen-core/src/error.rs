//! Error types for asset access and regeneration passes

use crate::store::{AssetKind, AssetPath};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an [`AssetStore`](crate::store::AssetStore)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: AssetPath,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Asset {path} is empty")]
    Empty { path: AssetPath },

    #[error("Asset {path} is not a {expected} asset")]
    WrongKind { path: AssetPath, expected: AssetKind },

    #[error("Parent folder {parent} does not exist")]
    MissingParent { parent: AssetPath },

    #[error("Asset not found: {path}")]
    NotFound { path: AssetPath },
}

/// A generated module (or its template folder) that could not be written
#[derive(Debug)]
pub struct WriteFailure {
    pub path: AssetPath,
    pub source: StoreError,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.source)
    }
}

/// Errors surfaced by a regeneration pass
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Some modules were not written; `refresh` holds a failed final refresh
    #[error("Failed to write {} generated module(s): {}", failures.len(), describe_failures(failures, refresh.as_ref()))]
    WriteFailed {
        failures: Vec<WriteFailure>,
        refresh: Option<StoreError>,
    },
}

fn describe_failures(failures: &[WriteFailure], refresh: Option<&StoreError>) -> String {
    let joined = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    match refresh {
        Some(e) => format!("{joined}; refresh also failed: {e}"),
        None => joined,
    }
}
