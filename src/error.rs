//! Error types for schema loading and flattening.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading a schema document, before any flattening happens.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors during schema flattening.
///
/// Every variant except `Load` carries the flattened path (e.g. `root/pet/owner`)
/// of the node where the walk stopped. Any of them aborts the whole flatten.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("schema structure error at {path}: missing \"{missing_keyword}\"")]
    SchemaStructure {
        path: String,
        missing_keyword: String,
    },

    #[error("invalid \"{keyword}\" at {path}: got {actual}")]
    InvalidKeywordType {
        path: String,
        keyword: String,
        actual: String,
    },

    #[error("unresolved reference \"{pointer}\" at {path}")]
    UnresolvedReference { path: String, pointer: String },

    #[error("cyclic reference at {path}: {}", chain.join(" -> "))]
    CyclicReference { path: String, chain: Vec<String> },

    #[error("path {path} not found in schema: no property \"{segment}\"")]
    PathNotFound { path: String, segment: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

impl FlattenError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlattenError::Load(e) => e.exit_code(),
            _ => 2,
        }
    }

    /// Path within the flattened namespace where the error was raised, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            FlattenError::Load(_) | FlattenError::InvalidSchema { .. } => None,
            FlattenError::SchemaStructure { path, .. }
            | FlattenError::InvalidKeywordType { path, .. }
            | FlattenError::UnresolvedReference { path, .. }
            | FlattenError::CyclicReference { path, .. }
            | FlattenError::PathNotFound { path, .. } => Some(path.as_str()),
        }
    }
}
