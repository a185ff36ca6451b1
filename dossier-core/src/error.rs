//! Error types for loading, configuration and link following.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading datafiles. All of them are fatal: a partially
/// loaded dataset is never served.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No {} database found!", path.display())]
    MissingSource { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed datafile {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The source this error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::MissingSource { path }
            | LoadError::Io { path, .. }
            | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Errors from reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from following a relation to its target record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The relation points at an id that is not in the visible set.
    #[error("Record {target} is unavailable")]
    Unavailable { target: String },
}
