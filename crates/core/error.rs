//! Error types for roadindex.

use roadindex_types::entry::IndexKey;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RoadIndexError>;

#[derive(Debug, Error)]
pub enum RoadIndexError {
    /// A feature's geometry holds a coordinate that is not a finite
    /// `[lng, lat, ...]` position. Aborts index construction.
    #[error("malformed geometry in feature #{feature} {key}: {reason}")]
    MalformedGeometry {
        key: IndexKey,
        /// Zero-based position of the feature in the input stream
        feature: u64,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RoadIndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// The offending key, for errors that can name one.
    pub fn key(&self) -> Option<&IndexKey> {
        match self {
            Self::MalformedGeometry { key, .. } => Some(key),
            _ => None,
        }
    }
}
