//! Error types for tag-extractor-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while extracting tags.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A required path was not supplied. Raised before touching the filesystem.
    #[error("missing {field}: please specify a path")]
    MissingInput {
        /// Which input was empty (e.g. "input file").
        field: &'static str,
    },

    /// A file could not be opened, read, or written.
    #[error("error processing {path}: {source}")]
    Io {
        /// The file being accessed.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// The oversized file.
        path: Utf8PathBuf,
        /// Actual file size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`ExtractError`].
pub type ExtractResult<T> = Result<T, ExtractError>;
