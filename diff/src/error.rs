//! Defines [`Error`], the umbrella error type for this crate, and the
//! [`DiffResult`] alias used throughout.
//!
//! Structural differences between two schemas are never errors: the
//! comparator is a total function that records divergences in a report. The
//! error surface here covers metadata decoding, filesystem access, and the
//! one tree-building invariant (a primitive node can never own children).

use std::path::PathBuf;

/// A [`std::result::Result`] that has the parquet-diff [`Error`] as the error
/// variant.
pub type DiffResult<T, E = Error> = std::result::Result<T, E>;

/// All errors that can occur while reading parquet metadata or building
/// schema trees.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An error performing file system operations while listing or opening
    /// files.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// An error decoding a parquet footer, surfaced from the `parquet`
    /// crate.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// A child node was attached to a primitive schema node. This indicates
    /// a malformed source type tree, not a recoverable condition.
    #[error("primitive field '{0}' cannot have children")]
    PrimitiveWithChildren(String),

    /// A path handed to the reader does not exist or is not of the expected
    /// kind.
    #[error("{msg}: {path}")]
    InvalidPath { msg: String, path: PathBuf },
}

impl Error {
    pub(crate) fn invalid_path(msg: impl ToString, path: impl Into<PathBuf>) -> Self {
        Error::InvalidPath {
            msg: msg.to_string(),
            path: path.into(),
        }
    }
}
