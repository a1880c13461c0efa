//! Error taxonomy for the query engine
//!
//! Every core operation returns [`Result`]. A query that matches nothing is a
//! success with an empty outcome, never an error.

use std::io;
use std::path::PathBuf;

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the query engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Open, map or read failure on one of the backing files
    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" on {}", p.display())).unwrap_or_default())]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Malformed, negative or out-of-bounds range or document ID
    #[error("invalid range: {reason}")]
    InvalidRange { reason: String },

    /// An indexing-time invariant does not hold for the files on disk
    #[error("corrupt corpus: {reason}")]
    CorruptCorpus { reason: String },
}

/// Coarse classification for adapters mapping errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    InvalidRange,
    CorruptCorpus,
}

impl Error {
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: Some(path.into()),
            source,
        }
    }

    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Error::InvalidRange {
            reason: reason.into(),
        }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptCorpus {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::InvalidRange { .. } => ErrorKind::InvalidRange,
            Error::CorruptCorpus { .. } => ErrorKind::CorruptCorpus,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Io { path: None, source }
    }
}
