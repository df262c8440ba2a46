//! Error types for npm-locate.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for fetch, build and query operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File system failure (directory creation, open, write, rename).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The registry request or its body stream failed.
    #[error("network error: {0}")]
    Network(#[from] Box<ureq::Error>),

    /// The source document is not a JSON object.
    #[error("malformed source document {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The compacted index has not been built yet.
    #[error("index not found at {}", .0.display())]
    IndexNotFound(PathBuf),
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::Network(_) => ErrorKind::Io,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::IndexNotFound(_) => ErrorKind::NotFound,
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Network(Box::new(err))
    }
}

/// Result type for npm-locate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to a bare `io::Result`.
pub(crate) trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
