//! Error types for copy operations.
//!
//! Every failure aborts the whole operation, so errors carry enough context
//! (path and failing operation) for the caller to present a useful message:
//! - InvalidSource: the source is neither a regular file nor a directory
//! - InvalidDestination: the destination folder cannot receive the copy
//! - Io: a read, write, open, walk, or directory creation failed

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Broad category of a [`CopyError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyErrorKind {
    InvalidSource,
    InvalidDestination,
    Io,
}

/// A failed copy. The first error encountered aborts the operation; nothing
/// already written is rolled back.
#[derive(Debug)]
pub enum CopyError {
    /// Source is missing, unreadable, a special file, or a dangling link.
    InvalidSource { path: PathBuf },
    /// Destination folder is missing, not a directory, or otherwise unusable.
    InvalidDestination { path: PathBuf, reason: String },
    /// An I/O call failed while transferring data or creating directories.
    Io {
        path: PathBuf,
        op: &'static str,
        source: io::Error,
    },
}

impl CopyError {
    pub fn invalid_source(path: impl Into<PathBuf>) -> Self {
        Self::InvalidSource { path: path.into() }
    }

    pub fn invalid_destination(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDestination {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            op,
            source,
        }
    }

    pub fn kind(&self) -> CopyErrorKind {
        match self {
            Self::InvalidSource { .. } => CopyErrorKind::InvalidSource,
            Self::InvalidDestination { .. } => CopyErrorKind::InvalidDestination,
            Self::Io { .. } => CopyErrorKind::Io,
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidSource { path }
            | Self::InvalidDestination { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource { path } => write!(
                f,
                "invalid source {}: not a regular file or directory",
                path.display()
            ),
            Self::InvalidDestination { path, reason } => {
                write!(f, "invalid destination {}: {}", path.display(), reason)
            }
            Self::Io { path, op, source } => write!(f, "{} {}: {}", op, path.display(), source),
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for copy operations.
pub type CopyResult<T> = std::result::Result<T, CopyError>;

/// Attach an operation name and path to a raw I/O result.
pub(crate) trait IoContext<T> {
    fn io_context(self, op: &'static str, path: &Path) -> CopyResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context(self, op: &'static str, path: &Path) -> CopyResult<T> {
        self.map_err(|err| CopyError::io(op, path, err))
    }
}
