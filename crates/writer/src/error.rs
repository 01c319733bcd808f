//! Error types for append writer operations.

use std::io;
use std::path::{Path, PathBuf};

use crate::mode::OpenMode;

/// Error type for [`AppendWriter`](crate::AppendWriter) operations.
///
/// Every variant names the target it concerns; the variant itself identifies
/// the operation that failed.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// The sink could not be opened while constructing an eager writer.
    #[error("failed to initialize {}: open with mode {mode} failed: {source}", path.display())]
    Construction {
        /// The target that failed to open.
        path: PathBuf,
        /// The mode the open was attempted with.
        mode: OpenMode,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The deferred open on first write failed.
    #[error("failed to open {} with mode {mode}: {source}", path.display())]
    Initialization {
        /// The target that failed to open.
        path: PathBuf,
        /// The mode the open was attempted with.
        mode: OpenMode,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A write was attempted after the writer was closed.
    #[error("{} is closed", .0.display())]
    Closed(PathBuf),

    /// The encoder rejected the buffered bytes. The buffer is left untouched.
    #[error("failed to encode buffered data for {}: {source}", path.display())]
    Encode {
        /// The target whose buffer failed to encode.
        path: PathBuf,
        /// The error reported by the encoder.
        #[source]
        source: io::Error,
    },

    /// The sink refused the flushed bytes. The buffer is left untouched.
    #[error("failed to write to {}: {source}", path.display())]
    Write {
        /// The target being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The sink accepted the bytes but could not push them further down.
    #[error("failed to flush {}: {source}", path.display())]
    Flush {
        /// The target being flushed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Releasing the sink failed. The writer is closed regardless.
    #[error("failed to close {}: {source}", path.display())]
    Close {
        /// The target being closed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl WriterError {
    /// Returns the target the error concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Construction { path, .. }
            | Self::Initialization { path, .. }
            | Self::Encode { path, .. }
            | Self::Write { path, .. }
            | Self::Flush { path, .. }
            | Self::Close { path, .. } => path,
            Self::Closed(path) => path,
        }
    }

    /// Returns the underlying I/O error, if any.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Construction { source, .. }
            | Self::Initialization { source, .. }
            | Self::Encode { source, .. }
            | Self::Write { source, .. }
            | Self::Flush { source, .. }
            | Self::Close { source, .. } => Some(source),
            Self::Closed(_) => None,
        }
    }

    /// Reports whether this error came from a write after close.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    pub(crate) fn into_construction(self) -> Self {
        match self {
            Self::Initialization { path, mode, source } => {
                Self::Construction { path, mode, source }
            }
            other => other,
        }
    }
}

impl From<WriterError> for io::Error {
    fn from(err: WriterError) -> Self {
        let kind = err
            .io_error()
            .map_or(io::ErrorKind::BrokenPipe, io::Error::kind);
        Self::new(kind, err)
    }
}

/// Extension trait attaching target context to I/O results.
pub(crate) trait IoResultExt<T> {
    /// Maps the error with `wrap`, cloning `path` into it.
    fn with_target(
        self,
        path: &Path,
        wrap: fn(PathBuf, io::Error) -> WriterError,
    ) -> Result<T, WriterError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_target(
        self,
        path: &Path,
        wrap: fn(PathBuf, io::Error) -> WriterError,
    ) -> Result<T, WriterError> {
        self.map_err(|source| wrap(path.to_path_buf(), source))
    }
}

pub(crate) fn encode_error(path: PathBuf, source: io::Error) -> WriterError {
    WriterError::Encode { path, source }
}

pub(crate) fn write_error(path: PathBuf, source: io::Error) -> WriterError {
    WriterError::Write { path, source }
}

pub(crate) fn flush_error(path: PathBuf, source: io::Error) -> WriterError {
    WriterError::Flush { path, source }
}

pub(crate) fn close_error(path: PathBuf, source: io::Error) -> WriterError {
    WriterError::Close { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn display_names_target_and_operation() {
        let err = WriterError::Initialization {
            path: PathBuf::from("/var/log/app.log"),
            mode: OpenMode::Append,
            source: denied(),
        };
        let display = err.to_string();
        assert!(display.contains("/var/log/app.log"));
        assert!(display.contains("append"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn closed_error_has_no_io_source() {
        let err = WriterError::Closed(PathBuf::from("/tmp/out"));
        assert!(err.is_closed());
        assert!(err.io_error().is_none());
        assert_eq!(err.to_string(), "/tmp/out is closed");
    }

    #[test]
    fn construction_wraps_initialization() {
        let err = WriterError::Initialization {
            path: PathBuf::from("x"),
            mode: OpenMode::Create,
            source: denied(),
        }
        .into_construction();
        assert!(matches!(err, WriterError::Construction { .. }));
        assert!(err.to_string().starts_with("failed to initialize x"));
    }

    #[test]
    fn io_conversion_preserves_kind() {
        let io: io::Error = flush_error(PathBuf::from("f"), denied()).into();
        assert_eq!(io.kind(), io::ErrorKind::PermissionDenied);

        let closed: io::Error = WriterError::Closed(PathBuf::from("f")).into();
        assert_eq!(closed.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn with_target_attaches_path() {
        let result: io::Result<()> = Err(denied());
        let err = result
            .with_target(Path::new("/data/out"), write_error)
            .expect_err("mapped");
        assert_eq!(err.path(), Path::new("/data/out"));
        assert!(matches!(err, WriterError::Write { .. }));
    }
}
