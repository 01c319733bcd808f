//! Writer lifecycle tracing: open, flush, close.
//!
//! Events go to the `appendlog::io` target at debug level. Every function has
//! a no-op twin when the `tracing` feature is disabled, so call sites stay
//! unconditional.

use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::error::WriterError;
use crate::mode::OpenMode;

/// Trace the sink being opened.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_open(path: &Path, mode: OpenMode) {
    debug!(
        target: "appendlog::io",
        operation = "open",
        path = %path.display(),
        mode = %mode,
        "open {} ({})",
        path.display(),
        mode
    );
}

/// Trace the sink being opened - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_open(_path: &Path, _mode: OpenMode) {}

/// Trace a buffer handed to the sink.
///
/// # Arguments
///
/// * `buffered` - Bytes taken from the accumulation buffer
/// * `written` - Bytes handed to the sink after encoding
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_flush(path: &Path, buffered: usize, written: usize) {
    debug!(
        target: "appendlog::io",
        operation = "flush",
        path = %path.display(),
        buffered = buffered,
        written = written,
        "flush {} ({} buffered, {} written)",
        path.display(),
        buffered,
        written
    );
}

/// Trace a buffer handed to the sink - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_flush(_path: &Path, _buffered: usize, _written: usize) {}

/// Trace the sink being released.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_close(path: &Path) {
    debug!(
        target: "appendlog::io",
        operation = "close",
        path = %path.display(),
        "close {}",
        path.display()
    );
}

/// Trace the sink being released - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_close(_path: &Path) {}

/// Report a close that failed while dropping a writer nobody closed.
///
/// Drop has no caller to return the error to, so this is the one place the
/// crate reports an error itself.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_drop_failure(err: &WriterError) {
    warn!(
        target: "appendlog::io",
        operation = "drop",
        path = %err.path().display(),
        error = %err,
        "writer dropped without close: {}",
        err
    );
}

/// Report a failed close on drop - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_drop_failure(_err: &WriterError) {}
