//! The thread-safe buffered append writer.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::debug_io::{trace_close, trace_drop_failure, trace_flush, trace_open};
use crate::error::{IoResultExt, WriterError, close_error, encode_error, flush_error, write_error};
use crate::mode::OpenMode;
use crate::options::WriterOptions;
use crate::sink::{FileOpener, Sink, SinkOpener};
use crate::transform::{ByteTransform, TextTransform};


/// Where a writer is in its lifecycle.
///
/// Transitions only move forward: `Uninitialized -> Initialized -> Closed`,
/// or straight to `Closed` when a lazy writer is closed before any write.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Lifecycle {
    /// The sink has not been opened yet.
    Uninitialized,
    /// The sink is open and accepting flushes.
    Initialized,
    /// The writer has been closed; writes are rejected.
    Closed,
}

/// A buffered append writer that many threads can share.
///
/// Writes accumulate in memory and reach the sink once the buffer grows to
/// the flush threshold, or when [`sync`](Self::sync) or
/// [`close`](Self::close) is called. When encoding is enabled the whole
/// buffer passes through the encoder on its way out.
///
/// One [`RwLock`] guards all mutable state. Mutations take it exclusively;
/// observers such as [`buffer_len`](Self::buffer_len) share it.
///
/// # Examples
///
/// ```
/// use writer::{AppendWriter, MemoryOpener, WriterOptions};
///
/// # fn main() -> Result<(), writer::WriterError> {
/// let target = MemoryOpener::new();
/// let writer = AppendWriter::with_opener(
///     "memory.log",
///     WriterOptions::default().with_threshold(4),
///     target.clone(),
/// )?;
///
/// writer.write_str("ab")?;
/// assert_eq!(writer.buffer_len(), 2);
/// writer.write_str("cd")?;
/// assert_eq!(writer.buffer_len(), 0);
/// assert_eq!(target.contents(), b"abcd");
/// writer.close()?;
/// # Ok(())
/// # }
/// ```
pub struct AppendWriter {
    path: PathBuf,
    mode: OpenMode,
    opener: Arc<dyn SinkOpener>,
    state: RwLock<State>,
}

/// Everything the lock protects.
///
/// Methods here assume the caller already holds the exclusive lock and never
/// take it again.
struct State {
    lifecycle: Lifecycle,
    sink: Option<Box<dyn Sink>>,
    buffer: Vec<u8>,
    // Set while the sink holds bytes its last flush failed to deliver.
    unflushed: bool,
    threshold: usize,
    encode: bool,
    preprocessor: Arc<dyn TextTransform>,
    encoder: Arc<dyn ByteTransform>,
}

impl AppendWriter {
    /// Creates a file-backed writer with the default threshold and transforms.
    ///
    /// Unless `lazy` is set the file is opened before this returns, and a
    /// failure to open is a [`WriterError::Construction`].
    pub fn new(
        path: impl Into<PathBuf>,
        mode: OpenMode,
        encode: bool,
        lazy: bool,
    ) -> Result<Self, WriterError> {
        Self::with_options(
            path,
            WriterOptions::default()
                .with_mode(mode)
                .with_encode(encode)
                .with_lazy(lazy),
        )
    }

    /// Creates a file-backed writer from `options`.
    pub fn with_options(
        path: impl Into<PathBuf>,
        options: WriterOptions,
    ) -> Result<Self, WriterError> {
        let opener = FileOpener::new().with_permissions(options.permissions);
        Self::with_opener(path, options, opener)
    }

    /// Creates a writer whose sink comes from `opener`.
    pub fn with_opener(
        path: impl Into<PathBuf>,
        options: WriterOptions,
        opener: impl SinkOpener + 'static,
    ) -> Result<Self, WriterError> {
        let WriterOptions {
            mode,
            encode,
            lazy,
            threshold,
            permissions: _,
            preprocessor,
            encoder,
        } = options;

        let path = path.into();
        let opener: Arc<dyn SinkOpener> = Arc::new(opener);
        let mut state = State {
            lifecycle: Lifecycle::Uninitialized,
            sink: None,
            buffer: Vec::new(),
            unflushed: false,
            threshold: threshold.max(1),
            encode,
            preprocessor,
            encoder,
        };

        if !lazy {
            state
                .initialize(&path, mode, opener.as_ref())
                .map_err(WriterError::into_construction)?;
        }

        Ok(Self {
            path,
            mode,
            opener,
            state: RwLock::new(state),
        })
    }

    /// Buffers `data`, opening the sink first if this is the first write.
    ///
    /// Returns `data.len()` on success. When the write pushes the buffer to
    /// the threshold a flush runs before returning; a flush error means the
    /// bytes were accepted but are not guaranteed to be persisted.
    pub fn write(&self, data: &[u8]) -> Result<usize, WriterError> {
        let mut state = self.exclusive();
        state.append(&self.path, self.mode, self.opener.as_ref(), data)?;
        Ok(data.len())
    }

    /// Buffers the UTF-8 bytes of `text`.
    pub fn write_str(&self, text: &str) -> Result<usize, WriterError> {
        self.write(text.as_bytes())
    }

    /// Buffers `text` followed by a newline as a single write.
    pub fn write_line(&self, text: &str) -> Result<(), WriterError> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write(line.as_bytes()).map(drop)
    }

    /// Buffers `data`, discarding the byte count.
    pub fn write_bytes(&self, data: &[u8]) -> Result<(), WriterError> {
        self.write(data).map(drop)
    }

    /// Runs `text` through the preprocessor and buffers the result.
    pub fn safe_write(&self, text: &str) -> Result<(), WriterError> {
        let preprocessor = Arc::clone(&self.shared().preprocessor);
        let processed = preprocessor.transform(text);
        self.write_str(&processed).map(drop)
    }

    /// [`safe_write`](Self::safe_write) followed by [`sync`](Self::sync).
    pub fn sync_write(&self, text: &str) -> Result<(), WriterError> {
        self.safe_write(text)?;
        self.sync()
    }

    /// Flushes the buffer to the sink regardless of the threshold.
    ///
    /// Flushing an empty buffer, or a writer whose sink is not open, succeeds
    /// without touching the sink, unless an earlier sink flush failed; then
    /// the sink flush is retried and its outcome returned.
    pub fn sync(&self) -> Result<(), WriterError> {
        self.exclusive().flush(&self.path)
    }

    /// Flushes what is left and releases the sink.
    ///
    /// Closing twice is a no-op. If the final flush fails the writer stays
    /// open so the close can be retried; if releasing the sink fails the
    /// writer is closed anyway and the error is returned.
    pub fn close(&self) -> Result<(), WriterError> {
        self.exclusive().close(&self.path)
    }

    /// Returns whether the sink has been opened and the writer is not closed.
    pub fn is_initialized(&self) -> bool {
        self.shared().lifecycle == Lifecycle::Initialized
    }

    /// Returns whether the writer has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared().lifecycle == Lifecycle::Closed
    }

    /// Returns the current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared().lifecycle
    }

    /// Returns the target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the open mode.
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Returns the number of buffered bytes not yet handed to the sink.
    pub fn buffer_len(&self) -> usize {
        self.shared().buffer.len()
    }

    /// Returns the flush threshold.
    pub fn threshold(&self) -> usize {
        self.shared().threshold
    }

    /// Returns whether flushes run through the encoder.
    pub fn is_encoding(&self) -> bool {
        self.shared().encode
    }

    /// Sets the flush threshold. Zero is ignored.
    ///
    /// A lower threshold takes effect at the next write.
    pub fn set_threshold(&self, threshold: usize) {
        if threshold > 0 {
            self.exclusive().threshold = threshold;
        }
    }

    /// Replaces the preprocessor used by [`safe_write`](Self::safe_write).
    pub fn set_preprocessor(&self, preprocessor: impl TextTransform + 'static) {
        self.exclusive().preprocessor = Arc::new(preprocessor);
    }

    /// Replaces the flush-time encoder.
    pub fn set_encoder(&self, encoder: impl ByteTransform + 'static) {
        self.exclusive().encoder = Arc::new(encoder);
    }

    /// Enables or disables flush-time encoding.
    pub fn set_encoding(&self, encode: bool) {
        self.exclusive().encode = encode;
    }

    // State mutations are ordered so a panic never leaves it half-updated,
    // which makes a poisoned lock safe to reuse.
    fn shared(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn initialize(
        &mut self,
        path: &Path,
        mode: OpenMode,
        opener: &dyn SinkOpener,
    ) -> Result<(), WriterError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return Ok(());
        }

        let sink = opener
            .open(path, mode)
            .map_err(|source| WriterError::Initialization {
                path: path.to_path_buf(),
                mode,
                source,
            })?;
        trace_open(path, mode);

        self.sink = Some(sink);
        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn append(
        &mut self,
        path: &Path,
        mode: OpenMode,
        opener: &dyn SinkOpener,
        data: &[u8],
    ) -> Result<(), WriterError> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(WriterError::Closed(path.to_path_buf()));
        }
        self.initialize(path, mode, opener)?;

        self.buffer.extend_from_slice(data);
        if self.buffer.len() >= self.threshold {
            self.flush(path)?;
        }
        Ok(())
    }

    fn flush(&mut self, path: &Path) -> Result<(), WriterError> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        if !self.buffer.is_empty() {
            let encoded;
            let payload = if self.encode {
                encoded = self
                    .encoder
                    .encode(&self.buffer)
                    .with_target(path, encode_error)?;
                encoded.as_slice()
            } else {
                self.buffer.as_slice()
            };

            sink.write_all(payload).with_target(path, write_error)?;
            trace_flush(path, self.buffer.len(), payload.len());

            // The sink owns these bytes now and retries them if its flush fails.
            self.buffer.clear();
            self.unflushed = true;
        }

        if !self.unflushed {
            return Ok(());
        }
        sink.flush().with_target(path, flush_error)?;
        self.unflushed = false;
        Ok(())
    }

    fn close(&mut self, path: &Path) -> Result<(), WriterError> {
        if self.lifecycle == Lifecycle::Closed {
            return Ok(());
        }

        self.flush(path)?;

        self.lifecycle = Lifecycle::Closed;
        if let Some(sink) = self.sink.take() {
            sink.close().with_target(path, close_error)?;
            trace_close(path);
        }
        Ok(())
    }
}

impl Drop for AppendWriter {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = state.close(&self.path) {
            trace_drop_failure(&err);
        }
    }
}

impl fmt::Debug for AppendWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared();
        f.debug_struct("AppendWriter")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("lifecycle", &state.lifecycle)
            .field("buffered", &state.buffer.len())
            .field("unflushed", &state.unflushed)
            .field("threshold", &state.threshold)
            .field("encode", &state.encode)
            .finish_non_exhaustive()
    }
}

impl io::Write for &AppendWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        AppendWriter::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync().map_err(io::Error::from)
    }
}

impl io::Write for AppendWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        AppendWriter::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync().map_err(io::Error::from)
    }
}
