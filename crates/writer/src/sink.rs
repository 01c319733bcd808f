//! The boundary between a writer and its backing destination.
//!
//! A [`SinkOpener`] turns a target path and an [`OpenMode`] into a [`Sink`].
//! Writers call the opener at most once and own the resulting sink
//! exclusively until they close.
//!
//! Two backends ship with the crate: [`FileOpener`], which opens a regular
//! file behind a [`BufWriter`], and [`MemoryOpener`], which keeps the content
//! in a shared in-process buffer.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::mode::{OpenFlags, OpenMode};

/// Default permission bits for files created by [`FileOpener`].
pub const DEFAULT_PERMISSIONS: u32 = 0o644;

/// Default capacity of the [`BufWriter`] adapter wrapped around files.
pub const DEFAULT_ADAPTER_CAPACITY: usize = 8 * 1024;

/// An opened destination for flushed bytes.
///
/// # Contract
///
/// When [`flush`](Self::flush) fails, the sink keeps every byte it has not
/// delivered yet and retries them on the next `flush` or `close`. Writers rely
/// on this to clear their own buffer as soon as `write_all` succeeds without
/// losing data.
pub trait Sink: Send + Sync {
    /// Accepts `data` in full or fails without a partial commitment the writer
    /// could observe.
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Pushes accepted bytes down to the destination.
    fn flush(&mut self) -> io::Result<()>;

    /// Delivers any pending bytes and releases the destination.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Opens sinks for a writer.
pub trait SinkOpener: Send + Sync {
    /// Opens `target` with `mode`.
    fn open(&self, target: &Path, mode: OpenMode) -> io::Result<Box<dyn Sink>>;
}

/// Opens regular files wrapped in a [`BufWriter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FileOpener {
    permissions: u32,
}

impl FileOpener {
    /// Creates an opener with [`DEFAULT_PERMISSIONS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            permissions: DEFAULT_PERMISSIONS,
        }
    }

    /// Sets the permission bits applied to newly created files.
    #[must_use]
    pub const fn with_permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    /// Returns the permission bits applied to newly created files.
    #[must_use]
    pub const fn permissions(&self) -> u32 {
        self.permissions
    }
}

impl Default for FileOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkOpener for FileOpener {
    fn open(&self, target: &Path, mode: OpenMode) -> io::Result<Box<dyn Sink>> {
        let file = mode.open_options(self.permissions).open(target)?;
        Ok(Box::new(FileSink {
            writer: BufWriter::with_capacity(DEFAULT_ADAPTER_CAPACITY, file),
        }))
    }
}

/// A file behind a buffered adapter.
///
/// [`BufWriter`] keeps unwritten bytes when its flush fails, which satisfies
/// the [`Sink`] retry contract.
#[derive(Debug)]
struct FileSink {
    writer: BufWriter<File>,
}

impl Sink for FileSink {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_data()
    }
}

/// Opens sinks over a shared in-memory buffer.
///
/// Clones share the same buffer, so a test or caller can keep one clone and
/// read what a writer flushed through another. Open flags behave like their
/// file counterparts: the target "exists" once it has been opened or seeded.
#[derive(Clone, Default)]
pub struct MemoryOpener {
    contents: Arc<Mutex<Vec<u8>>>,
    exists: Arc<AtomicBool>,
}

impl MemoryOpener {
    /// Creates an opener over an empty, not yet existing buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an opener whose target already exists with `contents`.
    #[must_use]
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(contents.into())),
            exists: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns a copy of everything delivered so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        lock(&self.contents).map(|buf| buf.clone()).unwrap_or_default()
    }

    /// Returns whether the target exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists.load(Ordering::Acquire)
    }
}

impl fmt::Debug for MemoryOpener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryOpener")
            .field("len", &self.contents().len())
            .field("exists", &self.exists())
            .finish()
    }
}

impl SinkOpener for MemoryOpener {
    fn open(&self, target: &Path, mode: OpenMode) -> io::Result<Box<dyn Sink>> {
        let flags = mode.flags();
        let existed = self.exists.load(Ordering::Acquire);

        if existed && flags.contains(OpenFlags::EXCLUSIVE) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", target.display()),
            ));
        }
        if !existed && !flags.contains(OpenFlags::CREATE) && !flags.contains(OpenFlags::EXCLUSIVE) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", target.display()),
            ));
        }

        let mut contents = lock(&self.contents)?;
        if flags.contains(OpenFlags::TRUNCATE) {
            contents.clear();
        }
        drop(contents);
        self.exists.store(true, Ordering::Release);

        Ok(Box::new(MemorySink {
            contents: Arc::clone(&self.contents),
            position: 0,
            append: flags.contains(OpenFlags::APPEND),
        }))
    }
}

/// Unbuffered sink over a [`MemoryOpener`] buffer.
#[derive(Debug)]
struct MemorySink {
    contents: Arc<Mutex<Vec<u8>>>,
    position: usize,
    append: bool,
}

impl Sink for MemorySink {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let mut contents = lock(&self.contents)?;
        if self.append {
            self.position = contents.len();
        }

        let end = self.position + data.len();
        if end > contents.len() {
            contents.resize(end, 0);
        }
        contents[self.position..end].copy_from_slice(data);
        self.position = end;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

fn lock(contents: &Mutex<Vec<u8>>) -> io::Result<MutexGuard<'_, Vec<u8>>> {
    contents
        .lock()
        .map_err(|_| io::Error::other("memory sink lock poisoned"))
}
