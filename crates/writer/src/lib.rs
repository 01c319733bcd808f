#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `writer` implements [`AppendWriter`], a buffered writer that many threads
//! can share. Payloads accumulate in memory and reach the backing sink in
//! batches: when the buffer grows to the flush threshold, on an explicit
//! [`sync`](AppendWriter::sync), or on [`close`](AppendWriter::close).
//!
//! # Design
//!
//! - [`mode`] describes how the sink is opened ([`OpenMode`], [`OpenFlags`]).
//! - [`sink`] defines the [`Sink`]/[`SinkOpener`] boundary with a file backend
//!   ([`FileOpener`]) and an in-memory backend ([`MemoryOpener`]).
//! - [`transform`] holds the pluggable preprocessor and encoder traits, and
//!   [`encoders`] adapts the `compress` codecs to them.
//! - [`options`] gathers construction settings, including a serializable
//!   [`WriterConfig`].
//!
//! A writer opens its sink during construction unless it is lazy, in which
//! case the first write opens it. All mutable state sits behind one
//! [`std::sync::RwLock`]; flushes run with the exclusive lock held so the
//! sink never sees interleaved partial writes.
//!
//! # Invariants
//!
//! - Every byte accepted by a successful write is handed to the sink exactly
//!   once, provided the writer is eventually closed successfully.
//! - A flush that fails before the sink accepted the payload leaves the buffer
//!   untouched, so the next flush retries the same bytes.
//! - Once closed, a writer rejects every write and the sink is released.
//!
//! # Errors
//!
//! Operations return [`WriterError`], whose variant names the failing stage
//! and whose payload names the target.
//!
//! # Examples
//!
//! ```no_run
//! use writer::{AppendWriter, OpenMode};
//!
//! # fn main() -> Result<(), writer::WriterError> {
//! let log = AppendWriter::new("/var/log/app.log", OpenMode::Append, false, true)?;
//! log.write_line("service started")?;
//! log.close()?;
//! # Ok(())
//! # }
//! ```

mod debug_io;
pub mod encoders;
pub mod error;
pub mod mode;
pub mod options;
pub mod sink;
pub mod transform;
mod writer;

pub use compress::{Direction, EncodingAlgorithm};
pub use encoders::Codec;
pub use error::WriterError;
pub use mode::{OpenFlags, OpenMode, OpenModeParseError};
pub use options::{ConfigError, DEFAULT_THRESHOLD, WriterConfig, WriterOptions};
pub use sink::{DEFAULT_PERMISSIONS, FileOpener, MemoryOpener, Sink, SinkOpener};
pub use transform::{ByteTransform, Identity, StripControl, TextTransform};
pub use writer::{AppendWriter, Lifecycle};
