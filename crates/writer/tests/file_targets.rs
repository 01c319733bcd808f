//! Append writers backed by real files.
//!
//! This test module verifies:
//! 1. Each open mode treats existing files the way its flags say
//! 2. Content reaches disk only on threshold, sync, close or drop
//! 3. Lazy writers leave no file behind until the first write
//! 4. Encoded flushes land on disk as independent payloads

use std::fs;

use compress::zlib::CompressionLevel;
use test_support::TestDir;
use writer::{AppendWriter, Codec, EncodingAlgorithm, OpenMode, WriterError, WriterOptions};

// ============================================================================
// Open Modes
// ============================================================================

/// Append mode keeps what was there and adds to the end.
#[test]
fn append_mode_extends_existing_file() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("app.log", b"previous\n").expect("seed");

    let writer = AppendWriter::new(dir.join("app.log"), OpenMode::Append, false, false)
        .expect("open");
    writer.write_str("hello\n").expect("write");
    writer.close().expect("close");

    assert_eq!(dir.read_file("app.log").expect("read"), b"previous\nhello\n");
}

/// Append mode creates a missing file.
#[test]
fn append_mode_creates_missing_file() {
    let dir = TestDir::new().expect("test dir");
    let writer = AppendWriter::new(dir.join("new.log"), OpenMode::Append, false, false)
        .expect("open");
    writer.write_str("hello\n").expect("write");
    writer.close().expect("close");

    assert_eq!(dir.read_file("new.log").expect("read"), b"hello\n");
}

/// Overwrite mode discards previous content at open time.
#[test]
fn overwrite_mode_truncates_on_open() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("state.txt", b"stale stale stale").expect("seed");

    let writer = AppendWriter::new(dir.join("state.txt"), OpenMode::Overwrite, false, false)
        .expect("open");
    assert!(dir.read_file("state.txt").expect("read").is_empty());

    writer.write_str("fresh").expect("write");
    writer.close().expect("close");
    assert_eq!(dir.read_file("state.txt").expect("read"), b"fresh");
}

/// Create mode refuses an existing file and leaves it untouched.
#[test]
fn create_mode_rejects_existing_file() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("taken.log", b"keep me").expect("seed");

    let err = AppendWriter::new(dir.join("taken.log"), OpenMode::Create, false, false)
        .expect_err("file exists");
    assert!(matches!(err, WriterError::Construction { .. }));
    assert_eq!(err.path(), dir.join("taken.log"));
    assert_eq!(
        err.io_error().map(std::io::Error::kind),
        Some(std::io::ErrorKind::AlreadyExists)
    );
    assert_eq!(dir.read_file("taken.log").expect("read"), b"keep me");
}

/// A missing parent directory fails lazily on the first write.
#[test]
fn lazy_open_failure_surfaces_on_first_write() {
    let dir = TestDir::new().expect("test dir");
    let target = dir.join("missing").join("app.log");

    let writer = AppendWriter::new(&target, OpenMode::Append, false, true).expect("lazy");
    let err = writer.write_str("nowhere").expect_err("parent missing");
    assert!(matches!(err, WriterError::Initialization { .. }));
    assert_eq!(writer.buffer_len(), 0);

    fs::create_dir(dir.join("missing")).expect("mkdir");
    writer.write_str("somewhere\n").expect("retry opens");
    writer.close().expect("close");
    assert_eq!(fs::read(&target).expect("read"), b"somewhere\n");
}

// ============================================================================
// Flush Timing
// ============================================================================

/// Bytes stay in memory until a flush trigger fires.
#[test]
fn content_reaches_disk_on_sync() {
    let dir = TestDir::new().expect("test dir");
    let writer = AppendWriter::new(dir.join("held.log"), OpenMode::Append, false, false)
        .expect("open");

    writer.write_str("buffered").expect("write");
    assert!(dir.read_file("held.log").expect("read").is_empty());

    writer.sync().expect("sync");
    assert_eq!(dir.read_file("held.log").expect("read"), b"buffered");
}

/// Crossing the threshold pushes the buffer through to the file.
#[test]
fn threshold_flush_reaches_disk() {
    let dir = TestDir::new().expect("test dir");
    let writer = AppendWriter::with_options(
        dir.join("threshold.log"),
        WriterOptions::default().with_threshold(4),
    )
    .expect("open");

    writer.write_str("ab").expect("write");
    assert!(dir.read_file("threshold.log").expect("read").is_empty());
    writer.write_str("cd").expect("write");
    assert_eq!(dir.read_file("threshold.log").expect("read"), b"abcd");
}

/// Dropping an open writer flushes and closes it.
#[test]
fn drop_persists_buffered_bytes() {
    let dir = TestDir::new().expect("test dir");
    {
        let writer = AppendWriter::new(dir.join("drop.log"), OpenMode::Append, false, false)
            .expect("open");
        writer.write_line("last words").expect("write");
    }
    assert_eq!(dir.read_file("drop.log").expect("read"), b"last words\n");
}

/// A lazy writer closed without writing never creates the file.
#[test]
fn lazy_writer_without_writes_creates_nothing() {
    let dir = TestDir::new().expect("test dir");
    let writer =
        AppendWriter::new(dir.join("ghost.log"), OpenMode::Append, false, true).expect("lazy");
    writer.close().expect("close");
    assert!(!dir.exists("ghost.log"));
}

/// Writes after close fail and the file stays as it was.
#[test]
fn write_after_close_leaves_file_unchanged() {
    let dir = TestDir::new().expect("test dir");
    let writer = AppendWriter::new(dir.join("closed.log"), OpenMode::Append, false, false)
        .expect("open");
    writer.write_str("final").expect("write");
    writer.close().expect("close");

    assert!(writer.write_str("too late").expect_err("closed").is_closed());
    writer.close().expect("close again");
    assert_eq!(dir.read_file("closed.log").expect("read"), b"final");
}

// ============================================================================
// Encoding
// ============================================================================

/// Each flush is compressed on its own, so the file is a sequence of frames.
#[test]
fn zlib_encoded_flushes_are_independent() {
    let dir = TestDir::new().expect("test dir");
    let writer = AppendWriter::with_options(
        dir.join("packed.z"),
        WriterOptions::default()
            .with_encode(true)
            .with_encoder(Codec::compress(EncodingAlgorithm::Zlib).with_level(CompressionLevel::Best)),
    )
    .expect("open");

    writer.write_str("first flush").expect("write");
    writer.sync().expect("sync");
    let first_len = dir.read_file("packed.z").expect("read").len();
    writer.write_str("second flush").expect("write");
    writer.close().expect("close");

    let on_disk = dir.read_file("packed.z").expect("read");
    let (first, second) = on_disk.split_at(first_len);
    assert_eq!(compress::zlib::decompress_to_vec(first).expect("first"), b"first flush");
    assert_eq!(compress::zlib::decompress_to_vec(second).expect("second"), b"second flush");
}

/// The stock encoder inflates raw DEFLATE payloads on the way out.
#[test]
fn default_encoder_writes_inflated_text() {
    let dir = TestDir::new().expect("test dir");
    let packed = compress::deflate::compress_to_vec(b"plain text on disk", CompressionLevel::Fast)
        .expect("deflate");

    let writer =
        AppendWriter::new(dir.join("inflated.log"), OpenMode::Append, true, false).expect("open");
    writer.write(&packed).expect("write");
    writer.close().expect("close");

    assert_eq!(dir.read_file("inflated.log").expect("read"), b"plain text on disk");
}
