use std::io::Cursor;

use test_support::TestDir;

use super::*;

struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

fn run_with(args: &[&str], stdin: &str) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once(PROGRAM_NAME).chain(args.iter().copied());
    let code = run(argv, Cursor::new(stdin.to_owned()), &mut stdout, &mut stderr);
    Outcome {
        code,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

fn target(dir: &TestDir, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

// ============================================================================
// Informational Output
// ============================================================================

#[test]
fn version_prints_name_and_version() {
    let outcome = run_with(&["--version"], "");
    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert_eq!(outcome.stdout, format!("appendlog {}\n", env!("CARGO_PKG_VERSION")));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn help_lists_options() {
    let outcome = run_with(&["-h"], "");
    assert_eq!(outcome.code, EXIT_SUCCESS);
    for flag in ["--mode", "--threshold", "--encode", "--config", "--sync-each"] {
        assert!(outcome.stdout.contains(flag), "help is missing {flag}");
    }
}

// ============================================================================
// Appending
// ============================================================================

#[test]
fn stdin_lines_are_appended_with_newlines() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("out.log", b"existing\n").expect("seed");

    let outcome = run_with(&[&target(&dir, "out.log")], "one\ntwo\n");
    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(dir.read_file("out.log").expect("read"), b"existing\none\ntwo\n");
}

#[test]
fn input_files_are_read_in_order() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("a.txt", b"a1\na2\n").expect("seed");
    dir.write_file("b.txt", b"b1\n").expect("seed");

    let outcome = run_with(
        &[
            "--mode",
            "overwrite",
            &target(&dir, "out.log"),
            &target(&dir, "a.txt"),
            &target(&dir, "b.txt"),
        ],
        "ignored\n",
    );
    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(dir.read_file("out.log").expect("read"), b"a1\na2\nb1\n");
}

#[test]
fn no_newline_and_strip_control_shape_output() {
    let dir = TestDir::new().expect("test dir");
    let outcome = run_with(
        &["--no-newline", "--strip-control", "--sync-each", &target(&dir, "out.log")],
        "a\x07b\nc\x1bd\n",
    );
    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(dir.read_file("out.log").expect("read"), b"abcd");
}

#[test]
fn encode_writes_one_frame_per_flush() {
    let dir = TestDir::new().expect("test dir");
    let outcome = run_with(
        &["--encode", "zlib", "--threshold", "1000000", &target(&dir, "out.z")],
        "compressed line\n",
    );
    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);

    let packed = dir.read_file("out.z").expect("read");
    assert_eq!(
        compress::zlib::decompress_to_vec(&packed).expect("zlib frame"),
        b"compressed line\n"
    );
}

#[test]
fn level_flag_reaches_the_encoder() {
    let dir = TestDir::new().expect("test dir");
    let payload = "repetitive payload ".repeat(40);
    let outcome = run_with(
        &["--encode", "zlib", "--level", "1", "--no-newline", &target(&dir, "out.z")],
        &payload,
    );
    assert_eq!(outcome.code, EXIT_SUCCESS, "stderr: {}", outcome.stderr);

    let level = compress::zlib::CompressionLevel::from_numeric(1).expect("level");
    assert_eq!(
        dir.read_file("out.z").expect("read"),
        compress::zlib::compress_to_vec(payload.as_bytes(), level).expect("reference")
    );
}

#[test]
fn lazy_run_without_input_creates_nothing() {
    let dir = TestDir::new().expect("test dir");
    let outcome = run_with(&["--lazy", &target(&dir, "never.log")], "");
    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert!(!dir.exists("never.log"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn create_mode_on_existing_file_is_write_error() {
    let dir = TestDir::new().expect("test dir");
    dir.write_file("taken.log", b"keep").expect("seed");

    let outcome = run_with(&["--mode", "create", &target(&dir, "taken.log")], "new\n");
    assert_eq!(outcome.code, EXIT_WRITE);
    assert!(outcome.stderr.starts_with("appendlog: failed to initialize"));
    assert_eq!(dir.read_file("taken.log").expect("read"), b"keep");
}

#[test]
fn missing_input_file_is_write_error() {
    let dir = TestDir::new().expect("test dir");
    let outcome = run_with(
        &[&target(&dir, "out.log"), &target(&dir, "absent.txt")],
        "",
    );
    assert_eq!(outcome.code, EXIT_WRITE);
    assert!(outcome.stderr.contains("absent.txt"));
}

#[test]
fn usage_errors_exit_with_one() {
    let outcome = run_with(&["--bogus", "out.log"], "");
    assert_eq!(outcome.code, EXIT_USAGE);
    assert!(outcome.stderr.starts_with("appendlog: "));

    let outcome = run_with(&[], "");
    assert_eq!(outcome.code, EXIT_USAGE);
    assert_eq!(outcome.stderr, "appendlog: missing TARGET operand\n");
}

#[test]
fn zero_threshold_and_unknown_encoding_are_config_errors() {
    let dir = TestDir::new().expect("test dir");
    let out = target(&dir, "out.log");

    let outcome = run_with(&["--threshold", "0", &out], "");
    assert_eq!(outcome.code, EXIT_USAGE);
    assert!(outcome.stderr.contains("greater than zero"));

    let outcome = run_with(&["--encode", "zlib", "--level", "0", &out], "");
    assert_eq!(outcome.code, EXIT_USAGE);
    assert!(outcome.stderr.contains("compression level 0 is outside"));

    let outcome = run_with(&["--encode", "brotli", &out], "");
    assert_eq!(outcome.code, EXIT_USAGE);
    assert!(outcome.stderr.contains("unsupported encoding algorithm: brotli"));
    assert!(!dir.exists("out.log"));
}
