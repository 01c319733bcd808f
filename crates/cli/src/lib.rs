#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `appendlog` command: it reads lines from input files
//! (or standard input) and appends them to a target file through a
//! [`writer::AppendWriter`].
//!
//! # Design
//!
//! [`run`] is the entry point. It takes the argument list together with
//! handles for standard input, output and error, which keeps the whole
//! command testable in-process. A [`clap`](https://docs.rs/clap/) builder
//! parses the flags; an optional JSON configuration file supplies a
//! [`writer::WriterConfig`] that individual flags then override.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as diagnostics on stderr and a
//!   non-zero exit code.
//! - Each input line reaches the writer through
//!   [`safe_write`](writer::AppendWriter::safe_write), so the preprocessor
//!   selected on the command line always applies.
//! - The writer is closed before `run` reports success.
//!
//! # Errors
//!
//! Usage and configuration problems exit with [`EXIT_USAGE`]; input and
//! writer failures exit with [`EXIT_WRITE`]. Every diagnostic is written as
//! `appendlog: <message>`.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["appendlog", "--version"], Cursor::new(""), &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("appendlog "));
//! assert!(stderr.is_empty());
//! ```

mod command;
mod error;
mod logging;
mod settings;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info};
use writer::AppendWriter;

pub use error::{CliError, EXIT_SUCCESS, EXIT_USAGE, EXIT_WRITE};

use settings::{Action, Settings};

/// Name used in usage text and diagnostics.
pub const PROGRAM_NAME: &str = "appendlog";

/// Runs the command with `arguments`, returning the process exit code.
///
/// `stdin` is read only when no INPUT operands are given.
pub fn run<I, S, In, Out, Err>(arguments: I, stdin: In, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    In: BufRead,
    Out: Write,
    Err: Write,
{
    match execute(arguments, stdin, stdout) {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

fn execute<I, S, In, Out>(arguments: I, stdin: In, stdout: &mut Out) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    In: BufRead,
    Out: Write,
{
    let settings = match settings::parse(arguments)? {
        Action::Help => {
            let help = command::clap_command().render_help();
            return write!(stdout, "{help}").map_err(CliError::Output);
        }
        Action::Version => {
            return writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION"))
                .map_err(CliError::Output);
        }
        Action::Append(settings) => settings,
    };

    logging::init(settings.verbosity);
    append(&settings, stdin)
}

fn append<In: BufRead>(settings: &Settings, stdin: In) -> Result<(), CliError> {
    let options = settings.writer_options()?;
    debug!(target: "appendlog::cli", ?options, path = %settings.target.display(), "opening writer");
    let writer = AppendWriter::with_options(&settings.target, options)?;

    let mut lines = 0;
    if settings.inputs.is_empty() {
        lines += copy_lines(&writer, stdin, Path::new("-"), settings)?;
    } else {
        for input in &settings.inputs {
            let file = File::open(input).map_err(|source| input_error(input, source))?;
            lines += copy_lines(&writer, BufReader::new(file), input, settings)?;
        }
    }

    writer.close()?;
    info!(
        target: "appendlog::cli",
        lines,
        path = %settings.target.display(),
        "appended {} line(s) to {}",
        lines,
        settings.target.display()
    );
    Ok(())
}

/// Feeds every line of `reader` to `writer`, returning the line count.
fn copy_lines<R: BufRead>(
    writer: &AppendWriter,
    reader: R,
    source: &Path,
    settings: &Settings,
) -> Result<usize, CliError> {
    let mut count = 0;
    for line in reader.lines() {
        let mut line = line.map_err(|error| input_error(source, error))?;
        if settings.newline {
            line.push('\n');
        }

        if settings.sync_each {
            writer.sync_write(&line)?;
        } else {
            writer.safe_write(&line)?;
        }
        count += 1;
    }
    Ok(count)
}

fn input_error(path: &Path, source: io::Error) -> CliError {
    CliError::Input {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests;
