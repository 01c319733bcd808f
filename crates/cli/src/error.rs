//! Errors surfaced by the command-line front end.

use std::io;
use std::path::PathBuf;

use writer::{ConfigError, OpenModeParseError, WriterError};

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: i32 = 1;
/// Exit status for failures while appending.
pub const EXIT_WRITE: i32 = 2;

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(String),

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not a valid writer configuration.
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        /// The configuration file.
        path: PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// `--mode` named no known open mode.
    #[error(transparent)]
    Mode(#[from] OpenModeParseError),

    /// The merged settings could not be turned into writer options.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Input {
        /// The input that failed; `-` for stdin.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The writer rejected an operation.
    #[error(transparent)]
    Writer(#[from] WriterError),

    /// Help or version output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_)
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::Mode(_)
            | Self::Config(_) => EXIT_USAGE,
            Self::Input { .. } | Self::Writer(_) | Self::Output(_) => EXIT_WRITE,
        }
    }

    pub(crate) fn usage(error: &clap::Error) -> Self {
        let rendered = error.to_string();
        let message = rendered.lines().next().unwrap_or_default();
        Self::Usage(message.trim_start_matches("error: ").to_owned())
    }
}
