//! Resolution of parsed arguments and the optional config file into the
//! settings a run needs.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use writer::{OpenMode, StripControl, WriterConfig, WriterOptions};

use crate::command::clap_command;
use crate::error::CliError;

/// What the command line asked for.
#[derive(Debug)]
pub(crate) enum Action {
    Help,
    Version,
    Append(Settings),
}

/// Everything an append run needs.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) target: PathBuf,
    pub(crate) inputs: Vec<PathBuf>,
    pub(crate) config: WriterConfig,
    pub(crate) sync_each: bool,
    pub(crate) strip_control: bool,
    pub(crate) newline: bool,
    pub(crate) verbosity: u8,
}

impl Settings {
    /// Resolves the writer options, rejecting invalid merged settings.
    pub(crate) fn writer_options(&self) -> Result<WriterOptions, CliError> {
        let options = self.config.clone().into_options()?;
        Ok(if self.strip_control {
            options.with_preprocessor(StripControl)
        } else {
            options
        })
    }
}

/// Parses `arguments`, loading and merging the config file when one is named.
pub(crate) fn parse<I, S>(arguments: I) -> Result<Action, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = clap_command()
        .try_get_matches_from(arguments)
        .map_err(|error| CliError::usage(&error))?;

    if matches.get_flag("help") {
        return Ok(Action::Help);
    }
    if matches.get_flag("version") {
        return Ok(Action::Version);
    }

    resolve(matches).map(Action::Append)
}

fn resolve(mut matches: ArgMatches) -> Result<Settings, CliError> {
    let target = matches
        .remove_one::<PathBuf>("target")
        .ok_or_else(|| CliError::Usage("missing TARGET operand".to_owned()))?;
    let inputs = matches
        .remove_many::<PathBuf>("inputs")
        .map(|values| values.collect())
        .unwrap_or_default();

    let mut config = match matches.remove_one::<PathBuf>("config") {
        Some(path) => load_config(&path)?,
        None => WriterConfig::default(),
    };

    if let Some(mode) = matches.remove_one::<String>("mode") {
        config.mode = mode.parse::<OpenMode>()?;
    }
    if let Some(threshold) = matches.remove_one::<usize>("threshold") {
        config.threshold = threshold;
    }
    if let Some(permissions) = matches.remove_one::<u32>("permissions") {
        config.permissions = permissions;
    }
    if let Some(algorithm) = matches.remove_one::<String>("encode") {
        config.encode = true;
        config.encoding = Some(algorithm);
    }
    if let Some(level) = matches.remove_one::<u32>("level") {
        config.level = Some(level);
    }
    config.lazy |= matches.get_flag("lazy");
    config.decode |= matches.get_flag("decode");

    Ok(Settings {
        target,
        inputs,
        config,
        sync_each: matches.get_flag("sync-each"),
        strip_control: matches.get_flag("strip-control"),
        newline: !matches.get_flag("no-newline"),
        verbosity: matches.get_count("verbose"),
    })
}

/// Reads a JSON [`WriterConfig`] from `path`.
pub(crate) fn load_config(path: &Path) -> Result<WriterConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
