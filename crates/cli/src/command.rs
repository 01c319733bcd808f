//! The `clap` command definition.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::PROGRAM_NAME;

/// Builds the `clap` command used for parsing.
///
/// Help and version are plain flags so [`run`](crate::run) decides where their
/// output goes.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .about("Append input lines to a file through a buffered append writer.")
        .override_usage(format!("{PROGRAM_NAME} [OPTIONS] <TARGET> [INPUT]..."))
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .value_name("MODE")
                .help("Open mode: create, overwrite or append (default append).")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('t')
                .value_name("BYTES")
                .help("Flush once this many bytes are buffered (default 4096).")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("permissions")
                .long("permissions")
                .value_name("OCTAL")
                .help("Permission bits for a newly created target (default 644).")
                .value_parser(parse_octal)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lazy")
                .long("lazy")
                .help("Open the target on the first write instead of at startup.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("encode")
                .long("encode")
                .short('e')
                .value_name("ALGORITHM")
                .help("Encode each flush with ALGORITHM (deflate, zlib, zstd, lz4).")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Compression level 1-9 for --encode (default: codec default).")
                .value_parser(value_parser!(u32))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("decode")
                .long("decode")
                .short('d')
                .help("Run the encoding in the decompress direction.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Read writer settings from a JSON file; flags take precedence.")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("sync-each")
                .long("sync-each")
                .help("Flush after every line.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip-control")
                .long("strip-control")
                .help("Drop control characters other than tab, CR and LF.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-newline")
                .long("no-newline")
                .help("Write lines without a trailing newline.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity; repeat for more.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .help("File to append to.")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .help("Files to read lines from; stdin when omitted.")
                .value_parser(value_parser!(PathBuf))
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

fn parse_octal(value: &str) -> Result<u32, String> {
    let digits = value.strip_prefix("0o").unwrap_or(value);
    match u32::from_str_radix(digits, 8) {
        Ok(bits) if bits <= 0o7777 => Ok(bits),
        _ => Err(format!("'{value}' is not an octal permission mode")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        clap_command().debug_assert();
    }

    #[test]
    fn octal_permissions_parse() {
        assert_eq!(parse_octal("600"), Ok(0o600));
        assert_eq!(parse_octal("0o640"), Ok(0o640));
        assert!(parse_octal("999").is_err());
        assert!(parse_octal("17777").is_err());
    }
}
