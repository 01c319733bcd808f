//! Enumerations describing the encodings an append writer can apply at flush time.

use core::fmt;
use core::str::FromStr;

/// Encoding formats recognised by the workspace.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EncodingAlgorithm {
    /// Raw DEFLATE stream without container framing.
    #[default]
    Deflate,
    /// DEFLATE wrapped in the zlib container.
    Zlib,
    /// Zstandard frame.
    #[cfg(feature = "zstd")]
    Zstd,
    /// LZ4 frame.
    #[cfg(feature = "lz4")]
    Lz4,
}

impl EncodingAlgorithm {
    /// Returns the canonical name used in configuration files and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deflate => "deflate",
            Self::Zlib => "zlib",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zstd",
            #[cfg(feature = "lz4")]
            Self::Lz4 => "lz4",
        }
    }

    /// Returns the set of algorithms available in the current build.
    #[must_use]
    pub fn available() -> &'static [Self] {
        const ALGORITHMS: &[EncodingAlgorithm] = &[
            EncodingAlgorithm::Deflate,
            EncodingAlgorithm::Zlib,
            #[cfg(feature = "zstd")]
            EncodingAlgorithm::Zstd,
            #[cfg(feature = "lz4")]
            EncodingAlgorithm::Lz4,
        ];
        ALGORITHMS
    }
}

impl fmt::Display for EncodingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when attempting to parse an unsupported encoding name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unsupported encoding algorithm: {input}")]
pub struct EncodingAlgorithmParseError {
    input: String,
}

impl EncodingAlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for EncodingAlgorithm {
    type Err = EncodingAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deflate" | "flate" => Ok(Self::Deflate),
            "zlib" => Ok(Self::Zlib),
            #[cfg(feature = "zstd")]
            "zstd" => Ok(Self::Zstd),
            #[cfg(feature = "lz4")]
            "lz4" => Ok(Self::Lz4),
            other => Err(EncodingAlgorithmParseError::new(other)),
        }
    }
}

/// Which way a codec runs over the buffered bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Compress the buffered bytes before they reach the sink.
    #[default]
    Compress,
    /// Decompress the buffered bytes before they reach the sink.
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        })
    }
}
