//! Writer configuration.
//!
//! [`WriterOptions`] carries everything a writer needs at construction,
//! including the transform capabilities. [`WriterConfig`] is its plain-data
//! subset that can be stored in configuration files (with the `serde`
//! feature) and resolved into options.

use std::fmt;
use std::sync::Arc;

use compress::zlib::{CompressionLevel, CompressionLevelError};
use compress::{Direction, EncodingAlgorithm, EncodingAlgorithmParseError};

use crate::encoders::Codec;
use crate::mode::OpenMode;
use crate::sink::DEFAULT_PERMISSIONS;
use crate::transform::{ByteTransform, Identity, TextTransform};

/// Default flush threshold in bytes.
pub const DEFAULT_THRESHOLD: usize = 4096;

/// Construction options for [`AppendWriter`](crate::AppendWriter).
#[derive(Clone)]
pub struct WriterOptions {
    /// How the sink is opened.
    pub mode: OpenMode,
    /// Whether flushed bytes pass through the encoder.
    pub encode: bool,
    /// Defer opening the sink until the first write.
    pub lazy: bool,
    /// Buffer length that triggers an automatic flush.
    pub threshold: usize,
    /// Permission bits for files the writer creates.
    pub permissions: u32,
    /// Applied by `safe_write` before buffering.
    pub preprocessor: Arc<dyn TextTransform>,
    /// Applied to the buffer at flush time when `encode` is set.
    pub encoder: Arc<dyn ByteTransform>,
}

impl WriterOptions {
    /// Returns the default options; equivalent to [`WriterOptions::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the open mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables flush-time encoding.
    #[must_use]
    pub fn with_encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// Enables or disables lazy opening.
    #[must_use]
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Sets the flush threshold. Zero is ignored.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        if threshold > 0 {
            self.threshold = threshold;
        }
        self
    }

    /// Sets the permission bits for created files.
    #[must_use]
    pub fn with_permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    /// Installs the preprocessor.
    #[must_use]
    pub fn with_preprocessor(mut self, preprocessor: impl TextTransform + 'static) -> Self {
        self.preprocessor = Arc::new(preprocessor);
        self
    }

    /// Installs the encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl ByteTransform + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            mode: OpenMode::Append,
            encode: false,
            lazy: false,
            threshold: DEFAULT_THRESHOLD,
            permissions: DEFAULT_PERMISSIONS,
            preprocessor: Arc::new(Identity),
            encoder: Arc::new(Codec::default_encoder()),
        }
    }
}

impl fmt::Debug for WriterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterOptions")
            .field("mode", &self.mode)
            .field("encode", &self.encode)
            .field("lazy", &self.lazy)
            .field("threshold", &self.threshold)
            .field("permissions", &format_args!("{:#o}", self.permissions))
            .finish_non_exhaustive()
    }
}

/// Errors raised while resolving a [`WriterConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured flush threshold was zero.
    #[error("flush threshold must be greater than zero")]
    ZeroThreshold,

    /// The configured encoding is not available in this build.
    #[error(transparent)]
    Encoding(#[from] EncodingAlgorithmParseError),

    /// The configured compression level is outside `1..=9`.
    #[error(transparent)]
    Level(#[from] CompressionLevelError),
}

/// Serializable writer settings.
///
/// Missing fields take their defaults, so an empty document is valid.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct WriterConfig {
    /// Open mode name, e.g. `"append"`.
    pub mode: OpenMode,
    /// Whether flushed bytes pass through the encoder.
    pub encode: bool,
    /// Defer opening the sink until the first write.
    pub lazy: bool,
    /// Buffer length that triggers an automatic flush.
    pub threshold: usize,
    /// Permission bits for files the writer creates.
    pub permissions: u32,
    /// Encoding algorithm name. `None` keeps the default encoder.
    pub encoding: Option<String>,
    /// Run the configured encoding in the decompress direction.
    pub decode: bool,
    /// Compression level `1..=9` for the configured encoding. `None` keeps
    /// the codec's default.
    pub level: Option<u32>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            mode: OpenMode::Append,
            encode: false,
            lazy: false,
            threshold: DEFAULT_THRESHOLD,
            permissions: DEFAULT_PERMISSIONS,
            encoding: None,
            decode: false,
            level: None,
        }
    }
}

impl WriterConfig {
    /// Resolves the settings into [`WriterOptions`].
    pub fn into_options(self) -> Result<WriterOptions, ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        let level = self
            .level
            .map(CompressionLevel::from_numeric)
            .transpose()?
            .unwrap_or_default();

        let mut options = WriterOptions::default()
            .with_mode(self.mode)
            .with_encode(self.encode)
            .with_lazy(self.lazy)
            .with_threshold(self.threshold)
            .with_permissions(self.permissions);

        if let Some(name) = self.encoding {
            let algorithm: EncodingAlgorithm = name.parse()?;
            let direction = if self.decode {
                Direction::Decompress
            } else {
                Direction::Compress
            };
            options = options.with_encoder(Codec::new(algorithm, direction).with_level(level));
        }

        Ok(options)
    }
}
