//! Encoders backed by the `compress` crate.

use std::io;

use compress::zlib::CompressionLevel;
use compress::{Direction, EncodingAlgorithm};

use crate::transform::ByteTransform;

/// A [`ByteTransform`] that runs flushed payloads through a compression codec.
///
/// The stock encoder installed by [`WriterOptions::default`](crate::WriterOptions)
/// inflates raw DEFLATE payloads, see [`Codec::default_encoder`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Codec {
    algorithm: EncodingAlgorithm,
    direction: Direction,
    level: CompressionLevel,
}

impl Codec {
    /// Creates a codec for `algorithm` running in `direction`.
    #[must_use]
    pub const fn new(algorithm: EncodingAlgorithm, direction: Direction) -> Self {
        Self {
            algorithm,
            direction,
            level: CompressionLevel::Default,
        }
    }

    /// Creates a compressing codec.
    #[must_use]
    pub const fn compress(algorithm: EncodingAlgorithm) -> Self {
        Self::new(algorithm, Direction::Compress)
    }

    /// Creates a decompressing codec.
    #[must_use]
    pub const fn decompress(algorithm: EncodingAlgorithm) -> Self {
        Self::new(algorithm, Direction::Decompress)
    }

    /// Raw DEFLATE decompression, the encoder writers start with.
    #[must_use]
    pub const fn default_encoder() -> Self {
        Self::decompress(EncodingAlgorithm::Deflate)
    }

    /// Sets the compression level. Decompressing codecs ignore it.
    #[must_use]
    pub const fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Returns the codec's algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> EncodingAlgorithm {
        self.algorithm
    }

    /// Returns the direction the codec runs in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::default_encoder()
    }
}

impl ByteTransform for Codec {
    fn encode(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        compress::encode(self.algorithm, self.direction, self.level, input)
    }
}
