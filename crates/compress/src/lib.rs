#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` provides the byte codecs that append writers apply to their
//! accumulated buffer at flush time. Every codec operates on a complete,
//! self-contained payload: the writer hands over everything buffered since the
//! previous flush and receives an independent encoded representation back.
//!
//! # Design
//!
//! The crate exposes one module per format. [`deflate`] implements raw DEFLATE
//! (RFC 1951) and [`zlib`] the zlib container (RFC 1950), both on top of
//! [`flate2`](https://docs.rs/flate2). The optional [`zstd`] and [`lz4`]
//! modules wrap [`zstd`](https://docs.rs/zstd) and
//! [`lz4_flex`](https://docs.rs/lz4_flex) frames. [`encode`] dispatches on an
//! [`EncodingAlgorithm`] and a [`Direction`] so configuration layers can pick a
//! codec by name.
//!
//! # Invariants
//!
//! - Codecs are stateless between calls. Encoding the same input twice yields
//!   the same output.
//! - Decompressing an empty input yields an empty output for the raw deflate
//!   codec, matching how an empty flush is never encoded in the first place.
//!
//! # Errors
//!
//! All codec functions return [`std::io::Result`]. Malformed input surfaces as
//! [`std::io::ErrorKind::InvalidData`] or the error reported by the backing
//! library wrapped with [`std::io::Error::other`].
//!
//! # Examples
//!
//! ```
//! use compress::{Direction, EncodingAlgorithm, encode, zlib::CompressionLevel};
//!
//! # fn main() -> std::io::Result<()> {
//! let payload = b"appendlog payload appendlog payload";
//! let packed = encode(EncodingAlgorithm::Deflate, Direction::Compress, CompressionLevel::Default, payload)?;
//! let unpacked = encode(EncodingAlgorithm::Deflate, Direction::Decompress, CompressionLevel::Default, &packed)?;
//! assert_eq!(unpacked, payload);
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod deflate;
#[cfg(feature = "lz4")]
pub mod lz4;
pub mod zlib;
#[cfg(feature = "zstd")]
pub mod zstd;

use std::io;

pub use algorithm::{Direction, EncodingAlgorithm, EncodingAlgorithmParseError};
use zlib::CompressionLevel;

/// Runs `input` through the codec selected by `algorithm` and `direction`.
///
/// `level` only affects [`Direction::Compress`]; decoders ignore it.
pub fn encode(
    algorithm: EncodingAlgorithm,
    direction: Direction,
    level: CompressionLevel,
    input: &[u8],
) -> io::Result<Vec<u8>> {
    match (algorithm, direction) {
        (EncodingAlgorithm::Deflate, Direction::Compress) => deflate::compress_to_vec(input, level),
        (EncodingAlgorithm::Deflate, Direction::Decompress) => deflate::decompress_to_vec(input),
        (EncodingAlgorithm::Zlib, Direction::Compress) => zlib::compress_to_vec(input, level),
        (EncodingAlgorithm::Zlib, Direction::Decompress) => zlib::decompress_to_vec(input),
        #[cfg(feature = "zstd")]
        (EncodingAlgorithm::Zstd, Direction::Compress) => zstd::compress_to_vec(input, level),
        #[cfg(feature = "zstd")]
        (EncodingAlgorithm::Zstd, Direction::Decompress) => zstd::decompress_to_vec(input),
        #[cfg(feature = "lz4")]
        (EncodingAlgorithm::Lz4, Direction::Compress) => lz4::compress_to_vec(input, level),
        #[cfg(feature = "lz4")]
        (EncodingAlgorithm::Lz4, Direction::Decompress) => lz4::decompress_to_vec(input),
    }
}
