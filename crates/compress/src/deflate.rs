//! Raw DEFLATE (RFC 1951) helpers without container framing.
//!
//! Raw deflate is the default encoding family for append writers: the
//! writer's stock encoder inflates each flushed payload, so producers can ship
//! pre-compressed records and have them land on disk as plain bytes.

use std::io::{self, Write};

use flate2::{read::DeflateDecoder, write::DeflateEncoder};

use crate::zlib::CompressionLevel;

/// Compresses `input` into a raw DEFLATE stream.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(input.len() / 2), level.into());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Inflates a complete raw DEFLATE stream.
///
/// An empty input inflates to an empty output.
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut decoder = DeflateDecoder::new(input);
    let mut output = Vec::with_capacity(input.len().saturating_mul(2));
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}
