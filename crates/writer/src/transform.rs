//! Pluggable text and byte transforms.
//!
//! A writer holds one [`TextTransform`] (the preprocessor applied by
//! [`AppendWriter::safe_write`](crate::AppendWriter::safe_write)) and one
//! [`ByteTransform`] (the encoder applied to the whole buffer at flush time).
//! Closures with the matching signature implement both traits directly.

use std::io;

/// Text transform applied to payloads before they are buffered.
///
/// Implementations must not block indefinitely and must not touch state the
/// writer observes.
pub trait TextTransform: Send + Sync {
    /// Returns the transformed text.
    fn transform(&self, text: &str) -> String;
}

impl<F> TextTransform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, text: &str) -> String {
        self(text)
    }
}

/// Byte transform applied to the complete buffer when a flush runs.
///
/// The input is the exact concatenation of every byte buffered since the
/// previous flush; the output must be self-contained.
pub trait ByteTransform: Send + Sync {
    /// Encodes a buffered payload.
    fn encode(&self, input: &[u8]) -> io::Result<Vec<u8>>;
}

impl<F> ByteTransform for F
where
    F: Fn(&[u8]) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn encode(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        self(input)
    }
}

/// Transform that returns its input unchanged.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Identity;

impl TextTransform for Identity {
    fn transform(&self, text: &str) -> String {
        text.to_owned()
    }
}

impl ByteTransform for Identity {
    fn encode(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        Ok(input.to_vec())
    }
}

/// Preprocessor that drops control characters other than `\n`, `\r` and `\t`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StripControl;

impl TextTransform for StripControl {
    fn transform(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
            .collect()
    }
}
