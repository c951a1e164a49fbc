//! Base64 conversions.
//!
//! All conversions use the standard alphabet with padding. The chunked form
//! is a concatenation of independently encoded chunks, each terminated by
//! `|`, so it can be produced incrementally from a stream.

use std::io::{self, Cursor, Read};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

/// Terminator after each chunk of the chunked form.
pub const CHUNK_SEPARATOR: char = '|';

/// Errors from encoding conversions.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("compression level must be between 0 and 9, got {0}")]
    InvalidLevel(u32),
}

pub type Result<T> = std::result::Result<T, EncodingError>;

pub fn bytes_to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn base64_to_bytes(text: &str) -> Result<Vec<u8>> {
    Ok(BASE64.decode(text.trim())?)
}

/// Encodes the UTF-8 bytes of `text`.
pub fn string_to_base64(text: &str) -> String {
    bytes_to_base64(text.as_bytes())
}

pub fn base64_to_string(text: &str) -> Result<String> {
    Ok(String::from_utf8(base64_to_bytes(text)?)?)
}

/// Drains a reader and encodes everything it produced.
pub fn reader_to_base64(mut reader: impl Read) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes_to_base64(&bytes))
}

/// Decodes base64 text into a reader over the bytes.
pub fn base64_to_reader(text: &str) -> Result<Cursor<Vec<u8>>> {
    Ok(Cursor::new(base64_to_bytes(text)?))
}

/// Encodes `bytes` in chunks of `chunk_size` input bytes.
///
/// A `chunk_size` of zero encodes everything as one chunk. Empty input
/// produces an empty string.
pub fn bytes_to_chunked_base64(bytes: &[u8], chunk_size: usize) -> String {
    let size = if chunk_size == 0 { bytes.len().max(1) } else { chunk_size };
    let mut out = String::new();
    for chunk in bytes.chunks(size) {
        BASE64.encode_string(chunk, &mut out);
        out.push(CHUNK_SEPARATOR);
    }
    out
}

/// Decodes the chunked form. Empty chunks are skipped.
pub fn chunked_base64_to_bytes(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for chunk in text.split(CHUNK_SEPARATOR).map(str::trim).filter(|c| !c.is_empty()) {
        BASE64.decode_vec(chunk, &mut bytes)?;
    }
    Ok(bytes)
}
