//! Gzip compression to and from base64 text.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::trace;

use crate::encoding::{base64_to_bytes, bytes_to_base64, EncodingError, Result};

/// Compression level used by [`gzip`].
pub const DEFAULT_LEVEL: u32 = 6;

const MAX_LEVEL: u32 = 9;

/// Compresses `text` and returns the gzip stream as base64.
pub fn gzip(text: &str) -> Result<String> {
    gzip_with_level(text, DEFAULT_LEVEL)
}

/// Like [`gzip`] with an explicit level (0 = store, 9 = best).
pub fn gzip_with_level(text: &str, level: u32) -> Result<String> {
    let compressed = gzip_bytes(text.as_bytes(), level)?;
    Ok(bytes_to_base64(&compressed))
}

/// Decodes base64 gzip data and returns the decompressed text.
pub fn gunzip(data: &str) -> Result<String> {
    let bytes = gunzip_bytes(&base64_to_bytes(data)?)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn gzip_bytes(bytes: &[u8], level: u32) -> Result<Vec<u8>> {
    if level > MAX_LEVEL {
        return Err(EncodingError::InvalidLevel(level));
    }
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len()), Compression::new(level));
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;
    trace!(input = bytes.len(), output = compressed.len(), level, "gzip");
    Ok(compressed)
}

pub fn gunzip_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::with_capacity(bytes.len() * 2);
    decoder.read_to_end(&mut decompressed)?;
    trace!(input = bytes.len(), output = decompressed.len(), "gunzip");
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_survives_compression() {
        let text = "overload ".repeat(200);
        let zipped = gzip(&text).unwrap();
        assert!(zipped.len() < text.len());
        assert_eq!(gunzip(&zipped).unwrap(), text);
    }

    #[test]
    fn test_levels() {
        for level in 0..=MAX_LEVEL {
            let zipped = gzip_with_level("abc", level).unwrap();
            assert_eq!(gunzip(&zipped).unwrap(), "abc");
        }
        assert!(matches!(
            gzip_with_level("abc", 10),
            Err(EncodingError::InvalidLevel(10))
        ));
    }

    #[test]
    fn test_output_is_a_gzip_stream() {
        let bytes = gzip_bytes(b"", DEFAULT_LEVEL).unwrap();
        assert_eq!(bytes[..2], [0x1f_u8, 0x8b]);
        assert!(gunzip_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_gzip_data() {
        let not_gzip = bytes_to_base64(b"plain text");
        assert!(matches!(gunzip(&not_gzip), Err(EncodingError::Io(_))));
    }
}
