//! Helpers shared by polykit tools.
//!
//! - [`encoding`] - Base64 conversions, including the chunked `|` form
//! - [`gzip`] - Gzip compression to and from base64 text
//! - [`git_url`] - GitHub URL parsing

pub mod encoding;
pub mod git_url;
pub mod gzip;

pub use encoding::{
    base64_to_bytes, base64_to_reader, base64_to_string, bytes_to_base64,
    bytes_to_chunked_base64, chunked_base64_to_bytes, reader_to_base64, string_to_base64,
    EncodingError,
};
pub use git_url::{parse_git_url, GitUrlError, GitUrlInfo, SourceType};
pub use gzip::{gunzip, gunzip_bytes, gzip, gzip_bytes, gzip_with_level, DEFAULT_LEVEL};
