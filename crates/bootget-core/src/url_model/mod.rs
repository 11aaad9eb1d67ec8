//! Target URL parsing.
//!
//! Only `http://<host>[:<port>]/<path>` is understood. Anything else
//! (other schemes, userinfo, IPv6 literals, missing path) is rejected rather
//! than guessed at. The path is borrowed from the input, never copied.

mod filename;

pub use filename::{derive_output_filename, sanitize_filename};

use thiserror::Error;

/// The one scheme the downloader speaks.
pub const SCHEME: &str = "http://";

/// Longest host name accepted, in bytes.
pub const MAX_HOST_LEN: usize = 200;

/// Port used when the URL names none.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Connection parameters extracted from a target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl<'a> {
    /// Host name or dotted IPv4 address, at most `MAX_HOST_LEN` bytes.
    pub host: String,
    pub port: u16,
    /// Everything from the first `/` after host/port, including that `/`.
    pub path: &'a str,
}

/// Reasons a target URL is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL must start with \"http://\"")]
    NoScheme,

    #[error("malformed URL, expected http://<host>[:<port>]/<path>")]
    Malformed,

    #[error("host name is {len} bytes, limit is {max}")]
    HostTooLong { len: usize, max: usize },

    #[error("invalid port {0:?} (expected 0-65535)")]
    InvalidPort(String),
}

/// Splits `url` into host, port and path.
///
/// The host runs from the end of the scheme to the first `:` or `/`. A `:`
/// introduces a decimal port that must be followed directly by `/`. An empty
/// port (`http://host:/path`) is rejected as `InvalidPort("")` rather than
/// read as port 0.
///
/// # Examples
///
/// - `"http://example.com/file.bin"` → host `example.com`, port 80, path `/file.bin`
/// - `"http://10.0.2.2:8080/boot/Image"` → host `10.0.2.2`, port 8080, path `/boot/Image`
pub fn parse_url(url: &str) -> Result<ParsedUrl<'_>, UrlError> {
    let rest = url.strip_prefix(SCHEME).ok_or(UrlError::NoScheme)?;

    let host_end = rest
        .find(|c: char| c == ':' || c == '/')
        .ok_or(UrlError::Malformed)?;
    let host = &rest[..host_end];
    if host.len() > MAX_HOST_LEN {
        return Err(UrlError::HostTooLong {
            len: host.len(),
            max: MAX_HOST_LEN,
        });
    }
    if host.is_empty() || !host.chars().all(is_host_char) {
        return Err(UrlError::Malformed);
    }

    let mut tail = &rest[host_end..];
    let port = match tail.strip_prefix(':') {
        Some(after_colon) => {
            let digits_end = after_colon
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_colon.len());
            let digits = &after_colon[..digits_end];
            tail = &after_colon[digits_end..];
            if !tail.starts_with('/') {
                return Err(UrlError::Malformed);
            }
            parse_port(digits)?
        }
        None => DEFAULT_HTTP_PORT,
    };

    if !tail.starts_with('/') {
        return Err(UrlError::Malformed);
    }

    Ok(ParsedUrl {
        host: host.to_string(),
        port,
        path: tail,
    })
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_'
}

fn parse_port(digits: &str) -> Result<u16, UrlError> {
    // u32 parse fails on overflow, so huge digit strings land here too.
    digits
        .parse::<u32>()
        .ok()
        .and_then(|p| u16::try_from(p).ok())
        .ok_or_else(|| UrlError::InvalidPort(digits.to_string()))
}
