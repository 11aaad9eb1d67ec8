//! Result channel: named numeric variables published by a download.
//!
//! Values are stored as lowercase hex without a `0x` prefix, the way a
//! bootloader environment keeps `fileaddr` and `filesize`.

mod memory;
mod store;

pub use memory::MemoryEnv;
pub use store::EnvStore;

use thiserror::Error;

/// Destination address of the last download, published before it starts.
pub const FILEADDR: &str = "fileaddr";
/// Byte count of the last successful download.
pub const FILESIZE: &str = "filesize";

/// A variable could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot set {name}: {reason}")]
pub struct PublishError {
    pub name: String,
    pub reason: String,
}

/// Where a download publishes its results.
pub trait ResultChannel {
    fn publish(&mut self, name: &str, value: u64) -> Result<(), PublishError>;
}

impl<T: ResultChannel + ?Sized> ResultChannel for &mut T {
    fn publish(&mut self, name: &str, value: u64) -> Result<(), PublishError> {
        (**self).publish(name, value)
    }
}

pub fn format_hex(value: u64) -> String {
    format!("{:x}", value)
}

/// Parse a stored value, accepting an optional `0x`/`0X` prefix.
pub fn parse_hex(value: &str) -> Option<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_format_and_parse() {
        assert_eq!(format_hex(1161), "489");
        assert_eq!(format_hex(0x8200_0000), "82000000");
        assert_eq!(parse_hex("489"), Some(1161));
        assert_eq!(parse_hex("0x82000000"), Some(0x8200_0000));
        assert_eq!(parse_hex("0XfF"), Some(255));
        assert_eq!(parse_hex("zz"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn publish_through_mut_ref() {
        fn publish_size<R: ResultChannel>(mut channel: R) {
            channel.publish(FILESIZE, 16).unwrap();
        }
        let mut env = MemoryEnv::default();
        publish_size(&mut env);
        assert_eq!(env.get(FILESIZE), Some("10"));
    }
}
