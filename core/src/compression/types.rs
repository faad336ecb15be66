//! compression/types.rs
//! Codec identifiers and suffix resolution.

use std::fmt;

use crate::compression::constants::suffixes;
use crate::constants::magic;
use crate::types::{Result, StreamError};

/// Compression formats selectable by suffix token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    Gzip,
    Bzip2,
    Xz,
}

impl Codec {
    pub const ALL: [Codec; 3] = [Codec::Gzip, Codec::Bzip2, Codec::Xz];

    /// Exact, case-sensitive match on the token after the last `.`.
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.suffixes().iter().any(|s| *s == suffix))
            .ok_or_else(|| StreamError::UnknownSuffix { suffix: suffix.to_string() })
    }

    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Codec::Gzip => suffixes::GZIP,
            Codec::Bzip2 => suffixes::BZIP2,
            Codec::Xz => suffixes::XZ,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }

    /// Leading bytes of a stream in this format.
    pub fn magic(&self) -> &'static [u8] {
        match self {
            Codec::Gzip => magic::GZIP,
            Codec::Bzip2 => magic::BZIP2,
            Codec::Xz => magic::XZ,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_table() {
        assert_eq!(Codec::from_suffix("gz").unwrap(), Codec::Gzip);
        assert_eq!(Codec::from_suffix("gzip").unwrap(), Codec::Gzip);
        assert_eq!(Codec::from_suffix("bz2").unwrap(), Codec::Bzip2);
        assert_eq!(Codec::from_suffix("bzip2").unwrap(), Codec::Bzip2);
        assert_eq!(Codec::from_suffix("xz").unwrap(), Codec::Xz);
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert!(Codec::from_suffix("GZ").unwrap_err().is_unknown_suffix());
        assert!(Codec::from_suffix("txt").unwrap_err().is_unknown_suffix());
        assert!(Codec::from_suffix("").unwrap_err().is_unknown_suffix());
    }

    #[test]
    fn magic_prefixes() {
        assert_eq!(Codec::Gzip.magic(), b"\x1F\x8B");
        assert_eq!(Codec::Bzip2.magic(), b"BZh");
        assert_eq!(Codec::Xz.magic(), b"\xFD7zXZ\x00");
    }
}
