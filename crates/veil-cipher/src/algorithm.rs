//! Supported algorithms and their key requirements.

use std::fmt;
use std::str::FromStr;

use crate::error::CipherError;

/// Canonical names, in the order they are advertised.
const SUPPORTED: &[&str] = &["aes128", "aes192", "aes256", "des"];

/// A supported symmetric algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Aes128,
    Aes192,
    Aes256,
    Des,
}

impl Algorithm {
    /// Every supported algorithm, in advertised order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Aes128,
        Algorithm::Aes192,
        Algorithm::Aes256,
        Algorithm::Des,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Aes128 => "aes128",
            Algorithm::Aes192 => "aes192",
            Algorithm::Aes256 => "aes256",
            Algorithm::Des => "des",
        }
    }

    /// Required key length in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            Algorithm::Aes128 => 16,
            Algorithm::Aes192 => 24,
            Algorithm::Aes256 => 32,
            Algorithm::Des => 8,
        }
    }

    /// Cipher block size in bytes, which is also the IV length.
    pub fn block_size(&self) -> usize {
        match self {
            Algorithm::Aes128 | Algorithm::Aes192 | Algorithm::Aes256 => 16,
            Algorithm::Des => 8,
        }
    }

    /// Normalise a user-supplied name: lowercase, `-` removed.
    ///
    /// `"AES-128"` becomes `"aes128"`. The result is not checked for support.
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase().replace('-', "")
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::normalize(s).as_str() {
            "aes128" => Ok(Algorithm::Aes128),
            "aes192" => Ok(Algorithm::Aes192),
            "aes256" => Ok(Algorithm::Aes256),
            "des" => Ok(Algorithm::Des),
            _ => Err(CipherError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Canonical names of every supported algorithm.
pub fn supported_algorithms() -> &'static [&'static str] {
    SUPPORTED
}

/// Whether `key` has the right length for `algorithm`.
pub fn validate_key_size(algorithm: Algorithm, key: &[u8]) -> bool {
    key.len() == algorithm.key_len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_matches_all() {
        let names: Vec<&str> = Algorithm::ALL.iter().map(Algorithm::as_str).collect();
        assert_eq!(names, supported_algorithms());
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("aes128".parse::<Algorithm>(), Ok(Algorithm::Aes128));
        assert_eq!("AES-192".parse::<Algorithm>(), Ok(Algorithm::Aes192));
        assert_eq!(" Aes256 ".parse::<Algorithm>(), Ok(Algorithm::Aes256));
        assert_eq!("DES".parse::<Algorithm>(), Ok(Algorithm::Des));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "rot13".parse::<Algorithm>(),
            Err(CipherError::UnsupportedAlgorithm("rot13".to_string()))
        );
        assert!("".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_validate_key_size() {
        assert!(validate_key_size(Algorithm::Aes128, b"0123456789abcdef"));
        assert!(!validate_key_size(Algorithm::Aes128, b"0123456789abcde"));
        assert!(validate_key_size(Algorithm::Aes192, &[0; 24]));
        assert!(validate_key_size(Algorithm::Aes256, &[0; 32]));
        assert!(!validate_key_size(Algorithm::Aes256, &[0; 16]));
        assert!(validate_key_size(Algorithm::Des, b"01234567"));
        assert!(!validate_key_size(Algorithm::Des, &[]));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(Algorithm::Aes192.to_string(), "aes192");
        assert_eq!(Algorithm::normalize("AES-256"), "aes256");
    }
}
