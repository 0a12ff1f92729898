//! Cipher error types.

/// Errors from encrypting or decrypting a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// The algorithm name is not one of the supported algorithms.
    #[error("unsupported algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    /// The key does not have the length the algorithm requires.
    #[error("invalid key size for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The ciphertext is not valid base64.
    #[error("could not base64 decode input: {0}")]
    Base64Decode(String),

    /// The decoded ciphertext is shorter than one IV.
    #[error("ciphertext too short: {actual} bytes, need at least {block_size}")]
    CiphertextTooShort { block_size: usize, actual: usize },
}

/// Result type for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;
