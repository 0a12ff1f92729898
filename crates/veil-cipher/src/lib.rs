//! Symmetric cipher helpers for Veil.
//!
//! A thin layer over the RustCrypto block ciphers. Every algorithm runs in
//! full-block CFB mode with a random IV; ciphertexts travel as
//! `base64(iv || ciphertext)` using the standard padded alphabet.
//!
//! This is a convenience wrapper for short-lived sessions. CFB provides no
//! integrity protection and DES is included only for compatibility.

mod algorithm;
mod cfb;
mod error;

pub use algorithm::{Algorithm, supported_algorithms, validate_key_size};
pub use cfb::{decrypt, encrypt};
pub use error::{CipherError, Result};
