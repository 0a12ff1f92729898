//! CFB-mode encryption with base64 framing.

use aes::{Aes128, Aes192, Aes256};
use base64::{Engine, engine::general_purpose::STANDARD};
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use cfb_mode::{Decryptor, Encryptor};
use des::Des;
use rand::RngCore;

use crate::algorithm::Algorithm;
use crate::error::{CipherError, Result};

/// Encrypt `plaintext` and return `base64(iv || ciphertext)`.
///
/// A fresh random IV is drawn for every call, so encrypting the same input
/// twice yields different outputs.
pub fn encrypt(algorithm: Algorithm, key: &[u8], plaintext: &[u8]) -> Result<String> {
    check_key(algorithm, key)?;

    let block_size = algorithm.block_size();
    let mut framed = vec![0u8; block_size + plaintext.len()];
    let (iv, body) = framed.split_at_mut(block_size);
    rand::rng().fill_bytes(iv);
    body.copy_from_slice(plaintext);

    encrypt_in_place(algorithm, key, iv, body)?;

    Ok(STANDARD.encode(&framed))
}

/// Decrypt a `base64(iv || ciphertext)` payload produced by [`encrypt`].
///
/// CFB has no integrity check: a wrong key yields garbage, not an error.
pub fn decrypt(algorithm: Algorithm, key: &[u8], ciphertext: &str) -> Result<Vec<u8>> {
    check_key(algorithm, key)?;

    let mut framed = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| CipherError::Base64Decode(e.to_string()))?;

    let block_size = algorithm.block_size();
    if framed.len() < block_size {
        return Err(CipherError::CiphertextTooShort {
            block_size,
            actual: framed.len(),
        });
    }

    let mut body = framed.split_off(block_size);
    decrypt_in_place(algorithm, key, &framed, &mut body)?;

    Ok(body)
}

fn check_key(algorithm: Algorithm, key: &[u8]) -> Result<()> {
    if key.len() == algorithm.key_len() {
        Ok(())
    } else {
        Err(invalid_key(algorithm, key))
    }
}

fn invalid_key(algorithm: Algorithm, key: &[u8]) -> CipherError {
    CipherError::InvalidKeyLength {
        algorithm: algorithm.as_str(),
        expected: algorithm.key_len(),
        actual: key.len(),
    }
}

fn encrypt_in_place(algorithm: Algorithm, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    let err = |_| invalid_key(algorithm, key);
    match algorithm {
        Algorithm::Aes128 => Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(err)?
            .encrypt(buf),
        Algorithm::Aes192 => Encryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(err)?
            .encrypt(buf),
        Algorithm::Aes256 => Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(err)?
            .encrypt(buf),
        Algorithm::Des => Encryptor::<Des>::new_from_slices(key, iv)
            .map_err(err)?
            .encrypt(buf),
    }
    Ok(())
}

fn decrypt_in_place(algorithm: Algorithm, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    let err = |_| invalid_key(algorithm, key);
    match algorithm {
        Algorithm::Aes128 => Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(err)?
            .decrypt(buf),
        Algorithm::Aes192 => Decryptor::<Aes192>::new_from_slices(key, iv)
            .map_err(err)?
            .decrypt(buf),
        Algorithm::Aes256 => Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(err)?
            .decrypt(buf),
        Algorithm::Des => Decryptor::<Des>::new_from_slices(key, iv)
            .map_err(err)?
            .decrypt(buf),
    }
    Ok(())
}
