//! Password-based body encryption.
//!
//! The body ciphertext is keyed directly from the session password:
//! key = SHA-256(password) truncated to 16 bytes, then AES-128-GCM with a
//! random nonce. Output layout: nonce (12 bytes) || ciphertext+tag.
//!
//! Both directions use the same password; the reveal side recovers it from
//! the decrypted header.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// AES-GCM nonce size.
const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag size.
const TAG_LEN: usize = 16;

/// Errors that can occur during body encryption.
#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("Body ciphertext too short: {got} bytes")]
    CiphertextTooShort { got: usize },

    #[error("Body authentication failed (wrong password or corrupted data)")]
    AuthenticationFailed,

    #[error("Body encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Derives a 128-bit key from a password.
fn derive_key(password: &str) -> [u8; 16] {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; 16];
    key.copy_from_slice(&digest[..16]);
    key
}

/// Encrypts the payload under a password.
pub fn encrypt_body(plaintext: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    let key = derive_key(password);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes128Gcm::new_from_slice(&key)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypts a body ciphertext under a password.
pub fn decrypt_body(data: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    if data.len() < NONCE_LEN + TAG_LEN {
        return Err(SymmetricError::CiphertextTooShort { got: data.len() });
    }

    let key = derive_key(password);
    let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
    let ciphertext = &data[NONCE_LEN..];

    let cipher = Aes128Gcm::new_from_slice(&key)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SymmetricError::AuthenticationFailed)
}
