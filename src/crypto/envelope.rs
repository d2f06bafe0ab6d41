//! Hybrid header envelope: ephemeral P-256 ECDH plus AES-128-GCM.
//!
//! The header carries the body length and session password, sealed so only
//! the receiver's private key can open it:
//!
//! 1. Generate an ephemeral P-256 key pair (discarded after use).
//! 2. ECDH with the receiver's public key.
//! 3. Symmetric key = SHA-256(shared secret) truncated to 16 bytes.
//! 4. AES-128-GCM with a random 12-byte nonce.
//!
//! Blob layout: ephemeral public key (65-byte uncompressed SEC1 point) ||
//! nonce (12) || ciphertext+tag. The header plaintext is always
//! [`HEADER_PLAINTEXT_LEN`] bytes, which pins the whole blob to
//! [`ENCRYPTED_HEADER_LEN`] bytes and lets the decoder read a known number of
//! pixels before any decryption has happened.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use p256::ecdh::EphemeralSecret;
use p256::{EncodedPoint, PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::crypto::session::SESSION_PASSWORD_LEN;

/// Uncompressed SEC1 encoding of a P-256 point.
pub const EPHEMERAL_PUBLIC_KEY_LEN: usize = 65;

/// AES-GCM nonce size.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag size.
pub const TAG_LEN: usize = 16;

/// 4-byte little-endian body length plus the session password.
pub const HEADER_PLAINTEXT_LEN: usize = 4 + SESSION_PASSWORD_LEN;

/// Total header blob size. Constant across all hides because the plaintext
/// size is fixed: 65 + 12 + 36 + 16 = 129 bytes.
pub const ENCRYPTED_HEADER_LEN: usize =
    EPHEMERAL_PUBLIC_KEY_LEN + NONCE_LEN + HEADER_PLAINTEXT_LEN + TAG_LEN;

/// Errors that can occur in the header envelope.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Header blob too short: {got} bytes")]
    HeaderBlobTooShort { got: usize },

    #[error("Embedded ephemeral key is not a valid curve point")]
    MalformedKey,

    #[error("Header authentication failed (wrong key or corrupted data)")]
    AuthenticationFailed,

    #[error("Header encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Derives the 128-bit AEAD key from an ECDH shared secret.
fn derive_key(shared_secret: &[u8]) -> [u8; 16] {
    let digest = Sha256::digest(shared_secret);
    let mut key = [0u8; 16];
    key.copy_from_slice(&digest[..16]);
    key
}

/// Seals the header plaintext for the receiver.
///
/// A fresh ephemeral key pair is generated per call and dropped afterwards,
/// so compromise of long-term keys never exposes past headers' sender side.
pub fn encrypt_header(
    receiver_public: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let ephemeral_secret = EphemeralSecret::random(&mut OsRng);
    let ephemeral_public = PublicKey::from(&ephemeral_secret);

    let shared_secret = ephemeral_secret.diffie_hellman(receiver_public);
    let key = derive_key(shared_secret.raw_secret_bytes().as_slice());

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes128Gcm::new_from_slice(&key)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    let point = EncodedPoint::from(ephemeral_public);
    let mut blob = Vec::with_capacity(EPHEMERAL_PUBLIC_KEY_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(point.as_bytes());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(blob)
}

/// Opens a header blob with the receiver's private key.
///
/// Wrong key and corrupted data are indistinguishable: both surface as
/// [`EnvelopeError::AuthenticationFailed`].
pub fn decrypt_header(
    receiver_secret: &SecretKey,
    blob: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    if blob.len() < EPHEMERAL_PUBLIC_KEY_LEN + NONCE_LEN + TAG_LEN {
        return Err(EnvelopeError::HeaderBlobTooShort { got: blob.len() });
    }

    let ephemeral_public = PublicKey::from_sec1_bytes(&blob[..EPHEMERAL_PUBLIC_KEY_LEN])
        .map_err(|_| EnvelopeError::MalformedKey)?;

    let shared_secret = p256::ecdh::diffie_hellman(
        receiver_secret.to_nonzero_scalar(),
        ephemeral_public.as_affine(),
    );
    let key = derive_key(shared_secret.raw_secret_bytes().as_slice());

    let nonce =
        Nonce::from_slice(&blob[EPHEMERAL_PUBLIC_KEY_LEN..EPHEMERAL_PUBLIC_KEY_LEN + NONCE_LEN]);
    let ciphertext = &blob[EPHEMERAL_PUBLIC_KEY_LEN + NONCE_LEN..];

    let cipher = Aes128Gcm::new_from_slice(&key)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| EnvelopeError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::generate_key_pair;

    fn header_plaintext(fill: u8) -> Vec<u8> {
        vec![fill; HEADER_PLAINTEXT_LEN]
    }

    #[test]
    fn test_roundtrip() {
        let (secret, public) = generate_key_pair();
        let plaintext = header_plaintext(0x42);

        let blob = encrypt_header(&public, &plaintext).unwrap();
        let decrypted = decrypt_header(&secret, &blob).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_blob_has_fixed_size() {
        let (_, public) = generate_key_pair();

        // Different plaintexts, different sessions: size never changes
        for fill in [0x00, 0x5A, 0xFF] {
            let blob = encrypt_header(&public, &header_plaintext(fill)).unwrap();
            assert_eq!(blob.len(), ENCRYPTED_HEADER_LEN);
            assert_eq!(blob.len(), 129);
        }
    }

    #[test]
    fn test_uncompressed_point_prefix() {
        let (_, public) = generate_key_pair();
        let blob = encrypt_header(&public, &header_plaintext(1)).unwrap();
        // SEC1 uncompressed points start with 0x04
        assert_eq!(blob[0], 0x04);
    }

    #[test]
    fn test_wrong_key_fails_closed() {
        let (_, public) = generate_key_pair();
        let (wrong_secret, _) = generate_key_pair();

        let blob = encrypt_header(&public, &header_plaintext(7)).unwrap();
        let result = decrypt_header(&wrong_secret, &blob);

        assert!(matches!(result, Err(EnvelopeError::AuthenticationFailed)));
    }

    #[test]
    fn test_tampered_blob_fails_auth() {
        let (secret, public) = generate_key_pair();
        let mut blob = encrypt_header(&public, &header_plaintext(9)).unwrap();

        let last = blob.len() - 1;
        blob[last] ^= 0x01;

        let result = decrypt_header(&secret, &blob);
        assert!(matches!(result, Err(EnvelopeError::AuthenticationFailed)));
    }

    #[test]
    fn test_short_blob_rejected() {
        let (secret, _) = generate_key_pair();
        let result = decrypt_header(&secret, &[0u8; EPHEMERAL_PUBLIC_KEY_LEN]);
        assert!(matches!(
            result,
            Err(EnvelopeError::HeaderBlobTooShort { got: 65 })
        ));
    }

    #[test]
    fn test_malformed_point_rejected() {
        let (secret, _) = generate_key_pair();
        // Right length, but the leading bytes are not a valid curve point
        let blob = vec![0xFFu8; ENCRYPTED_HEADER_LEN];
        let result = decrypt_header(&secret, &blob);
        assert!(matches!(result, Err(EnvelopeError::MalformedKey)));
    }

    #[test]
    fn test_ephemeral_key_differs_per_call() {
        let (_, public) = generate_key_pair();
        let a = encrypt_header(&public, &header_plaintext(3)).unwrap();
        let b = encrypt_header(&public, &header_plaintext(3)).unwrap();
        assert_ne!(
            a[..EPHEMERAL_PUBLIC_KEY_LEN],
            b[..EPHEMERAL_PUBLIC_KEY_LEN]
        );
    }
}
