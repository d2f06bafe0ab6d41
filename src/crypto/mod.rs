//! Cryptographic operations for Pixveil.
//!
//! This module provides:
//! - P-256 key loading, generation and PEM handling
//! - The hybrid header envelope (ephemeral ECDH + AES-128-GCM)
//! - Password-based body encryption (SHA-256 key derivation + AES-128-GCM)
//! - Session password generation and password-to-seed derivation

pub mod envelope;
pub mod keys;
pub mod session;
pub mod symmetric;

pub use envelope::{
    decrypt_header, encrypt_header, EnvelopeError, ENCRYPTED_HEADER_LEN,
    EPHEMERAL_PUBLIC_KEY_LEN, HEADER_PLAINTEXT_LEN,
};
pub use keys::{generate_key_pair, load_key, parse_key_pem, save_key_pair, KeyError, LoadedKey};
pub use session::{generate_session_password, password_to_seed, SESSION_PASSWORD_LEN};
pub use symmetric::{decrypt_body, encrypt_body, SymmetricError};
