//! Session password generation and seed derivation.
//!
//! Each hide operation creates a one-time alphanumeric password that doubles
//! as the body encryption secret and, hashed down to a `u64`, as the seed for
//! the body pixel zone. The password is drawn from the OS CSPRNG; it only ever
//! leaves the process encrypted inside the header envelope.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a session password in characters. The header plaintext layout
/// depends on this being fixed.
pub const SESSION_PASSWORD_LEN: usize = 32;

/// Generates a fresh random session password.
pub fn generate_session_password() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(SESSION_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// Derives the body zone seed from a session password.
///
/// SHA-256 truncated to the first 8 bytes, little-endian. Encoder and decoder
/// must agree on this mapping exactly.
pub fn password_to_seed(password: &str) -> u64 {
    let digest = Sha256::digest(password.as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}
