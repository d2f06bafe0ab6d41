//! # Pixveil - Hide encrypted payloads in pixel noise
//!
//! Pixveil embeds a text payload in the least significant bits of an image's
//! pixels so that only the holder of the matching private key can locate and
//! recover it.
//!
//! ## How it works
//!
//! - A fresh 32-character session password is generated per hide operation.
//! - The payload is encrypted with AES-128-GCM under a key derived from the
//!   session password (body ciphertext).
//! - A 36-byte header (body length + session password) is sealed for the
//!   receiver with an ephemeral P-256 ECDH exchange plus AES-128-GCM.
//! - Pixels are addressed through seeded permutations of two disjoint zones:
//!   the header zone uses a public master seed, the body zone a seed derived
//!   from the session password. Without the private key an observer cannot
//!   recover the password, and without the password the body placement is
//!   unknown.
//!
//! ## Example
//!
//! ```no_run
//! use pixveil::crypto::keys::generate_key_pair;
//! use pixveil::stego::CoverImage;
//! use pixveil::{hide, reveal};
//!
//! let (secret, public) = generate_key_pair();
//!
//! let mut image = CoverImage::from_file("cover.png").unwrap();
//! hide(&mut image, &public, b"meet at dawn").unwrap();
//! image.save("output.png").unwrap();
//!
//! let encoded = CoverImage::from_file("output.png").unwrap();
//! let payload = reveal(&encoded, &secret).unwrap();
//! assert_eq!(payload, b"meet at dawn");
//! ```
//!
//! ## Modules
//!
//! - [`bits`]: byte/bit stream conversion and pixel LSB packing
//! - [`points`]: deterministic pixel selection within index zones
//! - [`crypto`]: key loading, the hybrid header envelope, body encryption
//! - [`stego`]: cover image handling and bit I/O at selected points
//! - [`encoder`] / [`decoder`]: the end-to-end hide and reveal pipelines

/// Public seed for the header zone permutation. A protocol parameter shared by
/// encoder and decoder, not a secret.
pub const MASTER_SEED: u64 = 1_234_567_890;

/// First pixel index of the body zone. Linear indices below this are reserved
/// for header material.
pub const SPLIT_POINT: usize = 5000;

pub mod bits;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod points;
pub mod stego;

// Re-export commonly used items at the crate root
pub use crypto::envelope::{EnvelopeError, ENCRYPTED_HEADER_LEN};
pub use crypto::keys::{load_key, KeyError, LoadedKey};
pub use crypto::session::{generate_session_password, password_to_seed, SESSION_PASSWORD_LEN};
pub use crypto::symmetric::{decrypt_body, encrypt_body, SymmetricError};
pub use decoder::{reveal, RevealError};
pub use encoder::{hide, HideError};
pub use points::{generate_points, Point, PointError};
pub use stego::{CoverImage, ImageError};
