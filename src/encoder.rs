//! The hide pipeline.
//!
//! Sequences one end-to-end embedding: session password, body encryption,
//! header envelope, point generation for both zones, then the pixel writes.
//! Every capacity check happens before the first pixel is touched, so a
//! failing hide leaves the image unmodified.

use p256::PublicKey;
use thiserror::Error;

use crate::bits::{bytes_to_bits, pixels_needed};
use crate::crypto::envelope::{encrypt_header, EnvelopeError};
use crate::crypto::session::{generate_session_password, password_to_seed};
use crate::crypto::symmetric::{encrypt_body, SymmetricError};
use crate::points::{generate_points, PointError};
use crate::stego::{CoverImage, ImageError};
use crate::{MASTER_SEED, SPLIT_POINT};

/// Errors that can occur during hide.
#[derive(Error, Debug)]
pub enum HideError {
    #[error("Image too small: {actual} pixels, the header zone alone needs {needed}")]
    ImageTooSmall { needed: usize, actual: usize },

    #[error("Body encryption failed: {0}")]
    Body(#[from] SymmetricError),

    #[error("Header encryption failed: {0}")]
    Header(#[from] EnvelopeError),

    #[error(transparent)]
    Points(#[from] PointError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Embeds `payload` in `image` so that only the holder of the private key
/// matching `receiver_public` can recover it.
///
/// The image is mutated in place; the caller decides where to save it.
pub fn hide(
    image: &mut CoverImage,
    receiver_public: &PublicKey,
    payload: &[u8],
) -> Result<(), HideError> {
    let total_pixels = image.pixel_count();
    if total_pixels <= SPLIT_POINT {
        return Err(HideError::ImageTooSmall {
            needed: SPLIT_POINT + 1,
            actual: total_pixels,
        });
    }

    let session_password = generate_session_password();

    let body_ciphertext = encrypt_body(payload, &session_password)?;

    // Header plaintext: 4-byte LE body length + session password (36 bytes)
    let mut header_plaintext = Vec::with_capacity(4 + session_password.len());
    header_plaintext.extend_from_slice(&(body_ciphertext.len() as u32).to_le_bytes());
    header_plaintext.extend_from_slice(session_password.as_bytes());

    let header_blob = encrypt_header(receiver_public, &header_plaintext)?;

    let header_bits = bytes_to_bits(&header_blob);
    let body_bits = bytes_to_bits(&body_ciphertext);

    // Resolve both point sets before writing anything: all-or-nothing
    let header_points = generate_points(
        image.width(),
        image.height(),
        MASTER_SEED,
        pixels_needed(header_bits.len()),
        0,
        SPLIT_POINT,
    )?;

    let body_seed = password_to_seed(&session_password);
    let body_points = generate_points(
        image.width(),
        image.height(),
        body_seed,
        pixels_needed(body_bits.len()),
        SPLIT_POINT,
        total_pixels,
    )?;

    image.write_bits_at_points(&header_bits, &header_points)?;
    image.write_bits_at_points(&body_bits, &body_points)?;

    Ok(())
}
