//! The reveal pipeline.
//!
//! Mirrors the hide pipeline exactly. The header blob size is known
//! analytically from the envelope's fixed sizes, so the decoder can read the
//! header zone before any decryption has happened, recover the session
//! password, and from it locate and decrypt the body.

use p256::SecretKey;
use thiserror::Error;

use crate::bits::{bits_to_bytes, pixels_needed};
use crate::crypto::envelope::{decrypt_header, EnvelopeError, ENCRYPTED_HEADER_LEN};
use crate::crypto::session::password_to_seed;
use crate::crypto::symmetric::{decrypt_body, SymmetricError};
use crate::points::{generate_points, PointError};
use crate::stego::CoverImage;
use crate::{MASTER_SEED, SPLIT_POINT};

/// Errors that can occur during reveal.
#[derive(Error, Debug)]
pub enum RevealError {
    #[error("Image too small: {actual} pixels, the header zone alone needs {needed}")]
    ImageTooSmall { needed: usize, actual: usize },

    #[error("Malformed header plaintext: {0}")]
    MalformedHeader(String),

    #[error("Header decryption failed: {0}")]
    Header(#[from] EnvelopeError),

    #[error("Body decryption failed: {0}")]
    Body(#[from] SymmetricError),

    #[error(transparent)]
    Points(#[from] PointError),
}

/// Recovers a payload hidden with [`crate::hide`], using the receiver's
/// private key.
pub fn reveal(image: &CoverImage, receiver_secret: &SecretKey) -> Result<Vec<u8>, RevealError> {
    let total_pixels = image.pixel_count();
    if total_pixels <= SPLIT_POINT {
        return Err(RevealError::ImageTooSmall {
            needed: SPLIT_POINT + 1,
            actual: total_pixels,
        });
    }

    // The header blob size is a protocol constant, known before decryption
    let header_bit_count = ENCRYPTED_HEADER_LEN * 8;
    let header_points = generate_points(
        image.width(),
        image.height(),
        MASTER_SEED,
        pixels_needed(header_bit_count),
        0,
        SPLIT_POINT,
    )?;

    let header_bits = image.read_bits_at_points(&header_points);
    let header_blob = bits_to_bytes(&header_bits[..header_bit_count]);

    let header_plaintext = decrypt_header(receiver_secret, &header_blob)?;
    let (body_length, session_password) = parse_header_plaintext(&header_plaintext)?;

    let body_bit_count = body_length * 8;
    let body_points = generate_points(
        image.width(),
        image.height(),
        password_to_seed(&session_password),
        pixels_needed(body_bit_count),
        SPLIT_POINT,
        total_pixels,
    )?;

    let body_bits = image.read_bits_at_points(&body_points);
    let body_ciphertext = bits_to_bytes(&body_bits[..body_bit_count]);

    let payload = decrypt_body(&body_ciphertext, &session_password)?;
    Ok(payload)
}

/// Splits the 36-byte header plaintext into body length and session password.
fn parse_header_plaintext(plaintext: &[u8]) -> Result<(usize, String), RevealError> {
    use crate::crypto::envelope::HEADER_PLAINTEXT_LEN;

    if plaintext.len() != HEADER_PLAINTEXT_LEN {
        return Err(RevealError::MalformedHeader(format!(
            "expected {} bytes, got {}",
            HEADER_PLAINTEXT_LEN,
            plaintext.len()
        )));
    }

    let body_length =
        u32::from_le_bytes([plaintext[0], plaintext[1], plaintext[2], plaintext[3]]) as usize;

    let session_password = std::str::from_utf8(&plaintext[4..])
        .map_err(|_| RevealError::MalformedHeader("session password is not UTF-8".to_string()))?
        .to_string();

    Ok((body_length, session_password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::generate_key_pair;
    use crate::encoder::hide;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> CoverImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        CoverImage::from_image(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn test_reveal_recovers_payload() {
        let (secret, public) = generate_key_pair();
        let mut image = create_test_image(100, 100);

        hide(&mut image, &public, b"hi").unwrap();
        let payload = reveal(&image, &secret).unwrap();

        assert_eq!(payload, b"hi");
    }

    #[test]
    fn test_reveal_without_hidden_data_fails_closed() {
        let (secret, _) = generate_key_pair();
        let image = create_test_image(100, 100);

        // The header zone decodes to noise; authentication must reject it
        let result = reveal(&image, &secret);
        assert!(matches!(
            result,
            Err(RevealError::Header(
                EnvelopeError::AuthenticationFailed | EnvelopeError::MalformedKey
            ))
        ));
    }

    #[test]
    fn test_reveal_on_small_image_fails() {
        let (secret, _) = generate_key_pair();
        let image = create_test_image(50, 50);
        assert!(matches!(
            reveal(&image, &secret),
            Err(RevealError::ImageTooSmall { actual: 2500, .. })
        ));
    }

    #[test]
    fn test_parse_header_plaintext() {
        let mut plaintext = vec![0u8; 36];
        plaintext[..4].copy_from_slice(&42u32.to_le_bytes());
        plaintext[4..].copy_from_slice("A".repeat(32).as_bytes());

        let (len, password) = parse_header_plaintext(&plaintext).unwrap();
        assert_eq!(len, 42);
        assert_eq!(password, "A".repeat(32));
    }

    #[test]
    fn test_parse_header_plaintext_wrong_length() {
        let result = parse_header_plaintext(&[0u8; 20]);
        assert!(matches!(result, Err(RevealError::MalformedHeader(_))));
    }
}
