//! Bit stream codec for LSB steganography.
//!
//! Converts between byte sequences and ordered bit sequences (MSB first), and
//! packs bit triples into the least significant bits of a pixel's RGB
//! channels. Three payload bits ride in each pixel; the alpha channel is never
//! touched.

use image::Rgba;
use thiserror::Error;

/// Errors that can occur in the bit codec.
#[derive(Error, Debug)]
pub enum BitCodecError {
    #[error("Bit value must be 0 or 1, got {0}")]
    InvalidBitValue(u8),
}

/// Expands bytes into individual bits, most significant bit first.
///
/// The output length is always `8 * bytes.len()`.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Groups bits back into bytes, MSB first.
///
/// If the final group has fewer than 8 bits, the missing low-order bits are
/// treated as 0. Callers reading a fixed-length value should truncate the bit
/// stream to an exact multiple of 8 beforehand.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (offset, bit) in chunk.iter().enumerate() {
            if *bit == 1 {
                byte |= 1 << (7 - offset);
            }
        }
        bytes.push(byte);
    }
    bytes
}

/// Sets the LSBs of the red, green and blue channels to the three given bits,
/// in that order. Alpha is left untouched.
pub fn pack_bits_into_pixel(bits: [u8; 3], pixel: &mut Rgba<u8>) -> Result<(), BitCodecError> {
    for (channel, bit) in bits.iter().enumerate() {
        match bit {
            0 => pixel.0[channel] &= 0xFE,
            1 => pixel.0[channel] |= 1,
            other => return Err(BitCodecError::InvalidBitValue(*other)),
        }
    }
    Ok(())
}

/// Reads the LSBs of the red, green and blue channels, in that order.
pub fn unpack_bits_from_pixel(pixel: &Rgba<u8>) -> [u8; 3] {
    [pixel.0[0] & 1, pixel.0[1] & 1, pixel.0[2] & 1]
}

/// Number of pixels needed to carry `bit_count` bits at 3 bits per pixel.
pub fn pixels_needed(bit_count: usize) -> usize {
    bit_count.div_ceil(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_bits_msb_first() {
        // 0xA5 = 1010 0101
        let bits = bytes_to_bits(&[0xA5]);
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_bits_length_law() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(bytes_to_bits(&data).len(), 8 * data.len());
    }

    #[test]
    fn test_bit_roundtrip() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(bits_to_bytes(&bytes_to_bits(&data)), data);
    }

    #[test]
    fn test_bits_to_bytes_pads_short_tail_with_zeros() {
        // 5 bits: 1101 1 -> byte 1101 1000 = 0xD8
        let bytes = bits_to_bytes(&[1, 1, 0, 1, 1]);
        assert_eq!(bytes, vec![0xD8]);
    }

    #[test]
    fn test_empty_roundtrip() {
        assert!(bytes_to_bits(&[]).is_empty());
        assert!(bits_to_bytes(&[]).is_empty());
    }

    #[test]
    fn test_pack_bits_into_pixel() {
        let mut pixel = Rgba([0xFF, 0xFF, 0xFF, 0x80]);
        pack_bits_into_pixel([0, 1, 0], &mut pixel).unwrap();

        assert_eq!(pixel.0[0], 0xFE);
        assert_eq!(pixel.0[1], 0xFF);
        assert_eq!(pixel.0[2], 0xFE);
        // Alpha must never change
        assert_eq!(pixel.0[3], 0x80);
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        for bits in [[0, 0, 0], [1, 1, 1], [1, 0, 1], [0, 1, 0]] {
            let mut pixel = Rgba([0x12, 0x34, 0x56, 0xFF]);
            pack_bits_into_pixel(bits, &mut pixel).unwrap();
            assert_eq!(unpack_bits_from_pixel(&pixel), bits);
        }
    }

    #[test]
    fn test_invalid_bit_value_rejected() {
        let mut pixel = Rgba([0, 0, 0, 0]);
        let result = pack_bits_into_pixel([0, 2, 0], &mut pixel);
        assert!(matches!(result, Err(BitCodecError::InvalidBitValue(2))));
    }

    #[test]
    fn test_pixels_needed() {
        assert_eq!(pixels_needed(0), 0);
        assert_eq!(pixels_needed(1), 1);
        assert_eq!(pixels_needed(3), 1);
        assert_eq!(pixels_needed(4), 2);
        assert_eq!(pixels_needed(1032), 344);
    }
}
