//! Cover image handling and bit I/O at selected pixels.
//!
//! Wraps an owned RGBA8 buffer with load/save plumbing and the two
//! steganographic primitives: writing a bit stream into the LSBs of a point
//! sequence and reading it back. Lossless formats only; saving to a lossy
//! format would destroy the embedded bits.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::bits::{pack_bits_into_pixel, unpack_bits_from_pixel, BitCodecError};
use crate::points::Point;

/// Errors that can occur while handling a cover image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image load error: {0}")]
    LoadError(String),

    #[error("Image save error: {0}")]
    SaveError(String),

    #[error("Not enough points to hold all bits: {bits} bits, {points} points")]
    NotEnoughPoints { bits: usize, points: usize },

    #[error(transparent)]
    BitCodec(#[from] BitCodecError),
}

/// An owned, mutable cover image.
pub struct CoverImage {
    image: RgbaImage,
}

impl CoverImage {
    /// Loads a cover image from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let image = image::open(path).map_err(|e| ImageError::LoadError(e.to_string()))?;
        Ok(Self {
            image: image.to_rgba8(),
        })
    }

    /// Loads a cover image from in-memory encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| ImageError::LoadError(e.to_string()))?;
        Ok(Self {
            image: image.to_rgba8(),
        })
    }

    /// Wraps an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Total number of pixels, the linear index space for zones.
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Writes a bit stream into the LSBs of the given points, three bits per
    /// pixel in point order. A short final triple is padded with 0 bits.
    pub fn write_bits_at_points(
        &mut self,
        bits: &[u8],
        points: &[Point],
    ) -> Result<(), ImageError> {
        if points.len() * 3 < bits.len() {
            return Err(ImageError::NotEnoughPoints {
                bits: bits.len(),
                points: points.len(),
            });
        }

        for (chunk, point) in bits.chunks(3).zip(points) {
            let triple = [
                chunk[0],
                chunk.get(1).copied().unwrap_or(0),
                chunk.get(2).copied().unwrap_or(0),
            ];
            let pixel = self.image.get_pixel_mut(point.x, point.y);
            pack_bits_into_pixel(triple, pixel)?;
        }

        Ok(())
    }

    /// Reads back 3 bits per point, in point order.
    pub fn read_bits_at_points(&self, points: &[Point]) -> Vec<u8> {
        let mut bits = Vec::with_capacity(points.len() * 3);
        for point in points {
            let pixel = self.image.get_pixel(point.x, point.y);
            bits.extend_from_slice(&unpack_bits_from_pixel(pixel));
        }
        bits
    }

    /// Saves the image to a file. The format is inferred from the extension;
    /// use a lossless one (PNG, BMP).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        self.image
            .save(path)
            .map_err(|e| ImageError::SaveError(e.to_string()))
    }

    /// Encodes the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageError::SaveError(e.to_string()))?;
        Ok(bytes)
    }
}
