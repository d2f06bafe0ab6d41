//! Steganographic image layer.

pub mod image;

pub use image::{CoverImage, ImageError};
