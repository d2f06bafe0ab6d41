//! Deterministic pixel selection within index zones.
//!
//! A zone is a half-open range `[start, end)` of linear pixel indices over the
//! image's `width * height` pixel space. Point generation shuffles the whole
//! window with a seeded ChaCha generator and takes the first `count` entries,
//! so the same (seed, zone, count) always yields the same collision-free
//! coordinate sequence. The generator only has to be reproducible, not
//! cryptographically strong: placement secrecy comes from the seed being
//! unknown, not from the shuffle itself.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during point generation.
#[derive(Error, Debug)]
pub enum PointError {
    #[error("Invalid zone window: start {start} >= end {end}")]
    InvalidWindow { start: usize, end: usize },

    #[error("Zone too small: need {needed} pixels, window holds {available}")]
    InsufficientCapacity { needed: usize, available: usize },
}

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Deterministically selects `count` distinct pixel coordinates from the zone
/// `[start, end)` of linear indices.
///
/// The returned order is the order bits are written and read, so encoder and
/// decoder must call this with identical arguments.
pub fn generate_points(
    width: u32,
    _height: u32,
    seed: u64,
    count: usize,
    start: usize,
    end: usize,
) -> Result<Vec<Point>, PointError> {
    if end <= start {
        return Err(PointError::InvalidWindow { start, end });
    }

    let window = end - start;
    if count > window {
        return Err(PointError::InsufficientCapacity {
            needed: count,
            available: window,
        });
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..window).collect();
    indices.shuffle(&mut rng);

    let points = indices[..count]
        .iter()
        .map(|&offset| {
            let global = start + offset;
            Point {
                x: (global % width as usize) as u32,
                y: (global / width as usize) as u32,
            }
        })
        .collect();

    Ok(points)
}
