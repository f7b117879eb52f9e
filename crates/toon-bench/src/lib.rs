//! Benchmarks for toonify operators.
//!
//! Run with: `cargo bench -p toon-bench`

use toon_core::RgbImage;

/// Deterministic test image: a diagonal gradient with a hashed speckle.
pub fn test_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let h = x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503);
        [
            ((x + y) % 256) as u8,
            ((x * 3) % 256) as u8 ^ (h >> 28) as u8,
            ((y * 5) % 256) as u8,
        ]
    })
}
