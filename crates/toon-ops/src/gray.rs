//! Color to grayscale conversion and back.

use crate::parallel::for_each_row;
use crate::OpsResult;
use toon_core::{GrayImage, RgbImage};
use tracing::trace;

// BT.601 luma weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Luma of a single RGB pixel.
///
/// ```rust
/// use toon_ops::gray::luma;
///
/// assert_eq!(luma([255, 255, 255]), 255);
/// assert_eq!(luma([255, 0, 0]), 76);
/// ```
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    ((R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32 + (1 << (SHIFT - 1)))
        >> SHIFT) as u8
}

/// Converts a color image to single-channel luma.
pub fn to_gray(src: &RgbImage) -> OpsResult<GrayImage> {
    let (width, height) = src.dimensions();
    trace!(width, height, "to_gray");

    let data = src.data();
    let mut out = vec![0u8; src.pixel_count()];
    for_each_row(&mut out, width as usize, |y, row| {
        let line = &data[y * width as usize * 3..(y + 1) * width as usize * 3];
        for (dst, px) in row.iter_mut().zip(line.chunks_exact(3)) {
            *dst = luma([px[0], px[1], px[2]]);
        }
    });

    Ok(GrayImage::from_data(width, height, out)?)
}

/// Replicates a single-channel image into three identical channels.
pub fn gray_to_rgb(src: &GrayImage) -> OpsResult<RgbImage> {
    let (width, height) = src.dimensions();
    trace!(width, height, "gray_to_rgb");
    let data = src.data().iter().flat_map(|&v| [v, v, v]).collect();
    Ok(RgbImage::from_data(width, height, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_primaries() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
        assert_eq!(luma([20, 40, 160]), 48);
    }

    #[test]
    fn test_gray_is_stable() {
        for v in [0u8, 1, 77, 128, 200, 255] {
            assert_eq!(luma([v, v, v]), v);
        }
    }

    #[test]
    fn test_to_gray_image() {
        let img = RgbImage::from_fn(3, 2, |x, _| [x as u8 * 100, x as u8 * 100, x as u8 * 100]);
        let gray = to_gray(&img).unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.data(), &[0, 100, 200, 0, 100, 200]);
    }

    #[test]
    fn test_gray_to_rgb() {
        let gray = GrayImage::from_data(2, 1, vec![0, 255]).unwrap();
        let rgb = gray_to_rgb(&gray).unwrap();
        assert_eq!(rgb.data(), &[0, 0, 0, 255, 255, 255]);
    }
}
