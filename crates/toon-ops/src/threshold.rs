//! Adaptive mean thresholding.
//!
//! Each pixel is compared against the rounded mean of its `block_size`
//! neighbourhood shifted by a constant, which copes with uneven lighting
//! far better than a single global cut-off.

use crate::filter::box_mean;
use crate::{OpsError, OpsResult};
use toon_core::GrayImage;
use tracing::trace;

/// How pixels above or below the local threshold are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdType {
    /// `max_value` where the pixel exceeds `mean - C`, else 0.
    #[default]
    Binary,
    /// 0 where the pixel exceeds `mean - C`, else `max_value`.
    BinaryInv,
}

/// Binarizes `src` against its local mean minus `c`.
///
/// `c` is rounded up for [`ThresholdType::Binary`] and down for
/// [`ThresholdType::BinaryInv`]; the mean uses replicated borders.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] unless `block_size` is odd and greater
/// than 1.
///
/// # Example
///
/// ```rust
/// use toon_core::GrayImage;
/// use toon_ops::threshold::{adaptive_threshold, ThresholdType};
///
/// let flat = GrayImage::filled(8, 8, [120]);
/// let out = adaptive_threshold(&flat, 255, ThresholdType::Binary, 9, 2.0).unwrap();
/// assert!(out.data().iter().all(|&v| v == 255));
/// ```
pub fn adaptive_threshold(
    src: &GrayImage,
    max_value: u8,
    kind: ThresholdType,
    block_size: u32,
    c: f64,
) -> OpsResult<GrayImage> {
    if block_size % 2 == 0 || block_size <= 1 {
        return Err(OpsError::InvalidParameter(format!(
            "block size must be odd and greater than 1, got {}",
            block_size
        )));
    }
    let (width, height) = src.dimensions();
    trace!(width, height, block_size, c, ?kind, "adaptive_threshold");

    let mean = box_mean(src, block_size)?;
    // |delta| beyond 255 already decides every pixel
    let delta = match kind {
        ThresholdType::Binary => c.ceil(),
        ThresholdType::BinaryInv => c.floor(),
    }
    .clamp(-256.0, 256.0) as i32;

    let out = src
        .data()
        .iter()
        .zip(mean.data())
        .map(|(&v, &m)| {
            let above = v as i32 - m as i32 > -delta;
            match (kind, above) {
                (ThresholdType::Binary, true) | (ThresholdType::BinaryInv, false) => max_value,
                _ => 0,
            }
        })
        .collect();

    Ok(GrayImage::from_data(width, height, out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_block_size() {
        let img = GrayImage::new(4, 4);
        for block in [0, 1, 4, 10] {
            assert!(matches!(
                adaptive_threshold(&img, 255, ThresholdType::Binary, block, 2.0),
                Err(OpsError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_dark_pixel_on_light_background() {
        let mut img = GrayImage::filled(9, 9, [200]);
        img.set_pixel(4, 4, [40]);
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 3, 2.0).unwrap();
        assert_eq!(out.pixel(4, 4), [0]);
        assert_eq!(out.pixel(0, 0), [255]);
        // A neighbour's mean drops below it, so it stays background
        assert_eq!(out.pixel(3, 4), [255]);
    }

    #[test]
    fn test_c_rounding() {
        // Pixel 3 below its window mean: mean 100 * 8/9 + 97/9 = 99.67 -> 100
        let mut img = GrayImage::filled(3, 3, [100]);
        img.set_pixel(1, 1, [97]);

        // Binary with c = 2.5 uses 3: -3 > -3 is false
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 3, 2.5).unwrap();
        assert_eq!(out.pixel(1, 1), [0]);
        // c = 3.5 -> 4: -3 > -4
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 3, 3.5).unwrap();
        assert_eq!(out.pixel(1, 1), [255]);
        // Inverse with c = 3.5 uses floor 3: -3 > -3 is false -> max
        let out = adaptive_threshold(&img, 255, ThresholdType::BinaryInv, 3, 3.5).unwrap();
        assert_eq!(out.pixel(1, 1), [255]);
    }

    #[test]
    fn test_extreme_c_saturates() {
        let img = GrayImage::filled(4, 4, [100]);

        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 3, -1e10).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 3, 1e10).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));

        let out = adaptive_threshold(&img, 255, ThresholdType::BinaryInv, 3, f64::NEG_INFINITY).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));
        let out = adaptive_threshold(&img, 255, ThresholdType::BinaryInv, 3, f64::INFINITY).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_large_block_size() {
        let img = GrayImage::filled(4, 4, [255]);
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 5001, 2.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_output_is_binary() {
        let img = GrayImage::from_fn(16, 16, |x, y| [((x * 37 + y * 91) % 256) as u8]);
        let out = adaptive_threshold(&img, 255, ThresholdType::Binary, 5, 2.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));

        let inv = adaptive_threshold(&img, 255, ThresholdType::BinaryInv, 5, 2.0).unwrap();
        assert!(inv.data().iter().all(|&v| v == 0 || v == 255));
    }
}
