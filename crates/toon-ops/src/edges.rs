//! Edge mask extraction.
//!
//! Grayscale, median blur, adaptive threshold, then expansion back to three
//! channels so the mask can be ANDed with the color image directly. Edges
//! come out black (0), everything else white (255).

use crate::filter::median_blur;
use crate::gray::{gray_to_rgb, to_gray};
use crate::threshold::{adaptive_threshold, ThresholdType};
use crate::OpsResult;
use toon_core::RgbImage;
use tracing::debug;

/// Edge extraction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Median kernel size (odd, positive).
    pub median_ksize: u32,
    /// Adaptive threshold neighbourhood (odd, greater than 1).
    pub block_size: u32,
    /// Constant subtracted from the local mean.
    pub c: f64,
}

impl EdgeParams {
    /// Creates a parameter set.
    pub const fn new(median_ksize: u32, block_size: u32, c: f64) -> Self {
        Self {
            median_ksize,
            block_size,
            c,
        }
    }
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self::new(7, 9, 2.0)
    }
}

/// Computes the 3-channel binary edge mask of a color image.
pub fn edge_mask(src: &RgbImage, params: &EdgeParams) -> OpsResult<RgbImage> {
    debug!(
        median_ksize = params.median_ksize,
        block_size = params.block_size,
        c = params.c,
        "extracting edges"
    );
    let gray = to_gray(src)?;
    let blurred = median_blur(&gray, params.median_ksize)?;
    let mask = adaptive_threshold(&blurred, 255, ThresholdType::Binary, params.block_size, params.c)?;
    gray_to_rgb(&mask)
}
