//! The cartoon filter: smoothed colors masked by bold edges.

use crate::composite::bitwise_and;
use crate::edges::{edge_mask, EdgeParams};
use crate::smooth::{smooth_colors, BilateralParams};
use crate::OpsResult;
use toon_core::RgbImage;
use tracing::{debug, info};

/// Full parameter set of the cartoon filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartoonParams {
    /// Number of bilateral passes.
    pub passes: u32,
    /// Bilateral filter settings used by every pass.
    pub bilateral: BilateralParams,
    /// Edge mask settings.
    pub edges: EdgeParams,
}

impl CartoonParams {
    /// Stronger smoothing tuned for portraits: 8 passes at sigma 300.
    pub const PORTRAIT: Self = Self {
        passes: 8,
        bilateral: BilateralParams::new(9, 300.0, 300.0),
        edges: EdgeParams::new(7, 9, 2.0),
    };
}

impl Default for CartoonParams {
    fn default() -> Self {
        Self {
            passes: 7,
            bilateral: BilateralParams::default(),
            edges: EdgeParams::default(),
        }
    }
}

/// Turns a color image into a cartoon.
///
/// The color branch smooths the original `passes` times; the edge branch
/// works on the original too. The result is their bitwise AND, so edges
/// are drawn black over flat color patches.
///
/// # Errors
///
/// Propagates invalid kernel or block sizes from the edge branch.
///
/// # Example
///
/// ```rust
/// use toon_core::RgbImage;
/// use toon_ops::{cartoonify, CartoonParams};
///
/// let img = RgbImage::filled(32, 24, [200, 150, 100]);
/// let out = cartoonify(&img, &CartoonParams::default()).unwrap();
/// assert_eq!(out.dimensions(), (32, 24));
/// ```
pub fn cartoonify(src: &RgbImage, params: &CartoonParams) -> OpsResult<RgbImage> {
    let (width, height) = src.dimensions();
    info!(width, height, passes = params.passes, "cartoonify");

    let mask = edge_mask(src, &params.edges)?;
    let colors = smooth_colors(src, params.passes, &params.bilateral)?;
    let out = bitwise_and(&colors, &mask)?;

    debug!(
        edge_pixels = mask.data().iter().step_by(3).filter(|&&v| v == 0).count(),
        "cartoonify done"
    );
    Ok(out)
}
