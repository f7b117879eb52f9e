//! Edge-preserving color smoothing.
//!
//! A bilateral filter averages each pixel with the neighbours that are both
//! close in space and close in color, so flat regions are flattened further
//! while strong boundaries survive. Repeating it a few times is what gives
//! the cartoon look its posterized patches.
//!
//! # Example
//!
//! ```rust
//! use toon_core::RgbImage;
//! use toon_ops::smooth::{smooth_colors, BilateralParams};
//!
//! let img = RgbImage::filled(16, 16, [90, 120, 200]);
//! let out = smooth_colors(&img, 3, &BilateralParams::default()).unwrap();
//! assert_eq!(out, img);
//! ```

use crate::border::reflect_101;
use crate::parallel::for_each_row;
use crate::OpsResult;
use toon_core::Image;
use tracing::{debug, trace};

/// Bilateral filter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralParams {
    /// Neighbourhood diameter in pixels. Non-positive derives it from
    /// `sigma_space`.
    pub diameter: i32,
    /// Color-distance sigma. Larger values mix more distant colors.
    pub sigma_color: f64,
    /// Spatial sigma.
    pub sigma_space: f64,
}

impl BilateralParams {
    /// Creates a parameter set.
    pub const fn new(diameter: i32, sigma_color: f64, sigma_space: f64) -> Self {
        Self {
            diameter,
            sigma_color,
            sigma_space,
        }
    }

    /// Effective neighbourhood radius.
    ///
    /// ```rust
    /// use toon_ops::smooth::BilateralParams;
    ///
    /// assert_eq!(BilateralParams::new(9, 250.0, 250.0).radius(), 4);
    /// assert_eq!(BilateralParams::new(0, 10.0, 4.0).radius(), 6);
    /// ```
    pub fn radius(&self) -> usize {
        let radius = if self.diameter > 0 {
            self.diameter as usize / 2
        } else {
            (sanitize_sigma(self.sigma_space) * 1.5).round() as usize
        };
        radius.max(1)
    }
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self::new(9, 250.0, 250.0)
    }
}

fn sanitize_sigma(sigma: f64) -> f64 {
    if sigma <= 0.0 { 1.0 } else { sigma }
}

/// Precomputed disc offsets with their spatial weights, plus the color
/// weight table indexed by summed absolute channel difference.
struct BilateralKernel {
    offsets: Vec<(isize, isize)>,
    space_weights: Vec<f32>,
    color_weights: Vec<f32>,
}

impl BilateralKernel {
    fn new(params: &BilateralParams, channels: usize) -> Self {
        let radius = params.radius() as isize;
        let sigma_color = sanitize_sigma(params.sigma_color);
        let sigma_space = sanitize_sigma(params.sigma_space);
        let color_coeff = -0.5 / (sigma_color * sigma_color);
        let space_coeff = -0.5 / (sigma_space * sigma_space);

        let color_weights = (0..256 * channels)
            .map(|d| {
                let d = d as f64;
                (d * d * color_coeff).exp() as f32
            })
            .collect();

        let mut offsets = Vec::new();
        let mut space_weights = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let r2 = (dx * dx + dy * dy) as f64;
                if r2.sqrt() > radius as f64 {
                    continue;
                }
                offsets.push((dx, dy));
                space_weights.push((r2 * space_coeff).exp() as f32);
            }
        }

        Self {
            offsets,
            space_weights,
            color_weights,
        }
    }
}

/// Rounds a weighted mean to a sample, ties to even.
#[inline]
fn round_sample(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Applies one bilateral filter pass.
///
/// Borders are extrapolated with reflect-101. Works for any channel count;
/// the color distance is the sum of absolute channel differences.
pub fn bilateral<const N: usize>(src: &Image<N>, params: &BilateralParams) -> OpsResult<Image<N>> {
    let (width, height) = src.dimensions();
    trace!(width, height, channels = N, ?params, "bilateral");
    if src.is_empty() {
        return Ok(src.clone());
    }

    let kernel = BilateralKernel::new(params, N);
    let (w, h) = (width as usize, height as usize);
    let data = src.data();
    let mut out = vec![0u8; data.len()];

    for_each_row(&mut out, src.row_len(), |y, row| {
        for x in 0..w {
            let center = &data[(y * w + x) * N..(y * w + x) * N + N];
            let mut sum = [0.0f32; N];
            let mut wsum = 0.0f32;

            for (&(dx, dy), &space) in kernel.offsets.iter().zip(&kernel.space_weights) {
                let sx = reflect_101(x as isize + dx, w);
                let sy = reflect_101(y as isize + dy, h);
                let offset = (sy * w + sx) * N;
                let px = &data[offset..offset + N];

                let diff: usize = px
                    .iter()
                    .zip(center)
                    .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs() as usize)
                    .sum();
                let weight = space * kernel.color_weights[diff];

                for c in 0..N {
                    sum[c] += weight * px[c] as f32;
                }
                wsum += weight;
            }

            for c in 0..N {
                row[x * N + c] = round_sample(sum[c] / wsum);
            }
        }
    });

    Ok(Image::from_data(width, height, out)?)
}

/// Runs `passes` bilateral passes, each consuming the previous output.
///
/// Zero passes returns the input unchanged.
pub fn smooth_colors<const N: usize>(
    src: &Image<N>,
    passes: u32,
    params: &BilateralParams,
) -> OpsResult<Image<N>> {
    debug!(passes, radius = params.radius(), "smoothing colors");
    let mut current = src.clone();
    for pass in 0..passes {
        trace!(pass, "bilateral pass");
        current = bilateral(&current, params)?;
    }
    Ok(current)
}
