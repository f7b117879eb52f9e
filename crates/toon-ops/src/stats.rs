//! Image statistics.

use crate::border::replicate;
use toon_core::Image;

/// Average local variance.
///
/// For every pixel and channel, the variance of the samples inside the
/// `(2 * radius + 1)`² window around it (replicated borders); the result is
/// the mean of those variances. Smoothing lowers it, so it serves as a
/// scalar "how flat is this image" measure.
///
/// Returns 0 for an empty image.
pub fn local_variance<const N: usize>(image: &Image<N>, radius: u32) -> f64 {
    if image.is_empty() {
        return 0.0;
    }

    let (w, h) = (image.width() as usize, image.height() as usize);
    let r = radius as isize;
    let count = ((2 * r + 1) * (2 * r + 1)) as f64;
    let data = image.data();
    let mut total = 0.0f64;

    for y in 0..h {
        for x in 0..w {
            for c in 0..N {
                let mut sum = 0.0f64;
                let mut sum_sq = 0.0f64;
                for dy in -r..=r {
                    let sy = replicate(y as isize + dy, h);
                    for dx in -r..=r {
                        let sx = replicate(x as isize + dx, w);
                        let v = data[(sy * w + sx) * N + c] as f64;
                        sum += v;
                        sum_sq += v * v;
                    }
                }
                let mean = sum / count;
                total += (sum_sq / count - mean * mean).max(0.0);
            }
        }
    }

    total / (w * h * N) as f64
}
