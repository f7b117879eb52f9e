//! Neighbourhood filters.
//!
//! - [`median_blur`] - Square-window median, removes speckle noise while
//!   keeping edges sharp
//! - [`box_mean`] - Rounded mean over a square window, the local threshold
//!   reference used by [`crate::threshold`]

use crate::border::replicate;
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use toon_core::{GrayImage, Image};
use tracing::trace;

/// Median filter with a `ksize`×`ksize` window.
///
/// Borders are replicated. A kernel size of 1 copies the input.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `ksize` is even or zero.
///
/// # Example
///
/// ```rust
/// use toon_core::GrayImage;
/// use toon_ops::filter::median_blur;
///
/// let mut img = GrayImage::filled(5, 5, [10]);
/// img.set_pixel(2, 2, [255]);
/// let out = median_blur(&img, 3).unwrap();
/// assert_eq!(out.pixel(2, 2), [10]);
/// ```
pub fn median_blur<const N: usize>(src: &Image<N>, ksize: u32) -> OpsResult<Image<N>> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "median kernel size must be odd and positive, got {}",
            ksize
        )));
    }
    let (width, height) = src.dimensions();
    trace!(width, height, ksize, "median_blur");
    if ksize == 1 || src.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = (width as usize, height as usize);
    let radius = (ksize / 2) as isize;
    let count = (ksize as usize)
        .checked_mul(ksize as usize)
        .ok_or_else(|| OpsError::InvalidParameter(format!("median kernel size {} is too large", ksize)))?;
    let data = src.data();
    let mut out = vec![0u8; data.len()];

    for_each_row(&mut out, src.row_len(), |y, row| {
        let mut values = Vec::with_capacity(count);
        for x in 0..w {
            for c in 0..N {
                values.clear();
                for dy in -radius..=radius {
                    let sy = replicate(y as isize + dy, h);
                    for dx in -radius..=radius {
                        let sx = replicate(x as isize + dx, w);
                        values.push(data[(sy * w + sx) * N + c]);
                    }
                }
                let (_, median, _) = values.select_nth_unstable(count / 2);
                row[x * N + c] = *median;
            }
        }
    });

    Ok(Image::from_data(width, height, out)?)
}

/// Rounded mean over a `size`×`size` window with replicated borders.
///
/// Computed separably: a horizontal running sum followed by a vertical one,
/// so the cost does not grow with the window. Sums are 64-bit.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `size` is even or zero, or if a full
/// window of 255s would not fit in a `u64`.
pub fn box_mean(src: &GrayImage, size: u32) -> OpsResult<GrayImage> {
    if size == 0 || size % 2 == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "box size must be odd and positive, got {}",
            size
        )));
    }
    let area = u64::from(size) * u64::from(size);
    if area.checked_mul(255).is_none() {
        return Err(OpsError::InvalidParameter(format!(
            "box size {} is too large",
            size
        )));
    }
    let (width, height) = src.dimensions();
    trace!(width, height, size, "box_mean");
    if src.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = (width as usize, height as usize);
    let radius = (size / 2) as usize;
    let horizontal = sum_horizontal(src.data(), w, h, radius);
    let sums = sum_vertical(&horizontal, w, h, radius);

    let out = sums.iter().map(|&s| ((s + area / 2) / area) as u8).collect();
    Ok(GrayImage::from_data(width, height, out)?)
}

fn sum_horizontal(src: &[u8], width: usize, height: usize, radius: usize) -> Vec<u64> {
    let mut dst = vec![0u64; width * height];
    let r = radius as isize;

    for y in 0..height {
        let line = &src[y * width..(y + 1) * width];
        let mut sum: u64 = (-r..=r)
            .map(|dx| u64::from(line[replicate(dx, width)]))
            .sum();

        for x in 0..width {
            dst[y * width + x] = sum;
            // Slide: drop the leftmost sample, add the next one on the right
            let leaving = replicate(x as isize - r, width);
            let entering = replicate(x as isize + r + 1, width);
            sum = sum - u64::from(line[leaving]) + u64::from(line[entering]);
        }
    }

    dst
}

fn sum_vertical(src: &[u64], width: usize, height: usize, radius: usize) -> Vec<u64> {
    let mut dst = vec![0u64; width * height];
    let r = radius as isize;

    for x in 0..width {
        let mut sum: u64 = (-r..=r)
            .map(|dy| src[replicate(dy, height) * width + x])
            .sum();

        for y in 0..height {
            dst[y * width + x] = sum;
            let leaving = replicate(y as isize - r, height);
            let entering = replicate(y as isize + r + 1, height);
            sum = sum - src[leaving * width + x] + src[entering * width + x];
        }
    }

    dst
}
