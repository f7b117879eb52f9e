//! Mask compositing.

use crate::{OpsError, OpsResult};
use toon_core::Image;
use tracing::trace;

/// Per-byte bitwise AND of two same-sized images.
///
/// With a binary 0/255 mask this keeps the color where the mask is white
/// and paints black where it is 0.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] if the dimensions differ.
///
/// # Example
///
/// ```rust
/// use toon_core::RgbImage;
/// use toon_ops::composite::bitwise_and;
///
/// let color = RgbImage::filled(2, 1, [90, 160, 30]);
/// let mut mask = RgbImage::filled(2, 1, [255, 255, 255]);
/// mask.set_pixel(1, 0, [0, 0, 0]);
///
/// let out = bitwise_and(&color, &mask).unwrap();
/// assert_eq!(out.pixel(0, 0), [90, 160, 30]);
/// assert_eq!(out.pixel(1, 0), [0, 0, 0]);
/// ```
pub fn bitwise_and<const N: usize>(a: &Image<N>, b: &Image<N>) -> OpsResult<Image<N>> {
    a.ensure_same_size(b)
        .map_err(|e| OpsError::SizeMismatch(e.to_string()))?;
    trace!(width = a.width(), height = a.height(), channels = N, "bitwise_and");

    let out = a.data().iter().zip(b.data()).map(|(&x, &y)| x & y).collect();
    Ok(Image::from_data(a.width(), a.height(), out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_core::{GrayImage, RgbImage};

    fn binary_mask(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x * 3 + y) % 4 == 0 { [0; 3] } else { [255; 3] }
        })
    }

    #[test]
    fn test_size_mismatch() {
        let a = RgbImage::new(4, 4);
        let b = RgbImage::new(4, 5);
        assert!(matches!(bitwise_and(&a, &b), Err(OpsError::SizeMismatch(_))));
    }

    #[test]
    fn test_idempotent_with_binary_mask() {
        let color = RgbImage::from_fn(10, 7, |x, y| [(x * 25) as u8, (y * 30) as u8, 77]);
        let mask = binary_mask(10, 7);

        let once = bitwise_and(&color, &mask).unwrap();
        let twice = bitwise_and(&once, &mask).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_selects_or_blacks_out() {
        let color = RgbImage::filled(6, 6, [201, 13, 99]);
        let mask = binary_mask(6, 6);
        let out = bitwise_and(&color, &mask).unwrap();

        for (x, y, px) in out.pixels() {
            if mask.pixel(x, y) == [0; 3] {
                assert_eq!(px, [0, 0, 0]);
            } else {
                assert_eq!(px, [201, 13, 99]);
            }
        }
    }

    #[test]
    fn test_raw_bits() {
        let a = GrayImage::from_data(2, 1, vec![0b1100_1010, 0xFF]).unwrap();
        let b = GrayImage::from_data(2, 1, vec![0b1010_0110, 0x0F]).unwrap();
        assert_eq!(bitwise_and(&a, &b).unwrap().data(), &[0b1000_0010, 0x0F]);
    }
}
