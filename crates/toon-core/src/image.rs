//! Image buffer type for the cartoon pipeline.
//!
//! # Memory Layout
//!
//! Images store 8-bit samples in **row-major** order, top-to-bottom, with
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! The channel count is a const generic, so a single-channel mask cannot be
//! handed to an operation expecting color without an explicit conversion.
//!
//! # Usage
//!
//! ```rust
//! use toon_core::RgbImage;
//!
//! let mut img = RgbImage::new(64, 48);
//! img.set_pixel(10, 10, [255, 128, 0]);
//! assert_eq!(img.pixel(10, 10), [255, 128, 0]);
//! ```

use crate::{Error, Result};
use std::sync::Arc;

/// Three-channel color image.
pub type RgbImage = Image<3>;

/// Single-channel intensity image.
pub type GrayImage = Image<1>;

/// Owned 8-bit image buffer with `N` interleaved channels.
///
/// The pixel buffer is stored in an [`Arc<Vec<u8>>`]: cloning is cheap and
/// shares data, mutation copies on write. Operations in `toon-ops` never
/// mutate their inputs; each returns a new buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image<const N: usize> {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl<const N: usize> Image<N> {
    /// Creates a new image filled with zeros.
    ///
    /// ```rust
    /// use toon_core::RgbImage;
    ///
    /// let img = RgbImage::new(1920, 1080);
    /// assert_eq!(img.dimensions(), (1920, 1080));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0; N])
    }

    /// Creates an image from existing interleaved pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * N`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, N)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a single pixel value.
    pub fn filled(width: u32, height: u32, pixel: [u8; N]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * N);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel, row by row.
    ///
    /// ```rust
    /// use toon_core::GrayImage;
    ///
    /// let ramp = GrayImage::from_fn(4, 1, |x, _| [x as u8 * 10]);
    /// assert_eq!(ramp.data(), &[0, 10, 20, 30]);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; N],
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * N);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        N
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of samples in one row (`width * N`).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * N
    }

    /// Returns a reference to the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * N
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; N] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [0u8; N];
        result.copy_from_slice(&self.data[offset..offset + N]);
        result
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; N]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + N].copy_from_slice(&pixel);
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; N])> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Checks that `other` has the same width and height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn ensure_same_size<const M: usize>(&self, other: &Image<M>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }
}

impl<const N: usize> std::fmt::Debug for Image<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &N)
            .finish()
    }
}

fn sample_count(width: u32, height: u32, channels: usize) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}
