//! Error types for toon-core buffer operations.
//!
//! # Usage
//!
//! ```rust
//! use toon_core::{Error, Result};
//!
//! fn check(width: u32, height: u32, len: usize) -> Result<()> {
//!     if len != width as usize * height as usize * 3 {
//!         return Err(Error::invalid_dimensions(width, height, "bad length"));
//!     }
//!     Ok(())
//! }
//! assert!(check(2, 2, 12).is_ok());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or combining image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Image dimensions don't match for the operation.
    ///
    /// Returned when an operation requires images of the same size
    /// (e.g. masking one image with another).
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when the pixel buffer length doesn't match
    /// `width * height * channels`, or that product overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }
}
