//! # toon-core
//!
//! Core types shared by every toonify crate.
//!
//! - [`Image`] - Owned, interleaved 8-bit image buffer with a compile-time
//!   channel count
//! - [`RgbImage`] / [`GrayImage`] - The two shapes the cartoon pipeline uses
//! - [`Error`] / [`Result`] - Buffer construction and shape errors
//!
//! ## Crate Structure
//!
//! ```text
//! toon-core (this crate)
//!    ^
//!    |
//!    +-- toon-io   (PNG/JPEG load and save)
//!    +-- toon-ops  (bilateral, median, threshold, composite)
//!    +-- toon-view (preview windows)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{GrayImage, Image, RgbImage};
