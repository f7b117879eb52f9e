//! # toon-ops
//!
//! Image operators behind the cartoon filter.
//!
//! # Modules
//!
//! - [`smooth`] - Bilateral filter and repeated smoothing
//! - [`gray`] - Luma conversion
//! - [`filter`] - Median blur and box mean
//! - [`threshold`] - Adaptive mean threshold
//! - [`edges`] - Edge mask pipeline
//! - [`composite`] - Bitwise mask compositing
//! - [`stats`] - Local variance measure
//!
//! # Example
//!
//! ```rust,ignore
//! use toon_ops::{cartoonify, CartoonParams};
//!
//! let portrait = toon_io::read("portrait.jpg")?;
//! let cartoon = cartoonify(&portrait, &CartoonParams::PORTRAIT)?;
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Compute output rows on the Rayon pool (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod border;
mod cartoon;
mod error;
mod parallel;

pub mod composite;
pub mod edges;
pub mod filter;
pub mod gray;
pub mod smooth;
pub mod stats;
pub mod threshold;

pub use cartoon::{cartoonify, CartoonParams};
pub use edges::{edge_mask, EdgeParams};
pub use error::{OpsError, OpsResult};
pub use smooth::{smooth_colors, BilateralParams};
