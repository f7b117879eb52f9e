//! # toon-view
//!
//! Blocking preview windows for finished images.
//!
//! [`preview`] opens one native window per [`Pane`]: the first pane lives in
//! the root viewport, the others in child viewports of the same event loop.
//! Each window shows its image scaled down to fit. Pressing any key in any
//! window, or closing any window, dismisses all of them and returns.
//!
//! # Quick Start
//!
//! ```ignore
//! use toon_view::{preview, Pane, PreviewConfig};
//!
//! preview(
//!     vec![
//!         Pane::new("Original Image", original),
//!         Pane::new("Cartoonified Portrait", cartoon),
//!     ],
//!     &PreviewConfig::default(),
//! )?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;

pub use app::PreviewApp;

use thiserror::Error;
use toon_core::RgbImage;
use tracing::{debug, info};

/// Preview failures.
#[derive(Error, Debug)]
pub enum ViewError {
    /// The windowing or rendering backend could not start.
    #[error("preview backend failed: {0}")]
    Backend(String),
}

/// Result type for preview operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// A titled image to show in its own window.
#[derive(Debug, Clone)]
pub struct Pane {
    /// Window title.
    pub title: String,
    /// Image to display.
    pub image: RgbImage,
}

impl Pane {
    /// Creates a pane.
    pub fn new(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }
}

/// Window settings.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Largest initial inner size of a window; bigger images are shown
    /// scaled down.
    pub max_window_size: [f32; 2],
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_window_size: [1280.0, 900.0],
        }
    }
}

/// Shows every pane and blocks until the user dismisses them.
///
/// An empty pane list returns immediately.
///
/// # Errors
///
/// [`ViewError::Backend`] when no window can be created, e.g. without a
/// display.
pub fn preview(panes: Vec<Pane>, config: &PreviewConfig) -> ViewResult<()> {
    let Some(first) = panes.first() else {
        debug!("nothing to preview");
        return Ok(());
    };

    let title = first.title.clone();
    let size = window_size(first.image.dimensions(), config.max_window_size);
    info!(windows = panes.len(), "opening preview");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(size),
        ..Default::default()
    };

    let max_window_size = config.max_window_size;
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(&cc.egui_ctx, panes, max_window_size)))),
    )
    .map_err(|e| ViewError::Backend(e.to_string()))?;

    debug!("preview dismissed");
    Ok(())
}

/// Initial window size for an image: its own size, shrunk uniformly to fit
/// within `max`.
pub(crate) fn window_size((width, height): (u32, u32), max: [f32; 2]) -> [f32; 2] {
    fit_size([width as f32, height as f32], max)
}

/// Largest size with the aspect ratio of `image` that fits in `available`,
/// never enlarging.
pub(crate) fn fit_size(image: [f32; 2], available: [f32; 2]) -> [f32; 2] {
    if image[0] <= 0.0 || image[1] <= 0.0 {
        return [0.0, 0.0];
    }
    let scale = (available[0] / image[0]).min(available[1] / image[1]).min(1.0).max(0.0);
    [image[0] * scale, image[1] * scale]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preview_returns_immediately() {
        assert!(preview(Vec::new(), &PreviewConfig::default()).is_ok());
    }

    #[test]
    fn small_images_are_not_enlarged() {
        assert_eq!(fit_size([320.0, 240.0], [1280.0, 900.0]), [320.0, 240.0]);
    }

    #[test]
    fn large_images_keep_aspect() {
        let [w, h] = window_size((4000, 3000), [1200.0, 1200.0]);
        assert!((w - 1200.0).abs() < 0.01);
        assert!((h - 900.0).abs() < 0.01);
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(fit_size([0.0, 10.0], [100.0, 100.0]), [0.0, 0.0]);
        assert_eq!(fit_size([10.0, 10.0], [-5.0, 100.0]), [0.0, 0.0]);
    }

    #[test]
    fn pane_title() {
        let pane = Pane::new("Original Image", RgbImage::new(2, 2));
        assert_eq!(pane.title, "Original Image");
    }
}
