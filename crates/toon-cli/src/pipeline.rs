//! Load, cartoonify, save, preview.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use toon_core::RgbImage;
use toon_io::WriteOptions;
use toon_ops::{cartoonify, stats::local_variance, CartoonParams};
use tracing::{debug, info, warn, Level};

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: CartoonParams,
    pub write: WriteOptions,
    pub preview: bool,
}

/// Runs the cartoon filter once.
///
/// An unreadable input is reported on stdout and yields a failure exit code
/// without touching the output path. Filter and save errors propagate.
pub fn run(opts: &RunOptions) -> Result<ExitCode> {
    let original = match toon_io::read(&opts.input) {
        Ok(image) => image,
        Err(e) => {
            debug!(error = %e, "load failed");
            println!("Error: Could not read image at {}", opts.input.display());
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(
        path = %opts.input.display(),
        width = original.width(),
        height = original.height(),
        "loaded"
    );

    let cartoon = cartoonify(&original, &opts.params).context("Cartoon filter failed")?;

    if tracing::enabled!(Level::DEBUG) {
        debug!(
            original = local_variance(&original, 2),
            cartoon = local_variance(&cartoon, 2),
            "local variance"
        );
    }

    toon_io::write_with(&opts.output, &cartoon, &opts.write)
        .with_context(|| format!("Failed to save: {}", opts.output.display()))?;
    info!(path = %opts.output.display(), "saved");

    if opts.preview {
        show_preview(&original, &cartoon);
    }

    println!("Success! Cartoonified image saved as: {}", opts.output.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "viewer")]
fn show_preview(original: &RgbImage, cartoon: &RgbImage) {
    use toon_view::{preview, Pane, PreviewConfig};

    let panes = vec![
        Pane::new("Original Image", original.clone()),
        Pane::new("Cartoonified Portrait", cartoon.clone()),
    ];
    if let Err(e) = preview(panes, &PreviewConfig::default()) {
        warn!(error = %e, "preview unavailable");
    }
}

#[cfg(not(feature = "viewer"))]
fn show_preview(_original: &RgbImage, _cartoon: &RgbImage) {
    warn!("built without the viewer feature, skipping preview");
}
