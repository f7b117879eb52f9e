//! # toon-io
//!
//! Image loading and saving for the cartoon pipeline.
//!
//! Every decoder produces a 3-channel [`RgbImage`](toon_core::RgbImage), so
//! the pipeline never has to care whether the portrait was grayscale, had
//! an alpha channel or was stored with 16-bit samples.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use toon_io::{read, write};
//!
//! let image = read("portrait.jpg")?;
//! write("copy.png", &image)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Notes |
//! |--------|------|-------|-------|
//! | PNG | Yes | Yes | 8/16-bit, palette, gray, alpha dropped |
//! | JPEG | Yes | Yes | RGB, gray, CMYK; quality setting |
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};

use std::path::Path;
use toon_core::RgbImage;
use tracing::debug;

/// Options for [`write_with`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// JPEG quality 1-100; ignored by lossless formats.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by magic bytes, falling back to the extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(unsupported(path)),
    }
}

/// Decodes an image held in memory, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<RgbImage> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::PngReader.read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader.read_from_memory(data),

        other => Err(IoError::UnsupportedFormat(other.name().to_string())),
    }
}

/// Writes an image to a file, choosing the format from the extension.
///
/// An existing file is overwritten.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> IoResult<()> {
    write_with(path, image, &WriteOptions::default())
}

/// Writes an image with explicit encoder options.
pub fn write_with<P: AsRef<Path>>(path: P, image: &RgbImage, options: &WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::with_options(jpeg::JpegWriterOptions {
            quality: options.jpeg_quality,
        })
        .write(path, image),

        _ => {
            let _ = options;
            Err(unsupported(path))
        }
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let err = read("no/such/portrait.jpg").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_read_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello, not a portrait").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_write_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::new(4, 4);
        let err = write(dir.path().join("out.bmp"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "bmp"));
    }

    #[cfg(all(feature = "png", feature = "jpeg"))]
    #[test]
    fn test_write_overwrites_and_detects_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = RgbImage::filled(8, 8, [10, 20, 30]);

        write(&path, &RgbImage::new(2, 2)).unwrap();
        write(&path, &image).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(read_from_memory(&bytes).unwrap(), image);
    }
}
