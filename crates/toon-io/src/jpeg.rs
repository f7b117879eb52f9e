//! JPEG format support.
//!
//! JPEG is the natural format for portraits coming off a phone or camera,
//! and the default output of the cartoon driver.
//!
//! # Architecture
//!
//! 1. **Struct + Trait**:
//!    - [`JpegReader`] implements [`FormatReader`]
//!    - [`JpegWriter`] implements [`FormatWriter`], configured with
//!      [`JpegWriterOptions`]
//!
//! 2. **Convenience functions**: [`read()`] and [`write()`] with defaults.
//!
//! ```rust,ignore
//! use toon_io::jpeg::{JpegWriter, JpegWriterOptions};
//! use toon_io::FormatWriter;
//!
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 80 });
//! writer.write("preview.jpg", &image)?;
//! ```

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use toon_core::RgbImage;
use tracing::trace;

/// Default JPEG quality, matching the usual vision-library `imwrite` default.
pub const DEFAULT_QUALITY: u8 = 95;

/// Options for writing JPEG files.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// JPEG file reader.
///
/// RGB input is kept as is; grayscale (8 or 16 bit) is replicated to three
/// channels and CMYK is approximated as RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl JpegReader {
    fn read_impl<R: Read>(&self, reader: R) -> IoResult<RgbImage> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(reader));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        trace!(width, height, pixel_format = ?info.pixel_format, "jpeg::read");

        let rgb: Vec<u8> = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            jpeg_decoder::PixelFormat::L16 => pixels
                .chunks_exact(2)
                .flat_map(|l16| [l16[0], l16[0], l16[0]])
                .collect(),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let channel = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
                    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
                })
                .collect(),
        };

        Ok(RgbImage::from_data(width, height, rgb)?)
    }
}

impl FormatReader for JpegReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<RgbImage> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_impl(file)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<RgbImage> {
        self.read_impl(Cursor::new(data))
    }
}

/// JPEG file writer.
#[derive(Debug, Clone)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 95).
    pub fn new() -> Self {
        Self::with_options(JpegWriterOptions::default())
    }

    /// Creates a writer with explicit options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    fn write_impl(&self, image: &RgbImage) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG size limit of 65535",
                width, height
            )));
        };
        let quality = self.options.quality.clamp(1, 100);

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode(image.data(), w, h, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

impl Default for JpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatWriter for JpegWriter {
    fn write_to_memory(&self, image: &RgbImage) -> IoResult<Vec<u8>> {
        self.write_impl(image)
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    JpegReader.read(path)
}

/// Writes a JPEG file with default options (quality 95).
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> IoResult<()> {
    JpegWriter::new().write(path, image)
}
