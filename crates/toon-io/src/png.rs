//! PNG format support.
//!
//! Reading normalizes every PNG flavour to 8-bit RGB: palette and sub-byte
//! images are expanded, 16-bit samples are stripped to their high byte,
//! grayscale is replicated and alpha is dropped. Writing produces 8-bit RGB
//! with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use toon_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image)?;
//! ```

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;
use toon_core::RgbImage;
use tracing::trace;

/// PNG file reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl PngReader {
    fn read_impl<R: BufRead + Seek>(&self, reader: R) -> IoResult<RgbImage> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let samples = &buf[..info.buffer_size()];
        trace!(width = info.width, height = info.height, color = ?info.color_type, "png::read");

        let rgb: Vec<u8> = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgb, png::BitDepth::Eight) => samples.to_vec(),
            (png::ColorType::Rgba, png::BitDepth::Eight) => samples
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            (png::ColorType::Grayscale, png::BitDepth::Eight) => {
                samples.iter().flat_map(|&g| [g, g, g]).collect()
            }
            (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => samples
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0]])
                .collect(),
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    color_type, bit_depth
                )));
            }
        };

        Ok(RgbImage::from_data(info.width, info.height, rgb)?)
    }
}

impl FormatReader for PngReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<RgbImage> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_impl(BufReader::new(file))
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<RgbImage> {
        self.read_impl(Cursor::new(data))
    }
}

/// PNG file writer: 8-bit RGB, default compression, sRGB chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl FormatWriter for PngWriter {
    fn write_to_memory(&self, image: &RgbImage) -> IoResult<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

            let mut png_writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .write_image_data(image.data())
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    PngReader.read(path)
}

/// Writes a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> IoResult<()> {
    PngWriter.write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| [(x * 8) as u8, (y * 8) as u8, 128])
    }

    #[test]
    fn test_roundtrip_rgb() {
        let image = gradient(32, 16);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");

        write(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_grayscale_alpha_expands_to_rgb() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::GrayscaleAlpha);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 255, 200, 0]).unwrap();
            writer.finish().unwrap();
        }

        let loaded = PngReader.read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.data(), &[10, 10, 10, 200, 200, 200]);
    }

    #[test]
    fn test_sixteen_bit_is_stripped() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 1, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xAB, 0x01, 0x12, 0xFF, 0x00, 0x00]).unwrap();
            writer.finish().unwrap();
        }

        let loaded = PngReader.read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.pixel(0, 0), [0xAB, 0x12, 0x00]);
    }

    #[test]
    fn test_corrupt_data() {
        let err = PngReader
            .read_from_memory(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3])
            .unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
