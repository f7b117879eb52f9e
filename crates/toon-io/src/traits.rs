//! Reader and writer traits implemented by each format module.

use crate::IoResult;
use std::path::Path;
use toon_core::RgbImage;

/// Trait for image format readers.
///
/// Every reader decodes into a 3-channel [`RgbImage`]: grayscale sources are
/// replicated, alpha is dropped, wide samples are narrowed to 8 bits.
pub trait FormatReader {
    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<RgbImage>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<RgbImage>;
}

/// Trait for image format writers.
pub trait FormatWriter {
    /// Writes an image to a file path, replacing any existing file.
    fn write<P: AsRef<Path>>(&self, path: P, image: &RgbImage) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Encodes an image into a byte vector.
    fn write_to_memory(&self, image: &RgbImage) -> IoResult<Vec<u8>>;
}
