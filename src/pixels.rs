//! Decoded pixel buffers
//!
//! A [`PixelBuffer`] is the hand-off point between image decoding and the
//! color sampling engine: channel-interleaved 8-bit samples plus dimensions.

use crate::constants::pixels::{RGBA_CHANNELS, RGB_CHANNELS};
use crate::{AnalysisError, Result};

/// Channel-interleaved 8-bit image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::MalformedInput` if `channels` is not 3 or 4,
    /// or if `data.len() != width * height * channels`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self> {
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(AnalysisError::malformed(format!(
                "unsupported channel count {} (expected {} or {})",
                channels, RGB_CHANNELS, RGBA_CHANNELS
            )));
        }

        let expected = (width as u64) * (height as u64) * (channels as u64);
        if data.len() as u64 != expected {
            return Err(AnalysisError::malformed(format!(
                "buffer holds {} samples but {}x{}x{} requires {}",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Build an RGB buffer where every pixel has the same color
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixel_count = width as usize * height as usize;
        let data = rgb.repeat(pixel_count);
        Self {
            data,
            width,
            height,
            channels: RGB_CHANNELS,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Samples of one image row
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * self.channels as usize;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// RGB components of the pixel at `(x, y)`, ignoring alpha
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let channels = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

impl From<image::RgbImage> for PixelBuffer {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            data: img.into_raw(),
            width,
            height,
            channels: RGB_CHANNELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_is_malformed() {
        let err = PixelBuffer::new(vec![0; 11], 2, 2, 3).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput { .. }));
    }

    #[test]
    fn test_bad_channel_count_is_malformed() {
        let err = PixelBuffer::new(vec![0; 8], 2, 2, 2).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput { .. }));
    }

    #[test]
    fn test_rgba_accepted() {
        let buffer = PixelBuffer::new(vec![1, 2, 3, 255], 1, 1, 4).unwrap();
        assert_eq!(buffer.rgb_at(0, 0), [1, 2, 3]);
    }

    #[test]
    fn test_empty_buffer_is_well_formed() {
        let buffer = PixelBuffer::new(Vec::new(), 0, 0, 3).unwrap();
        assert_eq!(buffer.width(), 0);
        assert!(buffer.as_raw().is_empty());
    }

    #[test]
    fn test_uniform_and_row_access() {
        let buffer = PixelBuffer::uniform(3, 2, [10, 20, 30]);
        assert_eq!(buffer.as_raw().len(), 18);
        assert_eq!(buffer.row(1), &[10, 20, 30, 10, 20, 30, 10, 20, 30]);
        assert_eq!(buffer.rgb_at(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([5, 6, 7]));
        let buffer = PixelBuffer::from(img);
        assert_eq!((buffer.width(), buffer.height(), buffer.channels()), (4, 3, 3));
        assert_eq!(buffer.rgb_at(3, 2), [5, 6, 7]);
    }
}
