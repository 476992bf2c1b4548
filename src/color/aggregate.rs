//! Per-channel mean intensity over a rectangular region
//!
//! Sums are accumulated in `u64` so even very large frames cannot overflow
//! before the division.

use serde::{Deserialize, Serialize};
use crate::color::RgbTriple;
use crate::pixels::PixelBuffer;
use crate::region::Region;
use crate::{AnalysisError, Result};

/// Arithmetic mean of each color channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelMeans {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    /// Number of pixels that contributed
    pub pixel_count: u64,
}

impl ChannelMeans {
    /// Round each mean to the nearest integer
    pub fn rounded(&self) -> RgbTriple {
        let round = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        RgbTriple::new(round(self.red), round(self.green), round(self.blue))
    }
}

/// Mean of each channel over `region` of `buffer`
///
/// # Errors
///
/// - `AnalysisError::DegenerateRegion` if the region has zero area
/// - `AnalysisError::MalformedInput` if the region extends past the buffer
pub fn aggregate_region(buffer: &PixelBuffer, region: &Region) -> Result<ChannelMeans> {
    if region.is_empty() {
        return Err(AnalysisError::DegenerateRegion {
            width: region.width,
            height: region.height,
        });
    }

    if !region.fits_within(buffer.width(), buffer.height()) {
        return Err(AnalysisError::malformed(format!(
            "region {}x{} at ({}, {}) exceeds {}x{} image",
            region.width,
            region.height,
            region.left,
            region.top,
            buffer.width(),
            buffer.height()
        )));
    }

    let channels = buffer.channels() as usize;
    let start = region.left as usize * channels;
    let end = start + region.width as usize * channels;

    let (mut total_r, mut total_g, mut total_b) = (0u64, 0u64, 0u64);
    for y in region.top..region.top + region.height {
        for pixel in buffer.row(y)[start..end].chunks_exact(channels) {
            total_r += pixel[0] as u64;
            total_g += pixel[1] as u64;
            total_b += pixel[2] as u64;
        }
    }

    let pixel_count = region.area();
    let n = pixel_count as f64;
    Ok(ChannelMeans {
        red: total_r as f64 / n,
        green: total_g as f64 / n,
        blue: total_b as f64 / n,
        pixel_count,
    })
}

/// Mean of each channel over the whole frame
pub fn aggregate(buffer: &PixelBuffer) -> Result<ChannelMeans> {
    aggregate_region(buffer, &Region::full(buffer.width(), buffer.height()))
}
