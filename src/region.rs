//! Region selection ahead of color aggregation
//!
//! Leaf photos are composed with the leaf above the reference chart, so only
//! the top half is sampled. Grain samples are assumed to fill the frame.

use serde::{Deserialize, Serialize};
use crate::{AnalysisError, Result};

/// Which part of the frame to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionPolicy {
    /// Whole image
    #[default]
    FullFrame,
    /// Rows `0..floor(height / 2)` across the full width
    TopHalf,
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Region covering a whole `width` x `height` image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Whether the region lies inside an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.left as u64 + self.width as u64;
        let bottom = self.top as u64 + self.height as u64;
        right <= width as u64 && bottom <= height as u64
    }
}

/// Pick the rectangle to aggregate for an image of `width` x `height`
///
/// # Errors
///
/// Returns `AnalysisError::DegenerateRegion` when the selection has zero
/// area, e.g. a leaf photo one pixel tall.
pub fn select_region(width: u32, height: u32, policy: RegionPolicy) -> Result<Region> {
    let region = match policy {
        RegionPolicy::FullFrame => Region::full(width, height),
        RegionPolicy::TopHalf => Region {
            left: 0,
            top: 0,
            width,
            height: height / 2,
        },
    };

    if region.is_empty() {
        return Err(AnalysisError::DegenerateRegion {
            width: region.width,
            height: region.height,
        });
    }

    Ok(region)
}
