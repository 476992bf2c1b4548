//! Analysis pipelines: select region, aggregate, then estimate or classify
//!
//! Both pipelines are pure over their input buffer. Path-based entry points
//! decode the image first and otherwise behave identically.

use std::path::Path;
use crate::color::aggregate_region;
use crate::image_loader::load_image;
use crate::leaf::{classify_leaf_color, LeafAnalysis};
use crate::moisture::{MoistureEstimator, MoistureResult};
use crate::pixels::PixelBuffer;
use crate::region::{select_region, RegionPolicy};
use crate::Result;

/// Classify the leaf color sampled from `pixels`
///
/// The sampled means are rounded to integers before matching, as the chart
/// is defined in integer RGB.
pub fn analyze_leaf_pixels(pixels: &PixelBuffer, policy: RegionPolicy) -> Result<LeafAnalysis> {
    let region = select_region(pixels.width(), pixels.height(), policy)?;
    let means = aggregate_region(pixels, &region)?;
    let avg_rgb = means.rounded();
    let classification = classify_leaf_color(avg_rgb);
    Ok(LeafAnalysis::from_classification(&classification, avg_rgb))
}

/// Estimate grain moisture from `pixels`
pub fn analyze_grain_pixels(
    pixels: &PixelBuffer,
    estimator: &MoistureEstimator,
    policy: RegionPolicy,
) -> Result<MoistureResult> {
    let region = select_region(pixels.width(), pixels.height(), policy)?;
    let means = aggregate_region(pixels, &region)?;
    estimator.estimate(&means)
}

/// Analyze a leaf photo on disk, sampling its top half
pub fn analyze_leaf(image_path: &Path) -> Result<LeafAnalysis> {
    let pixels = load_image(image_path)?;
    analyze_leaf_pixels(&pixels, RegionPolicy::TopHalf)
}

/// Estimate moisture of a grain photo on disk, sampling the whole frame
pub fn analyze_grain(image_path: &Path) -> Result<MoistureResult> {
    let pixels = load_image(image_path)?;
    analyze_grain_pixels(&pixels, &MoistureEstimator::new(), RegionPolicy::FullFrame)
}
