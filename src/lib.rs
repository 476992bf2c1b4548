//! # Paddy Colorscan
//!
//! A Rust crate for estimating rice crop signals from digital photographs.
//!
//! This library provides two independent, stateless pipelines:
//! - Grain moisture: the red/green ratio of the whole frame mapped through a
//!   calibrated linear formula, clamped to 22-31 %
//! - Leaf nitrogen: the average color of the top half of the frame matched
//!   against a six-level leaf color chart, with a fertilizer recommendation
//!
//! ## Example
//!
//! ```rust,no_run
//! use paddy_colorscan::{analyze_grain, analyze_leaf};
//! use std::path::Path;
//!
//! let leaf = analyze_leaf(Path::new("leaf.jpg"))?;
//! println!("Level {}: {}", leaf.color_level, leaf.description);
//!
//! let grain = analyze_grain(Path::new("grain.jpg"))?;
//! println!("Moisture: {}%", grain.moisture_percent);
//! # Ok::<(), paddy_colorscan::AnalysisError>(())
//! ```

pub mod error;
pub mod constants;
pub mod config;
pub mod pixels;
pub mod region;
pub mod color;
pub mod moisture;
pub mod leaf;
pub mod image_loader;
pub mod pipeline;
pub mod service;

pub use error::{AnalysisError, Result};
pub use config::AnalysisConfig;
pub use pixels::PixelBuffer;
pub use region::{select_region, Region, RegionPolicy};
pub use color::{aggregate, aggregate_region, ChannelMeans, RgbTriple};
pub use moisture::{estimate_moisture, MoistureCalibration, MoistureEstimator, MoistureResult};
pub use leaf::{
    classify_leaf_color, LeafAnalysis, LeafClassification, ReferenceColorPoint, LEAF_COLOR_CHART,
};
pub use pipeline::{analyze_grain, analyze_grain_pixels, analyze_leaf, analyze_leaf_pixels};
