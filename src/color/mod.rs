//! Color sampling module
//!
//! This module handles RGB value types, their conversions, and
//! statistical aggregation of color regions.

pub mod aggregate;
pub mod conversion;

pub use aggregate::{aggregate, aggregate_region, ChannelMeans};
pub use conversion::RgbTriple;
