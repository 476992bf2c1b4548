//! Leaf nitrogen assessment against the standard leaf color chart

pub mod chart;
pub mod classifier;

pub use chart::{reference_for_level, ReferenceColorPoint, LEAF_COLOR_CHART};
pub use classifier::{classify_leaf_color, nearest_reference, LeafAnalysis, LeafClassification};
