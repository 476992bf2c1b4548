//! Nearest-reference classification of leaf colors

use serde::{Deserialize, Serialize};
use crate::color::RgbTriple;
use crate::constants::chart::FERTILIZER_UNIT;
use crate::leaf::chart::{ReferenceColorPoint, LEAF_COLOR_CHART};

/// Chart entry matched by a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafClassification {
    pub reference: &'static ReferenceColorPoint,
    /// Euclidean RGB distance between the sample and the reference
    pub distance: f64,
}

impl LeafClassification {
    pub fn level(&self) -> u8 {
        self.reference.level
    }

    pub fn fertilizer_kg(&self) -> f64 {
        self.reference.fertilizer_kg
    }

    pub fn description(&self) -> &'static str {
        self.reference.description
    }
}

/// Leaf analysis result returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafAnalysis {
    #[serde(rename = "colorLevel")]
    pub color_level: u8,
    pub fertilizer: f64,
    pub description: String,
    /// The sampled average color, echoed for diagnostics
    #[serde(rename = "avgRGB")]
    pub avg_rgb: RgbTriple,
}

impl LeafAnalysis {
    pub fn from_classification(classification: &LeafClassification, avg_rgb: RgbTriple) -> Self {
        Self {
            color_level: classification.level(),
            fertilizer: classification.fertilizer_kg(),
            description: classification.description().to_string(),
            avg_rgb,
        }
    }

    /// Fertilizer recommendation with its unit, e.g. `3 kg/fen`
    pub fn prediction(&self) -> String {
        format!("{} {}", self.fertilizer, FERTILIZER_UNIT)
    }
}

/// Index and distance of the entry in `table` closest to `sample`
///
/// Entries are scanned in order and only a strictly smaller distance
/// replaces the current best, so the earliest entry wins ties. Returns
/// `None` only for an empty table.
pub fn nearest_reference(
    sample: &RgbTriple,
    table: &[ReferenceColorPoint],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in table.iter().enumerate() {
        let distance = sample.distance(&point.rgb);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((index, distance)),
        }
    }
    best
}

/// Classify an average leaf color against the standard chart
pub fn classify_leaf_color(avg_rgb: RgbTriple) -> LeafClassification {
    // The chart is a non-empty static, so a nearest entry always exists.
    let (index, distance) = nearest_reference(&avg_rgb, &LEAF_COLOR_CHART).unwrap_or((0, 0.0));
    LeafClassification {
        reference: &LEAF_COLOR_CHART[index],
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_level_4() {
        let result = classify_leaf_color(RgbTriple::new(159, 199, 101));
        assert_eq!(result.level(), 4);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.fertilizer_kg(), 3.0);
    }

    #[test]
    fn test_every_reference_matches_itself() {
        for point in LEAF_COLOR_CHART.iter() {
            let result = classify_leaf_color(point.rgb);
            assert_eq!(result.level(), point.level);
            assert_eq!(result.distance, 0.0);
        }
    }

    #[test]
    fn test_black_is_nearest_level_6() {
        // Squared distances from black: 148257, 115451, 93944, 75083, 58868, 45299
        let result = classify_leaf_color(RgbTriple::new(0, 0, 0));
        assert_eq!(result.level(), 6);
        assert_eq!(result.distance, 45299f64.sqrt());
        assert_eq!(result.fertilizer_kg(), 1.0);
    }

    #[test]
    fn test_white_is_nearest_level_1() {
        let result = classify_leaf_color(RgbTriple::new(255, 255, 255));
        assert_eq!(result.level(), 1);
        assert_eq!(result.fertilizer_kg(), 6.0);
    }

    #[test]
    fn test_between_levels() {
        // Closer to level 3 (182, 212, 126) than level 2 (205, 225, 151)
        let result = classify_leaf_color(RgbTriple::new(188, 215, 132));
        assert_eq!(result.level(), 3);
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let mut table = LEAF_COLOR_CHART;
        table[1].rgb = table[0].rgb;
        let (index, distance) = nearest_reference(&table[0].rgb, &table).unwrap();
        assert_eq!(index, 0);
        assert_eq!(distance, 0.0);

        // Equidistant from two distinct entries
        table[0].rgb = RgbTriple::new(10, 0, 0);
        table[1].rgb = RgbTriple::new(0, 10, 0);
        let (index, _) = nearest_reference(&RgbTriple::new(0, 0, 0), &table[..2]).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_empty_table() {
        assert!(nearest_reference(&RgbTriple::new(1, 2, 3), &[]).is_none());
    }

    #[test]
    fn test_idempotent() {
        let sample = RgbTriple::new(140, 190, 80);
        assert_eq!(classify_leaf_color(sample), classify_leaf_color(sample));
    }

    #[test]
    fn test_analysis_serialization() {
        let avg = RgbTriple::new(159, 199, 101);
        let analysis = LeafAnalysis::from_classification(&classify_leaf_color(avg), avg);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["colorLevel"], 4);
        assert_eq!(json["fertilizer"], 3.0);
        assert_eq!(json["avgRGB"], serde_json::json!([159, 199, 101]));
        assert_eq!(analysis.prediction(), "3 kg/fen");
    }
}
