//! Six-level leaf color chart
//!
//! Level 1 is the palest (most nitrogen-deficient) leaf, level 6 the deepest
//! green. Consecutive entries step by a constant (-23, -13, -25) in RGB.

use serde::Serialize;
use crate::color::RgbTriple;
use crate::constants::chart::LEVEL_COUNT;

/// One swatch of the leaf color chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceColorPoint {
    /// Chart level, 1 (deficient) to 6 (healthy)
    pub level: u8,
    pub rgb: RgbTriple,
    /// Recommended nitrogen top-dressing in kg per fen
    pub fertilizer_kg: f64,
    pub description: &'static str,
}

/// The standard chart, ordered by level
pub static LEAF_COLOR_CHART: [ReferenceColorPoint; LEVEL_COUNT] = [
    ReferenceColorPoint {
        level: 1,
        rgb: RgbTriple::new(238, 238, 187),
        fertilizer_kg: 6.0,
        description: "Leaf color very pale; top-dress 6.0 kg nitrogen per fen immediately",
    },
    ReferenceColorPoint {
        level: 2,
        rgb: RgbTriple::new(205, 225, 151),
        fertilizer_kg: 5.0,
        description: "Leaf color pale; top-dress 5.0 kg nitrogen per fen",
    },
    ReferenceColorPoint {
        level: 3,
        rgb: RgbTriple::new(182, 212, 126),
        fertilizer_kg: 4.0,
        description: "Leaf color slightly pale; top-dress 4.0 kg nitrogen per fen",
    },
    ReferenceColorPoint {
        level: 4,
        rgb: RgbTriple::new(159, 199, 101),
        fertilizer_kg: 3.0,
        description: "Leaf color normal; top-dress 3.0 kg nitrogen per fen",
    },
    ReferenceColorPoint {
        level: 5,
        rgb: RgbTriple::new(136, 186, 76),
        fertilizer_kg: 2.0,
        description: "Leaf color deep green; top-dress 2.0 kg nitrogen per fen",
    },
    ReferenceColorPoint {
        level: 6,
        rgb: RgbTriple::new(113, 173, 51),
        fertilizer_kg: 1.0,
        description: "Leaf color very deep green; top-dress 1.0 kg nitrogen per fen",
    },
];

/// Look up a chart entry by level
pub fn reference_for_level(level: u8) -> Option<&'static ReferenceColorPoint> {
    LEAF_COLOR_CHART.iter().find(|point| point.level == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_contiguous() {
        let levels: Vec<u8> = LEAF_COLOR_CHART.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_greenness_increases_with_level() {
        for pair in LEAF_COLOR_CHART.windows(2) {
            let (paler, deeper) = (&pair[0].rgb, &pair[1].rgb);
            assert!(deeper.red < paler.red);
            assert!(deeper.green < paler.green);
            assert!(deeper.blue < paler.blue);
            // green dominates red more strongly at each step
            assert!(
                deeper.green as i32 - deeper.red as i32 > paler.green as i32 - paler.red as i32
            );
        }
    }

    #[test]
    fn test_fertilizer_decreases_with_level() {
        for pair in LEAF_COLOR_CHART.windows(2) {
            assert_eq!(pair[0].fertilizer_kg - pair[1].fertilizer_kg, 1.0);
        }
    }

    #[test]
    fn test_reference_for_level() {
        assert_eq!(reference_for_level(4).unwrap().fertilizer_kg, 3.0);
        assert!(reference_for_level(0).is_none());
        assert!(reference_for_level(7).is_none());
    }
}
