//! Grain moisture estimation from the red/green channel ratio
//!
//! An empirically calibrated linear approximation, not a physical model:
//!
//! ```text
//! ratio    = green / (red + 1)
//! moisture = clamp(31 - (ratio - 0.8) * 20, 22, 31), rounded to 2 decimals
//! ```
//!
//! The `+ 1` guard also biases the ratio slightly downward. That bias is part
//! of the calibration and must not be corrected.

use serde::{Deserialize, Serialize};
use crate::color::ChannelMeans;
use crate::constants::moisture::{
    CEILING_PERCENT, DECIMALS, MAX_PERCENT, MIN_PERCENT, PIVOT_RATIO, RED_GUARD, SLOPE,
};
use crate::{AnalysisError, Result};

/// Moisture estimate for one grain sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoistureResult {
    /// Estimated moisture, always inside `clamped_range`
    pub moisture_percent: f64,
    /// Inclusive bounds the estimate was clamped to
    pub clamped_range: [f64; 2],
}

impl MoistureResult {
    /// Display form used in upload responses, e.g. `27.5%`
    pub fn percent_label(&self) -> String {
        format!("{}%", self.moisture_percent)
    }
}

/// Coefficients of the moisture formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoistureCalibration {
    pub ceiling_percent: f64,
    pub pivot_ratio: f64,
    pub slope: f64,
    pub red_guard: f64,
    pub min_percent: f64,
    pub max_percent: f64,
}

impl Default for MoistureCalibration {
    fn default() -> Self {
        Self {
            ceiling_percent: CEILING_PERCENT,
            pivot_ratio: PIVOT_RATIO,
            slope: SLOPE,
            red_guard: RED_GUARD,
            min_percent: MIN_PERCENT,
            max_percent: MAX_PERCENT,
        }
    }
}

impl MoistureCalibration {
    /// Check the coefficients can produce a finite, bounded estimate
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("ceiling_percent", self.ceiling_percent),
            ("pivot_ratio", self.pivot_ratio),
            ("slope", self.slope),
            ("red_guard", self.red_guard),
            ("min_percent", self.min_percent),
            ("max_percent", self.max_percent),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::InvalidParameter {
                parameter: name.to_string(),
                value: value.to_string(),
            });
        }
        if self.red_guard <= 0.0 {
            return Err(AnalysisError::InvalidParameter {
                parameter: "red_guard".to_string(),
                value: self.red_guard.to_string(),
            });
        }
        if self.min_percent > self.max_percent {
            return Err(AnalysisError::InvalidParameter {
                parameter: "min_percent".to_string(),
                value: format!("{} > max_percent {}", self.min_percent, self.max_percent),
            });
        }
        Ok(())
    }

    fn apply(&self, avg_red: f64, avg_green: f64) -> f64 {
        let ratio = avg_green / (avg_red + self.red_guard);
        let raw = self.ceiling_percent - (ratio - self.pivot_ratio) * self.slope;
        round_to(raw.clamp(self.min_percent, self.max_percent), DECIMALS)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Estimate grain moisture from mean red and green intensities (0-255)
///
/// Always returns a value in `[22.00, 31.00]` for finite, non-negative input.
pub fn estimate_moisture(avg_red: f64, avg_green: f64) -> f64 {
    MoistureCalibration::default().apply(avg_red, avg_green)
}

/// Moisture estimator with input validation
#[derive(Debug, Clone, Default)]
pub struct MoistureEstimator {
    calibration: MoistureCalibration,
}

impl MoistureEstimator {
    /// Create an estimator using the standard calibration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom coefficients
    pub fn with_calibration(calibration: MoistureCalibration) -> Result<Self> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &MoistureCalibration {
        &self.calibration
    }

    /// Estimate moisture from channel means
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::MalformedInput` if either mean is negative or
    /// not finite.
    pub fn estimate(&self, means: &ChannelMeans) -> Result<MoistureResult> {
        for (name, value) in [("red", means.red), ("green", means.green)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::malformed(format!(
                    "{} mean must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(MoistureResult {
            moisture_percent: self.calibration.apply(means.red, means.green),
            clamped_range: [self.calibration.min_percent, self.calibration.max_percent],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn means(red: f64, green: f64) -> ChannelMeans {
        ChannelMeans { red, green, blue: 0.0, pixel_count: 1 }
    }

    #[test]
    fn test_black_clamps_to_ceiling() {
        // ratio 0, raw 47
        assert_eq!(estimate_moisture(0.0, 0.0), 31.0);
    }

    #[test]
    fn test_ratio_just_below_pivot_clamps() {
        // ratio 127/160 = 0.79375, raw 31.125
        assert_eq!(estimate_moisture(159.0, 127.0), 31.0);
    }

    #[test]
    fn test_linear_region() {
        // ratio 1.0 exactly
        assert_eq!(estimate_moisture(100.0, 101.0), 27.0);
        // ratio 1.2
        assert_eq!(estimate_moisture(99.0, 120.0), 23.0);
        // ratio 0.9
        assert_eq!(estimate_moisture(99.0, 90.0), 29.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // ratio 130/151 = 0.860927.., raw 29.78145..
        assert_eq!(estimate_moisture(150.0, 130.0), 29.78);
    }

    #[test]
    fn test_green_saturation_clamps_to_floor() {
        assert_eq!(estimate_moisture(0.0, 255.0), 22.0);
    }

    #[test]
    fn test_always_within_bounds() {
        for red in (0..=255).step_by(15) {
            for green in (0..=255).step_by(15) {
                let value = estimate_moisture(red as f64, green as f64);
                assert!((22.0..=31.0).contains(&value), "{} out of range", value);
                assert_eq!((value * 100.0).round() / 100.0, value);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(estimate_moisture(123.4, 98.7), estimate_moisture(123.4, 98.7));
    }

    #[test]
    fn test_estimator_result() {
        let result = MoistureEstimator::new().estimate(&means(100.0, 101.0)).unwrap();
        assert_eq!(result.moisture_percent, 27.0);
        assert_eq!(result.clamped_range, [22.0, 31.0]);
        assert_eq!(result.percent_label(), "27%");
    }

    #[test]
    fn test_estimator_rejects_bad_means() {
        let estimator = MoistureEstimator::new();
        assert!(matches!(
            estimator.estimate(&means(f64::NAN, 10.0)),
            Err(AnalysisError::MalformedInput { .. })
        ));
        assert!(matches!(
            estimator.estimate(&means(10.0, -1.0)),
            Err(AnalysisError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_calibration_validation() {
        let mut calibration = MoistureCalibration::default();
        assert!(calibration.validate().is_ok());

        calibration.red_guard = 0.0;
        assert!(MoistureEstimator::with_calibration(calibration).is_err());

        let inverted = MoistureCalibration {
            min_percent: 40.0,
            ..MoistureCalibration::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let result = MoistureResult { moisture_percent: 25.5, clamped_range: [22.0, 31.0] };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"moisturePercent":25.5,"clampedRange":[22.0,31.0]}"#);
    }
}
