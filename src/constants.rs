//! Calibration constants and reference values for rice color analysis
//!
//! These values are empirically calibrated. Changing any of them changes
//! previously reported outputs.

/// Grain moisture formula: `CEILING - (green / (red + RED_GUARD) - PIVOT_RATIO) * SLOPE`
pub mod moisture {
    /// Moisture reported when the green/red ratio equals the pivot
    pub const CEILING_PERCENT: f64 = 31.0;

    /// Green/red ratio at which raw moisture equals the ceiling
    pub const PIVOT_RATIO: f64 = 0.8;

    /// Percentage points lost per unit of ratio above the pivot
    pub const SLOPE: f64 = 20.0;

    /// Added to the red mean before dividing
    pub const RED_GUARD: f64 = 1.0;

    /// Lower clamp bound (inclusive)
    pub const MIN_PERCENT: f64 = 22.0;

    /// Upper clamp bound (inclusive)
    pub const MAX_PERCENT: f64 = 31.0;

    /// Decimal digits kept in the reported value
    pub const DECIMALS: i32 = 2;
}

/// Pixel layout
pub mod pixels {
    /// Channels after alpha removal
    pub const RGB_CHANNELS: u8 = 3;

    /// Channels with alpha still present
    pub const RGBA_CHANNELS: u8 = 4;
}

/// Leaf color chart
pub mod chart {
    /// Number of reference levels on the chart
    pub const LEVEL_COUNT: usize = 6;

    /// Unit appended to fertilizer predictions (kilograms of nitrogen per fen of paddy)
    pub const FERTILIZER_UNIT: &str = "kg/fen";
}

/// Upload key prefixes used by the service layer
pub mod storage {
    /// Grain moisture uploads
    pub const GRAIN_KEY_PREFIX: &str = "uploads";

    /// Leaf color uploads
    pub const LEAF_KEY_PREFIX: &str = "leaf-analysis";

    /// Content type assumed when an upload does not declare one
    pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
}
