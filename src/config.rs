//! Configuration for the analysis pipelines and upload service.
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use paddy_colorscan::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), paddy_colorscan::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`LeafConfig`]: sampling region for leaf photos
//! - [`GrainConfig`]: sampling region for grain photos
//! - [`MoistureCalibration`]: coefficients of the moisture formula
//! - [`StorageConfig`]: where uploaded originals are kept

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::constants::storage::{GRAIN_KEY_PREFIX, LEAF_KEY_PREFIX};
use crate::moisture::MoistureCalibration;
use crate::region::RegionPolicy;
use crate::{AnalysisError, Result};

/// Complete configuration.
///
/// Every section falls back to its defaults when omitted from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub leaf: LeafConfig,
    pub grain: GrainConfig,
    pub moisture: MoistureCalibration,
    pub storage: StorageConfig,
}

/// Leaf color sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafConfig {
    /// Leaf photos place the leaf above the chart, so only the top half is sampled
    pub region: RegionPolicy,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            region: RegionPolicy::TopHalf,
        }
    }
}

/// Grain moisture sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainConfig {
    /// The grain sample is assumed to fill the frame
    pub region: RegionPolicy,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            region: RegionPolicy::FullFrame,
        }
    }
}

/// Image store settings used by the upload service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory originals are written under
    pub root_dir: PathBuf,

    /// Public URL prefix; when unset, locations are file paths
    pub base_url: Option<String>,

    /// Key prefix for grain uploads
    pub grain_prefix: String,

    /// Key prefix for leaf uploads
    pub leaf_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("uploads-store"),
            base_url: None,
            grain_prefix: GRAIN_KEY_PREFIX.to_string(),
            leaf_prefix: LEAF_KEY_PREFIX.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Reject values no analysis could run with
    pub fn validate(&self) -> Result<()> {
        self.moisture.validate()?;
        for (name, prefix) in [
            ("storage.grain_prefix", &self.storage.grain_prefix),
            ("storage.leaf_prefix", &self.storage.leaf_prefix),
        ] {
            if prefix.contains("..") || prefix.starts_with('/') {
                return Err(AnalysisError::InvalidParameter {
                    parameter: name.to_string(),
                    value: prefix.clone(),
                });
            }
        }
        Ok(())
    }
}
