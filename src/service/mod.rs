//! Upload handling around the analysis core
//!
//! Mirrors a request handler: decode the uploaded image, run the matching
//! pipeline, keep the original in an [`ImageStore`], and build the JSON
//! response body. The core itself never logs; failures are reported here.

pub mod store;

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::constants::storage::DEFAULT_CONTENT_TYPE;
use crate::image_loader::decode_image;
use crate::leaf::LeafAnalysis;
use crate::moisture::MoistureEstimator;
use crate::pipeline::{analyze_grain_pixels, analyze_leaf_pixels};
use crate::{AnalysisError, Result};

pub use store::{upload_key, ImageStore, LocalImageStore};

/// An uploaded image file
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// # Errors
    ///
    /// Returns `AnalysisError::MissingUpload` if `bytes` is empty.
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AnalysisError::MissingUpload);
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
            bytes,
        })
    }
}

/// Response body for a grain moisture upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrainResponse {
    pub status: u16,
    pub url: String,
    /// `None` when the image could be stored but not analyzed
    pub moisture_content_percent: Option<String>,
}

/// Response body for a leaf color upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafResponse {
    pub status: u16,
    pub url: String,
    pub analysis: LeafAnalysis,
    /// Fertilizer recommendation with unit, e.g. `3 kg/fen`
    pub predict: String,
}

/// Error body returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            status: err.status_code(),
            error: err.user_message(),
        }
    }
}

/// Runs both upload flows against one store
pub struct AnalysisService<S: ImageStore> {
    config: AnalysisConfig,
    estimator: MoistureEstimator,
    store: S,
}

impl<S: ImageStore> AnalysisService<S> {
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: AnalysisConfig, store: S) -> Result<Self> {
        config.validate()?;
        let estimator = MoistureEstimator::with_calibration(config.moisture)?;
        Ok(Self {
            config,
            estimator,
            store,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Estimate moisture and store the original
    ///
    /// An analysis failure does not abort the upload: the image is still
    /// stored and `moisture_content_percent` is `None`. Only storage
    /// failures are returned as errors.
    pub fn handle_grain_upload(&self, upload: &Upload) -> Result<GrainResponse> {
        let moisture = decode_image(&upload.bytes).and_then(|pixels| {
            analyze_grain_pixels(&pixels, &self.estimator, self.config.grain.region)
        });

        let moisture_content_percent = match moisture {
            Ok(result) => {
                debug!(
                    file = %upload.file_name,
                    moisture = result.moisture_percent,
                    "grain moisture estimated"
                );
                Some(result.percent_label())
            }
            Err(err) => {
                warn!(file = %upload.file_name, error = %err, "color analysis failed");
                None
            }
        };

        let url = self.store_upload(&self.config.storage.grain_prefix, upload)?;
        Ok(GrainResponse {
            status: 200,
            url,
            moisture_content_percent,
        })
    }

    /// Classify leaf color and store the original
    ///
    /// Unlike the grain flow, an analysis failure aborts before anything is
    /// stored.
    pub fn handle_leaf_upload(&self, upload: &Upload) -> Result<LeafResponse> {
        let analysis = decode_image(&upload.bytes)
            .and_then(|pixels| analyze_leaf_pixels(&pixels, self.config.leaf.region))
            .inspect_err(|err| {
                warn!(file = %upload.file_name, error = %err, "leaf analysis failed");
            })?;

        debug!(
            file = %upload.file_name,
            level = analysis.color_level,
            avg_rgb = %analysis.avg_rgb,
            "leaf color classified"
        );

        let url = self.store_upload(&self.config.storage.leaf_prefix, upload)?;
        let predict = analysis.prediction();
        Ok(LeafResponse {
            status: 200,
            url,
            analysis,
            predict,
        })
    }

    fn store_upload(&self, prefix: &str, upload: &Upload) -> Result<String> {
        let key = upload_key(prefix, now_millis(), &upload.file_name);
        let location = self
            .store
            .put(&key, &upload.bytes, &upload.content_type)
            .inspect_err(|err| warn!(key = %key, error = %err, "upload failed"))?;
        info!(key = %key, location = %location, "stored upload");
        Ok(location)
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
