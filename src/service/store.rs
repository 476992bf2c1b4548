//! Storage of uploaded originals

use std::path::{Path, PathBuf};
use crate::config::StorageConfig;
use crate::{AnalysisError, Result};

/// Persists an uploaded image and returns a retrievable location
pub trait ImageStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

/// Object key for an upload: `{prefix}/{timestamp_ms}_{file_name}`
///
/// Path separators in the file name are replaced so the key always lands
/// directly under `prefix`.
pub fn upload_key(prefix: &str, timestamp_ms: u128, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}/{}_{}", prefix.trim_end_matches('/'), timestamp_ms, safe_name)
}

/// Stores uploads as files below a root directory
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: None,
        }
    }

    /// Report locations as `{base_url}/{key}` instead of file paths
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            root: config.root_dir.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for LocalImageStore {
    fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<String> {
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(AnalysisError::InvalidParameter {
                parameter: "key".to_string(),
                value: key.to_string(),
            });
        }

        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AnalysisError::storage(format!("Failed to create {}", parent.display()), e)
            })?;
        }
        std::fs::write(&path, bytes)
            .map_err(|e| AnalysisError::storage(format!("Failed to write {}", path.display()), e))?;

        Ok(match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => path.display().to_string(),
        })
    }
}
