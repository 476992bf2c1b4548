//! Error types for the paddy_colorscan library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for paddy_colorscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color sampling, classification and the upload service
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Pixel data or region violates the input contract
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// Selected region has zero area
    #[error("Degenerate region: {width}x{height} contains no pixels")]
    DegenerateRegion { width: u32, height: u32 },

    /// Image file or upload could not be decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File extension is not a format the decoder understands
    #[error("Unsupported image format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Upload request carried no image bytes
    #[error("No file uploaded")]
    MissingUpload,

    /// Image store rejected the upload
    #[error("Storage error: {message}")]
    StorageError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create a malformed input error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage error with context
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StorageError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a failure on our side
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::MalformedInput { .. }
                | AnalysisError::DegenerateRegion { .. }
                | AnalysisError::ImageLoadError { .. }
                | AnalysisError::UnsupportedFormat { .. }
                | AnalysisError::MissingUpload
                | AnalysisError::InvalidParameter { .. }
        )
    }

    /// HTTP-style status code for the surrounding request handler
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::MissingUpload => "No file uploaded".to_string(),
            AnalysisError::ImageLoadError { .. } | AnalysisError::UnsupportedFormat { .. } => {
                "Could not read the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::DegenerateRegion { .. } => {
                "The image is too small to analyze. Please upload a larger photo.".to_string()
            }
            AnalysisError::StorageError { .. } => "Failed to upload image".to_string(),
            _ => "Failed to process image".to_string(),
        }
    }
}
