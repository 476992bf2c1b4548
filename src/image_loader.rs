//! Unified image loading for uploaded and on-disk photos
//!
//! Decodes JPEG, PNG, GIF, WebP, TIFF, BMP and the other formats supported
//! by the `image` crate into an RGB [`PixelBuffer`]. Alpha is always stripped
//! here, so downstream sampling only ever sees three channels.
//!
//! EXIF orientation is NOT applied: both sampling policies average whole
//! rows, and a rotated photo is treated the same way the camera stored it.

use crate::error::{AnalysisError, Result};
use crate::pixels::PixelBuffer;
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }

    /// MIME type reported to the image store
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Ico => "image/x-icon",
            ImageFormat::Tga => "image/x-tga",
            ImageFormat::Pnm => "image/x-portable-anymap",
            ImageFormat::Qoi => "image/qoi",
        }
    }
}

/// Load an image from disk as an RGB pixel buffer
///
/// # Errors
///
/// Returns:
/// - `AnalysisError::UnsupportedFormat` if the extension is unknown
/// - `AnalysisError::ImageLoadError` if the file cannot be opened or decoded
///
/// # Example
///
/// ```rust,no_run
/// use paddy_colorscan::image_loader::load_image;
/// use std::path::Path;
///
/// let pixels = load_image(Path::new("leaf.jpg"))?;
/// println!("Loaded image: {}x{}", pixels.width(), pixels.height());
/// # Ok::<(), paddy_colorscan::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    use image::ImageReader;

    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(PixelBuffer::from(img.to_rgb8()))
}

/// Decode an in-memory image (e.g. an upload body) as an RGB pixel buffer
///
/// The format is sniffed from the content, not from any file name.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    if bytes.is_empty() {
        return Err(AnalysisError::MissingUpload);
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::image_load("Failed to decode uploaded image", e))?;

    Ok(PixelBuffer::from(img.to_rgb8()))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm", "pgm",
        "ppm", "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("grain.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("grain.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("grain.heic")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("heic"));
        assert!(!is_supported_extension("doc"));
        for ext in supported_extensions() {
            let name = format!("x.{}", ext);
            assert!(ImageFormat::from_extension(Path::new(&name)).is_some(), "{}", ext);
        }
    }

    #[test]
    fn test_decode_strips_alpha() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 128]));
        let pixels = decode_image(&png_bytes(image::DynamicImage::ImageRgba8(rgba))).unwrap();
        assert_eq!(pixels.channels(), 3);
        assert_eq!((pixels.width(), pixels.height()), (3, 2));
        assert_eq!(pixels.rgb_at(2, 1), [10, 20, 30]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
    }

    #[test]
    fn test_decode_empty_is_missing_upload() {
        assert!(matches!(decode_image(&[]), Err(AnalysisError::MissingUpload)));
    }

    #[test]
    fn test_load_unknown_extension() {
        let err = load_image(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
    }
}
