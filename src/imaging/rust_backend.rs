//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` |
//! | Identify | `ImageReader::into_dimensions`, format sniffed from content (header only) |
//! | Logo resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Alpha blend | `image::imageops::overlay` on an RGBA8 canvas |
//! | Flatten | `DynamicImage::into_rgb8` |
//! | Encode | `DynamicImage::save_with_format`, format from the output extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::CompositeParams;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a single image file, as shown by the `info` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub filename: String,
    pub format: Option<ImageFormat>,
    pub color: image::ColorType,
    pub dimensions: Dimensions,
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file content, so a mislabelled extension
/// still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        BackendError::ProcessingFailed(format!("Unsupported output format: {}", path.display()))
    })?;
    img.save_with_format(path, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

/// Decode an image and describe it.
pub fn inspect(path: &Path) -> Result<ImageInfo, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?;
    let format = reader.format();
    let img = reader.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })?;

    Ok(ImageInfo {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        format,
        color: img.color(),
        dimensions: Dimensions::new(img.width(), img.height()),
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to read dimensions of {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Dimensions { width, height })
    }

    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError> {
        let base = load_image(&params.base)?.into_rgba8();

        let mut logo = load_image(&params.logo)?;
        let target = params.logo_size;
        if logo.width() != target.width || logo.height() != target.height {
            logo = logo.resize_exact(target.width, target.height, FilterType::Lanczos3);
        }
        let logo = logo.into_rgba8();

        // Transparent canvas, base at origin, logo blended with its own alpha
        let mut canvas = RgbaImage::new(base.width(), base.height());
        imageops::overlay(&mut canvas, &base, 0, 0);
        imageops::overlay(&mut canvas, &logo, params.x, params.y);

        let flattened = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).into_rgb8());
        save_image(&flattened, &params.output)
    }
}
