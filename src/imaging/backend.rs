//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the overlay pipeline
//! needs: identify (read dimensions) and composite (blend a logo onto a base
//! image and write the result).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording mock below so placement and batch logic can
//! be checked without encoding pixels.

use super::params::CompositeParams;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Blend the logo onto the base image and write the flattened result.
    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// Dimensions are looked up by path; paths listed in `failing` make
    /// `composite` fail, which is how tests simulate undecodable images.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: HashMap<PathBuf, Dimensions>,
        pub failing: Vec<PathBuf>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Composite {
            base: String,
            logo: String,
            output: String,
            x: i64,
            y: i64,
            logo_width: u32,
            logo_height: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
            self.dimensions
                .insert(path.into(), Dimensions::new(width, height));
            self
        }

        pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
            self.failing.push(path.into());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.dimensions.get(path).copied().ok_or_else(|| {
                BackendError::ProcessingFailed(format!("No mock dimensions for {}", path.display()))
            })
        }

        fn composite(&self, params: &CompositeParams) -> Result<(), BackendError> {
            if self.failing.iter().any(|p| p == &params.base) {
                return Err(BackendError::ProcessingFailed(format!(
                    "Failed to decode {}",
                    params.base.display()
                )));
            }
            self.operations.lock().unwrap().push(RecordedOp::Composite {
                base: params.base.to_string_lossy().to_string(),
                logo: params.logo.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                x: params.x,
                y: params.y,
                logo_width: params.logo_size.width,
                logo_height: params.logo_size.height,
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::new().with_dimensions("/test/image.jpg", 800, 600);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result, Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_unknown_path_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/missing.jpg")).is_err());
    }

    #[test]
    fn mock_failing_composite_is_not_recorded() {
        let backend = MockBackend::new().failing_on("/bad.jpg");
        let result = backend.composite(&CompositeParams {
            base: "/bad.jpg".into(),
            logo: "/logo.png".into(),
            output: "/out/bad.jpg".into(),
            x: 0,
            y: 0,
            logo_size: Dimensions::new(10, 10),
        });

        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(backend.get_operations().is_empty());
    }
}
