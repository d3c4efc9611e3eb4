//! High-level overlay operations.
//!
//! These functions combine calculations with backend execution: identify both
//! images, work out where the logo goes, then ask the backend to composite.
//! [`prepare_overlay`] stops before compositing so callers can report the
//! placement first.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_logo_size, calculate_placement};
use super::params::{CompositeParams, Placement};
use crate::types::OffsetMode;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Logo placement settings shared by every image in a batch.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub logo: PathBuf,
    pub offset: (i64, i64),
    pub mode: OffsetMode,
    /// Longest logo edge in pixels; larger logos are scaled down.
    pub logo_max_dimension: Option<u32>,
}

/// What one overlay produced.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOutcome {
    pub output: PathBuf,
    pub placement: Placement,
}

/// Plan a composite without executing it.
///
/// When `output` is `None` the base image is overwritten in place.
pub fn plan_overlay(
    base: &Path,
    output: Option<&Path>,
    base_dims: Dimensions,
    logo_dims: Dimensions,
    config: &OverlayConfig,
) -> (CompositeParams, Placement) {
    let logo_size = calculate_logo_size(logo_dims, config.logo_max_dimension);
    let placement = calculate_placement(config.offset, config.mode, base_dims, logo_size);

    let params = CompositeParams {
        base: base.to_path_buf(),
        logo: config.logo.clone(),
        output: output.unwrap_or(base).to_path_buf(),
        x: placement.x,
        y: placement.y,
        logo_size,
    };
    (params, placement)
}

/// Identify both images and plan the composite.
pub fn prepare_overlay(
    backend: &impl ImageBackend,
    base: &Path,
    output: Option<&Path>,
    config: &OverlayConfig,
) -> Result<(CompositeParams, Placement)> {
    let base_dims = backend.identify(base)?;
    let logo_dims = backend.identify(&config.logo)?;
    Ok(plan_overlay(base, output, base_dims, logo_dims, config))
}

/// Composite the configured logo onto one base image.
///
/// Returns the path actually written and the placement used.
pub fn overlay_logo(
    backend: &impl ImageBackend,
    base: &Path,
    output: Option<&Path>,
    config: &OverlayConfig,
) -> Result<OverlayOutcome> {
    let (params, placement) = prepare_overlay(backend, base, output, config)?;
    backend.composite(&params)?;

    Ok(OverlayOutcome {
        output: params.output,
        placement,
    })
}
