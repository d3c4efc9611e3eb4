//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader` format sniffing + header read |
//! | **Composite** | `imageops::overlay` on an RGBA canvas, flattened to RGB |
//! | **Inspect** | `ImageReader` format sniffing + decode |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for placement math (unit testable)
//! - **Parameters**: Data structures describing a composite and its placement
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    calculate_logo_size, calculate_placement, clamp_position, classify_overlap, resolve_position,
};
pub use operations::{OverlayConfig, OverlayOutcome, overlay_logo, plan_overlay, prepare_overlay};
pub use params::{CompositeParams, Overlap, Placement};
pub use rust_backend::{ImageInfo, RustBackend, inspect};
