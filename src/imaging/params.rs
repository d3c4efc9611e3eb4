//! Parameter and result types for overlay operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations), which decides where
//! the logo goes, and the [`backend`](super::backend), which does the pixel
//! work. This separation allows testing placement with a mock backend.
//!
//! ## Types
//!
//! - [`Overlap`]: How the requested logo rectangle relates to the base image.
//! - [`Placement`]: Final top-left position, plus whether it was adjusted.
//! - [`CompositeParams`]: Full specification for one composite: inputs, output, position, logo size.

use super::backend::Dimensions;
use serde::Serialize;
use std::path::PathBuf;

/// Relation between the logo rectangle and the base image rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overlap {
    /// Logo lies entirely within the base image.
    Inside,
    /// Logo overlaps the base image but sticks out on at least one side.
    Partial,
    /// Logo does not touch the base image at all.
    Outside,
}

/// Resolved logo position for one base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Absolute top-left position before clamping.
    pub requested: (i64, i64),
    /// Absolute top-left position actually used.
    pub x: i64,
    pub y: i64,
    /// Classification of `requested`.
    pub overlap: Overlap,
    /// True when clamping moved the logo away from `requested`.
    pub adjusted: bool,
}

impl Placement {
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}

/// Parameters for a composite operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeParams {
    pub base: PathBuf,
    pub logo: PathBuf,
    pub output: PathBuf,
    pub x: i64,
    pub y: i64,
    /// Size the logo is drawn at. The backend resizes the logo when its
    /// decoded size differs.
    pub logo_size: Dimensions,
}
