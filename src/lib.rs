//! # Logo Overlay
//!
//! Stamps one logo onto every image in a folder. Pick an image type, give an
//! offset, and each base image in `inputs/images_<type>/` is written to
//! `outputs/` with the logo from `inputs/logo_<type>/` blended on top.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      inputs/   →  ImageSet         (base images + one logo)
//! 2. Place     per image →  Placement        (resolve offset, clamp to bounds)
//! 3. Composite per image →  outputs/<name>   (alpha blend, flatten to RGB)
//! ```
//!
//! Placement is pure math and lives apart from pixel work so it can be tested
//! without images. Compositing sits behind the [`imaging::ImageBackend`] trait
//! so the batch loop can run against a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageKind`, `OffsetMode`, `OverlayJob` |
//! | [`scan`] | Finds base images and the logo; creates the folder layout |
//! | [`imaging`] | Placement calculations, backend trait, `image`-crate backend |
//! | [`process`] | Batch loop with per-image error isolation and progress events |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | Event/report formatting and the bridge to `tracing` |
//!
//! # Design Decisions
//!
//! ## Offsets Are Clamped, Not Rejected
//!
//! A logo that would hang off the edge is moved back inside, one axis at a
//! time, and a warning is logged. Logos larger than the base image are pinned
//! to the top/left edge and cropped.
//!
//! ## One Bad Image Does Not Stop the Batch
//!
//! Decode and encode failures are recorded in the [`process::BatchReport`]
//! and logged; the remaining images are still processed. Only configuration
//! problems abort a run, and they do so before anything is written.
//!
//! ## Logging Is Injected
//!
//! The library reports progress as [`process::ProcessEvent`]s on a channel
//! supplied by the caller. The binary forwards them to `tracing`; tests
//! collect them directly.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;
