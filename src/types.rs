//! Job description types shared by discovery, placement and the batch loop.
//!
//! An [`OverlayJob`] is built once from CLI input and never mutated. It says
//! *which* images to process ([`ImageKind`]) and *where* the logo goes
//! (offset + [`OffsetMode`]); the per-image pixel position is computed later
//! by [`crate::imaging::calculations`] because base image sizes vary.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::scan::ScanError;

/// Image family processed by a job. Base images and the logo share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    #[value(alias = "jpg")]
    Jpeg,
    Png,
}

impl ImageKind {
    /// File extensions (lowercase, no dot) accepted for this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }

    /// Suffix used in the kind-specific folder names (`images_jpeg`, `logo_png`).
    pub fn folder_suffix(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// Whether `ext` (without the dot) belongs to this kind, ignoring case.
    pub fn matches_extension(self, ext: &str) -> bool {
        self.extensions()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_suffix())
    }
}

impl FromStr for ImageKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(ScanError::UnsupportedKind(s.to_string())),
        }
    }
}

/// How the requested offset is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetMode {
    /// Offset from the base image's top-left corner.
    CornerRelative,
    /// Offset from the base image's geometric center.
    CenterRelative,
}

impl OffsetMode {
    pub fn from_center_flag(center_relative: bool) -> Self {
        if center_relative {
            Self::CenterRelative
        } else {
            Self::CornerRelative
        }
    }
}

impl fmt::Display for OffsetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CornerRelative => f.write_str("corner-relative"),
            Self::CenterRelative => f.write_str("center-relative"),
        }
    }
}

/// A complete overlay request: image family plus logo offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayJob {
    kind: ImageKind,
    offset: (i64, i64),
    mode: OffsetMode,
}

impl OverlayJob {
    pub fn new(kind: ImageKind, offset: (i64, i64), mode: OffsetMode) -> Self {
        Self { kind, offset, mode }
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn offset(&self) -> (i64, i64) {
        self.offset
    }

    pub fn mode(&self) -> OffsetMode {
        self.mode
    }
}
