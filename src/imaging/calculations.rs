//! Pure calculation functions for logo placement.
//!
//! All functions here are pure and testable without any I/O or images.
//! Positions are `i64` because a requested offset may point left of or above
//! the base image; dimensions are `u32` and never negative.

use super::backend::Dimensions;
use super::params::{Overlap, Placement};
use crate::types::OffsetMode;

/// Convert a requested offset into an absolute top-left logo position.
///
/// - Corner-relative: the offset is the position.
/// - Center-relative: the offset moves the logo's center away from the base
///   image's center. All halving is floor division.
///
/// Arithmetic saturates, so any `i64` offset yields a position that clamping
/// can bring back onto the image.
///
/// # Examples
/// ```
/// # use logo_overlay::imaging::{Dimensions, resolve_position};
/// # use logo_overlay::types::OffsetMode;
/// let base = Dimensions::new(800, 600);
/// let logo = Dimensions::new(100, 100);
/// assert_eq!(resolve_position((0, 0), OffsetMode::CenterRelative, base, logo), (350, 250));
/// assert_eq!(resolve_position((10, 10), OffsetMode::CornerRelative, base, logo), (10, 10));
/// ```
pub fn resolve_position(
    offset: (i64, i64),
    mode: OffsetMode,
    base: Dimensions,
    logo: Dimensions,
) -> (i64, i64) {
    let (ox, oy) = offset;
    match mode {
        OffsetMode::CornerRelative => (ox, oy),
        OffsetMode::CenterRelative => (
            half(base.width)
                .saturating_add(ox)
                .saturating_sub(half(logo.width)),
            half(base.height)
                .saturating_add(oy)
                .saturating_sub(half(logo.height)),
        ),
    }
}

fn half(length: u32) -> i64 {
    i64::from(length) / 2
}

/// Classify how the logo rectangle at `position` relates to the base image.
pub fn classify_overlap(position: (i64, i64), base: Dimensions, logo: Dimensions) -> Overlap {
    let (x, y) = position;
    let (bw, bh) = (i64::from(base.width), i64::from(base.height));
    let (lw, lh) = (i64::from(logo.width), i64::from(logo.height));

    let (right, bottom) = (x.saturating_add(lw), y.saturating_add(lh));

    if x >= 0 && y >= 0 && right <= bw && bottom <= bh {
        Overlap::Inside
    } else if right <= 0 || x >= bw || bottom <= 0 || y >= bh {
        Overlap::Outside
    } else {
        Overlap::Partial
    }
}

/// Clamp a position so the logo stays within the base image.
///
/// Each axis is clamped independently to `[0, base - logo]`. When the logo is
/// larger than the base on an axis, that axis is pinned to `0` and the excess
/// is cropped by the canvas.
pub fn clamp_position(position: (i64, i64), base: Dimensions, logo: Dimensions) -> (i64, i64) {
    let (x, y) = position;
    (
        clamp_axis(x, base.width, logo.width),
        clamp_axis(y, base.height, logo.height),
    )
}

fn clamp_axis(value: i64, base: u32, logo: u32) -> i64 {
    let max = i64::from(base) - i64::from(logo);
    value.min(max).max(0)
}

/// Resolve, classify and (when needed) clamp the logo position for one base image.
pub fn calculate_placement(
    offset: (i64, i64),
    mode: OffsetMode,
    base: Dimensions,
    logo: Dimensions,
) -> Placement {
    let requested = resolve_position(offset, mode, base, logo);
    let overlap = classify_overlap(requested, base, logo);

    let (x, y) = match overlap {
        Overlap::Inside => requested,
        Overlap::Partial | Overlap::Outside => clamp_position(requested, base, logo),
    };

    Placement {
        requested,
        x,
        y,
        overlap,
        adjusted: (x, y) != requested,
    }
}

/// Scale the logo down so its longer edge is at most `max_dimension`.
///
/// Aspect ratio is preserved; logos already within the limit are returned
/// unchanged (never upscaled). The shorter edge is truncated and kept at
/// least one pixel.
pub fn calculate_logo_size(logo: Dimensions, max_dimension: Option<u32>) -> Dimensions {
    let Some(max) = max_dimension else {
        return logo;
    };
    let longer = logo.width.max(logo.height);
    if longer <= max || longer == 0 {
        return logo;
    }

    let scale = max as f64 / longer as f64;
    if logo.width >= logo.height {
        Dimensions::new(max, ((logo.height as f64 * scale) as u32).max(1))
    } else {
        Dimensions::new(((logo.width as f64 * scale) as u32).max(1), max)
    }
}
