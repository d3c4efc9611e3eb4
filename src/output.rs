//! CLI output formatting and event logging.
//!
//! Each output has a `format_*` function (returns `String` or `Vec<String>`)
//! for testability. Format functions are pure and do no I/O.
//! [`log_event`] is the one place where [`ProcessEvent`]s meet `tracing`:
//!
//! | Event | Level |
//! |---|---|
//! | `Started`, `ImageProcessed`, `Finished` | info |
//! | `PositionAdjusted` | warn |
//! | `ImageSkipped` | error |

use crate::imaging::ImageInfo;
use crate::process::{BatchReport, ProcessEvent};
use std::path::Path;
use tracing::Level;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Severity an event is logged at.
pub fn event_level(event: &ProcessEvent) -> Level {
    match event {
        ProcessEvent::PositionAdjusted { .. } => Level::WARN,
        ProcessEvent::ImageSkipped { .. } => Level::ERROR,
        ProcessEvent::Started { .. }
        | ProcessEvent::ImageProcessed { .. }
        | ProcessEvent::Finished { .. } => Level::INFO,
    }
}

/// Format one event as a single log line.
pub fn format_process_event(event: &ProcessEvent) -> String {
    match event {
        ProcessEvent::Started {
            kind,
            mode,
            offset,
            images,
            logo,
        } => format!(
            "Starting {kind} overlay at ({}, {}) {mode}: {images} images, logo {}",
            offset.0,
            offset.1,
            file_name(logo)
        ),
        ProcessEvent::PositionAdjusted {
            image,
            requested,
            adjusted,
        } => format!(
            "{}: logo at ({}, {}) is out of bounds, adjusted to ({}, {})",
            file_name(image),
            requested.0,
            requested.1,
            adjusted.0,
            adjusted.1
        ),
        ProcessEvent::ImageProcessed {
            image,
            output,
            position,
        } => format!(
            "Processed {} at ({}, {}) → {}",
            file_name(image),
            position.0,
            position.1,
            output.display()
        ),
        ProcessEvent::ImageSkipped { image, reason } => {
            format!("Skipped {}: {reason}", file_name(image))
        }
        ProcessEvent::Finished { processed, skipped } => {
            format!("Finished: {processed} processed, {skipped} skipped")
        }
    }
}

/// Forward an event to `tracing` at its level.
pub fn log_event(event: &ProcessEvent) {
    let line = format_process_event(event);
    match event_level(event) {
        Level::ERROR => tracing::error!("{line}"),
        Level::WARN => tracing::warn!("{line}"),
        _ => tracing::info!("{line}"),
    }
}

/// Final summary lines printed after a batch.
pub fn format_report(report: &BatchReport, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Successfully processed {} images. Results saved in '{}'.",
        report.count(),
        output_dir.display()
    )];
    if !report.skipped.is_empty() {
        lines.push(format!("Skipped {} images:", report.skipped.len()));
        for skipped in &report.skipped {
            lines.push(format!("    {}: {}", file_name(&skipped.source), skipped.reason));
        }
    }
    lines
}

pub fn print_report(report: &BatchReport, output_dir: &Path) {
    for line in format_report(report, output_dir) {
        println!("{}", line);
    }
}

/// Describe one image for the `info` command.
pub fn format_image_info(info: &ImageInfo) -> Vec<String> {
    let format = info
        .format
        .map(|f| format!("{f:?}"))
        .unwrap_or_else(|| "unknown".to_string());
    vec![
        info.filename.clone(),
        format!("    Format: {format}"),
        format!("    Mode: {:?}", info.color),
        format!(
            "    Size: {}x{}",
            info.dimensions.width, info.dimensions.height
        ),
    ]
}
