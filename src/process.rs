//! Batch overlay of a logo onto every discovered base image.
//!
//! Takes an [`OverlayJob`] and a [`FolderLayout`], discovers the inputs with
//! [`scan::discover`](crate::scan::discover), then composites the logo onto
//! each base image in turn.
//!
//! ## Error isolation
//!
//! Only configuration problems (unsupported kind, no base images, no logo)
//! and a failure to create the output folder abort the run. A base image that
//! cannot be decoded, identified or written is recorded as skipped and the
//! loop moves on to the next one.
//!
//! ## Events
//!
//! Progress is reported through an optional [`std::sync::mpsc::Sender`] of
//! [`ProcessEvent`]s. The library never configures logging itself; the binary
//! drains the channel and forwards events to `tracing` via
//! [`crate::output::log_event`].
//!
//! ## Output Structure
//!
//! ```text
//! outputs/
//! ├── beach.jpg      # same filename as inputs/images_jpeg/beach.jpg
//! └── city.jpeg
//! ```

use crate::imaging::{
    BackendError, ImageBackend, OverlayConfig, Placement, RustBackend, prepare_overlay,
};
use crate::scan::{self, FolderLayout, ImageSet, ScanError};
use crate::types::{ImageKind, OffsetMode, OverlayJob};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Configuration error: {0}")]
    Scan(#[from] ScanError),
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress events emitted during a batch run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Discovery succeeded; the batch is about to start.
    Started {
        kind: ImageKind,
        mode: OffsetMode,
        offset: (i64, i64),
        images: usize,
        logo: PathBuf,
    },
    /// The requested position was clamped to keep the logo on the image.
    PositionAdjusted {
        image: PathBuf,
        requested: (i64, i64),
        adjusted: (i64, i64),
    },
    /// One image was composited and written.
    ImageProcessed {
        image: PathBuf,
        output: PathBuf,
        position: (i64, i64),
    },
    /// One image failed and was skipped.
    ImageSkipped { image: PathBuf, reason: String },
    /// The batch finished.
    Finished { processed: usize, skipped: usize },
}

/// Options that are not part of the job itself.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub logo_max_dimension: Option<u32>,
}

/// A successfully processed base image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub placement: Placement,
}

/// A base image that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedImage {
    pub source: PathBuf,
    pub reason: String,
}

/// Per-image outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub skipped: Vec<SkippedImage>,
}

impl BatchReport {
    /// Number of images written.
    pub fn count(&self) -> usize {
        self.processed.len()
    }
}

/// A validated job bound to its discovered inputs.
#[derive(Debug, Clone)]
pub struct OverlayManager {
    job: OverlayJob,
    images: ImageSet,
    output_dir: PathBuf,
    options: RunOptions,
}

impl OverlayManager {
    /// Discover inputs for `job`. Fails before anything is written.
    pub fn new(
        job: OverlayJob,
        layout: &FolderLayout,
        options: RunOptions,
    ) -> Result<Self, ScanError> {
        let images = scan::discover(job.kind(), layout)?;
        Ok(Self {
            job,
            images,
            output_dir: layout.outputs.clone(),
            options,
        })
    }

    pub fn job(&self) -> &OverlayJob {
        &self.job
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    /// Process every image with the `image`-crate backend. Returns the processed count.
    pub fn run(&self, events: Option<Sender<ProcessEvent>>) -> Result<usize, ProcessError> {
        self.run_with_backend(&RustBackend::new(), events)
            .map(|report| report.count())
    }

    /// Process every image using a specific backend (allows testing with mock).
    pub fn run_with_backend(
        &self,
        backend: &impl ImageBackend,
        events: Option<Sender<ProcessEvent>>,
    ) -> Result<BatchReport, ProcessError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ProcessError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        emit(
            &events,
            ProcessEvent::Started {
                kind: self.job.kind(),
                mode: self.job.mode(),
                offset: self.job.offset(),
                images: self.images.images().len(),
                logo: self.images.logo().to_path_buf(),
            },
        );

        let config = OverlayConfig {
            logo: self.images.logo().to_path_buf(),
            offset: self.job.offset(),
            mode: self.job.mode(),
            logo_max_dimension: self.options.logo_max_dimension,
        };

        let mut report = BatchReport::default();
        for source in self.images.images() {
            match self.process_image(backend, source, &config, &events) {
                Ok(processed) => {
                    emit(
                        &events,
                        ProcessEvent::ImageProcessed {
                            image: source.clone(),
                            output: processed.output.clone(),
                            position: processed.placement.position(),
                        },
                    );
                    report.processed.push(processed);
                }
                Err(e) => {
                    let reason = e.to_string();
                    emit(
                        &events,
                        ProcessEvent::ImageSkipped {
                            image: source.clone(),
                            reason: reason.clone(),
                        },
                    );
                    report.skipped.push(SkippedImage {
                        source: source.clone(),
                        reason,
                    });
                }
            }
        }

        emit(
            &events,
            ProcessEvent::Finished {
                processed: report.processed.len(),
                skipped: report.skipped.len(),
            },
        );

        Ok(report)
    }

    /// Plan, warn about any adjustment, then composite one image.
    fn process_image(
        &self,
        backend: &impl ImageBackend,
        source: &Path,
        config: &OverlayConfig,
        events: &Option<Sender<ProcessEvent>>,
    ) -> Result<ProcessedImage, BackendError> {
        let output = output_path(source, &self.output_dir);
        let (params, placement) = prepare_overlay(backend, source, Some(&output), config)?;

        if placement.adjusted {
            emit(
                events,
                ProcessEvent::PositionAdjusted {
                    image: source.to_path_buf(),
                    requested: placement.requested,
                    adjusted: placement.position(),
                },
            );
        }

        backend.composite(&params)?;
        Ok(ProcessedImage {
            source: source.to_path_buf(),
            output: params.output,
            placement,
        })
    }
}

/// Discover inputs for `job` and run the batch. Returns the processed count.
pub fn run(
    job: OverlayJob,
    layout: &FolderLayout,
    options: RunOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<usize, ProcessError> {
    OverlayManager::new(job, layout, options)?.run(events)
}

/// Like [`run`], but returns the per-image report.
pub fn run_report(
    job: OverlayJob,
    layout: &FolderLayout,
    options: RunOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    OverlayManager::new(job, layout, options)?.run_with_backend(&RustBackend::new(), events)
}

/// Same filename as `source`, inside `output_dir`.
fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(source),
    }
}

fn emit(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    /// Lay out `names` as PNG base images plus one logo, and a mock that knows their sizes.
    fn setup(tmp: &TempDir, names: &[&str]) -> (FolderLayout, MockBackend) {
        let layout = FolderLayout::new(tmp.path().join("inputs"), tmp.path().join("outputs"));
        let logo = layout.logo_dir(ImageKind::Png).join("logo.png");
        touch(&logo);

        let mut backend = MockBackend::new().with_dimensions(&logo, 100, 100);
        for name in names {
            let path = layout.images_dir(ImageKind::Png).join(name);
            touch(&path);
            backend = backend.with_dimensions(path, 800, 600);
        }
        (layout, backend)
    }

    fn job(offset: (i64, i64), mode: OffsetMode) -> OverlayJob {
        OverlayJob::new(ImageKind::Png, offset, mode)
    }

    #[test]
    fn processes_every_image_into_output_dir() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png", "b.png"]);

        let manager = OverlayManager::new(
            job((10, 10), OffsetMode::CornerRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        let report = manager.run_with_backend(&backend, None).unwrap();

        assert_eq!(report.count(), 2);
        assert!(report.skipped.is_empty());
        assert!(layout.outputs.is_dir());
        assert_eq!(report.processed[0].output, layout.outputs.join("a.png"));
        assert_eq!(report.processed[1].output, layout.outputs.join("b.png"));

        let composites: Vec<_> = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Composite { .. }))
            .collect();
        assert_eq!(composites.len(), 2);
        assert!(
            composites
                .iter()
                .all(|op| matches!(op, RecordedOp::Composite { x: 10, y: 10, .. }))
        );
    }

    #[test]
    fn failing_image_is_skipped_and_batch_continues() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png", "b.png", "c.png"]);
        let backend = backend.failing_on(layout.images_dir(ImageKind::Png).join("b.png"));

        let manager = OverlayManager::new(
            job((0, 0), OffsetMode::CenterRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        let (tx, rx) = mpsc::channel();
        let report = manager.run_with_backend(&backend, Some(tx)).unwrap();

        assert_eq!(report.count(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].source.ends_with("b.png"));
        assert!(report.skipped[0].reason.contains("decode"));

        let events: Vec<ProcessEvent> = rx.iter().collect();
        let skipped = events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::ImageSkipped { .. }))
            .count();
        assert_eq!(skipped, 1);
        assert_eq!(
            events.last(),
            Some(&ProcessEvent::Finished {
                processed: 2,
                skipped: 1
            })
        );
    }

    #[test]
    fn events_follow_batch_order() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png"]);

        let manager = OverlayManager::new(
            job((0, 0), OffsetMode::CenterRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        let (tx, rx) = mpsc::channel();
        manager.run_with_backend(&backend, Some(tx)).unwrap();

        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            ProcessEvent::Started { images: 1, kind: ImageKind::Png, .. }
        ));
        assert!(matches!(
            &events[1],
            ProcessEvent::ImageProcessed { position: (350, 250), .. }
        ));
        assert!(matches!(&events[2], ProcessEvent::Finished { processed: 1, skipped: 0 }));
    }

    #[test]
    fn clamped_position_emits_adjustment_event() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png"]);

        let manager = OverlayManager::new(
            job((790, 590), OffsetMode::CornerRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        let (tx, rx) = mpsc::channel();
        let report = manager.run_with_backend(&backend, Some(tx)).unwrap();

        assert!(report.processed[0].placement.adjusted);
        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert!(events.contains(&ProcessEvent::PositionAdjusted {
            image: layout.images_dir(ImageKind::Png).join("a.png"),
            requested: (790, 590),
            adjusted: (700, 500),
        }));
    }

    #[test]
    fn adjustment_is_reported_even_when_composite_fails() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png"]);
        let source = layout.images_dir(ImageKind::Png).join("a.png");
        let backend = backend.failing_on(&source);

        let manager = OverlayManager::new(
            job((790, 590), OffsetMode::CornerRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        let (tx, rx) = mpsc::channel();
        let report = manager.run_with_backend(&backend, Some(tx)).unwrap();

        assert_eq!(report.count(), 0);
        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert!(matches!(&events[1], ProcessEvent::PositionAdjusted { adjusted: (700, 500), .. }));
        assert!(matches!(&events[2], ProcessEvent::ImageSkipped { image, .. } if image == &source));
    }

    #[test]
    fn logo_max_dimension_is_applied() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png"]);

        let manager = OverlayManager::new(
            job((0, 0), OffsetMode::CenterRelative),
            &layout,
            RunOptions {
                logo_max_dimension: Some(50),
            },
        )
        .unwrap();
        let report = manager.run_with_backend(&backend, None).unwrap();

        assert_eq!(report.processed[0].placement.position(), (375, 275));
        assert!(backend.get_operations().iter().any(|op| matches!(
            op,
            RecordedOp::Composite {
                logo_width: 50,
                logo_height: 50,
                ..
            }
        )));
    }

    #[test]
    fn no_base_images_fails_without_creating_output_dir() {
        let tmp = TempDir::new().unwrap();
        let layout = FolderLayout::new(tmp.path().join("inputs"), tmp.path().join("outputs"));
        touch(&layout.logo_dir(ImageKind::Png).join("logo.png"));

        let result = run(
            job((0, 0), OffsetMode::CornerRelative),
            &layout,
            RunOptions::default(),
            None,
        );

        assert!(matches!(
            result,
            Err(ProcessError::Scan(ScanError::NoBaseImages { .. }))
        ));
        assert!(!layout.outputs.exists());
    }

    #[test]
    fn output_dir_creation_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (layout, backend) = setup(&tmp, &["a.png"]);
        fs::create_dir_all(&layout.outputs).unwrap();

        let manager = OverlayManager::new(
            job((0, 0), OffsetMode::CornerRelative),
            &layout,
            RunOptions::default(),
        )
        .unwrap();
        assert_eq!(manager.run_with_backend(&backend, None).unwrap().count(), 1);
    }

    #[test]
    fn output_path_keeps_filename() {
        assert_eq!(
            output_path(Path::new("/in/images_png/photo.png"), Path::new("/out")),
            PathBuf::from("/out/photo.png")
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = BatchReport {
            processed: vec![],
            skipped: vec![SkippedImage {
                source: "in/bad.png".into(),
                reason: "Processing failed: boom".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"][0]["source"], "in/bad.png");
        assert_eq!(json["processed"].as_array().unwrap().len(), 0);
    }
}
