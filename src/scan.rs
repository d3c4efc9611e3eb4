//! Input discovery and folder layout.
//!
//! Finds the base images and the logo for one [`ImageKind`]. Each kind has its
//! own pair of folders under the inputs root:
//!
//! ```text
//! inputs/
//! ├── images_jpeg/     # Base images for --image-type jpeg (.jpg / .jpeg)
//! ├── logo_jpeg/       # Logo for jpeg jobs
//! ├── images_png/      # Base images for --image-type png
//! └── logo_png/        # Logo for png jobs
//! outputs/             # One result per processed base image, same filename
//! ```
//!
//! ## Rules
//!
//! - Only files directly inside a folder are considered; subfolders are ignored.
//! - Extensions are matched case-insensitively.
//! - Base images are returned in path order.
//! - When several logos match, the lexicographically first path wins.
//! - A missing folder is treated as empty.
//!
//! Discovery never writes to the filesystem. [`ensure_folder_structure`] is the
//! only function here with side effects and is used by the `init` command.

use crate::config::FoldersConfig;
use crate::types::ImageKind;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Unsupported image type '{0}': the only available image types are 'jpeg' and 'png'")]
    UnsupportedKind(String),
    #[error("No {kind} images found in {}", .dir.display())]
    NoBaseImages { kind: ImageKind, dir: PathBuf },
    #[error("No {kind} logo found in {}", .dir.display())]
    NoLogo { kind: ImageKind, dir: PathBuf },
}

/// Resolved input/output folder paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLayout {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
}

impl FolderLayout {
    pub fn new(inputs: impl Into<PathBuf>, outputs: impl Into<PathBuf>) -> Self {
        Self {
            inputs: inputs.into(),
            outputs: outputs.into(),
        }
    }

    /// Resolve configured folder names against a project root.
    pub fn from_config(root: &Path, folders: &FoldersConfig) -> Self {
        Self::new(root.join(&folders.inputs), root.join(&folders.outputs))
    }

    pub fn images_dir(&self, kind: ImageKind) -> PathBuf {
        self.inputs.join(format!("images_{}", kind.folder_suffix()))
    }

    pub fn logo_dir(&self, kind: ImageKind) -> PathBuf {
        self.inputs.join(format!("logo_{}", kind.folder_suffix()))
    }

    /// Every folder the tool expects, inputs first.
    pub fn required_folders(&self) -> Vec<PathBuf> {
        let mut folders = Vec::new();
        for kind in [ImageKind::Jpeg, ImageKind::Png] {
            folders.push(self.images_dir(kind));
            folders.push(self.logo_dir(kind));
        }
        folders.push(self.outputs.clone());
        folders
    }
}

/// The base images and logo a job works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    images: Vec<PathBuf>,
    logo: PathBuf,
}

impl ImageSet {
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn logo(&self) -> &Path {
        &self.logo
    }

}

/// Discover base images and the logo for `kind`.
pub fn discover(kind: ImageKind, layout: &FolderLayout) -> Result<ImageSet, ScanError> {
    let images_dir = layout.images_dir(kind);
    let images = list_images(&images_dir, kind);
    if images.is_empty() {
        return Err(ScanError::NoBaseImages {
            kind,
            dir: images_dir,
        });
    }

    let logo_dir = layout.logo_dir(kind);
    let logo = list_images(&logo_dir, kind)
        .into_iter()
        .next()
        .ok_or(ScanError::NoLogo {
            kind,
            dir: logo_dir,
        })?;

    Ok(ImageSet { images, logo })
}

/// Parse `kind` and discover. Unsupported kinds fail before any filesystem access.
pub fn discover_by_name(kind: &str, layout: &FolderLayout) -> Result<ImageSet, ScanError> {
    let kind: ImageKind = kind.parse()?;
    discover(kind, layout)
}

/// Files directly inside `dir` whose extension belongs to `kind`, sorted by path.
fn list_images(dir: &Path, kind: ImageKind) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry.into_path()),
            Err(err) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", dir.display(), err);
                None
            }
        })
        // Follows symlinks, unlike `DirEntry::file_type`
        .filter(|p| p.is_file())
        .filter(|p| is_kind(p, kind))
        .collect();
    files.sort();
    files
}

fn is_kind(path: &Path, kind: ImageKind) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| kind.matches_extension(e))
}

/// Create any missing input/output folders. Returns the folders it created.
pub fn ensure_folder_structure(layout: &FolderLayout) -> std::io::Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for folder in layout.required_folders() {
        if !folder.is_dir() {
            fs::create_dir_all(&folder)?;
            created.push(folder);
        }
    }
    Ok(created)
}
