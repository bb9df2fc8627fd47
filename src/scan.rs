//! Filesystem scanning.
//!
//! Walks the photo root one level deep to find categories, then lists each
//! category directory and measures the images in it.
//!
//! ## Directory Structure
//!
//! ```text
//! photos/                     # Photo root
//! ├── config.toml             # Optional, not a category
//! ├── node_modules/           # Excluded
//! ├── 壁纸/                   # Category, published as "wallpapers"
//! │   ├── sunset.jpg          # 1920x1080 → "1920.1080 sunset.jpg"
//! │   ├── empty.png           # 0 bytes → skipped
//! │   └── notes.txt           # Unsupported extension → skipped
//! └── images/
//!     ├── a.png
//!     └── raw/                # Not descended into; skipped as unsupported
//! ```
//!
//! ## Ordering
//!
//! Categories and files come out in directory listing order. That order is
//! stable for an unchanged filesystem but differs between platforms and
//! filesystems; set `sort_entries` in the config to sort by name instead.
//!
//! ## Failures
//!
//! Listing the root or a category directory must succeed, otherwise the
//! scan aborts with [`ScanError`]. Anything that goes wrong with an
//! individual file is reported as a [`ScanEvent`] and the file is left out.

use crate::config::PhotoConfig;
use crate::imaging::ImageBackend;
use crate::manifest::ImageRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot list directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One top-level directory and the images found in it.
///
/// This is the canonical scan result; both manifests are derived from an
/// ordered list of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Directory name on disk.
    pub local_name: String,
    /// Published name after the category mapping.
    pub name: String,
    /// Valid images in listing order.
    pub images: Vec<ImageRecord>,
}

/// Per-entry outcome reported while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    CategoryStarted {
        local_name: String,
        name: String,
    },
    Processed {
        path: PathBuf,
        category: String,
        icon_id: String,
        remote_url: String,
    },
    SkippedEmpty {
        path: PathBuf,
    },
    SkippedUnsupported {
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
}

impl ScanEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, ScanEvent::Failed { .. })
    }
}

/// Counts of entries left out of the manifests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub skipped_empty: usize,
    pub skipped_unsupported: usize,
    pub failed: usize,
}

impl ScanStats {
    pub fn skipped(&self) -> usize {
        self.skipped_empty + self.skipped_unsupported
    }
}

#[derive(Debug)]
pub struct ScanResult {
    pub categories: Vec<Category>,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn image_count(&self) -> usize {
        self.categories.iter().map(|c| c.images.len()).sum()
    }
}

/// What happened to a single directory entry.
enum FileOutcome {
    Image(ImageRecord),
    Empty,
    Unsupported,
    Failed(String),
}

/// Scan the photo root.
///
/// `on_event` is called for every category and every entry, in scan order.
pub fn scan(
    root: &Path,
    config: &PhotoConfig,
    backend: &impl ImageBackend,
    mut on_event: impl FnMut(ScanEvent),
) -> Result<ScanResult, ScanError> {
    let mut categories = Vec::new();
    let mut stats = ScanStats::default();

    for (local_name, dir) in category_dirs(root, config)? {
        let name = config.publish_name(&local_name);
        on_event(ScanEvent::CategoryStarted {
            local_name: local_name.clone(),
            name: name.clone(),
        });

        let mut images = Vec::new();
        for (file_name, path) in list_entries(&dir, config.sort_entries)? {
            match examine(&path, &file_name, &name, config, backend) {
                FileOutcome::Image(record) => {
                    on_event(ScanEvent::Processed {
                        path,
                        category: name.clone(),
                        icon_id: record.icon_id.clone(),
                        remote_url: record.remote_url.clone(),
                    });
                    images.push(record);
                }
                FileOutcome::Empty => {
                    stats.skipped_empty += 1;
                    on_event(ScanEvent::SkippedEmpty { path });
                }
                FileOutcome::Unsupported => {
                    stats.skipped_unsupported += 1;
                    on_event(ScanEvent::SkippedUnsupported { path });
                }
                FileOutcome::Failed(error) => {
                    stats.failed += 1;
                    on_event(ScanEvent::Failed { path, error });
                }
            }
        }

        categories.push(Category {
            local_name,
            name,
            images,
        });
    }

    Ok(ScanResult { categories, stats })
}

/// Immediate subdirectories of the root that are not excluded.
///
/// Symlinks to directories count as directories.
fn category_dirs(root: &Path, config: &PhotoConfig) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let mut walker = WalkDir::new(root).min_depth(1).max_depth(1).follow_links(true);
    if config.sort_entries {
        walker = walker.sort_by_file_name();
    }

    let mut dirs = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if config.is_excluded(&name) {
            continue;
        }
        dirs.push((name, entry.into_path()));
    }
    Ok(dirs)
}

/// Every entry of a category directory, files and subdirectories alike.
fn list_entries(dir: &Path, sorted: bool) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry?;
        entries.push((
            entry.file_name().to_string_lossy().into_owned(),
            entry.into_path(),
        ));
    }
    Ok(entries)
}

/// Check order: stat, size, extension, header.
fn examine(
    path: &Path,
    file_name: &str,
    category: &str,
    config: &PhotoConfig,
    backend: &impl ImageBackend,
) -> FileOutcome {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };
    if metadata.len() == 0 {
        return FileOutcome::Empty;
    }
    if !config.is_supported(path) {
        return FileOutcome::Unsupported;
    }
    match backend.identify(path) {
        Ok(dims) => FileOutcome::Image(ImageRecord::new(category, file_name, dims, config)),
        Err(e) => FileOutcome::Failed(e.to_string()),
    }
}
