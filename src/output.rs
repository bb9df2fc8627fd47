//! Console output for a manifest run.
//!
//! Operators read this output to audit a run. Every entry the scan touches
//! is reported under its category, led by a fixed-width marker:
//!
//! ```text
//! wallpapers (壁纸/)
//!     ok   sunset.jpg → 1920.1080 sunset.jpg
//!          https://cdn.mengze.vip/gh/Skarie/photo/wallpapers/sunset.jpg
//!     skip empty.png (empty file)
//!     skip notes.txt (not an image)
//!     FAIL photos/壁纸/broken.jpg: Failed to read dimensions of ...
//! images/
//!     ok   a.png → 10.20 a.png
//!          https://cdn.mengze.vip/gh/Skarie/photo/images/a.png
//!
//! Done: 2 images in 2 categories (2 skipped, 1 failed)
//! Wrote photosInfo.json, photos.json
//! Push the manifests and category folders to Skarie/photo
//! ```
//!
//! Format functions are pure and return lines; `print_*` wrappers write
//! them out. Failures go to stderr, everything else to stdout.

use crate::config::PhotoConfig;
use crate::manifest::WrittenManifests;
use crate::scan::{ScanEvent, ScanResult};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format a single scan event as display lines.
pub fn format_scan_event(event: &ScanEvent) -> Vec<String> {
    match event {
        ScanEvent::CategoryStarted { local_name, name } => {
            if local_name == name {
                vec![format!("{}/", name)]
            } else {
                vec![format!("{} ({}/)", name, local_name)]
            }
        }
        ScanEvent::Processed {
            path,
            icon_id,
            remote_url,
            ..
        } => vec![
            format!("{}ok   {} \u{2192} {}", indent(1), file_name(path), icon_id),
            format!("{}     {}", indent(1), remote_url),
        ],
        ScanEvent::SkippedEmpty { path } => {
            vec![format!("{}skip {} (empty file)", indent(1), file_name(path))]
        }
        ScanEvent::SkippedUnsupported { path } => {
            vec![format!("{}skip {} (not an image)", indent(1), file_name(path))]
        }
        // Full path, not just the file name
        ScanEvent::Failed { path, error } => {
            vec![format!("{}FAIL {}: {}", indent(1), path.display(), error)]
        }
    }
}

/// Print a scan event; failures go to stderr.
pub fn print_scan_event(event: ScanEvent) {
    for line in format_scan_event(&event) {
        if event.is_failure() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Format the end-of-run summary.
///
/// `written` is `None` for runs that do not write manifests (`check`).
pub fn format_summary(
    result: &ScanResult,
    config: &PhotoConfig,
    written: Option<&WrittenManifests>,
) -> Vec<String> {
    let stats = &result.stats;
    let mut lines = vec![
        String::new(),
        format!(
            "Done: {} in {} ({} skipped, {} failed)",
            plural(result.image_count(), "image", "images"),
            plural(result.categories.len(), "category", "categories"),
            stats.skipped(),
            stats.failed
        ),
    ];

    match written {
        Some(w) => {
            lines.push(format!(
                "Wrote {}, {}",
                file_name(&w.images_path),
                file_name(&w.groups_path)
            ));
            lines.push(format!(
                "Push the manifests and category folders to {}/{}",
                config.owner, config.repo
            ));
        }
        None => lines.push("Check only, no manifests written".to_string()),
    }
    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(result: &ScanResult, config: &PhotoConfig, written: Option<&WrittenManifests>) {
    for line in format_summary(result, config, written) {
        println!("{}", line);
    }
}
