//! Shared test utilities for the photo-manifest test suite.
//!
//! Builds photo roots in temp directories with real image files, so the
//! scan runs against the same decoders it uses in production.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = photo_root(&[("images", &[("a.png", 10, 20)])]);
//! let result = scan(tmp.path(), &PhotoConfig::default(), &RustBackend::new(), |_| {}).unwrap();
//!
//! let images = find_category(&result.categories, "images");
//! assert_eq!(icon_ids(images), vec!["10.20 a.png"]);
//! ```

use image::{ImageFormat, RgbImage};
use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Category, ScanEvent};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a solid-color image of the given size and format.
pub fn write_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
        .save_with_format(path, format)
        .unwrap();
}

/// Write raw bytes, creating parent directories as needed.
pub fn write_bytes(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

/// Create a photo root with one directory per category and one PNG per
/// `(file_name, width, height)` entry.
///
/// Files are written as PNG regardless of their extension; the backend
/// sniffs content, so `b.jpg` still measures correctly.
pub fn photo_root(categories: &[(&str, &[(&str, u32, u32)])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (dir, images) in categories {
        let dir_path = tmp.path().join(dir);
        std::fs::create_dir_all(&dir_path).unwrap();
        for (name, width, height) in *images {
            write_image(&dir_path.join(name), *width, *height, ImageFormat::Png);
        }
    }
    tmp
}

// =========================================================================
// Lookups — panics with a clear message on miss
// =========================================================================

/// Find a category by published name. Panics if not found.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> &'a Category {
    categories
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names = category_names(categories);
            panic!("category '{name}' not found. Available: {names:?}")
        })
}

/// Published category names, sorted so tests do not depend on listing order.
pub fn category_names(categories: &[Category]) -> Vec<&str> {
    let mut names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names
}

/// Icon ids of a category, sorted.
pub fn icon_ids(category: &Category) -> Vec<&str> {
    let mut ids: Vec<&str> = category.images.iter().map(|i| i.icon_id.as_str()).collect();
    ids.sort_unstable();
    ids
}

/// Collect scan events into a vector, for use as the scan callback.
pub fn collect_events(events: &mut Vec<ScanEvent>) -> impl FnMut(ScanEvent) + '_ {
    move |event| events.push(event)
}
