//! Manifest records and writers.
//!
//! Two JSON documents are written to the photo root:
//!
//! | File | Content |
//! |---|---|
//! | `photosInfo.json` | Array of [`ImageRecord`]: `dirName`, `fileName`, `iconID`, `remoteUrl` |
//! | `photos.json` | Array of [`CategoryGroup`]: `name`, `children` (icon ids) |
//!
//! The key names are read by the album front end and must not change.
//!
//! Both arrays are projections of the same `&[Category]`: the flat list is
//! the categories' images concatenated in order, the groups are the
//! categories with their images replaced by icon ids. Building them from one
//! source keeps every `children` entry matched to exactly one record.

use crate::config::PhotoConfig;
use crate::imaging::Dimensions;
use crate::scan::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One image in the flat manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Published category name.
    #[serde(rename = "dirName")]
    pub category_name: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// `"{width}.{height} {fileName}"`
    #[serde(rename = "iconID")]
    pub icon_id: String,
    #[serde(rename = "remoteUrl")]
    pub remote_url: String,
}

impl ImageRecord {
    pub fn new(category: &str, file_name: &str, dims: Dimensions, config: &PhotoConfig) -> Self {
        Self {
            category_name: category.to_string(),
            file_name: file_name.to_string(),
            icon_id: icon_id(dims, file_name),
            remote_url: config.remote_url(category, file_name),
        }
    }
}

/// Icon id for an image: `"{width}.{height} {file_name}"`.
pub fn icon_id(dims: Dimensions, file_name: &str) -> String {
    format!("{}.{} {}", dims.width, dims.height, file_name)
}

/// One category in the grouped manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    /// Icon ids of the category's images, in scan order.
    #[serde(rename = "children")]
    pub members: Vec<String>,
}

/// The flat and grouped views of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifests {
    pub images: Vec<ImageRecord>,
    pub groups: Vec<CategoryGroup>,
}

impl Manifests {
    pub fn from_categories(categories: &[Category]) -> Self {
        let images = categories
            .iter()
            .flat_map(|c| c.images.iter().cloned())
            .collect();
        let groups = categories
            .iter()
            .map(|c| CategoryGroup {
                name: c.name.clone(),
                members: c.images.iter().map(|i| i.icon_id.clone()).collect(),
            })
            .collect();
        Self { images, groups }
    }
}

/// Paths the manifests were written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenManifests {
    pub images_path: PathBuf,
    pub groups_path: PathBuf,
}

/// Serialize a manifest array.
///
/// Compact output matches what the album front end has always been given;
/// both forms end with a newline.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ManifestError> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Write both manifests under `root`, overwriting existing files.
pub fn write_manifests(
    root: &Path,
    config: &PhotoConfig,
    manifests: &Manifests,
) -> Result<WrittenManifests, ManifestError> {
    let images_path = root.join(&config.images_manifest);
    let groups_path = root.join(&config.groups_manifest);

    write_file(&images_path, &to_json(&manifests.images, config.pretty)?)?;
    write_file(&groups_path, &to_json(&manifests.groups, config.pretty)?)?;

    Ok(WrittenManifests {
        images_path,
        groups_path,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ManifestError> {
    fs::write(path, contents).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
