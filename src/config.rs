//! Photo root configuration.
//!
//! Everything the builder needs to know that is not on disk: where the
//! photos are published, how local folder names map to published category
//! names, which folders to ignore, which extensions count as images and
//! where the two manifests are written.
//!
//! ## Config File Location
//!
//! An optional `config.toml` in the photo root overrides the stock defaults:
//!
//! ```text
//! photos/
//! ├── config.toml        # Optional, overrides stock defaults
//! ├── 壁纸/              # Published as "wallpapers"
//! │   └── sunset.jpg
//! ├── images/
//! │   └── a.png
//! ├── photos.json        # Written by the builder
//! └── photosInfo.json    # Written by the builder
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Tables merge key by key, so a `[category_map]`
//! section adds to the stock mapping instead of replacing it:
//!
//! ```toml
//! owner = "someone-else"
//!
//! [category_map]
//! "旅行" = "travel"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the optional override file in the photo root.
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration for one photo root.
///
/// All fields have defaults matching the published album. User config files
/// need only specify the values they want to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotoConfig {
    /// Repository owner on the hosting service.
    pub owner: String,
    /// Repository holding the published images.
    pub repo: String,
    /// Branch the images are pushed to. Not part of generated URLs.
    pub branch: String,
    /// CDN prefix, prepended verbatim to `{owner}/{repo}/...`.
    pub base_url: String,
    /// Top-level directory names that are never treated as categories.
    pub excluded_dirs: Vec<String>,
    /// Image extensions, case-insensitive, with or without a leading dot.
    pub extensions: Vec<String>,
    /// Flat manifest path, relative to the photo root.
    pub images_manifest: String,
    /// Grouped manifest path, relative to the photo root.
    pub groups_manifest: String,
    /// Pretty-print the manifests instead of writing compact JSON.
    pub pretty: bool,
    /// Sort categories and files by name instead of directory listing order.
    pub sort_entries: bool,
    /// Local directory name → published category name.
    pub category_map: BTreeMap<String, String>,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            owner: "Skarie".to_string(),
            repo: "photo".to_string(),
            branch: "main".to_string(),
            base_url: "https://cdn.mengze.vip/gh/".to_string(),
            excluded_dirs: vec!["node_modules".to_string()],
            extensions: ["jpg", "jpeg", "png", "gif", "webp", "bmp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            images_manifest: "photosInfo.json".to_string(),
            groups_manifest: "photos.json".to_string(),
            pretty: false,
            sort_entries: false,
            category_map: BTreeMap::from([
                ("壁纸".to_string(), "wallpapers".to_string()),
                ("images".to_string(), "images".to_string()),
            ]),
        }
    }
}

impl PhotoConfig {
    /// Validate that the config can produce usable URLs and manifests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("base_url", &self.base_url),
            ("images_manifest", &self.images_manifest),
            ("groups_manifest", &self.groups_manifest),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must list at least one image extension".into(),
            ));
        }
        if self.images_manifest == self.groups_manifest {
            return Err(ConfigError::Validation(format!(
                "images_manifest and groups_manifest both point to {}",
                self.images_manifest
            )));
        }
        Ok(())
    }

    /// Published category name for a local directory name.
    ///
    /// Exact match against `category_map`, otherwise the name itself.
    pub fn publish_name(&self, local: &str) -> String {
        self.category_map
            .get(local)
            .cloned()
            .unwrap_or_else(|| local.to_string())
    }

    /// Remote URL for an image: `{base_url}{owner}/{repo}/{category}/{file}`.
    pub fn remote_url(&self, category: &str, file_name: &str) -> String {
        format!(
            "{}{}/{}/{}/{}",
            self.base_url, self.owner, self.repo, category, file_name
        )
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }

    /// Whether the path's extension is in the supported set.
    ///
    /// `a.PNG` matches `png`; `.png` (no stem) and `a` have no extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PhotoConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the photo root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PhotoConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PhotoConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for a photo root: stock defaults plus `config.toml`.
pub fn load_config(root: &Path) -> Result<PhotoConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Manifest Configuration
# ============================
#
# Place this file as config.toml in the photo root. Every key is optional;
# omitted keys keep the values shown here. Unknown keys are rejected.

# Repository the images are published to.
owner = "Skarie"
repo = "photo"

# Branch the images are pushed to. The CDN serves the default branch, so
# this value is not used when building URLs.
branch = "main"

# CDN prefix. Remote URLs are {base_url}{owner}/{repo}/{category}/{file}.
base_url = "https://cdn.mengze.vip/gh/"

# Top-level directories that are never categories.
excluded_dirs = ["node_modules"]

# File extensions treated as images (case-insensitive).
extensions = ["jpg", "jpeg", "png", "gif", "webp", "bmp"]

# Output files, relative to the photo root. Existing files are overwritten.
images_manifest = "photosInfo.json"
groups_manifest = "photos.json"

# Pretty-print the manifests instead of writing compact JSON.
pretty = false

# Sort categories and files by name. When false, the directory listing
# order of the filesystem is used, which can differ between platforms.
sort_entries = false

# Local folder name → published category name. Folders without an entry
# are published under their own name. Entries here are added to the stock
# mapping.
[category_map]
"壁纸" = "wallpapers"
images = "images"
"##
}
