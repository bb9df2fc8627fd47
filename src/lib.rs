//! # Photo Manifest
//!
//! Turns a directory of photo folders into the two JSON manifests a
//! CDN-hosted album front end reads. Top-level directories become
//! categories, the images inside them become entries keyed by an icon id
//! that encodes their pixel size.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan    photo root  →  Vec<Category>   (filesystem → structured data)
//! 2. Derive  categories  →  Manifests        (flat list + grouped view)
//! 3. Write   manifests   →  photosInfo.json, photos.json
//! ```
//!
//! The scan is the only stage that touches image files. Both output views
//! are projections of the same ordered list of categories, so an icon id in
//! `photos.json` always has exactly one matching entry in `photosInfo.json`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Repository settings, category name mapping, stock defaults + `config.toml` overlay |
//! | [`imaging`] | Header-only dimension probing behind the [`imaging::ImageBackend`] trait |
//! | [`scan`] | Walks category directories, validates files, emits [`scan::ScanEvent`]s |
//! | [`manifest`] | Serialized record types and the JSON writers |
//! | [`output`] | Console formatting for scan events and the run summary |
//!
//! # Design Decisions
//!
//! ## The Library Never Prints
//!
//! Every per-file outcome (processed, skipped, failed) is reported through a
//! callback as a [`scan::ScanEvent`]. The binary decides what goes to stdout
//! and what goes to stderr; tests collect the events and assert on them.
//!
//! ## Per-File Failures Are Data, Not Errors
//!
//! An empty file, an unknown extension or a corrupt header is reported and
//! skipped. Only failures that make the whole run meaningless (unreadable
//! root, unreadable category directory, unwritable output) come back as
//! `Err`.
//!
//! ## Remote URLs Ignore the Branch
//!
//! The URL template is `{base_url}{owner}/{repo}/{category}/{file}`. The
//! configured `branch` is carried in the config but the CDN resolves the
//! default branch, so it never appears in URLs.

pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
