//! File system scanner for discovering description files.
//!
//! Recursively walks a project folder and collects every file whose name
//! contains `.rsrc`, skipping blacklisted folders. Entries are visited in
//! file name order so repeated builds see the same sequence.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use super::manifest::Manifest;

/// Marker that identifies a description file name.
pub const DESCRIPTION_EXTENSION: &str = ".rsrc";

/// Description files of one project, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub project: String,
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Scan a directory for description files.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if !root.exists() {
        return files;
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_blacklisted_dir(e, manifest));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };

        if entry.file_type().is_file() && is_description_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Scan one top-level project folder under `root`.
pub fn scan_project(root: &Path, project: &str, manifest: &Manifest) -> ScanResult {
    ScanResult {
        project: project.to_string(),
        files: scan_directory(&root.join(project), manifest),
    }
}

/// True when the file name contains the description marker.
pub fn is_description_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains(DESCRIPTION_EXTENSION))
}

fn is_blacklisted_dir(entry: &DirEntry, manifest: &Manifest) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| manifest.is_blacklisted(name))
}
