//! Project discovery.
//!
//! Finds the `rsrc.yaml` manifest in a root directory (falling back to
//! defaults), resolves which projects to compile, and enumerates their
//! description files.
//!
//! # Example
//!
//! ```ignore
//! use rsrc::discovery::discover;
//!
//! let result = discover("./game")?;
//! for scan in result.scan(&[])? {
//!     println!("{}: {} description files", scan.project, scan.total());
//! }
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{Result, RsrcError};

pub use manifest::{Manifest, DEFAULT_PROJECTS};
pub use scanner::{
    is_description_file, scan_directory, scan_project, ScanResult, DESCRIPTION_EXTENSION,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "rsrc.yaml";

/// Result of discovering a resource tree.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The absolute root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no rsrc.yaml found).
    pub manifest: Manifest,

    /// Whether an rsrc.yaml manifest was found.
    pub has_manifest: bool,
}

impl DiscoveryResult {
    /// Enumerate description files for each project to compile.
    ///
    /// A project without a folder under the root is a configuration error.
    pub fn scan(&self, requested: &[String]) -> Result<Vec<ScanResult>> {
        self.manifest
            .effective_projects(requested)
            .iter()
            .map(|project| {
                if !self.root.join(project).is_dir() {
                    return Err(RsrcError::config(format!(
                        "unknown project '{}': no such folder in {}",
                        project,
                        self.root.display()
                    ))
                    .with_help("Project names are top-level folders of the resource root"));
                }
                Ok(scan_project(&self.root, project, &self.manifest))
            })
            .collect()
    }

    /// Container directory for a project.
    pub fn container_dir(&self, project: &str) -> PathBuf {
        self.manifest.container_dir(&self.root, project)
    }
}

/// Discover the resource tree rooted at `root`.
///
/// The root is canonicalized so media paths and their hashes are absolute.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref();
    let root = root.canonicalize().map_err(|e| RsrcError::Io {
        path: root.to_path_buf(),
        message: format!("Failed to resolve resource root: {}", e),
    })?;

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
    })
}
