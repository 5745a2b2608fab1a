//! Project manifest (rsrc.yaml) parsing.
//!
//! The manifest names the projects to compile, where containers go, and
//! which folders enumeration skips.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RsrcError};

/// Projects compiled when neither the manifest nor the command line
/// names any.
pub const DEFAULT_PROJECTS: [&str; 2] = ["engine", "displaymodule"];

/// Project manifest loaded from rsrc.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Top-level project folders, compiled in this order.
    pub projects: Vec<String>,

    /// Output directory for containers, relative to the root.
    pub output: PathBuf,

    /// Folder names whose subtrees are never enumerated.
    pub blacklist: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("build")
}

fn default_blacklist() -> Vec<String> {
    vec!["build".to_string(), ".git".to_string(), "target".to_string()]
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            projects: vec![],
            output: default_output(),
            blacklist: default_blacklist(),
        }
    }
}

impl Manifest {
    /// Load manifest from an rsrc.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RsrcError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            RsrcError::config(format!("Invalid manifest: {}", e))
                .with_help("Check rsrc.yaml syntax")
        })
    }

    /// Serialize for `rsrc init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RsrcError::config(format!("Failed to serialize manifest: {}", e)))
    }

    /// True when a folder with this name is skipped during enumeration.
    pub fn is_blacklisted(&self, folder_name: &str) -> bool {
        self.blacklist.iter().any(|b| b == folder_name)
    }

    /// Projects to compile: explicit names win, then the manifest list,
    /// then the built-in defaults.
    pub fn effective_projects(&self, requested: &[String]) -> Vec<String> {
        if !requested.is_empty() {
            requested.to_vec()
        } else if !self.projects.is_empty() {
            self.projects.clone()
        } else {
            DEFAULT_PROJECTS.iter().map(|p| p.to_string()).collect()
        }
    }

    /// Container directory for one project.
    pub fn container_dir(&self, root: &Path, project: &str) -> PathBuf {
        root.join(&self.output).join(project).join("resources")
    }
}
