//! Init command implementation.
//!
//! Generates an `rsrc.yaml` manifest listing every top-level folder that
//! contains description files.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{Result, RsrcError};
use crate::output::{display_path, plural, Printer};

/// Initialize a resource tree by generating an rsrc.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Resource root to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing rsrc.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(
            RsrcError::config(format!("{} already exists", MANIFEST_FILENAME))
                .with_help("Use --force to overwrite"),
        );
    }

    printer.status("Scanning", &display_path(&args.path));

    let mut manifest = Manifest::default();
    let mut total = 0;

    let mut folders: Vec<PathBuf> = fs::read_dir(&args.path)
        .map_err(|e| RsrcError::Io {
            path: args.path.clone(),
            message: format!("Failed to read directory: {}", e),
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    folders.sort();

    for folder in folders {
        let Some(name) = folder.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if manifest.is_blacklisted(name) {
            continue;
        }

        let files = scan_directory(&folder, &manifest);
        if !files.is_empty() {
            total += files.len();
            manifest.projects.push(name.to_string());
        }
    }

    fs::write(&manifest_path, manifest.to_yaml()?).map_err(|e| RsrcError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if manifest.projects.is_empty() {
        printer.warning("Warning", "no project folders with .rsrc files found");
    } else {
        printer.info("Discovered", &manifest.projects.join(", "));
    }

    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(total, "description file", "description files")
        ),
    );

    Ok(())
}
