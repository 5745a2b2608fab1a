//! Validate command implementation.
//!
//! Runs grammar checks, media header inspection and sprite layout for
//! every description file, writing nothing.

use clap::Args;

use super::ProjectArgs;
use crate::compiler::check_project;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// Check description files and media without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub projects: ProjectArgs,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (discovery, scans) = args.projects.scan()?;
    let mut files = 0;
    let mut entries = 0;

    for scan in &scans {
        let report = check_project(&discovery, scan, |file| {
            printer.status(
                "Checked",
                &format!(
                    "{} {}",
                    display_path(&file.path),
                    printer.dim(&format!("({})", plural(file.entries, "entry", "entries")))
                ),
            );
        })?;
        files += report.files.len();
        entries += report.counters.total_entries() as usize;
    }

    printer.status(
        "Finished",
        &format!(
            "{} valid ({})",
            plural(files, "description file", "description files"),
            plural(entries, "entry", "entries")
        ),
    );
    Ok(())
}
