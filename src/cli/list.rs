//! List command implementation.
//!
//! Prints the description files of each project in compile order.

use clap::Args;

use super::ProjectArgs;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// List the description files of each project
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub projects: ProjectArgs,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let (_, scans) = args.projects.scan()?;

    for scan in &scans {
        printer.info(
            &scan.project,
            &printer.dim(&plural(scan.total(), "description file", "description files")),
        );
        // paths go to stdout so they can be piped
        for file in &scan.files {
            println!("{}", display_path(file));
        }
    }

    Ok(())
}
