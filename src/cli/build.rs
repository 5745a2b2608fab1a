//! Build command implementation.
//!
//! Compiles each selected project into its containers and writes the
//! mapping headers next to every description file.

use clap::Args;
use serde::Serialize;

use super::ProjectArgs;
use crate::compiler::{build_project, ProjectReport};
use crate::error::{Result, RsrcError};
use crate::output::{display_path, megabytes, plural, Printer};
use crate::types::CompilationCounters;

/// Compile projects into resource containers
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub projects: ProjectArgs,

    /// Print a JSON build summary to stdout
    #[arg(long)]
    pub json: bool,
}

/// JSON summary of a build.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub projects: Vec<ProjectReport>,
    pub totals: CompilationCounters,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let quiet = Printer::quiet();
    let printer = if args.json { &quiet } else { printer };

    let summary = build(&args.projects, printer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| RsrcError::config(format!("Failed to serialize build summary: {}", e)))?;
        println!("{json}");
    }

    Ok(())
}

/// Build every selected project, stopping at the first failure.
pub fn build(args: &ProjectArgs, printer: &Printer) -> Result<BuildSummary> {
    let (discovery, scans) = args.scan()?;

    if !discovery.has_manifest {
        printer.info("Using", "default settings (no rsrc.yaml found)");
    }

    let mut projects = Vec::with_capacity(scans.len());
    let mut totals = CompilationCounters::new();

    for scan in &scans {
        if scan.is_empty() {
            printer.warning("Warning", &format!("project '{}' has no .rsrc files", scan.project));
        }

        let built = build_project(&discovery, scan, |file| {
            printer.status(
                "Compiling",
                &format!(
                    "{} {}",
                    display_path(&file.path),
                    printer.dim(&format!(
                        "({}, {} static, {})",
                        plural(file.entries, "entry", "entries"),
                        file.static_entries,
                        megabytes(file.size_kb)
                    ))
                ),
            );
        });
        let report = match built {
            Ok(report) => report,
            Err(err) => {
                // containers of a failed project are left unpatched
                printer.error(
                    "Failed",
                    &format!("project '{}', its containers are not usable", scan.project),
                );
                return Err(err);
            }
        };

        print_project_summary(printer, &report);
        totals += report.counters;
        projects.push(report);
    }

    printer.status(
        "Finished",
        &format!(
            "{} ({})",
            plural(projects.len(), "project", "projects"),
            plural(totals.total_entries() as usize, "entry", "entries")
        ),
    );

    Ok(BuildSummary { projects, totals })
}

fn print_project_summary(printer: &Printer, report: &ProjectReport) {
    let c = &report.counters;
    let dir = report
        .container_dir
        .as_deref()
        .map(display_path)
        .unwrap_or_default();

    printer.status(
        "Writing",
        &format!(
            "{} {}",
            printer.cyan(&dir),
            printer.dim(&format!("[{}]", report.project))
        ),
    );
    printer.info(
        "Resources",
        &format!(
            "{} static, {} dynamic ({} static data)",
            c.static_widgets,
            c.dynamic_widgets,
            megabytes(c.static_size_kb)
        ),
    );
    printer.info(
        "Fonts",
        &format!("{} ({})", c.fonts, megabytes(c.fonts_size_kb)),
    );
    printer.info(
        "Sounds",
        &format!(
            "{} musics, {} chunks ({})",
            c.musics,
            c.chunks,
            megabytes(c.sounds_size_kb)
        ),
    );
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::media::header::fixtures;
    use tempfile::tempdir;

    fn write_tree(root: &Path) {
        for project in ["engine", "displaymodule"] {
            let dir = root.join(project).join("ui");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("logo.png"), fixtures::png(64, 64)).unwrap();
            fs::write(
                dir.join("ui.rsrc"),
                "tag=[LOGO]\ntype=image\npath=logo.png\ndescription=-\nposition=0,0\nload=on_init\n",
            )
            .unwrap();
        }
    }

    #[test]
    fn test_build_default_projects() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let args = ProjectArgs {
            projects: vec![],
            root: dir.path().to_path_buf(),
        };
        let summary = build(&args, &Printer::quiet()).unwrap();

        assert_eq!(summary.projects.len(), 2);
        assert_eq!(summary.totals.static_widgets, 2);
        assert!(dir.path().join("build/engine/resources/resources.bin").exists());
        assert!(dir
            .path()
            .join("build/displaymodule/resources/resources.bin")
            .exists());
    }

    #[test]
    fn test_build_unknown_project() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let args = ProjectArgs {
            projects: vec!["nope".to_string()],
            root: dir.path().to_path_buf(),
        };
        let err = build(&args, &Printer::quiet()).unwrap_err();
        assert!(matches!(err, RsrcError::Config { .. }));
    }

    #[test]
    fn test_build_stops_at_failing_project() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());
        fs::write(
            dir.path().join("engine/ui/ui.rsrc"),
            "tag=[LOGO]\ntype=image\npath=missing.png\ndescription=-\nposition=0,0\nload=on_init\n",
        )
        .unwrap();

        let args = ProjectArgs {
            projects: vec!["engine".to_string(), "displaymodule".to_string()],
            root: dir.path().to_path_buf(),
        };
        let err = build(&args, &Printer::quiet()).unwrap_err();

        assert!(matches!(err, RsrcError::Compile { line: 3, .. }));
        assert!(!dir
            .path()
            .join("build/displaymodule/resources/resources.bin")
            .exists());
    }

    #[test]
    fn test_summary_serializes() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let args = ProjectArgs {
            projects: vec!["engine".to_string()],
            root: dir.path().to_path_buf(),
        };
        let summary = build(&args, &Printer::quiet()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["projects"][0]["project"], "engine");
        assert_eq!(json["totals"]["static_widgets"], 1);
    }
}
