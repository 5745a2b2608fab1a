//! Whole-project passes: compile every description file of a project
//! into its containers, or check them without writing anything.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use super::ResourceCompiler;
use crate::container::{ContainerWriter, MappingFiles, MappingNames};
use crate::discovery::{DiscoveryResult, ScanResult};
use crate::error::{Result, RsrcError};
use crate::types::{CompilationCounters, ResourceEntry};

/// Outcome of compiling one description file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub entries: usize,
    pub static_entries: usize,
    pub size_kb: u64,
}

impl FileReport {
    fn new(path: PathBuf, entries: &[ResourceEntry]) -> Self {
        Self {
            path,
            entries: entries.len(),
            static_entries: entries.iter().filter(|e| e.is_static()).count(),
            size_kb: entries.iter().map(|e| e.file_size_kb).sum(),
        }
    }
}

/// Outcome of a project pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub project: String,
    /// Where the containers were written; `None` for a check-only pass.
    pub container_dir: Option<PathBuf>,
    pub files: Vec<FileReport>,
    pub counters: CompilationCounters,
}

/// Compile a project into its three containers and write the mapping
/// headers of every description file.
///
/// The run stops at the first failing file. Containers are then left
/// without their final header values and must not be used.
#[instrument(skip_all, fields(project = %scan.project))]
pub fn build_project(
    discovery: &DiscoveryResult,
    scan: &ScanResult,
    mut on_file: impl FnMut(&FileReport),
) -> Result<ProjectReport> {
    let dir = discovery.container_dir(&scan.project);
    fs::create_dir_all(&dir).map_err(|e| RsrcError::Io {
        path: dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut writer = ContainerWriter::create(&dir)?;
    let mut compiler = ResourceCompiler::new(&discovery.root);
    let mut files = Vec::with_capacity(scan.files.len());

    for path in &scan.files {
        let entries = compiler.compile_file(path)?;
        writer.write_entries(&entries)?;

        let names = MappingNames::for_description(&discovery.root, path)?;
        MappingFiles::render(&names, &entries).write(&names)?;

        let report = FileReport::new(path.clone(), &entries);
        on_file(&report);
        files.push(report);
    }

    let counters = *compiler.counters();
    writer.finalize(&counters)?;
    info!(
        entries = counters.total_entries(),
        dir = %dir.display(),
        "project containers written"
    );

    Ok(ProjectReport {
        project: scan.project.clone(),
        container_dir: Some(dir),
        files,
        counters,
    })
}

/// Compile every description file of a project without writing output.
#[instrument(skip_all, fields(project = %scan.project))]
pub fn check_project(
    discovery: &DiscoveryResult,
    scan: &ScanResult,
    mut on_file: impl FnMut(&FileReport),
) -> Result<ProjectReport> {
    let mut compiler = ResourceCompiler::new(&discovery.root);
    let mut files = Vec::with_capacity(scan.files.len());

    for path in &scan.files {
        let entries = compiler.compile_file(path)?;
        let report = FileReport::new(path.clone(), &entries);
        on_file(&report);
        files.push(report);
    }

    Ok(ProjectReport {
        project: scan.project.clone(),
        container_dir: None,
        files,
        counters: *compiler.counters(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::discover;
    use crate::media::header::fixtures;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const MENU: &str = "tag=[BACKGROUND]\ntype=image\npath=p/bg.png\ndescription=empty\n\
                        position=0,0\nload=on_init\n\n\
                        tag=[POPUP]\ntype=image\npath=p/bg.png\ndescription=empty\n\
                        position=5,5\nload=on_demand\n";

    fn project(root: &std::path::Path) {
        fs::create_dir_all(root.join("game/menu/p")).unwrap();
        fs::write(root.join("game/menu/p/bg.png"), fixtures::png(32, 16)).unwrap();
        fs::write(root.join("game/menu/menu.rsrc"), MENU).unwrap();
    }

    #[test]
    fn test_build_project_writes_everything() {
        let dir = tempdir().unwrap();
        project(dir.path());
        let discovery = discover(dir.path()).unwrap();
        let scans = discovery.scan(&["game".to_string()]).unwrap();

        let mut seen = Vec::new();
        let report = build_project(&discovery, &scans[0], |f| seen.push(f.entries)).unwrap();

        assert_eq!(seen, vec![2]);
        assert_eq!(report.counters.static_widgets, 1);
        assert_eq!(report.counters.dynamic_widgets, 1);

        let out = discovery.root.join("build/game/resources");
        let resources = fs::read_to_string(out.join("resources.bin")).unwrap();
        assert!(resources.starts_with("#static widgets: 1 "));
        assert!(out.join("fonts.bin").exists());
        assert!(out.join("sounds.bin").exists());

        let menu_dir = discovery.root.join("game/menu");
        let header = fs::read_to_string(menu_dir.join("menuResources.h")).unwrap();
        assert!(header.contains("BACKGROUND = 0x"));
        let dynamic = fs::read_to_string(menu_dir.join("menuResourcesDynamic.h")).unwrap();
        assert!(dynamic.contains("POPUP = 0x"));
    }

    #[test]
    fn test_build_aborts_on_broken_file() {
        let dir = tempdir().unwrap();
        project(dir.path());
        fs::write(dir.path().join("game/menu/zz.rsrc"), "tag=[X]\ntype=nope\n").unwrap();

        let discovery = discover(dir.path()).unwrap();
        let scans = discovery.scan(&["game".to_string()]).unwrap();
        assert!(build_project(&discovery, &scans[0], |_| {}).is_err());

        // header slots were never backpatched
        let resources =
            fs::read_to_string(discovery.root.join("build/game/resources/resources.bin")).unwrap();
        assert!(resources.starts_with(&format!("#static widgets: {}", " ".repeat(20))));
    }

    #[test]
    fn test_check_project_writes_nothing() {
        let dir = tempdir().unwrap();
        project(dir.path());
        let discovery = discover(dir.path()).unwrap();
        let scans = discovery.scan(&["game".to_string()]).unwrap();

        let report = check_project(&discovery, &scans[0], |_| {}).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].static_entries, 1);
        assert!(report.container_dir.is_none());
        assert!(!discovery.root.join("build").exists());
        assert!(!discovery.root.join("game/menu/menuResources.h").exists());
    }
}
