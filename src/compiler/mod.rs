//! Description file compilation.
//!
//! [`ResourceCompiler`] drives the grammar cursor over one description
//! file at a time, hands each value to its field handler, and collects
//! the finished entries. Counters for a file are merged into the run
//! totals only once the whole file compiled.

mod draft;
mod project;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{Result, RsrcError};
use crate::parser::{is_skipped_line, Field, GrammarCursor};
use crate::types::{CompilationCounters, ResourceEntry};

use draft::EntryDraft;

pub use draft::{hash_path, resolve_media_path, EXTERNAL_PREFIX};
pub use project::{build_project, check_project, FileReport, ProjectReport};

/// Compiles description files under one resource root.
#[derive(Debug)]
pub struct ResourceCompiler {
    root: PathBuf,
    counters: CompilationCounters,
}

impl ResourceCompiler {
    /// `root` anchors `external - ` media paths.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            counters: CompilationCounters::new(),
        }
    }

    /// Totals over every file compiled so far.
    pub fn counters(&self) -> &CompilationCounters {
        &self.counters
    }

    /// Read and compile one description file.
    #[instrument(level = "debug", skip(self), fields(file = %path.display()))]
    pub fn compile_file(&mut self, path: &Path) -> Result<Vec<ResourceEntry>> {
        let source = fs::read_to_string(path).map_err(|e| RsrcError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read description file: {}", e),
        })?;

        self.compile_source(path, &source)
    }

    /// Compile description text that was read from `file`.
    ///
    /// Stops at the first failing line; nothing from a failed file is
    /// added to the counters.
    pub fn compile_source(&mut self, file: &Path, source: &str) -> Result<Vec<ResourceEntry>> {
        let file_dir = file.parent().unwrap_or(&self.root).to_path_buf();
        let mut cursor = GrammarCursor::new();
        let mut draft = EntryDraft::default();
        let mut entries = Vec::new();
        let mut counters = CompilationCounters::new();
        let mut last_line = 0;

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;
            if is_skipped_line(line) {
                continue;
            }
            last_line = line_no;

            let field = self
                .feed(&mut cursor, &mut draft, line, &file_dir)
                .map_err(|e| e.at(file, line_no, cursor.expected().keyword()))?;

            if cursor.is_entry_complete() {
                let entry = std::mem::take(&mut draft)
                    .finish()
                    .map_err(|e| e.at(file, line_no, field.keyword()))?;
                debug!(tag = %entry.tag, kind = %entry.entry_type, "compiled entry");
                counters.record(&entry);
                entries.push(entry);
            }
        }

        if cursor.in_entry() {
            let expected = cursor.expected();
            return Err(RsrcError::grammar(format!(
                "file ends inside an entry, expected tag '{expected}'"
            ))
            .at(file, last_line, expected.keyword()));
        }

        if entries.is_empty() {
            return Err(RsrcError::EmptyResult {
                path: file.to_path_buf(),
            });
        }

        self.counters += counters;
        Ok(entries)
    }

    fn feed(
        &self,
        cursor: &mut GrammarCursor,
        draft: &mut EntryDraft,
        line: &str,
        file_dir: &Path,
    ) -> Result<Field> {
        cursor.validate(line)?;
        let (value, field) = cursor.extract_value(line)?;

        match field {
            Field::Tag => draft.set_tag(value)?,
            Field::Type => draft.set_type(cursor.set_entry_type(value)?),
            Field::Path => draft.set_path(value, &self.root, file_dir)?,
            Field::Description => draft.describe(value)?,
            Field::Position => draft.set_position(value)?,
            Field::Load => draft.set_load(value)?,
            Field::End => {
                return Err(RsrcError::grammar(format!("unexpected line '{line}'")));
            }
        }

        cursor.advance();
        Ok(field)
    }
}
