//! Two-pass container writer.
//!
//! Opening a container writes its header with blank slots. Entries are
//! then appended as text records, and `finalize` seeks back to each slot
//! and overwrites it in place, so the file length never changes.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::header::{slot_text, ContainerKind};
use crate::error::{Result, RsrcError};
use crate::types::{CompilationCounters, EntryPayload, ResourceEntry};

/// The three output streams of a project.
#[derive(Debug)]
pub struct Containers<W> {
    pub resources: W,
    pub fonts: W,
    pub sounds: W,
}

impl<W> Containers<W> {
    fn get_mut(&mut self, kind: ContainerKind) -> &mut W {
        match kind {
            ContainerKind::Resources => &mut self.resources,
            ContainerKind::Fonts => &mut self.fonts,
            ContainerKind::Sounds => &mut self.sounds,
        }
    }
}

/// Appends compiled entries to the containers and backpatches their
/// headers once the run is over.
#[derive(Debug)]
pub struct ContainerWriter<W: Write + Seek> {
    streams: Containers<W>,
    written: u64,
}

impl ContainerWriter<BufWriter<File>> {
    /// Create (truncating) the container files inside `dir`.
    #[instrument(level = "debug")]
    pub fn create(dir: &Path) -> Result<Self> {
        let open = |kind: ContainerKind| -> Result<BufWriter<File>> {
            let path = dir.join(kind.file_name());
            let file = File::create(&path).map_err(|e| RsrcError::Io {
                path: path.clone(),
                message: format!("Failed to create container: {}", e),
            })?;
            Ok(BufWriter::new(file))
        };

        Self::new(Containers {
            resources: open(ContainerKind::Resources)?,
            fonts: open(ContainerKind::Fonts)?,
            sounds: open(ContainerKind::Sounds)?,
        })
    }

    /// Container file paths for a project output directory.
    pub fn paths(dir: &Path) -> Vec<PathBuf> {
        ContainerKind::ALL
            .iter()
            .map(|kind| dir.join(kind.file_name()))
            .collect()
    }
}

impl<W: Write + Seek> ContainerWriter<W> {
    /// Wrap open streams and write the placeholder headers.
    pub fn new(mut streams: Containers<W>) -> Result<Self> {
        for kind in ContainerKind::ALL {
            streams.get_mut(kind).write_all(kind.placeholder().as_bytes())?;
        }
        Ok(Self {
            streams,
            written: 0,
        })
    }

    /// Append every entry to the container for its type, in order.
    pub fn write_entries(&mut self, entries: &[ResourceEntry]) -> Result<()> {
        for entry in entries {
            let out = self.streams.get_mut(ContainerKind::for_entry(entry.entry_type));
            write_record(out, entry)?;
        }
        self.written += entries.len() as u64;
        Ok(())
    }

    /// Entries appended so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Overwrite the header slots with the final totals and flush.
    pub fn finalize(mut self, counters: &CompilationCounters) -> Result<Containers<W>> {
        for kind in ContainerKind::ALL {
            let out = self.streams.get_mut(kind);
            let end = out.stream_position()?;

            for (offset, value) in kind.slot_offsets().iter().zip(kind.slot_values(counters)) {
                out.seek(SeekFrom::Start(*offset))?;
                out.write_all(slot_text(value).as_bytes())?;
            }

            out.seek(SeekFrom::Start(end))?;
            out.flush()?;
            debug!(container = kind.file_name(), bytes = end, "finalized container");
        }
        Ok(self.streams)
    }
}

fn write_record<W: Write>(out: &mut W, entry: &ResourceEntry) -> Result<()> {
    writeln!(out, "{}", entry.hash_literal())?;
    writeln!(out, "{}", entry.source_path.display())?;
    writeln!(out, "{}", entry.file_size_kb)?;

    match &entry.payload {
        EntryPayload::Font { point_size } => {
            writeln!(out, "{point_size}")?;
        }
        EntryPayload::Sound { category, level } => {
            writeln!(out, "{}", category.token())?;
            writeln!(out, "{}", level.token())?;
        }
        EntryPayload::Visual {
            screen_rect,
            sub_rects,
            load,
        } => {
            writeln!(out, "{}", load.code())?;
            writeln!(out, "{screen_rect}")?;
            writeln!(out, "{}", sub_rects.len())?;
            for rect in sub_rects {
                writeln!(out, "{rect}")?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}
