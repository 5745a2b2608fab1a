//! Aggregate counts and byte totals for one compile run.

use std::ops::AddAssign;

use serde::Serialize;

use super::entry::{EntryPayload, ResourceEntry, SoundCategory};

/// Per-run totals that end up in the container headers.
///
/// Sizes are in kilobytes. The dynamic total is reported but never
/// written to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompilationCounters {
    pub static_widgets: u64,
    pub dynamic_widgets: u64,
    pub fonts: u64,
    pub musics: u64,
    pub chunks: u64,
    pub static_size_kb: u64,
    pub dynamic_size_kb: u64,
    pub fonts_size_kb: u64,
    pub sounds_size_kb: u64,
}

impl CompilationCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a finished entry.
    ///
    /// Visual `on_init` entries are static; everything else, fonts and
    /// sounds included, is tallied as dynamic.
    pub fn record(&mut self, entry: &ResourceEntry) {
        if entry.is_static() {
            self.static_widgets += 1;
            self.static_size_kb += entry.file_size_kb;
        } else {
            self.dynamic_widgets += 1;
            self.dynamic_size_kb += entry.file_size_kb;
        }

        match &entry.payload {
            EntryPayload::Font { .. } => {
                self.fonts += 1;
                self.fonts_size_kb += entry.file_size_kb;
            }
            EntryPayload::Sound { category, .. } => {
                match category {
                    SoundCategory::Music => self.musics += 1,
                    SoundCategory::Chunk => self.chunks += 1,
                }
                self.sounds_size_kb += entry.file_size_kb;
            }
            EntryPayload::Visual { .. } => {}
        }
    }

    pub fn sounds(&self) -> u64 {
        self.musics + self.chunks
    }

    pub fn total_entries(&self) -> u64 {
        self.static_widgets + self.dynamic_widgets
    }
}

impl AddAssign for CompilationCounters {
    fn add_assign(&mut self, other: Self) {
        self.static_widgets += other.static_widgets;
        self.dynamic_widgets += other.dynamic_widgets;
        self.fonts += other.fonts;
        self.musics += other.musics;
        self.chunks += other.chunks;
        self.static_size_kb += other.static_size_kb;
        self.dynamic_size_kb += other.dynamic_size_kb;
        self.fonts_size_kb += other.fonts_size_kb;
        self.sounds_size_kb += other.sounds_size_kb;
    }
}
