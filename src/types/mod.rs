//! Core data types for compiled resources.

mod counters;
mod entry;

pub use counters::CompilationCounters;
pub use entry::{
    EntryPayload, EntryType, LoadTiming, Rect, ResourceEntry, SoundCategory, SoundLevel,
};
