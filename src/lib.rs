//! rsrc - game resource description compiler
//!
//! Compiles line-oriented `.rsrc` description files, together with the
//! media they reference, into per-project binary containers and generated
//! C++ tag mapping headers.

pub mod cli;
pub mod compiler;
pub mod container;
pub mod discovery;
pub mod error;
pub mod media;
pub mod output;
pub mod parser;
pub mod types;

pub use compiler::{build_project, check_project, FileReport, ProjectReport, ResourceCompiler};
pub use container::{ContainerKind, ContainerWriter, MappingFiles, MappingNames};
pub use discovery::{discover, DiscoveryResult, Manifest, ScanResult};
pub use error::{Result, RsrcError};
pub use media::{inspect, MediaInfo, MediaKind, SpriteDescription, SpriteLayout};
pub use parser::{Field, GrammarCursor};
pub use types::{
    CompilationCounters, EntryPayload, EntryType, LoadTiming, Rect, ResourceEntry, SoundCategory,
    SoundLevel,
};
