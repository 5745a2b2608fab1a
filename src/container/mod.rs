//! Binary containers and generated mapping headers.

pub mod header;
mod mapping;
mod writer;

pub use header::{ContainerKind, SLOT_WIDTH};
pub use mapping::{MappingFiles, MappingNames};
pub use writer::{ContainerWriter, Containers};
