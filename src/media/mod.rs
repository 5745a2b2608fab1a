//! Media file inspection and sprite frame layout.

pub mod header;
pub mod layout;

pub use header::{inspect, inspect_reader, MediaInfo, MediaKind};
pub use layout::{solve, validate_manual_rect, SpriteDescription, SpriteLayout};
