//! Compiled resource entries.
//!
//! A `ResourceEntry` is one record from a description file. Its
//! type-specific fields live in `EntryPayload`, so an entry can never carry
//! a sound level and a screen rectangle at the same time.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, RsrcError};

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.w, self.h)
    }
}

/// The declared `type=` of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Image,
    Sprite,
    SpriteManual,
    Font,
    Sound,
}

impl EntryType {
    /// Parse the textual type token used in description files.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "image" => Some(Self::Image),
            "sprite" => Some(Self::Sprite),
            "sprite_manual" => Some(Self::SpriteManual),
            "font" => Some(Self::Font),
            "sound" => Some(Self::Sound),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Sprite => "sprite",
            Self::SpriteManual => "sprite_manual",
            Self::Font => "font",
            Self::Sound => "sound",
        }
    }

    /// Image-like entries that end up in the visual resources container.
    pub fn is_visual(self) -> bool {
        matches!(self, Self::Image | Self::Sprite | Self::SpriteManual)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// When the engine loads a visual resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTiming {
    #[default]
    OnInit,
    OnDemand,
}

impl LoadTiming {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "on_init" => Ok(Self::OnInit),
            "on_demand" => Ok(Self::OnDemand),
            other => Err(RsrcError::config(format!("unknown load timing '{other}'"))
                .with_help("Use 'on_init' or 'on_demand'")),
        }
    }

    /// Numeric code stored in the visual resources container.
    pub fn code(self) -> u8 {
        match self {
            Self::OnInit => 0,
            Self::OnDemand => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    Music,
    Chunk,
}

impl SoundCategory {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "music" => Ok(Self::Music),
            "chunk" => Ok(Self::Chunk),
            other => Err(RsrcError::config(format!("unknown sound category '{other}'"))
                .with_help("First sound argument must be 'music' or 'chunk'")),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Chunk => "chunk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SoundLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "very_high" => Ok(Self::VeryHigh),
            other => Err(RsrcError::config(format!("unknown sound level '{other}'"))
                .with_help("Second sound argument must be 'low', 'medium', 'high' or 'very_high'")),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

/// Type-specific data of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryPayload {
    /// Image, sprite and sprite_manual entries.
    Visual {
        screen_rect: Rect,
        sub_rects: Vec<Rect>,
        load: LoadTiming,
    },
    Font {
        point_size: u32,
    },
    Sound {
        category: SoundCategory,
        level: SoundLevel,
    },
}

/// One compiled record from a description file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceEntry {
    /// Symbolic name, emitted as an enum member.
    pub tag: String,
    pub entry_type: EntryType,
    /// Absolute media path.
    pub source_path: PathBuf,
    /// xxh3 of `source_path`.
    pub content_hash: u64,
    /// Media size in kilobytes, truncated.
    pub file_size_kb: u64,
    pub payload: EntryPayload,
}

impl ResourceEntry {
    /// Load timing for visual entries, `None` for fonts and sounds.
    pub fn load_timing(&self) -> Option<LoadTiming> {
        match &self.payload {
            EntryPayload::Visual { load, .. } => Some(*load),
            _ => None,
        }
    }

    /// Visual entries loaded at startup.
    pub fn is_static(&self) -> bool {
        self.entry_type.is_visual() && self.load_timing() == Some(LoadTiming::OnInit)
    }

    pub fn sub_rects(&self) -> &[Rect] {
        match &self.payload {
            EntryPayload::Visual { sub_rects, .. } => sub_rects,
            _ => &[],
        }
    }

    /// Hash formatted the way containers and mappings print it.
    pub fn hash_literal(&self) -> String {
        format!("0x{:016X}", self.content_hash)
    }
}
