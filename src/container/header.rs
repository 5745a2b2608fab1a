//! Fixed header layout of the binary containers.
//!
//! Each header field is an ASCII label, a blank padded slot of
//! [`SLOT_WIDTH`] bytes, and a blank line. Slot offsets only depend on the
//! label text, so they are computed at compile time.

use crate::types::{CompilationCounters, EntryType};

/// Width of every reserved numeric slot. Fits any `u64` in decimal.
pub const SLOT_WIDTH: usize = 20;

/// Separator after each slot.
pub const FIELD_END: &str = "\n\n";

const RESOURCES_LABELS: [&str; 3] = ["#static widgets: ", "#dynamic widgets: ", "#total size kb: "];
const FONTS_LABELS: [&str; 2] = ["#fonts: ", "#total size kb: "];
const SOUNDS_LABELS: [&str; 3] = ["#musics: ", "#chunks: ", "#total size kb: "];

const RESOURCES_OFFSETS: [u64; 3] = slot_offsets(RESOURCES_LABELS);
const FONTS_OFFSETS: [u64; 2] = slot_offsets(FONTS_LABELS);
const SOUNDS_OFFSETS: [u64; 3] = slot_offsets(SOUNDS_LABELS);

/// Absolute offset of each slot: the running sum of the preceding fields
/// plus the slot's own label.
const fn slot_offsets<const N: usize>(labels: [&str; N]) -> [u64; N] {
    let mut offsets = [0u64; N];
    let mut pos = 0usize;
    let mut i = 0;
    while i < N {
        pos += labels[i].len();
        offsets[i] = pos as u64;
        pos += SLOT_WIDTH + FIELD_END.len();
        i += 1;
    }
    offsets
}

/// One of the three per-project binary containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Resources,
    Fonts,
    Sounds,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [Self::Resources, Self::Fonts, Self::Sounds];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Resources => "resources.bin",
            Self::Fonts => "fonts.bin",
            Self::Sounds => "sounds.bin",
        }
    }

    /// Container that stores entries of `ty`.
    pub fn for_entry(ty: EntryType) -> Self {
        match ty {
            EntryType::Font => Self::Fonts,
            EntryType::Sound => Self::Sounds,
            EntryType::Image | EntryType::Sprite | EntryType::SpriteManual => Self::Resources,
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Resources => &RESOURCES_LABELS,
            Self::Fonts => &FONTS_LABELS,
            Self::Sounds => &SOUNDS_LABELS,
        }
    }

    pub fn slot_offsets(self) -> &'static [u64] {
        match self {
            Self::Resources => &RESOURCES_OFFSETS,
            Self::Fonts => &FONTS_OFFSETS,
            Self::Sounds => &SOUNDS_OFFSETS,
        }
    }

    /// Final slot values, in label order.
    pub fn slot_values(self, counters: &CompilationCounters) -> Vec<u64> {
        match self {
            Self::Resources => vec![
                counters.static_widgets,
                counters.dynamic_widgets,
                counters.static_size_kb,
            ],
            Self::Fonts => vec![counters.fonts, counters.fonts_size_kb],
            Self::Sounds => vec![counters.musics, counters.chunks, counters.sounds_size_kb],
        }
    }

    /// Header text with blank slots, written when a container is opened.
    pub fn placeholder(self) -> String {
        let blank = " ".repeat(SLOT_WIDTH);
        self.labels()
            .iter()
            .map(|label| format!("{label}{blank}{FIELD_END}"))
            .collect()
    }

    pub fn header_len(self) -> u64 {
        self.labels()
            .iter()
            .map(|label| (label.len() + SLOT_WIDTH + FIELD_END.len()) as u64)
            .sum()
    }
}

/// A value left aligned in its slot.
pub fn slot_text(value: u64) -> String {
    format!("{value:<SLOT_WIDTH$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offsets_match_placeholder_text() {
        for kind in ContainerKind::ALL {
            let text = kind.placeholder();
            for (label, offset) in kind.labels().iter().zip(kind.slot_offsets()) {
                let start = *offset as usize;
                assert_eq!(&text[start - label.len()..start], *label);
                assert_eq!(&text[start..start + SLOT_WIDTH], " ".repeat(SLOT_WIDTH));
            }
            assert_eq!(text.len() as u64, kind.header_len());
        }
    }

    #[test]
    fn test_font_offsets() {
        // "#fonts: " = 8, then 20 + 2, then "#total size kb: " = 16
        assert_eq!(ContainerKind::Fonts.slot_offsets(), &[8, 46]);
    }

    #[test]
    fn test_slot_text_is_fixed_width() {
        assert_eq!(slot_text(42), format!("42{}", " ".repeat(18)));
        assert_eq!(slot_text(u64::MAX).len(), SLOT_WIDTH);
    }

    #[test]
    fn test_entry_routing() {
        assert_eq!(ContainerKind::for_entry(EntryType::SpriteManual), ContainerKind::Resources);
        assert_eq!(ContainerKind::for_entry(EntryType::Font), ContainerKind::Fonts);
        assert_eq!(ContainerKind::for_entry(EntryType::Sound), ContainerKind::Sounds);
    }
}
