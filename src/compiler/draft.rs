//! The entry being assembled while its fields are read.

use std::path::{Path, PathBuf};

use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{Result, RsrcError};
use crate::media::{self, MediaInfo, SpriteDescription};
use crate::parser::{parse_ints, parse_tag, tokenize};
use crate::types::{
    EntryPayload, EntryType, LoadTiming, Rect, ResourceEntry, SoundCategory, SoundLevel,
};

/// Marks a media path relative to the resource root instead of the
/// description file's folder.
pub const EXTERNAL_PREFIX: &str = "external - ";

/// Resolve a `path=` value to the media file it names.
pub fn resolve_media_path(value: &str, root: &Path, file_dir: &Path) -> PathBuf {
    match value.strip_prefix(EXTERNAL_PREFIX) {
        Some(rest) => root.join(rest),
        None => file_dir.join(value),
    }
}

/// Identifier of a media file: xxh3 of its absolute path.
pub fn hash_path(path: &Path) -> u64 {
    xxh3_64(path.to_string_lossy().as_bytes())
}

#[derive(Debug, Default)]
pub(crate) struct EntryDraft {
    tag: Option<String>,
    entry_type: Option<EntryType>,
    media: Option<MediaInfo>,
    sub_rects: Vec<Rect>,
    position: Option<[i32; 2]>,
    load: LoadTiming,
    point_size: Option<u32>,
    sound: Option<(SoundCategory, SoundLevel)>,
}

impl EntryDraft {
    pub fn set_tag(&mut self, value: &str) -> Result<()> {
        self.tag = Some(parse_tag(value)?.to_string());
        Ok(())
    }

    pub fn set_type(&mut self, entry_type: EntryType) {
        self.entry_type = Some(entry_type);
    }

    /// Resolve and inspect the media file.
    pub fn set_path(&mut self, value: &str, root: &Path, file_dir: &Path) -> Result<()> {
        let entry_type = self.entry_type()?;
        let path = resolve_media_path(value, root, file_dir);
        let info = media::inspect(&path)?;

        let fits = if entry_type.is_visual() {
            info.kind.is_image()
        } else if entry_type == EntryType::Font {
            info.kind.is_font()
        } else {
            info.kind.is_sound()
        };
        if !fits {
            return Err(RsrcError::format(format!(
                "{} is a {} file and cannot back a {} entry",
                path.display(),
                info.kind,
                entry_type
            )));
        }

        self.media = Some(info);
        Ok(())
    }

    /// Interpret a `description=` value according to the entry type.
    pub fn describe(&mut self, value: &str) -> Result<()> {
        match self.entry_type()? {
            EntryType::Image => {
                let (w, h) = self.atlas()?;
                self.sub_rects = vec![Rect::new(0, 0, w, h)];
            }
            EntryType::Sprite => {
                let desc = SpriteDescription::from_values(parse_ints::<4>(value)?);
                let (layout, rects) = media::solve(&desc, self.atlas()?)?;
                debug!(%layout, frames = rects.len(), "sprite frames");
                self.sub_rects = rects;
            }
            EntryType::SpriteManual => {
                let [x, y, w, h] = parse_ints::<4>(value)?;
                let rect = media::validate_manual_rect(Rect::new(x, y, w, h), self.atlas()?)?;
                self.sub_rects.push(rect);
            }
            EntryType::Font => {
                let [size] = parse_ints::<1>(value)?;
                let size = u32::try_from(size)
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| {
                        RsrcError::config(format!("font size must be positive, received {size}"))
                    })?;
                self.point_size = Some(size);
            }
            EntryType::Sound => {
                let tokens: Vec<&str> = tokenize(value).collect();
                let [category, level] = tokens.as_slice() else {
                    return Err(RsrcError::grammar(format!(
                        "sound description needs 2 values, received '{value}'"
                    ))
                    .with_help("Write it as description=<music|chunk>,<low|medium|high|very_high>"));
                };
                self.sound = Some((SoundCategory::parse(category)?, SoundLevel::parse(level)?));
            }
        }
        Ok(())
    }

    pub fn set_position(&mut self, value: &str) -> Result<()> {
        self.position = Some(parse_ints::<2>(value)?);
        Ok(())
    }

    pub fn set_load(&mut self, value: &str) -> Result<()> {
        self.load = LoadTiming::parse(value)?;
        Ok(())
    }

    /// Turn a complete draft into an entry.
    pub fn finish(self) -> Result<ResourceEntry> {
        let entry_type = self.entry_type()?;
        let (tag, media) = match (self.tag, self.media) {
            (Some(tag), Some(media)) => (tag, media),
            _ => return Err(missing("tag or path")),
        };

        let payload = match entry_type {
            EntryType::Image | EntryType::Sprite | EntryType::SpriteManual => {
                let [x, y] = self.position.ok_or_else(|| missing("position"))?;
                let (w, h) = atlas_of(&media)?;
                EntryPayload::Visual {
                    screen_rect: Rect::new(x, y, w, h),
                    sub_rects: self.sub_rects,
                    load: self.load,
                }
            }
            EntryType::Font => EntryPayload::Font {
                point_size: self.point_size.ok_or_else(|| missing("description"))?,
            },
            EntryType::Sound => {
                let (category, level) = self.sound.ok_or_else(|| missing("description"))?;
                EntryPayload::Sound { category, level }
            }
        };

        Ok(ResourceEntry {
            tag,
            entry_type,
            content_hash: hash_path(&media.path),
            file_size_kb: media.size_kb(),
            source_path: media.path,
            payload,
        })
    }

    fn entry_type(&self) -> Result<EntryType> {
        self.entry_type.ok_or_else(|| missing("type"))
    }

    fn atlas(&self) -> Result<(i32, i32)> {
        match &self.media {
            Some(media) => atlas_of(media),
            None => Err(missing("path")),
        }
    }
}

fn atlas_of(media: &MediaInfo) -> Result<(i32, i32)> {
    let (w, h) = media.dimensions.ok_or_else(|| {
        RsrcError::format(format!("{} has no pixel dimensions", media.path.display()))
    })?;
    match (i32::try_from(w), i32::try_from(h)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RsrcError::format(format!(
            "{} is too large ({w}x{h})",
            media.path.display()
        ))),
    }
}

fn missing(field: &str) -> RsrcError {
    RsrcError::grammar(format!("entry is missing its {field}"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::media::header::fixtures;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_local_path() {
        let path = resolve_media_path("p/bg.png", Path::new("/g"), Path::new("/g/engine/menu"));
        assert_eq!(path, PathBuf::from("/g/engine/menu/p/bg.png"));
    }

    #[test]
    fn test_resolve_external_path() {
        let path = resolve_media_path(
            "external - common/p/add.png",
            Path::new("/g"),
            Path::new("/g/engine/menu"),
        );
        assert_eq!(path, PathBuf::from("/g/common/p/add.png"));
    }

    #[test]
    fn test_external_marker_must_lead() {
        let path = resolve_media_path("p/external - x.png", Path::new("/g"), Path::new("/g/a"));
        assert_eq!(path, PathBuf::from("/g/a/p/external - x.png"));
    }

    #[test]
    fn test_hash_is_stable() {
        let a = hash_path(Path::new("/g/p/a.png"));
        assert_eq!(a, hash_path(Path::new("/g/p/a.png")));
        assert_ne!(a, hash_path(Path::new("/g/p/b.png")));
    }

    #[test]
    fn test_path_type_mismatch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("click.wav"), b"RIFF").unwrap();

        let mut draft = EntryDraft::default();
        draft.set_type(EntryType::Image);
        let err = draft.set_path("click.wav", dir.path(), dir.path()).unwrap_err();
        assert!(matches!(err, RsrcError::Format { .. }));
    }

    #[test]
    fn test_sprite_description_uses_atlas() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("btn.png"), fixtures::png(600, 100)).unwrap();

        let mut draft = EntryDraft::default();
        draft.set_tag("[BTN]").unwrap();
        draft.set_type(EntryType::Sprite);
        draft.set_path("btn.png", dir.path(), dir.path()).unwrap();
        draft.describe("200,100,3,0").unwrap();
        draft.set_position("5, 6").unwrap();
        draft.set_load("on_demand").unwrap();

        let entry = draft.finish().unwrap();
        assert_eq!(entry.tag, "BTN");
        assert_eq!(entry.sub_rects().len(), 3);
        assert_eq!(entry.load_timing(), Some(LoadTiming::OnDemand));
        match entry.payload {
            EntryPayload::Visual { screen_rect, .. } => {
                assert_eq!(screen_rect, Rect::new(5, 6, 600, 100))
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_font_size_must_be_positive() {
        let mut draft = EntryDraft::default();
        draft.set_type(EntryType::Font);
        assert!(matches!(draft.describe("0"), Err(RsrcError::Config { .. })));
        assert!(draft.describe("-3").is_err());
        assert!(draft.describe("12,14").is_err());
        draft.describe("24").unwrap();
        assert_eq!(draft.point_size, Some(24));
    }

    #[test]
    fn test_sound_description() {
        let mut draft = EntryDraft::default();
        draft.set_type(EntryType::Sound);

        draft.describe("music, high").unwrap();
        assert_eq!(draft.sound, Some((SoundCategory::Music, SoundLevel::High)));

        assert!(matches!(draft.describe("music"), Err(RsrcError::Grammar { .. })));
        assert!(matches!(draft.describe("voice,low"), Err(RsrcError::Config { .. })));
        assert!(matches!(draft.describe("chunk,loud"), Err(RsrcError::Config { .. })));
    }
}
