//! Sprite frame layout.
//!
//! A sprite declares its frame geometry; the atlas size decides how the
//! frames are tiled. Strategies are tried in a fixed order and the first
//! that fits wins:
//!
//! 1. horizontal strip
//! 2. vertical strip
//! 3. row-major grid, leaving any cells past the frame count unused

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::{Result, RsrcError};
use crate::types::Rect;

/// How frames are tiled inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteLayout {
    Horizontal,
    Vertical,
    Mixed,
}

impl fmt::Display for SpriteLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpriteLayout::Horizontal => "horizontal",
            SpriteLayout::Vertical => "vertical",
            SpriteLayout::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Declared frame geometry from a sprite `description=` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteDescription {
    pub frame_width: i32,
    pub frame_height: i32,
    pub frame_count: i32,
    /// Horizontal gap between neighbouring frames.
    pub offset: i32,
}

impl SpriteDescription {
    pub fn from_values([frame_width, frame_height, frame_count, offset]: [i32; 4]) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count,
            offset,
        }
    }

    fn check(&self) -> Result<()> {
        if self.frame_width <= 0 || self.frame_height <= 0 || self.frame_count <= 0 {
            return Err(RsrcError::layout(format!(
                "frame size and count must be positive, received {}",
                self
            )));
        }
        if self.offset < 0 {
            return Err(RsrcError::layout(format!(
                "frame offset must not be negative, received {}",
                self.offset
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SpriteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames of {}x{} with offset {}",
            self.frame_count, self.frame_width, self.frame_height, self.offset
        )
    }
}

/// Pick a layout for `desc` inside an atlas of `(width, height)` pixels
/// and produce the frame rectangles in emission order.
pub fn solve(desc: &SpriteDescription, atlas: (i32, i32)) -> Result<(SpriteLayout, Vec<Rect>)> {
    desc.check()?;

    let (image_w, image_h) = (i64::from(atlas.0), i64::from(atlas.1));
    let frame_w = i64::from(desc.frame_width);
    let frame_h = i64::from(desc.frame_height);
    let count = i64::from(desc.frame_count);
    let chunk_w = frame_w + i64::from(desc.offset);

    let layout = if image_w >= count * chunk_w - i64::from(desc.offset) {
        SpriteLayout::Horizontal
    } else if image_h >= count * frame_h {
        SpriteLayout::Vertical
    } else if (image_w / chunk_w) * (image_h / frame_h) >= count {
        SpriteLayout::Mixed
    } else {
        return Err(RsrcError::layout(format!(
            "invalid sprite description: {} does not fit a {}x{} image",
            desc, atlas.0, atlas.1
        ))
        .with_help("Frames must fit as a horizontal strip, a vertical strip or a grid"));
    };

    trace!(%layout, %desc, "solved sprite layout");
    let rects = frame_rects(desc, layout, image_w)?;
    Ok((layout, rects))
}

/// Frame positions are computed wide; a gap near `i32::MAX` still fits a
/// single-frame strip even though `width + offset` does not fit in `i32`.
fn frame_rects(desc: &SpriteDescription, layout: SpriteLayout, image_w: i64) -> Result<Vec<Rect>> {
    let (w, h) = (i64::from(desc.frame_width), i64::from(desc.frame_height));
    let chunk_w = w + i64::from(desc.offset);
    let columns = image_w / chunk_w;

    (0..i64::from(desc.frame_count))
        .map(|i| -> Result<Rect> {
            let (x, y) = match layout {
                SpriteLayout::Horizontal => (i * chunk_w, 0),
                SpriteLayout::Vertical => (0, i * h),
                SpriteLayout::Mixed => ((i % columns) * chunk_w, (i / columns) * h),
            };
            Ok(Rect::new(
                narrow(x)?,
                narrow(y)?,
                desc.frame_width,
                desc.frame_height,
            ))
        })
        .collect()
}

fn narrow(value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        RsrcError::layout(format!("sprite frame position {value} is out of range"))
    })
}

/// Check an explicit `sprite_manual` frame against the atlas bounds.
pub fn validate_manual_rect(rect: Rect, atlas: (i32, i32)) -> Result<Rect> {
    if rect.x < 0 || rect.y < 0 || rect.w < 0 || rect.h < 0 {
        return Err(RsrcError::layout(format!(
            "sprite frame '{}' has negative values",
            rect
        )));
    }

    let fits_w = i64::from(rect.x) + i64::from(rect.w) <= i64::from(atlas.0);
    let fits_h = i64::from(rect.y) + i64::from(rect.h) <= i64::from(atlas.1);
    if !fits_w || !fits_h {
        return Err(RsrcError::layout(format!(
            "sprite frame '{}' exceeds the {}x{} image",
            rect, atlas.0, atlas.1
        )));
    }

    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn desc(w: i32, h: i32, count: i32, offset: i32) -> SpriteDescription {
        SpriteDescription::from_values([w, h, count, offset])
    }

    #[test]
    fn test_horizontal_strip() {
        let (layout, rects) = solve(&desc(200, 100, 3, 0), (600, 100)).unwrap();
        assert_eq!(layout, SpriteLayout::Horizontal);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 200, 100),
                Rect::new(200, 0, 200, 100),
                Rect::new(400, 0, 200, 100),
            ]
        );
    }

    #[test]
    fn test_horizontal_offset_ignores_trailing_gap() {
        // 3*(10+5) - 5 = 40
        let (layout, rects) = solve(&desc(10, 10, 3, 5), (40, 10)).unwrap();
        assert_eq!(layout, SpriteLayout::Horizontal);
        let xs: Vec<i32> = rects.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 15, 30]);
    }

    #[test]
    fn test_horizontal_wins_over_vertical() {
        // both strips fit a square atlas
        let (layout, _) = solve(&desc(10, 10, 4, 0), (40, 40)).unwrap();
        assert_eq!(layout, SpriteLayout::Horizontal);
    }

    #[test]
    fn test_vertical_strip() {
        let (layout, rects) = solve(&desc(50, 20, 3, 0), (50, 60)).unwrap();
        assert_eq!(layout, SpriteLayout::Vertical);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 50, 20),
                Rect::new(0, 20, 50, 20),
                Rect::new(0, 40, 50, 20),
            ]
        );
    }

    #[test]
    fn test_mixed_grid() {
        let (layout, rects) = solve(&desc(200, 100, 4, 20), (440, 200)).unwrap();
        assert_eq!(layout, SpriteLayout::Mixed);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 200, 100),
                Rect::new(220, 0, 200, 100),
                Rect::new(0, 100, 200, 100),
                Rect::new(220, 100, 200, 100),
            ]
        );
    }

    #[test]
    fn test_mixed_grid_leaves_trailing_cells() {
        // 3x3 grid, 7 frames
        let (layout, rects) = solve(&desc(10, 10, 7, 0), (30, 30)).unwrap();
        assert_eq!(layout, SpriteLayout::Mixed);
        assert_eq!(rects.len(), 7);
        assert_eq!(rects[6], Rect::new(0, 20, 10, 10));
    }

    #[test]
    fn test_nothing_fits() {
        let err = solve(&desc(200, 100, 5, 20), (440, 200)).unwrap_err();
        assert!(matches!(err, RsrcError::Layout { .. }));
        assert!(err.to_string().contains("440x200"));
    }

    #[test]
    fn test_degenerate_descriptions() {
        assert!(solve(&desc(0, 10, 1, 0), (10, 10)).is_err());
        assert!(solve(&desc(10, 0, 1, 0), (10, 10)).is_err());
        assert!(solve(&desc(10, 10, 0, 0), (10, 10)).is_err());
        assert!(solve(&desc(10, 10, 1, -1), (10, 10)).is_err());
    }

    #[test]
    fn test_huge_offset_single_frame() {
        let (layout, rects) = solve(&desc(10, 10, 1, i32::MAX), (10, 10)).unwrap();
        assert_eq!(layout, SpriteLayout::Horizontal);
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 10)]);
    }

    #[test]
    fn test_huge_offset_many_frames_does_not_fit() {
        let err = solve(&desc(10, 10, 2, i32::MAX), (10, 10)).unwrap_err();
        assert!(matches!(err, RsrcError::Layout { .. }));
    }

    #[test]
    fn test_manual_rect_boundary() {
        assert!(validate_manual_rect(Rect::new(0, 0, 100, 50), (100, 50)).is_ok());
        assert!(validate_manual_rect(Rect::new(1, 0, 100, 50), (100, 50)).is_err());
        assert!(validate_manual_rect(Rect::new(0, 1, 100, 50), (100, 50)).is_err());
    }

    #[test]
    fn test_manual_rect_negative() {
        assert!(validate_manual_rect(Rect::new(-1, 0, 10, 10), (100, 50)).is_err());
        assert!(validate_manual_rect(Rect::new(0, 0, -10, 10), (100, 50)).is_err());
    }
}
