//! TTF text measurement and drawing.
//!
//! Layout talks to fonts through two traits: a [`FontLoader`] opens a font
//! file at a pixel size and hands back a [`TextFace`] that can measure and
//! draw a string. [`TtfFonts`] is the real implementation, built on
//! `ab_glyph`.
//!
//! ## Size
//!
//! The requested size is the font's em size in pixels, so a 40px line gets
//! a font whose em square is 40px tall. Ascenders and descenders may extend
//! past that.
//!
//! ## Anchors
//!
//! Text is anchored horizontally on its advance width (left edge, center or
//! right edge) and vertically halfway between the font's ascent and descent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont, point};

use super::canvas::Canvas;
use crate::error::LabelError;

/// Minimum glyph coverage drawn as ink.
const INK_THRESHOLD: f32 = 0.5;

/// Horizontal text alignment within a block column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Middle,
    Right,
}

impl std::str::FromStr for Alignment {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "middle" => Ok(Alignment::Middle),
            "right" => Ok(Alignment::Right),
            other => Err(LabelError::UnsupportedAlignment(other.to_string())),
        }
    }
}

/// Horizontal extent of a rendered string, relative to the pen origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Leftmost inked column (may be negative for overhanging glyphs)
    pub left: i32,
    /// One past the rightmost inked column
    pub right: i32,
    /// Total advance width of the string
    pub advance: f32,
}

impl TextExtent {
    /// Width a line needs in its block: the ink's right edge plus its left bearing.
    pub fn line_length(&self) -> u32 {
        (self.left + self.right).max(0) as u32
    }
}

/// A font instantiated at a fixed size.
pub trait TextFace {
    /// Measure `text` as it would be drawn with the pen starting at x = 0.
    fn measure(&self, text: &str) -> TextExtent;

    /// Draw `text` so that its anchor point lands on `(x, y)`.
    ///
    /// `anchor` picks the left edge, center, or right edge of the advance
    /// width; `y` is the vertical middle of the text.
    fn draw(&self, canvas: &mut Canvas, x: i64, y: i64, anchor: Alignment, text: &str);
}

/// Opens fonts by file path.
pub trait FontLoader {
    type Face: TextFace;

    /// Load the font at `path` with an em size of `size` pixels.
    fn load(&mut self, path: &Path, size: u32) -> Result<Self::Face, LabelError>;
}

/// `ab_glyph` backed font loader. Font files are read once per path.
#[derive(Default)]
pub struct TtfFonts {
    cache: HashMap<PathBuf, FontArc>,
}

impl TtfFonts {
    pub fn new() -> Self {
        Self::default()
    }

    fn font(&mut self, path: &Path) -> Result<FontArc, LabelError> {
        if let Some(font) = self.cache.get(path) {
            return Ok(font.clone());
        }

        if path.as_os_str().is_empty() {
            return Err(LabelError::FontLoad {
                path: path.to_path_buf(),
                reason: "no font selected (use FONT or FONTFILE first)".to_string(),
            });
        }

        let data = fs::read(path).map_err(|e| LabelError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = FontArc::try_from_vec(data).map_err(|e| LabelError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded font");
        self.cache.insert(path.to_path_buf(), font.clone());
        Ok(font)
    }
}

impl FontLoader for TtfFonts {
    type Face = TtfFace;

    fn load(&mut self, path: &Path, size: u32) -> Result<TtfFace, LabelError> {
        let font = self.font(path)?;
        Ok(TtfFace::new(font, size as f32))
    }
}

/// A TTF font at a fixed em size.
pub struct TtfFace {
    font: FontArc,
    scale: PxScale,
}

impl TtfFace {
    pub fn new(font: FontArc, em_size: f32) -> Self {
        // ab_glyph scales by ascent-to-descent height; convert from em size.
        let height = match font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                em_size * font.height_unscaled() / units_per_em
            }
            _ => em_size,
        };
        Self {
            font,
            scale: PxScale::from(height),
        }
    }

    /// Position glyphs along a baseline at `baseline_y`, starting at x = 0.
    fn layout(&self, text: &str, baseline_y: f32) -> (Vec<Glyph>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut glyphs = Vec::new();
        let mut caret = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, baseline_y)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }
}

impl TextFace for TtfFace {
    fn measure(&self, text: &str) -> TextExtent {
        let ascent = self.font.as_scaled(self.scale).ascent();
        let (glyphs, advance) = self.layout(text, ascent);

        let mut extent: Option<(f32, f32)> = None;
        for glyph in glyphs {
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                extent = Some(match extent {
                    None => (bounds.min.x, bounds.max.x),
                    Some((left, right)) => (left.min(bounds.min.x), right.max(bounds.max.x)),
                });
            }
        }

        let (left, right) = extent.unwrap_or((0.0, 0.0));
        TextExtent {
            left: left.floor() as i32,
            right: right.ceil() as i32,
            advance,
        }
    }

    fn draw(&self, canvas: &mut Canvas, x: i64, y: i64, anchor: Alignment, text: &str) {
        let scaled = self.font.as_scaled(self.scale);
        // Descent is negative; the middle sits halfway between the two lines.
        let baseline = y as f32 + (scaled.ascent() + scaled.descent()) / 2.0;
        let (glyphs, advance) = self.layout(text, baseline);

        let start_x = match anchor {
            Alignment::Left => x as f32,
            Alignment::Middle => x as f32 - advance / 2.0,
            Alignment::Right => x as f32 - advance,
        };

        for mut glyph in glyphs {
            glyph.position.x += start_x;
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                if coverage >= INK_THRESHOLD {
                    canvas.put_ink(
                        bounds.min.x as i64 + px as i64,
                        bounds.min.y as i64 + py as i64,
                    );
                }
            });
        }
    }
}
