//! The output raster.
//!
//! A monochrome image with a fixed height (the tape height) that only ever
//! grows in width. Growth allocates a new blank canvas and copies the old
//! one to its origin, so previously drawn pixels are never touched again.
//!
//! Pixels are stored as 8-bit luma restricted to two values: [`PAPER`]
//! (white, the background) and [`INK`] (black).

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, imageops};

use crate::error::LabelError;

/// Background pixel value.
pub const PAPER: Luma<u8> = Luma([255]);

/// Foreground pixel value.
pub const INK: Luma<u8> = Luma([0]);

/// Widest label the canvas will grow to, in pixels.
pub const MAX_WIDTH: u32 = 1 << 20;

fn checked_width(width: u64) -> Result<u32, LabelError> {
    if width > u64::from(MAX_WIDTH) {
        return Err(LabelError::CanvasTooWide {
            width,
            max: MAX_WIDTH,
        });
    }
    Ok(width as u32)
}

/// 1-bit label raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: GrayImage,
}

impl Canvas {
    /// Create an all-paper canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, PAPER),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Like [`Canvas::blank`], but fails instead of exceeding [`MAX_WIDTH`].
    pub fn with_width(width: u64, height: u32) -> Result<Self, LabelError> {
        Ok(Self::blank(checked_width(width)?, height))
    }

    /// Return a copy of this canvas widened by `extra` blank columns on the right.
    pub fn extended(&self, extra: u64) -> Result<Canvas, LabelError> {
        let width = checked_width(u64::from(self.width()).saturating_add(extra))?;
        let mut next = Canvas::blank(width, self.height());
        imageops::replace(&mut next.image, &self.image, 0, 0);
        Ok(next)
    }

    /// Mark one pixel as ink. Coordinates outside the canvas are ignored.
    #[inline]
    pub fn put_ink(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, INK);
    }

    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel_checked(x, y) == Some(&INK)
    }

    /// Tight bounding box of all ink pixels.
    ///
    /// Returns `Some((min_x, min_y, max_x, max_y))` inclusive, or `None` if
    /// the canvas is blank.
    pub fn ink_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in self.image.enumerate_pixels() {
            if *pixel != INK {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds
    }

    /// Ink bounding box restricted to columns `from..to`.
    pub fn ink_bounds_in(&self, from: u32, to: u32) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height() {
            for x in from..to.min(self.width()) {
                if !self.is_ink(x, y) {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    }
                });
            }
        }
        bounds
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Encode the canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, LabelError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| LabelError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(buffer.into_inner())
    }

    /// Save the canvas; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), LabelError> {
        self.image
            .save(path)
            .map_err(|e| LabelError::Image(format!("Failed to save {}: {}", path.display(), e)))
    }
}
