//! Block layout and compositing.
//!
//! A block is the set of pending lines rendered together when a `BLOCK` or
//! `SPACING` directive is reached. Lines split the tape height by weight and
//! are stacked top to bottom in a new column appended to the right of the
//! existing raster:
//!
//! ```text
//!  old_width                       new_width
//!  ┌──────────┬───────────────────────┐  ─┐
//!  │ previous │ line 1 (weight 1)     │   │ tape_height * 1 / 4
//!  │ blocks   ├───────────────────────┤  ─┤
//!  │          │ line 2 (weight 3)     │   │ tape_height * 3 / 4
//!  │          │                       │   │
//!  └──────────┴───────────────────────┘  ─┘
//! ```
//!
//! The column is as wide as the longest line. Heights are rounded down, so
//! the rows may leave a few pixels unused at the bottom but never overflow.

use super::canvas::Canvas;
use super::font::{Alignment, FontLoader, TextExtent, TextFace};
use crate::error::LabelError;
use crate::interpreter::PendingLine;

/// Pixel height of each line, in order: `tape_height * weight / total_weight`.
pub fn line_heights(weights: &[u32], tape_height: u32) -> Vec<u32> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum::<u64>().max(1);
    weights
        .iter()
        .map(|&w| (u64::from(tape_height) * u64::from(w) / total) as u32)
        .collect()
}

/// X coordinate a line is anchored at inside the column `old_width..new_width`.
pub fn anchor_x(alignment: Alignment, old_width: u32, new_width: u32) -> i64 {
    match alignment {
        Alignment::Left => i64::from(old_width),
        Alignment::Middle => (i64::from(old_width) + i64::from(new_width)) / 2,
        Alignment::Right => i64::from(new_width),
    }
}

/// Vertical middle of a row starting at `top` with the given height.
pub fn row_middle(top: u32, height: u32) -> i64 {
    i64::from(top) + i64::from(height / 2)
}

/// A line ready to be drawn: its font face, measured extent and row height.
struct MeasuredLine<'a, F> {
    line: &'a PendingLine,
    face: F,
    extent: TextExtent,
    height: u32,
}

/// Render `lines` as one block appended to `canvas`.
///
/// Returns the new, wider canvas; `canvas` itself is left unchanged. With no
/// existing canvas the block starts at x = 0.
pub fn render_block<L: FontLoader>(
    canvas: Option<&Canvas>,
    lines: &[PendingLine],
    fonts: &mut L,
    tape_height: u32,
) -> Result<Canvas, LabelError> {
    let weights: Vec<u32> = lines.iter().map(|l| l.weight).collect();
    let heights = line_heights(&weights, tape_height);

    let mut measured = Vec::with_capacity(lines.len());
    for (line, height) in lines.iter().zip(heights) {
        let face = fonts.load(&line.font, height)?;
        let extent = face.measure(&line.text);
        measured.push(MeasuredLine {
            line,
            face,
            extent,
            height,
        });
    }

    let column_width = measured
        .iter()
        .map(|m| m.extent.line_length())
        .max()
        .unwrap_or(0);

    let mut next = match canvas {
        Some(existing) => existing.extended(u64::from(column_width))?,
        None => Canvas::with_width(u64::from(column_width), tape_height)?,
    };
    let old_width = canvas.map(Canvas::width).unwrap_or(0);
    let new_width = next.width();

    tracing::debug!(
        lines = lines.len(),
        old_width,
        new_width,
        "rendering block"
    );

    let mut top = 0u32;
    for m in &measured {
        let alignment: Alignment = m.line.align.parse()?;
        let x = anchor_x(alignment, old_width, new_width);
        let y = row_middle(top, m.height);
        tracing::debug!(
            text = %m.line.text,
            font = %m.line.font.display(),
            height = m.height,
            x,
            y,
            "drawing line"
        );
        m.face.draw(&mut next, x, y, alignment, &m.line.text);
        top += m.height;
    }

    Ok(next)
}

/// Width of a `SPACING factor` strip: `floor(tape_height * factor)`.
///
/// Saturates at `u64::MAX`; growing the canvas enforces the real limit.
pub fn spacing_width(factor: f64, tape_height: u32) -> u64 {
    (f64::from(tape_height) * factor).floor() as u64
}

/// Append a blank strip of `spacing_width(factor, tape_height)` columns.
pub fn add_spacing(
    canvas: Option<&Canvas>,
    factor: f64,
    tape_height: u32,
) -> Result<Canvas, LabelError> {
    let width = spacing_width(factor, tape_height);
    tracing::debug!(width, "adding spacing");
    match canvas {
        Some(existing) => existing.extended(width),
        None => Canvas::with_width(width, tape_height),
    }
}
