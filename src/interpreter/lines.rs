//! Line accumulator.
//!
//! Collects pending lines between render triggers. `ALIGN`, `FONT` and
//! `FONTFILE` only change the settings captured by lines started afterwards;
//! lines already pending keep the alignment and font they were created with.

use std::mem;
use std::path::PathBuf;

/// A text line waiting to be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    /// Alignment mode as written (lower-cased); validated when drawn
    pub align: String,
    /// Resolved font file
    pub font: PathBuf,
    /// Share of the block height, at least 1
    pub weight: u32,
    /// Text with variables already substituted
    pub text: String,
}

/// Pending lines plus the alignment and font new lines will use.
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    align: String,
    font: PathBuf,
    lines: Vec<PendingLine>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self {
            align: "left".to_string(),
            font: PathBuf::new(),
            lines: Vec::new(),
        }
    }
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_align(&mut self, align: impl Into<String>) {
        self.align = align.into();
    }

    pub fn set_font(&mut self, font: impl Into<PathBuf>) {
        self.font = font.into();
    }

    pub fn align(&self) -> &str {
        &self.align
    }

    pub fn font(&self) -> &PathBuf {
        &self.font
    }

    /// Start a new line with the current alignment and font.
    pub fn start_line(&mut self, weight: u32, text: String) {
        self.lines.push(PendingLine {
            align: self.align.clone(),
            font: self.font.clone(),
            weight,
            text,
        });
    }

    /// Append text to the last line. Returns `false` when there is no line.
    pub fn append_text(&mut self, text: &str) -> bool {
        match self.lines.last_mut() {
            Some(line) => {
                line.text.push_str(text);
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn pending(&self) -> &[PendingLine] {
        &self.lines
    }

    /// Remove and return all pending lines.
    pub fn take(&mut self) -> Vec<PendingLine> {
        mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let acc = LineAccumulator::new();
        assert_eq!(acc.align(), "left");
        assert_eq!(acc.font(), &PathBuf::new());
        assert!(!acc.has_pending());
    }

    #[test]
    fn test_lines_capture_settings_at_creation() {
        let mut acc = LineAccumulator::new();
        acc.set_font("/fonts/a.ttf");
        acc.start_line(1, "first".into());
        acc.set_align("right");
        acc.set_font("/fonts/b.ttf");
        acc.start_line(2, "second".into());

        assert_eq!(
            acc.pending(),
            &[
                PendingLine {
                    align: "left".into(),
                    font: "/fonts/a.ttf".into(),
                    weight: 1,
                    text: "first".into(),
                },
                PendingLine {
                    align: "right".into(),
                    font: "/fonts/b.ttf".into(),
                    weight: 2,
                    text: "second".into(),
                },
            ]
        );
    }

    #[test]
    fn test_append_to_last_line() {
        let mut acc = LineAccumulator::new();
        assert!(!acc.append_text("orphan"));
        acc.start_line(1, "a".into());
        acc.start_line(1, "b".into());
        assert!(acc.append_text("c"));
        assert_eq!(acc.pending()[0].text, "a");
        assert_eq!(acc.pending()[1].text, "bc");
    }

    #[test]
    fn test_take_clears_lines_but_keeps_settings() {
        let mut acc = LineAccumulator::new();
        acc.set_align("middle");
        acc.start_line(1, "x".into());
        let taken = acc.take();
        assert_eq!(taken.len(), 1);
        assert!(!acc.has_pending());
        assert_eq!(acc.align(), "middle");
    }
}
