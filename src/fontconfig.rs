//! # Font Resolution
//!
//! `FONT` directives name a fontconfig pattern (`DejaVu Sans:bold`,
//! `monospace`, ...) rather than a file. A [`FontResolver`] turns the pattern
//! into a font file path.
//!
//! [`FcMatch`] asks fontconfig's `fc-match` tool:
//!
//! ```bash
//! $ fc-match -f '%{file}' 'DejaVu Sans:bold'
//! /usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use crate::error::LabelError;

/// Environment applied to external tools so their output is not localized.
pub(crate) const C_LOCALE_ENV: &[(&str, &str)] = &[
    ("LANG", "C.UTF-8"),
    ("LANGUAGE", "C"),
    ("LC_CTYPE", "C.UTF-8"),
    ("LC_NUMERIC", "C.UTF-8"),
    ("LC_TIME", "C.UTF-8"),
    ("LC_COLLATE", "C.UTF-8"),
    ("LC_MONETARY", "C.UTF-8"),
    ("LC_MESSAGES", "C.UTF-8"),
    ("LC_PAPER", "C.UTF-8"),
    ("LC_NAME", "C.UTF-8"),
    ("LC_ADDRESS", "C.UTF-8"),
    ("LC_TELEPHONE", "C.UTF-8"),
    ("LC_MEASUREMENT", "C.UTF-8"),
    ("LC_IDENTIFICATION", "C.UTF-8"),
    ("LC_ALL", "C.UTF-8"),
];

/// Maps a font pattern to a font file.
pub trait FontResolver {
    /// Resolve `pattern`. `Ok(None)` means no font matched.
    fn resolve(&self, pattern: &str) -> Result<Option<PathBuf>, LabelError>;
}

/// Resolves patterns by running fontconfig's `fc-match`.
#[derive(Debug, Clone)]
pub struct FcMatch {
    program: String,
}

impl FcMatch {
    pub fn new() -> Self {
        Self::with_program("fc-match")
    }

    /// Use a different `fc-match` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FcMatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret `fc-match -f %{file}` output.
///
/// A successful match prints the bare path with no trailing newline; a
/// failing exit status, a newline-terminated reply or empty output all mean
/// no match.
fn parse_fc_match_output(success: bool, stdout: &[u8]) -> Option<PathBuf> {
    if !success || stdout.is_empty() || stdout.ends_with(b"\n") {
        return None;
    }
    Some(PathBuf::from(String::from_utf8_lossy(stdout).into_owned()))
}

impl FontResolver for FcMatch {
    fn resolve(&self, pattern: &str) -> Result<Option<PathBuf>, LabelError> {
        let output = Command::new(&self.program)
            .arg("-f")
            .arg("%{file}")
            .arg(pattern)
            .envs(C_LOCALE_ENV.iter().copied())
            .output()
            .map_err(|e| {
                LabelError::FontResolver(format!("Failed to run '{}': {}", self.program, e))
            })?;

        Ok(parse_fc_match_output(output.status.success(), &output.stdout))
    }
}

/// Resolver backed by a fixed pattern table.
///
/// Useful when fontconfig is unavailable or for pinning label fonts.
#[derive(Debug, Clone, Default)]
pub struct StaticFonts {
    fonts: HashMap<String, PathBuf>,
}

impl StaticFonts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pattern: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.fonts.insert(pattern.into(), path.into());
        self
    }
}

impl FontResolver for StaticFonts {
    fn resolve(&self, pattern: &str) -> Result<Option<PathBuf>, LabelError> {
        Ok(self.fonts.get(pattern).cloned())
    }
}
