//! # Render Configuration
//!
//! Run-wide settings for the label interpreter.
//!
//! ## Usage
//!
//! ```
//! use tapelabel::config::{DEFAULT_TAPE_HEIGHT, RenderConfig};
//!
//! let config = RenderConfig::default();
//! assert_eq!(config.tape_height, DEFAULT_TAPE_HEIGHT);
//! ```

use crate::transport::PrinterInfo;

/// Printable tape height in pixels used when the printer is not queried.
pub const DEFAULT_TAPE_HEIGHT: u32 = 76;

/// # Render Configuration
///
/// The rendered image is always exactly `tape_height` pixels tall; labels
/// grow along the tape (horizontally) only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Height of the output raster in pixels
    pub tape_height: u32,
}

impl RenderConfig {
    pub fn new(tape_height: u32) -> Self {
        Self { tape_height }
    }

    /// Size the output to the tape currently loaded in a printer.
    pub fn from_printer(info: &PrinterInfo) -> Self {
        Self::new(info.media_width_px)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_HEIGHT)
    }
}
