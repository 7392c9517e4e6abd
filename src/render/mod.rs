//! # Rendering Module
//!
//! Turns pending label lines into a monochrome tape raster.
//!
//! ## Modules
//!
//! - [`canvas`]: the growing 1-bit output raster
//! - [`font`]: font loading, text measurement and drawing (ab_glyph)
//! - [`layout`]: weighted block layout, alignment and spacing
//!
//! ## Usage Example
//!
//! ```
//! use tapelabel::render::layout;
//!
//! // Two lines weighted 1:3 on an 80px tape
//! assert_eq!(layout::line_heights(&[1, 3], 80), vec![20, 60]);
//!
//! // Half a tape height of blank space
//! let canvas = layout::add_spacing(None, 0.5, 80)?;
//! assert_eq!((canvas.width(), canvas.height()), (40, 80));
//! # Ok::<(), tapelabel::LabelError>(())
//! ```

pub mod canvas;
pub mod font;
pub mod layout;

pub use canvas::Canvas;
pub use font::{Alignment, FontLoader, TextExtent, TextFace, TtfFonts};
