//! # tapelabel - Tape Label Renderer
//!
//! tapelabel turns small line-oriented label files into monochrome rasters
//! sized for label-printer tape. It provides:
//!
//! - **Label language**: tab-separated directives with `${NAME}` variables
//!   and typed, validated `CONFIG` declarations
//! - **Layout**: weighted line blocks stacked across the tape, growing the
//!   label to the right block by block
//! - **Fonts**: fontconfig pattern lookup and TrueType rendering
//! - **Transport**: printing through `ptouch-print`
//!
//! ## Quick Start
//!
//! ```no_run
//! use tapelabel::{RenderConfig, Variables, render_commands};
//!
//! let lines = [
//!     "ICRASHSTUFF-LABEL-RENDERER-FILE:1",
//!     "CONFIG\tNUMERICAL\tSIZE\t2\t1\t4",
//!     "FONT\tDejaVu Sans:bold",
//!     "NEWLINE\t3\tSize ${SIZE}",
//!     "NEWLINE\t1\tsmall print",
//! ];
//!
//! let output = render_commands(lines, Variables::new(), RenderConfig::default())?;
//! output.image.save(std::path::Path::new("label.png"))?;
//!
//! # Ok::<(), tapelabel::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`script`] | Directive parsing, commands, variables, `CONFIG` |
//! | [`interpreter`] | Executes directives into a [`RenderOutput`] |
//! | [`render`] | Canvas, font backend and block layout |
//! | [`fontconfig`] | Font pattern resolution |
//! | [`transport`] | Printer backends |
//! | [`config`] | Render configuration |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod fontconfig;
pub mod interpreter;
pub mod render;
pub mod script;
pub mod transport;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::LabelError;
pub use interpreter::{LabelRenderer, RenderOutput, render_commands};
pub use render::Canvas;
pub use script::Variables;
