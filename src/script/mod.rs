//! # Label Description Language
//!
//! Line-oriented, tab-separated directives. A small label:
//!
//! ```text
//! ICRASHSTUFF-LABEL-RENDERER-FILE:1
//! # Asset tag with a configurable owner
//! CONFIG	TEXT	OWNER	IT
//! FONT	DejaVu Sans:bold
//! ALIGN	middle
//! NEWLINE	2	${OWNER}
//! NEWLINE	1	Property of ACME
//! BLOCK
//! SPACING	0.25
//! ```
//!
//! ## Modules
//!
//! - [`parse`]: raw lines to tokenized [`Directive`]s
//! - [`command`]: directives to typed [`Command`]s
//! - [`variables`]: variable table and `${name}` substitution
//! - [`config`]: `CONFIG` declarations (`ENUM`, `NUMERICAL`, `TEXT`)

pub mod command;
pub mod config;
pub mod parse;
pub mod variables;

pub use command::{Command, FORMAT_MARKER};
pub use config::Declaration;
pub use parse::{Directive, parse_lines, parse_source};
pub use variables::Variables;
