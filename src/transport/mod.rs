//! # Printer Transport Layer
//!
//! Backends for sending finished labels to a tape printer.
//!
//! ## Available Transports
//!
//! - [`ptouch`]: Brother P-touch printers via the `ptouch-print` tool

pub mod ptouch;

pub use ptouch::{PrintOptions, PrinterInfo, PtouchPrint};
