//! # ptouch-print Transport
//!
//! Sends finished labels to Brother P-touch tape printers through the
//! [`ptouch-print`](https://git.familie-radermacher.ch/linux/ptouch-print.git)
//! command-line tool, and reads back the loaded tape's properties.
//!
//! ## Requirements
//!
//! A `ptouch-print` build with the `--timeout` and `--precut` options.
//!
//! ## Printer Info
//!
//! `ptouch-print --info` reports the printer and tape:
//!
//! ```text
//! PT-P700 found on USB bus 1, device 12
//! maximum printing width for this printer is 128px
//! maximum printing width for this tape is 76px
//! media type = 0x01 (Laminated tape)
//! media width = 12 mm
//! tape color = 0x01 (White)
//! text color = 0x08 (Black)
//! error = 0000
//! ```

use std::io::Write;
use std::process::{Command, Stdio};

use regex::Regex;

use crate::error::LabelError;
use crate::fontconfig::C_LOCALE_ENV;
use crate::render::canvas::Canvas;

/// Default executable name
pub const DEFAULT_PROGRAM: &str = "ptouch-print";

/// Printer and tape properties reported by `ptouch-print --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterInfo {
    /// Print head width in pixels
    pub printer_width_px: u32,
    /// Printable width of the loaded tape in pixels
    pub media_width_px: u32,
    /// Tape width in millimeters
    pub media_width_mm: u32,
    /// Tape type, e.g. "Laminated tape"
    pub media_type: String,
    /// Tape color, e.g. "White"
    pub background: String,
    /// Text color, e.g. "Black"
    pub foreground: String,
}

/// Options for a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Number of copies, at least 1
    pub copies: u32,
    /// Seconds `ptouch-print` waits for the printer (0 = tool default)
    pub timeout: u32,
    /// Extra blank pixels before and after the label (0 = none)
    pub pad: u32,
    /// Skip the final feed-and-cut so the next label follows directly
    pub chain: bool,
    /// Print a cut mark after the label
    pub cutmark: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            timeout: 0,
            pad: 0,
            chain: false,
            cutmark: false,
        }
    }
}

fn info_pattern(pattern: &str) -> Result<Regex, LabelError> {
    Regex::new(pattern).map_err(|e| LabelError::Transport(format!("bad info pattern: {}", e)))
}

fn capture<'a>(re: &Regex, text: &'a str, field: &str) -> Result<&'a str, LabelError> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| LabelError::Transport(format!("printer info is missing {}", field)))
}

fn capture_number(re: &Regex, text: &str, field: &str) -> Result<u32, LabelError> {
    let value = capture(re, text, field)?;
    value
        .parse()
        .map_err(|_| LabelError::Transport(format!("invalid {} '{}' in printer info", field, value)))
}

/// Parse the output of `ptouch-print --info`.
pub fn parse_info(output: &str) -> Result<PrinterInfo, LabelError> {
    let printer_width = info_pattern(r"printer.* (\d+)px")?;
    let media_width_px = info_pattern(r"tape.* (\d+)px")?;
    let media_width_mm = info_pattern(r"media width = (\d+) mm")?;
    let media_type = info_pattern(r"media type = (?:0x)?[0-9a-fA-F]* \(([^)]*)\)")?;
    let tape_color = info_pattern(r"tape color = (?:0x)?[0-9a-fA-F]* \(([^)]*)\)")?;
    let text_color = info_pattern(r"text color = (?:0x)?[0-9a-fA-F]* \(([^)]*)\)")?;

    Ok(PrinterInfo {
        printer_width_px: capture_number(&printer_width, output, "printer width")?,
        media_width_px: capture_number(&media_width_px, output, "tape width")?,
        media_width_mm: capture_number(&media_width_mm, output, "media width")?,
        media_type: capture(&media_type, output, "media type")?.to_string(),
        background: capture(&tape_color, output, "tape color")?.to_string(),
        foreground: capture(&text_color, output, "text color")?.to_string(),
    })
}

/// Arguments for printing one copy. `more_follow` chains it to the next copy.
fn print_args(options: &PrintOptions, more_follow: bool) -> Vec<String> {
    let mut args = vec![
        "--timeout".to_string(),
        options.timeout.to_string(),
        "--precut".to_string(),
    ];
    if options.pad > 0 {
        args.push("--pad".to_string());
        args.push(options.pad.to_string());
    }
    if options.chain || more_follow {
        args.push("--chain".to_string());
    }
    if options.cutmark {
        args.push("--cutmark".to_string());
    }
    args.push("-i".to_string());
    args.push("-".to_string());
    args
}

/// # P-touch Printer
///
/// ## Example
///
/// ```no_run
/// use tapelabel::render::Canvas;
/// use tapelabel::transport::{PrintOptions, PtouchPrint};
///
/// let printer = PtouchPrint::new();
/// let info = printer.info(5)?;
/// println!("{} tape, {}px printable", info.media_type, info.media_width_px);
///
/// let label = Canvas::blank(200, info.media_width_px);
/// printer.print(&label, &PrintOptions::default())?;
/// # Ok::<(), tapelabel::LabelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PtouchPrint {
    program: String,
}

impl Default for PtouchPrint {
    fn default() -> Self {
        Self::new()
    }
}

impl PtouchPrint {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a different `ptouch-print` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Query printer and tape properties.
    pub fn info(&self, timeout: u32) -> Result<PrinterInfo, LabelError> {
        let output = Command::new(&self.program)
            .arg("--timeout")
            .arg(timeout.to_string())
            .arg("--info")
            .envs(C_LOCALE_ENV.iter().copied())
            .output()
            .map_err(|e| {
                LabelError::Transport(format!("Failed to run '{}': {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LabelError::Transport(format!(
                "'{} --info' failed: {}",
                self.program,
                stderr.trim()
            )));
        }

        let info = parse_info(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(?info, "queried printer");
        Ok(info)
    }

    /// Print `canvas`, `options.copies` times.
    ///
    /// All copies but the last are chained so no tape is wasted between them.
    pub fn print(&self, canvas: &Canvas, options: &PrintOptions) -> Result<(), LabelError> {
        let png = canvas.to_png()?;
        let copies = options.copies.max(1);

        for copy in 1..=copies {
            let args = print_args(options, copy < copies);
            tracing::debug!(copy, copies, ?args, "sending label to printer");
            self.send(&args, &png)?;
        }

        Ok(())
    }

    fn send(&self, args: &[String], png: &[u8]) -> Result<(), LabelError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .envs(C_LOCALE_ENV.iter().copied())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                LabelError::Transport(format!("Failed to run '{}': {}", self.program, e))
            })?;

        // stdin is dropped at the end of the match so the child sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(png),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(|e| {
            LabelError::Transport(format!("Failed to wait for '{}': {}", self.program, e))
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Err(e) = written {
            return Err(LabelError::Transport(format!(
                "Write to '{}' failed: {}: {}",
                self.program,
                e,
                stderr.trim()
            )));
        }

        if !output.status.success() {
            return Err(LabelError::Transport(format!(
                "'{}' failed: {}",
                self.program,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
