//! # tapelabel CLI
//!
//! Renders a label file into a PNG, optionally printing it on a P-touch
//! tape printer.
//!
//! ## Usage
//!
//! ```bash
//! # Render a label for 12mm tape (76px)
//! tapelabel address.label address.png
//!
//! # Fill in variables
//! tapelabel -D NAME=Alice -D SIZE=3 badge.label badge.png
//!
//! # Size the label for the loaded tape and print two copies
//! tapelabel --print --copies 2 badge.label badge.png
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tapelabel::{
    LabelError, RenderConfig, RenderOutput, Variables,
    config::DEFAULT_TAPE_HEIGHT,
    interpreter::LabelRenderer,
    transport::{PrintOptions, PrinterInfo, PtouchPrint},
};

/// tapelabel - render tape labels from label files
#[derive(Parser, Debug)]
#[command(name = "tapelabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Label file to render
    input: PathBuf,

    /// PNG file to write
    output: PathBuf,

    /// Set a label variable (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    defines: Vec<String>,

    /// Printable tape height in pixels (defaults to 76, or the loaded tape with --print)
    #[arg(long, value_name = "PX")]
    tape_width: Option<u32>,

    /// Log every directive as it executes
    #[arg(long)]
    debug: bool,

    /// Also print the label with ptouch-print
    #[arg(long)]
    print: bool,

    /// Number of copies to print
    #[arg(long, default_value = "1", requires = "print")]
    copies: u32,

    /// Do not feed and cut after the last copy
    #[arg(long, requires = "print")]
    chain: bool,

    /// Print a cut mark after each label
    #[arg(long, requires = "print")]
    cutmark: bool,

    /// Blank pixels added before and after the label
    #[arg(long, default_value = "0", value_name = "PX", requires = "print")]
    pad: u32,

    /// Seconds to wait for the printer
    #[arg(long, default_value = "5", value_name = "S")]
    timeout: u32,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "tapelabel=debug"
    } else {
        "tapelabel=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), LabelError> {
    check_paths(&cli.input, &cli.output)?;

    let variables = Variables::from_defines(&cli.defines)?;
    let source = std::fs::read_to_string(&cli.input)?;

    let printer = PtouchPrint::new();
    let info = match (cli.print, cli.tape_width) {
        (true, None) => Some(printer.info(cli.timeout)?),
        _ => None,
    };

    let config = match (cli.tape_width, &info) {
        (Some(height), _) => RenderConfig::new(height),
        (None, Some(info)) => RenderConfig::from_printer(info),
        (None, None) => RenderConfig::new(DEFAULT_TAPE_HEIGHT),
    };
    tracing::debug!(tape_height = config.tape_height, "rendering label");

    let output = LabelRenderer::new(config).render_source(&source, variables)?;

    output.image.save(&cli.output)?;
    tracing::info!(
        "Saved {}x{} label to {}",
        output.image.width(),
        output.image.height(),
        cli.output.display()
    );

    if cli.print {
        if let Some(info) = &info {
            warn_on_color_mismatch(&output, info);
        }

        let options = PrintOptions {
            copies: cli.copies,
            timeout: cli.timeout,
            pad: cli.pad,
            chain: cli.chain,
            cutmark: cli.cutmark,
        };
        printer.print(&output.image, &options)?;
        tracing::info!("Printed {} copies", options.copies.max(1));
    }

    Ok(())
}

/// Reject a missing input and an output that would overwrite it.
fn check_paths(input: &Path, output: &Path) -> Result<(), LabelError> {
    if !input.exists() {
        return Err(LabelError::InputMissing(input.to_path_buf()));
    }
    if std::path::absolute(input)? == std::path::absolute(output)? {
        return Err(LabelError::SameInputOutput);
    }
    Ok(())
}

fn warn_on_color_mismatch(output: &RenderOutput, info: &PrinterInfo) {
    let checks = [
        ("BACKGROUND", &output.background, &info.background),
        ("FOREGROUND", &output.foreground, &info.foreground),
    ];
    for (directive, wanted, loaded) in checks {
        if let Some(wanted) = wanted {
            if !wanted.eq_ignore_ascii_case(loaded) {
                tracing::warn!(
                    "Label asks for {} '{}' but the loaded tape has '{}'",
                    directive,
                    wanted,
                    loaded
                );
            }
        }
    }
}
