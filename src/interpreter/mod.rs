//! # Label Interpreter
//!
//! Executes parsed directives in order and builds the label raster.
//!
//! ## Architecture
//!
//! ```text
//! source lines → parse_lines → [Directive] → LabelRenderer → RenderOutput
//!                                                 ↓
//!                                 For each directive:
//!                                 - Convert to Command (unknown → error)
//!                                 - Update variables / alignment / font
//!                                 - Accumulate pending lines
//!                                 - On BLOCK / SPACING: render the block,
//!                                   then (SPACING) append blank space
//! ```
//!
//! The first failing directive aborts the run; no partial image is returned.
//!
//! ## Example
//!
//! ```no_run
//! use tapelabel::{RenderConfig, Variables, interpreter::LabelRenderer};
//!
//! let source = "ICRASHSTUFF-LABEL-RENDERER-FILE:1\n\
//!               FONT\tDejaVu Sans\n\
//!               NEWLINE\t1\tHello ${NAME}\n";
//! let variables = Variables::from_defines(["NAME=world"])?;
//!
//! let mut renderer = LabelRenderer::new(RenderConfig::default());
//! let output = renderer.render_source(source, variables)?;
//! output.image.save(std::path::Path::new("label.png"))?;
//! # Ok::<(), tapelabel::LabelError>(())
//! ```

mod lines;

pub use lines::{LineAccumulator, PendingLine};

use crate::config::RenderConfig;
use crate::error::LabelError;
use crate::fontconfig::{FcMatch, FontResolver};
use crate::render::canvas::Canvas;
use crate::render::font::{FontLoader, TtfFonts};
use crate::render::layout;
use crate::script::command::parse_weight;
use crate::script::{Command, Directive, Variables, parse_lines, parse_source};

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The finished label raster
    pub image: Canvas,
    /// Tape color requested by `FOREGROUND`, if any
    pub foreground: Option<String>,
    /// Tape color requested by `BACKGROUND`, if any
    pub background: Option<String>,
    /// Final variable table, including seeded `CONFIG` defaults
    pub variables: Variables,
}

/// Interpreter state for one run.
struct Run {
    variables: Variables,
    lines: LineAccumulator,
    canvas: Option<Canvas>,
    foreground: Option<String>,
    background: Option<String>,
}

impl Run {
    fn new(variables: Variables) -> Self {
        Self {
            variables,
            lines: LineAccumulator::new(),
            canvas: None,
            foreground: None,
            background: None,
        }
    }
}

/// Renders label directives into a tape raster.
///
/// Generic over the font resolver and font loader so either can be swapped
/// (a fixed font table instead of fontconfig, for instance).
pub struct LabelRenderer<R = FcMatch, L = TtfFonts> {
    config: RenderConfig,
    resolver: R,
    fonts: L,
}

impl LabelRenderer {
    /// Renderer using `fc-match` and TTF font files.
    pub fn new(config: RenderConfig) -> Self {
        Self::with_backends(config, FcMatch::new(), TtfFonts::new())
    }
}

impl<R: FontResolver, L: FontLoader> LabelRenderer<R, L> {
    pub fn with_backends(config: RenderConfig, resolver: R, fonts: L) -> Self {
        Self {
            config,
            resolver,
            fonts,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Parse and render raw source lines (terminators may be included).
    pub fn render_lines<I, S>(
        &mut self,
        lines: I,
        variables: Variables,
    ) -> Result<RenderOutput, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let directives = parse_lines(lines)?;
        self.render_directives(&directives, variables)
    }

    /// Parse and render a whole label file.
    pub fn render_source(
        &mut self,
        source: &str,
        variables: Variables,
    ) -> Result<RenderOutput, LabelError> {
        let directives = parse_source(source)?;
        self.render_directives(&directives, variables)
    }

    /// Render already-parsed directives.
    ///
    /// `variables` holds the caller's overrides; `CONFIG` directives validate
    /// them and add defaults for anything missing.
    pub fn render_directives(
        &mut self,
        directives: &[Directive],
        variables: Variables,
    ) -> Result<RenderOutput, LabelError> {
        let mut run = Run::new(variables);

        for directive in directives {
            tracing::debug!(tokens = ?directive.tokens(), "executing directive");
            if let Err(err) = self.execute(&mut run, directive) {
                tracing::debug!(tokens = ?directive.tokens(), error = %err, "directive failed");
                return Err(err);
            }
        }

        let image = run.canvas.ok_or(LabelError::NothingRendered)?;
        Ok(RenderOutput {
            image,
            foreground: run.foreground,
            background: run.background,
            variables: run.variables,
        })
    }

    fn execute(&mut self, run: &mut Run, directive: &Directive) -> Result<(), LabelError> {
        let command = Command::try_from(directive)?;

        match &command {
            Command::FormatMarker | Command::Block | Command::Spacing(_) => {}
            Command::Background(color) => run.background = Some(color.clone()),
            Command::Foreground(color) => run.foreground = Some(color.clone()),
            Command::Config(declaration) => declaration.apply(&mut run.variables)?,
            Command::Align(mode) => run.lines.set_align(mode.as_str()),
            Command::Font(pattern) => {
                let path = self
                    .resolver
                    .resolve(pattern)?
                    .filter(|p| !p.as_os_str().is_empty())
                    .ok_or_else(|| LabelError::FontNotFound(pattern.clone()))?;
                tracing::debug!(pattern = %pattern, path = %path.display(), "resolved font pattern");
                run.lines.set_font(path);
            }
            Command::FontFile(path) => run.lines.set_font(path.clone()),
            Command::NewLine { weight, text } => {
                let text = run.variables.substitute(text)?;
                run.lines.start_line(*weight, text);
            }
            Command::Text { weight, text } => {
                let text = run.variables.substitute(text)?;
                if !run.lines.append_text(&text) {
                    let weight = match weight {
                        Some(w) => parse_weight("TEXT", w)?,
                        None => 1,
                    };
                    run.lines.start_line(weight, text);
                }
            }
        }

        let tape_height = self.config.tape_height;

        if command.triggers_render() && run.lines.has_pending() {
            let lines = run.lines.take();
            let canvas =
                layout::render_block(run.canvas.as_ref(), &lines, &mut self.fonts, tape_height)?;
            run.canvas = Some(canvas);
        }

        if let Command::Spacing(factor) = command {
            run.canvas = Some(layout::add_spacing(
                run.canvas.as_ref(),
                factor,
                tape_height,
            )?);
        }

        Ok(())
    }
}

/// Render label source lines with fontconfig and TTF fonts.
///
/// Convenience wrapper around [`LabelRenderer::render_lines`].
pub fn render_commands<I, S>(
    lines: I,
    variables: Variables,
    config: RenderConfig,
) -> Result<RenderOutput, LabelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LabelRenderer::new(config).render_lines(lines, variables)
}
