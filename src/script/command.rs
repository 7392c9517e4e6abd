//! Typed label commands.
//!
//! Each [`Directive`] is converted into a [`Command`] right before it is
//! executed, so an unknown mnemonic or a malformed argument is reported in
//! source order, after every earlier directive has run.

use std::path::PathBuf;

use super::config::Declaration;
use super::parse::Directive;
use crate::error::LabelError;

/// File format marker, expected as the first directive of a label file.
pub const FORMAT_MARKER: &str = "ICRASHSTUFF-LABEL-RENDERER-FILE:1";

/// A single label command with its arguments parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `ICRASHSTUFF-LABEL-RENDERER-FILE:1`
    FormatMarker,
    /// `BACKGROUND color`
    Background(String),
    /// `FOREGROUND color`
    Foreground(String),
    /// `CONFIG kind name default [args...]`
    Config(Declaration),
    /// `ALIGN mode`, lower-cased. Checked only when a line using it is drawn.
    Align(String),
    /// `FONT pattern`, resolved through the font resolver
    Font(String),
    /// `FONTFILE path`
    FontFile(PathBuf),
    /// `NEWLINE weight [text]`
    NewLine { weight: u32, text: String },
    /// `TEXT [weight] text`
    ///
    /// The weight token is only consulted when there is no line to append to.
    Text { weight: Option<String>, text: String },
    /// `BLOCK`
    Block,
    /// `SPACING factor`
    Spacing(f64),
}

impl Command {
    /// Whether this command renders the pending lines.
    pub fn triggers_render(&self) -> bool {
        matches!(self, Command::Block | Command::Spacing(_))
    }
}

fn required<'a>(
    directive: &'a Directive,
    index: usize,
    argument: &'static str,
) -> Result<&'a str, LabelError> {
    directive
        .arg(index)
        .ok_or_else(|| LabelError::MissingArgument {
            command: directive.name().to_string(),
            argument,
        })
}

fn invalid(command: &str, argument: &'static str, value: &str) -> LabelError {
    LabelError::InvalidArgument {
        command: command.to_string(),
        argument,
        value: value.to_string(),
    }
}

/// Parse a line weight. Weights are integers of at least 1.
pub fn parse_weight(command: &str, value: &str) -> Result<u32, LabelError> {
    match value.trim().parse::<u32>() {
        Ok(weight) if weight >= 1 => Ok(weight),
        _ => Err(invalid(command, "weight", value)),
    }
}

fn parse_spacing(value: &str) -> Result<f64, LabelError> {
    match value.trim().parse::<f64>() {
        Ok(factor) if factor.is_finite() && factor >= 0.0 => Ok(factor),
        _ => Err(invalid("SPACING", "factor", value)),
    }
}

impl TryFrom<&Directive> for Command {
    type Error = LabelError;

    fn try_from(directive: &Directive) -> Result<Self, Self::Error> {
        let command = match directive.name() {
            FORMAT_MARKER => Command::FormatMarker,
            "BACKGROUND" => Command::Background(required(directive, 0, "color")?.to_string()),
            "FOREGROUND" => Command::Foreground(required(directive, 0, "color")?.to_string()),
            "CONFIG" => {
                let kind = required(directive, 0, "variable type")?;
                let name = required(directive, 1, "variable name")?;
                let default = required(directive, 2, "default value")?;
                let rest = directive.args().get(3..).unwrap_or_default();
                Command::Config(Declaration::parse(kind, name, default, rest)?)
            }
            "ALIGN" => Command::Align(required(directive, 0, "alignment")?.to_lowercase()),
            "FONT" => Command::Font(required(directive, 0, "font pattern")?.to_string()),
            "FONTFILE" => {
                Command::FontFile(PathBuf::from(required(directive, 0, "font file")?))
            }
            "NEWLINE" => Command::NewLine {
                weight: parse_weight("NEWLINE", required(directive, 0, "weight")?)?,
                text: directive.arg(1).unwrap_or_default().to_string(),
            },
            "TEXT" => match (directive.arg(0), directive.arg(1)) {
                (Some(weight), Some(text)) => Command::Text {
                    weight: Some(weight.to_string()),
                    text: text.to_string(),
                },
                (Some(text), None) => Command::Text {
                    weight: None,
                    text: text.to_string(),
                },
                _ => Command::Text {
                    weight: None,
                    text: String::new(),
                },
            },
            "BLOCK" => Command::Block,
            "SPACING" => Command::Spacing(parse_spacing(required(directive, 0, "factor")?)?),
            other => return Err(LabelError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}
