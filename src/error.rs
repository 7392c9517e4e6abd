//! # Error Types
//!
//! This module defines the error type used throughout the tapelabel library.
//!
//! Every interpreter failure is terminal for the run: the first offending
//! directive stops processing and its error is returned as-is.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which declared constraint a `CONFIG` value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// `ENUM` declarations: the value must be one of the listed options.
    Enumeration,
    /// `NUMERICAL` declarations: the value must be an integer in `[min, max]`.
    Range,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Enumeration => f.write_str("enumeration"),
            Constraint::Range => f.write_str("range"),
        }
    }
}

/// Main error type for tapelabel operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// The label source contained no directives after removing comments and blank lines
    #[error("No commands provided!")]
    NoCommands,

    /// Directive mnemonic not recognized
    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    /// A directive was missing one of its positional arguments
    #[error("Missing {argument} for {command}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    /// A positional argument could not be parsed
    #[error("Invalid {argument} '{value}' for {command}")]
    InvalidArgument {
        command: String,
        argument: &'static str,
        value: String,
    },

    /// `${name}` referenced a variable that was never set
    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    /// `${name}` references kept expanding into more references
    #[error("Too many variable substitutions in '{0}'")]
    SubstitutionLimit(String),

    /// `CONFIG` used a variable kind other than ENUM, NUMERICAL or TEXT
    #[error("Unknown variable type '{0}'")]
    UnknownVariableKind(String),

    /// A `CONFIG` default violates its own declaration
    #[error("Default value of '{value}' for '{name}' not in {constraint}")]
    InvalidDefault {
        name: String,
        value: String,
        constraint: Constraint,
    },

    /// A caller-supplied value violates the `CONFIG` declaration
    #[error("Set value of '{value}' for '{name}' not in {constraint}")]
    InvalidOverride {
        name: String,
        value: String,
        constraint: Constraint,
    },

    /// The font resolver had no match for a `FONT` pattern
    #[error("Unable to find font for pattern '{0}'")]
    FontNotFound(String),

    /// The font resolver itself could not be run
    #[error("Font resolver error: {0}")]
    FontResolver(String),

    /// A font file could not be read or parsed
    #[error("Unable to load font '{}': {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// A pending line carried an alignment other than left, middle or right
    #[error("Unsupported line alignment mode: '{0}'")]
    UnsupportedAlignment(String),

    /// A block or `SPACING` would grow the label past the width limit
    #[error("Label would be {width}px wide, more than the {max}px limit")]
    CanvasTooWide { width: u64, max: u32 },

    /// The run finished without producing any raster
    #[error("No image was rendered")]
    NothingRendered,

    /// A `-D` argument was not of the form `KEY=VALUE`
    #[error("Config variables must be formatted as 'KEY=VALUE', got '{0}'")]
    MalformedDefine(String),

    /// Input and output resolve to the same file
    #[error("Output cannot be the same as Input!")]
    SameInputOutput,

    /// Input file does not exist
    #[error("Input file '{}' not found!", .0.display())]
    InputMissing(PathBuf),

    /// Printer transport errors (ptouch-print invocation or output)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for LabelError {
    fn from(err: image::ImageError) -> Self {
        LabelError::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages() {
        let err = LabelError::InvalidDefault {
            name: "SIZE".into(),
            value: "huge".into(),
            constraint: Constraint::Enumeration,
        };
        assert_eq!(
            err.to_string(),
            "Default value of 'huge' for 'SIZE' not in enumeration"
        );

        let err = LabelError::InvalidOverride {
            name: "X".into(),
            value: "99".into(),
            constraint: Constraint::Range,
        };
        assert_eq!(err.to_string(), "Set value of '99' for 'X' not in range");
    }

    #[test]
    fn test_font_load_message_includes_path() {
        let err = LabelError::FontLoad {
            path: PathBuf::from("/fonts/a.ttf"),
            reason: "missing".into(),
        };
        assert_eq!(err.to_string(), "Unable to load font '/fonts/a.ttf': missing");
    }
}
