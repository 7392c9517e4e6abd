//! `CONFIG` variable declarations.
//!
//! A declaration checks its own default first, then any value the caller
//! already supplied. Caller values that pass are kept; otherwise the default
//! is seeded into the table.
//!
//! | Kind | Arguments | Check |
//! |------|-----------|-------|
//! | `ENUM` | `default option...` | value is one of the options |
//! | `NUMERICAL` | `default min max` | integer in `[min, max]` |
//! | `TEXT` | `default` | none |

use super::variables::Variables;
use crate::error::{Constraint, LabelError};

/// A typed variable declared by a `CONFIG` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Enum {
        name: String,
        default: String,
        options: Vec<String>,
    },
    Numerical {
        name: String,
        default: i64,
        min: i64,
        max: i64,
    },
    Text {
        name: String,
        default: String,
    },
}

fn parse_int(value: &str, argument: &'static str) -> Result<i64, LabelError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| LabelError::InvalidArgument {
            command: "CONFIG".to_string(),
            argument,
            value: value.to_string(),
        })
}

impl Declaration {
    /// Build a declaration from the `CONFIG` arguments.
    ///
    /// `rest` holds everything after the default: the options for `ENUM`,
    /// `min` and `max` for `NUMERICAL`, ignored for `TEXT`.
    pub fn parse(
        kind: &str,
        name: &str,
        default: &str,
        rest: &[String],
    ) -> Result<Self, LabelError> {
        let name = name.to_string();
        match kind {
            "ENUM" => Ok(Declaration::Enum {
                name,
                default: default.to_string(),
                options: rest.to_vec(),
            }),
            "NUMERICAL" => {
                let bound = |index: usize, argument: &'static str| {
                    rest.get(index)
                        .ok_or_else(|| LabelError::MissingArgument {
                            command: "CONFIG".to_string(),
                            argument,
                        })
                        .and_then(|v| parse_int(v, argument))
                };
                Ok(Declaration::Numerical {
                    name,
                    default: parse_int(default, "default value")?,
                    min: bound(0, "minimum")?,
                    max: bound(1, "maximum")?,
                })
            }
            "TEXT" => Ok(Declaration::Text {
                name,
                default: default.to_string(),
            }),
            other => Err(LabelError::UnknownVariableKind(other.to_string())),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Enum { name, .. }
            | Declaration::Numerical { name, .. }
            | Declaration::Text { name, .. } => name,
        }
    }

    /// Validate the declaration against `variables` and seed the default.
    pub fn apply(&self, variables: &mut Variables) -> Result<(), LabelError> {
        match self {
            Declaration::Enum {
                name,
                default,
                options,
            } => {
                if !options.contains(default) {
                    return Err(LabelError::InvalidDefault {
                        name: name.clone(),
                        value: default.clone(),
                        constraint: Constraint::Enumeration,
                    });
                }
                if let Some(value) = variables.get(name) {
                    if !options.iter().any(|o| o == value) {
                        return Err(LabelError::InvalidOverride {
                            name: name.clone(),
                            value: value.to_string(),
                            constraint: Constraint::Enumeration,
                        });
                    }
                }
                variables.set_default(name, default.as_str());
            }
            Declaration::Numerical {
                name,
                default,
                min,
                max,
            } => {
                let range = *min..=*max;
                if !range.contains(default) {
                    return Err(LabelError::InvalidDefault {
                        name: name.clone(),
                        value: default.to_string(),
                        constraint: Constraint::Range,
                    });
                }
                if let Some(value) = variables.get(name) {
                    let in_range = value
                        .trim()
                        .parse::<i64>()
                        .is_ok_and(|v| range.contains(&v));
                    if !in_range {
                        return Err(LabelError::InvalidOverride {
                            name: name.clone(),
                            value: value.to_string(),
                            constraint: Constraint::Range,
                        });
                    }
                }
                variables.set_default(name, default.to_string());
            }
            Declaration::Text { name, default } => {
                variables.set_default(name, default.as_str());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn declare(tokens: &[&str]) -> Declaration {
        let rest: Vec<String> = tokens[3..].iter().map(|s| s.to_string()).collect();
        Declaration::parse(tokens[0], tokens[1], tokens[2], &rest).unwrap()
    }

    // ========== ENUM ==========

    #[test]
    fn test_enum_seeds_default() {
        let decl = declare(&["ENUM", "SIZE", "small", "small", "medium", "large"]);
        let mut vars = Variables::new();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("SIZE"), Some("small"));
    }

    #[test]
    fn test_enum_keeps_valid_override() {
        let decl = declare(&["ENUM", "SIZE", "small", "small", "medium", "large"]);
        let mut vars = Variables::from_defines(["SIZE=large"]).unwrap();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("SIZE"), Some("large"));
    }

    #[test]
    fn test_enum_rejects_override() {
        let decl = declare(&["ENUM", "SIZE", "small", "small", "medium", "large"]);
        let mut vars = Variables::from_defines(["SIZE=huge"]).unwrap();
        let err = decl.apply(&mut vars).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Set value of 'huge' for 'SIZE' not in enumeration"
        );
    }

    #[test]
    fn test_enum_rejects_default() {
        let decl = declare(&["ENUM", "SIZE", "tiny", "small", "large"]);
        let err = decl.apply(&mut Variables::new()).unwrap_err();
        assert!(matches!(
            err,
            LabelError::InvalidDefault {
                constraint: Constraint::Enumeration,
                ..
            }
        ));
    }

    #[test]
    fn test_enum_default_checked_before_override() {
        let decl = declare(&["ENUM", "SIZE", "tiny", "small"]);
        let mut vars = Variables::from_defines(["SIZE=small"]).unwrap();
        assert!(matches!(
            decl.apply(&mut vars),
            Err(LabelError::InvalidDefault { .. })
        ));
    }

    // ========== NUMERICAL ==========

    #[test]
    fn test_numerical_seeds_default() {
        let decl = declare(&["NUMERICAL", "X", "05", "0", "10"]);
        let mut vars = Variables::new();
        decl.apply(&mut vars).unwrap();
        // Seeded as the normalized integer
        assert_eq!(vars.get("X"), Some("5"));
    }

    #[test]
    fn test_numerical_keeps_override() {
        let decl = declare(&["NUMERICAL", "X", "5", "0", "10"]);
        let mut vars = Variables::from_defines(["X=7"]).unwrap();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("X"), Some("7"));
    }

    #[test]
    fn test_numerical_bounds_inclusive() {
        let decl = declare(&["NUMERICAL", "X", "0", "0", "10"]);
        let mut vars = Variables::from_defines(["X=10"]).unwrap();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("X"), Some("10"));
    }

    #[test]
    fn test_numerical_rejects_override() {
        let decl = declare(&["NUMERICAL", "X", "5", "0", "10"]);
        let mut vars = Variables::from_defines(["X=99"]).unwrap();
        let err = decl.apply(&mut vars).unwrap_err();
        assert_eq!(err.to_string(), "Set value of '99' for 'X' not in range");
    }

    #[test]
    fn test_numerical_rejects_non_numeric_override() {
        let decl = declare(&["NUMERICAL", "X", "5", "0", "10"]);
        let mut vars = Variables::from_defines(["X=seven"]).unwrap();
        assert!(matches!(
            decl.apply(&mut vars),
            Err(LabelError::InvalidOverride {
                constraint: Constraint::Range,
                ..
            })
        ));
    }

    #[test]
    fn test_numerical_rejects_default() {
        let decl = declare(&["NUMERICAL", "X", "11", "0", "10"]);
        let err = decl.apply(&mut Variables::new()).unwrap_err();
        assert_eq!(err.to_string(), "Default value of '11' for 'X' not in range");
    }

    #[test]
    fn test_numerical_requires_bounds() {
        let rest = vec!["0".to_string()];
        assert!(matches!(
            Declaration::parse("NUMERICAL", "X", "5", &rest),
            Err(LabelError::MissingArgument {
                argument: "maximum",
                ..
            })
        ));
        assert!(matches!(
            Declaration::parse("NUMERICAL", "X", "five", &rest),
            Err(LabelError::InvalidArgument { .. })
        ));
    }

    // ========== TEXT ==========

    #[test]
    fn test_text_seeds_and_keeps() {
        let decl = declare(&["TEXT", "NAME", "Bob"]);
        let mut vars = Variables::new();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("NAME"), Some("Bob"));

        let mut vars = Variables::from_defines(["NAME=Alice"]).unwrap();
        decl.apply(&mut vars).unwrap();
        assert_eq!(vars.get("NAME"), Some("Alice"));
    }

    #[test]
    fn test_unknown_kind() {
        let err = Declaration::parse("COLOR", "C", "red", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown variable type 'COLOR'");
    }

    #[test]
    fn test_name() {
        assert_eq!(declare(&["TEXT", "NAME", "Bob"]).name(), "NAME");
    }
}
