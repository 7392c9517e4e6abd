//! Directive parser: turns raw label source lines into tokenized directives.
//!
//! Rules applied per line, in order:
//!
//! 1. Lines starting with `#` are comments and produce nothing
//! 2. One trailing `\r\n` or `\n` is stripped
//! 3. Lines that are now empty produce nothing
//! 4. Runs of tabs collapse to a single tab
//! 5. The line is split on tabs into tokens
//!
//! A synthetic `BLOCK` directive is appended to every non-empty result so a
//! trailing run of lines is always rendered.

use crate::error::LabelError;

/// One tokenized instruction. The first token is the mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    tokens: Vec<String>,
}

impl Directive {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Directive mnemonic (first token).
    pub fn name(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Positional argument `index` (0 is the first token after the mnemonic).
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.tokens.get(index + 1).map(String::as_str)
    }

    /// All positional arguments after the mnemonic.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Normalize a single source line. Returns `None` for comments and blank lines.
fn normalize_line(line: &str) -> Option<Directive> {
    if line.starts_with('#') {
        return None;
    }

    let line = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);

    if line.is_empty() {
        return None;
    }

    // Splitting on every tab and dropping the empty pieces between adjacent
    // tabs is the same as collapsing tab runs first. The leading piece is
    // kept even when empty so a line starting with a tab stays malformed.
    let mut pieces = line.split('\t');
    let first = pieces.next().unwrap_or_default();
    let mut tokens = vec![first.to_string()];
    let mut pending_empty = false;
    for piece in pieces {
        if piece.is_empty() {
            pending_empty = true;
            continue;
        }
        pending_empty = false;
        tokens.push(piece.to_string());
    }
    if pending_empty {
        tokens.push(String::new());
    }

    Some(Directive { tokens })
}

/// Parse source lines (terminators included or not) into directives.
///
/// Fails with [`LabelError::NoCommands`] when nothing but comments and blank
/// lines was given. On success the last directive is always a synthetic
/// `BLOCK`.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Directive>, LabelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut directives: Vec<Directive> = lines
        .into_iter()
        .filter_map(|line| normalize_line(line.as_ref()))
        .collect();

    if directives.is_empty() {
        return Err(LabelError::NoCommands);
    }

    directives.push(Directive::new(["BLOCK"]));
    Ok(directives)
}

/// Parse a whole label file held in memory.
pub fn parse_source(source: &str) -> Result<Vec<Directive>, LabelError> {
    parse_lines(source.split_inclusive('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(directives: &[Directive]) -> Vec<Vec<&str>> {
        directives
            .iter()
            .map(|d| d.tokens().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_comments_and_blank_lines_dropped() {
        let parsed = parse_lines(["# header\n", "\n", "FONTFILE\t/a.ttf\n", "\r\n"]).unwrap();
        assert_eq!(tokens(&parsed), vec![vec!["FONTFILE", "/a.ttf"], vec!["BLOCK"]]);
    }

    #[test]
    fn test_line_terminators_stripped() {
        let parsed = parse_lines(["ALIGN\tright\r\n", "BLOCK\n", "BLOCK"]).unwrap();
        assert_eq!(
            tokens(&parsed),
            vec![vec!["ALIGN", "right"], vec!["BLOCK"], vec!["BLOCK"], vec!["BLOCK"]]
        );
    }

    #[test]
    fn test_only_one_terminator_stripped() {
        // A bare CR is not a terminator and stays part of the token
        let parsed = parse_lines(["TEXT\tx\r"]).unwrap();
        assert_eq!(parsed[0].arg(0), Some("x\r"));
    }

    #[test]
    fn test_tab_runs_collapse() {
        let parsed = parse_lines(["NEWLINE\t\t\t1\t\tHello world\n"]).unwrap();
        assert_eq!(parsed[0].tokens(), &["NEWLINE", "1", "Hello world"]);
    }

    #[test]
    fn test_trailing_tab_yields_empty_token() {
        let parsed = parse_lines(["NEWLINE\t1\t\t\n"]).unwrap();
        assert_eq!(parsed[0].tokens(), &["NEWLINE", "1", ""]);
    }

    #[test]
    fn test_leading_tab_yields_empty_mnemonic() {
        let parsed = parse_lines(["\tBLOCK"]).unwrap();
        assert_eq!(parsed[0].name(), "");
        assert_eq!(parsed[0].arg(0), Some("BLOCK"));
    }

    #[test]
    fn test_spaces_are_not_separators() {
        let parsed = parse_lines(["FONT\tDejaVu Sans:bold"]).unwrap();
        assert_eq!(parsed[0].args(), &["DejaVu Sans:bold"]);
    }

    #[test]
    fn test_indented_hash_is_not_comment() {
        let parsed = parse_lines([" # not a comment"]).unwrap();
        assert_eq!(parsed[0].name(), " # not a comment");
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(parse_lines(Vec::<String>::new()), Err(LabelError::NoCommands)));
        assert!(matches!(
            parse_lines(["# only a comment\n", "\n"]),
            Err(LabelError::NoCommands)
        ));
    }

    #[test]
    fn test_block_always_appended() {
        let parsed = parse_source("BLOCK\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.last().unwrap().name(), "BLOCK");
    }

    #[test]
    fn test_comment_changes_do_not_affect_directives() {
        let a = parse_source("ICRASHSTUFF-LABEL-RENDERER-FILE:1\nNEWLINE\t1\tHi\n").unwrap();
        let b = parse_source(
            "# label v2\nICRASHSTUFF-LABEL-RENDERER-FILE:1\n\n# greeting\nNEWLINE\t1\tHi\n\n",
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_directive_accessors() {
        let d = Directive::new(["CONFIG", "TEXT", "NAME", "Bob"]);
        assert_eq!(d.name(), "CONFIG");
        assert_eq!(d.arg(0), Some("TEXT"));
        assert_eq!(d.arg(3), None);
        assert_eq!(d.args().len(), 3);
    }
}
