//! Label variables and `${name}` substitution.
//!
//! The table is seeded from caller overrides (`-D KEY=VALUE`) and then from
//! `CONFIG` defaults. A value, once set, is never replaced for the rest of
//! the run.

use std::collections::BTreeMap;

use crate::error::LabelError;

/// Variable name to value mapping for one interpretation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `KEY=VALUE` strings as given on the command line.
    ///
    /// Only the first `=` separates key from value, so values may contain `=`.
    pub fn from_defines<I, S>(defines: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut variables = Self::new();
        for define in defines {
            let define = define.as_ref();
            let (key, value) = define
                .split_once('=')
                .ok_or_else(|| LabelError::MalformedDefine(define.to_string()))?;
            variables.set(key, value);
        }
        Ok(variables)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set a variable, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set a variable only if it has no value yet.
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) {
        if !self.contains(name) {
            self.values.insert(name.to_string(), value.into());
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `${name}` in `text` with the variable's value.
    ///
    /// The first reference is replaced and the scan restarts from the start
    /// of the rebuilt text, so references produced by a value are resolved
    /// too. A `${` with no closing `}` after it is left as literal text.
    /// The first reference to an unset variable fails the whole substitution,
    /// as does exceeding [`MAX_SUBSTITUTIONS`] replacements.
    pub fn substitute(&self, text: &str) -> Result<String, LabelError> {
        let mut out = text.to_string();

        for _ in 0..MAX_SUBSTITUTIONS {
            let Some((start, end, name)) = first_reference(&out) else {
                return Ok(out);
            };
            let value = self
                .get(name)
                .ok_or_else(|| LabelError::UnknownVariable(name.to_string()))?;
            out.replace_range(start..end, value);
        }

        match first_reference(&out) {
            None => Ok(out),
            Some(_) => Err(LabelError::SubstitutionLimit(text.to_string())),
        }
    }
}

/// Replacements allowed per substitution; guards self-referencing values.
pub const MAX_SUBSTITUTIONS: usize = 1024;

/// Byte range and name of the first complete `${name}` in `text`.
fn first_reference(text: &str) -> Option<(usize, usize, &str)> {
    let open = text.find("${")?;
    let close = open + 2 + text[open + 2..].find('}')?;
    Some((open, close + 1, &text[open + 2..close]))
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
