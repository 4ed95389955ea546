//! OptionList - option token cursor shared by sinks and host components
//!
//! Options are consumed in place: reading `-name value` or a `-flag` blanks the
//! tokens it used, so whatever is still non-empty afterwards was not understood
//! by anyone.

use crate::ContractError;

/// Describes one option a component understands (for display surfaces)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Option name without the leading dash
    pub name: &'static str,
    /// Usage line, e.g. `-output-file <file>`
    pub synopsis: &'static str,
    pub description: &'static str,
    /// Whether the option is followed by a value token
    pub takes_value: bool,
}

/// Mutable list of option tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    tokens: Vec<String>,
}

impl OptionList {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Remove `-name value` and return the value
    ///
    /// Returns `Ok(None)` when the option is absent.
    ///
    /// # Errors
    /// `MissingOptionValue` when `-name` is the last token.
    pub fn take_value(&mut self, name: &str) -> Result<Option<String>, ContractError> {
        let Some(pos) = self.position(name) else {
            return Ok(None);
        };
        if pos + 1 >= self.tokens.len() {
            return Err(ContractError::MissingOptionValue {
                option: name.to_string(),
            });
        }
        self.tokens[pos].clear();
        Ok(Some(std::mem::take(&mut self.tokens[pos + 1])))
    }

    /// Remove `-name` and report whether it was present
    pub fn take_flag(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(pos) => {
                self.tokens[pos].clear();
                true
            }
            None => false,
        }
    }

    /// Tokens not consumed so far
    pub fn remaining(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect()
    }

    pub fn is_consumed(&self) -> bool {
        self.tokens.iter().all(String::is_empty)
    }

    /// Fail if any token is left
    ///
    /// # Errors
    /// `UnsupportedOption` listing the left-over tokens.
    pub fn ensure_consumed(&self) -> Result<(), ContractError> {
        if self.is_consumed() {
            Ok(())
        } else {
            Err(ContractError::UnsupportedOption {
                options: self.remaining(),
            })
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| t.strip_prefix('-') == Some(name))
    }
}

impl From<Vec<String>> for OptionList {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> FromIterator<&'a str> for OptionList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_string).collect())
    }
}
