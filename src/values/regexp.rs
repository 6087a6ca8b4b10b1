//! RegExp values
//!
//! A regexp node stores its source pattern and flag string. Construction
//! validates both; clone and freeze copy the strings without re-validating.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Recognized flag letters, in canonical order
const KNOWN_FLAGS: &str = "dgimsuvy";

/// A pattern + flags container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegExpValue {
    source: String,
    flags: String,
}

impl RegExpValue {
    /// Create a regexp, validating the flag string and compiling the pattern.
    ///
    /// Patterns outside the `regex` crate's dialect (backreferences,
    /// lookaround) are rejected at construction.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let flags = flags.into();

        validate_flags(&flags)?;

        RegexBuilder::new(&source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| Error::InvalidPattern {
                message: e.to_string(),
            })?;

        Ok(Self { source, flags })
    }

    /// Copy an already-validated regexp. Used by the clone and freeze
    /// engines, which must be total.
    pub(crate) fn copied(&self) -> Self {
        self.clone()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Whether source and flags match as strings (not behavior)
    pub fn same_pattern(&self, other: &RegExpValue) -> bool {
        self.source == other.source && self.flags == other.flags
    }

    /// Test a string against the pattern
    pub fn is_match(&self, text: &str) -> bool {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.flags.contains('i'))
            .multi_line(self.flags.contains('m'))
            .dot_matches_new_line(self.flags.contains('s'))
            .build()
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for RegExpValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

fn validate_flags(flags: &str) -> Result<()> {
    let mut seen = Vec::new();
    for c in flags.chars() {
        if !KNOWN_FLAGS.contains(c) {
            return Err(Error::InvalidFlags {
                flags: flags.to_string(),
                message: format!("unknown flag '{}'", c),
            });
        }
        if seen.contains(&c) {
            return Err(Error::InvalidFlags {
                flags: flags.to_string(),
                message: format!("duplicate flag '{}'", c),
            });
        }
        seen.push(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pattern_and_flags() {
        let re = RegExpValue::new("ab+c", "gi").unwrap();
        assert_eq!(re.source(), "ab+c");
        assert_eq!(re.flags(), "gi");
        assert_eq!(re.to_string(), "/ab+c/gi");
        assert!(re.is_match("ABBC"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = RegExpValue::new("a", "gx").unwrap_err();
        assert!(matches!(err, Error::InvalidFlags { .. }));
    }

    #[test]
    fn test_duplicate_flag_rejected() {
        let err = RegExpValue::new("a", "gg").unwrap_err();
        assert!(matches!(err, Error::InvalidFlags { .. }));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let err = RegExpValue::new("(unclosed", "").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_same_pattern_compares_strings() {
        let a = RegExpValue::new("x+", "i").unwrap();
        let b = RegExpValue::new("x+", "i").unwrap();
        let c = RegExpValue::new("x+", "g").unwrap();
        assert!(a.same_pattern(&b));
        assert!(!a.same_pattern(&c));
    }
}
