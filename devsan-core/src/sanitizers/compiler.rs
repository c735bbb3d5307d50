//! compiler.rs - Turns a validated pattern source into a `Matcher`.
//!
//! Compilation runs the structural denylist first and only then hands the
//! pattern to `RegexBuilder`. The `regex` crate guarantees linear-time
//! matching, so one pass can never backtrack catastrophically; the size
//! limits below keep a huge pattern from exhausting memory at build time.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::CompileError;
use crate::validators;

/// Upper bound on the compiled program size (10 MB).
pub const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Upper bound on the lazy DFA cache (2 MB).
pub const REGEX_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// How many matches a single substitution pass replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every non-overlapping match, and the replacer loops to a fixed point.
    Global,
    /// Only the leftmost match, in a single pass.
    First,
}

/// An immutable compiled pattern, reusable across any number of inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    mode: MatchMode,
}

impl Matcher {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_global(&self) -> bool {
        self.mode == MatchMode::Global
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compiles `pattern` for global matching.
pub fn compile(pattern: &str) -> Result<Matcher, CompileError> {
    compile_with_mode(pattern, MatchMode::Global)
}

/// Validates then compiles `pattern`. A rejected pattern is never handed to the regex builder.
pub fn compile_with_mode(pattern: &str, mode: MatchMode) -> Result<Matcher, CompileError> {
    if let Some(shape) = validators::detect_dangerous_shape(pattern) {
        debug!("Pattern '{}' rejected before compilation: {}", pattern, shape);
        return Err(CompileError::UnsafePattern {
            pattern: pattern.to_string(),
            shape,
        });
    }

    let regex = RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_DFA_SIZE_LIMIT)
        .build()
        .map_err(|e| CompileError::InvalidSyntax {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    log::debug!(
        target: "devsan_core::sanitizer",
        "Pattern '{}' compiled successfully.",
        pattern
    );
    Ok(Matcher { regex, mode })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::DangerousShape;

    #[test]
    fn test_compile_is_global() {
        let matcher = compile(r"\d+").unwrap();
        assert!(matcher.is_global());
        assert_eq!(matcher.as_str(), r"\d+");
        assert_eq!(matcher.regex().find_iter("1 22 333").count(), 3);
    }

    #[test]
    fn test_matcher_is_reusable() {
        let matcher = compile("cat").unwrap();
        assert!(matcher.regex().is_match("a cat"));
        assert!(!matcher.regex().is_match("a dog"));
        assert!(matcher.regex().is_match("cats"));
    }

    #[test]
    fn test_unsafe_pattern_is_not_compiled() {
        let err = compile("(.*){10,}").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnsafePattern {
                pattern: "(.*){10,}".to_string(),
                shape: DangerousShape::RepeatedWildcardGroup,
            }
        );
    }

    #[test]
    fn test_invalid_syntax_carries_message() {
        match compile("(abc") {
            Err(CompileError::InvalidSyntax { pattern, message }) => {
                assert_eq!(pattern, "(abc");
                assert!(message.contains("unclosed group"), "unexpected message: {}", message);
            }
            other => panic!("expected InvalidSyntax, got {:?}", other),
        }
    }

    #[test]
    fn test_backreference_is_invalid_syntax() {
        assert!(matches!(
            compile(r"(a)\1"),
            Err(CompileError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_first_mode() {
        let matcher = compile_with_mode("a", MatchMode::First).unwrap();
        assert!(!matcher.is_global());
        assert_eq!(matcher.mode(), MatchMode::First);
    }
}
