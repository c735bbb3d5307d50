// File: devsan-core/src/validators.rs
//! Structural pre-checks for user-supplied regex patterns.
//!
//! This module holds a small denylist of pattern shapes that are known to
//! cause catastrophic matching behaviour. It is a heuristic filter applied to
//! the pattern *source* before compilation; it does not prove a pattern safe.
//! Anything it lets through is still bounded at runtime by the replacer's
//! iteration, time and output guards.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// A single character repeated this many times in a row is rejected.
pub const MAX_CHARACTER_RUN: usize = 10;

/// Counted repetition of a wildcard group or back-reference at or above this lower bound is rejected.
pub const MAX_WILDCARD_GROUP_REPEAT: u32 = 10;

/// The dangerous shapes recognised by [`detect_dangerous_shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DangerousShape {
    /// One character repeated 11+ times consecutively, e.g. `aaaaaaaaaaa`, or a
    /// back-reference with a large counted repetition, e.g. `(.)\1{10,}`.
    RepeatedCharacterRun,
    /// Three or more `+` quantifiers chained inside one parenthesised span, e.g. `(a+b+c+)`.
    ChainedQuantifiers,
    /// A greedy wildcard group with a large counted repetition, e.g. `(.*){10,}`.
    RepeatedWildcardGroup,
}

impl fmt::Display for DangerousShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DangerousShape::RepeatedCharacterRun => "excessive repetition of a single character",
            DangerousShape::ChainedQuantifiers => "nested quantifiers inside a group",
            DangerousShape::RepeatedWildcardGroup => "high repetition of a greedy wildcard group",
        };
        f.write_str(text)
    }
}

// `.` does not cross newlines here, so each line of the pattern is judged on its own.
static CHAINED_QUANTIFIERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((?:.*\+.*){3,}\)").expect("static regex: chained quantifiers"));

static REPEATED_WILDCARD_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((?:\?:)?\.[*+]\??\)\{(\d+)(?:,\d*)?\}")
        .expect("static regex: repeated wildcard group")
});

// A back-reference repeated `{n,...}` times spells out a character run of unbounded length.
static REPEATED_BACKREFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\\d+\{(\d+)(?:,\d*)?\}").expect("static regex: repeated back-reference")
});

/// True if any `{n,...}` captured by `shape` has a lower bound of at least `min`.
fn has_large_repeat(shape: &Regex, pattern: &str, min: u32) -> bool {
    shape.captures_iter(pattern).any(|caps| {
        caps.get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            // An unparseable bound overflowed u32 and is certainly large.
            .map_or(true, |bound| bound >= min)
    })
}

/// Returns the first denylisted shape found in `pattern`, if any.
pub fn detect_dangerous_shape(pattern: &str) -> Option<DangerousShape> {
    if has_long_character_run(pattern)
        || has_large_repeat(&REPEATED_BACKREFERENCE, pattern, MAX_WILDCARD_GROUP_REPEAT)
    {
        return Some(DangerousShape::RepeatedCharacterRun);
    }
    if CHAINED_QUANTIFIERS.is_match(pattern) {
        return Some(DangerousShape::ChainedQuantifiers);
    }
    if has_large_repeat(&REPEATED_WILDCARD_GROUP, pattern, MAX_WILDCARD_GROUP_REPEAT) {
        return Some(DangerousShape::RepeatedWildcardGroup);
    }
    None
}

/// Returns `true` when `pattern` matches none of the denylisted shapes.
pub fn is_safe(pattern: &str) -> bool {
    detect_dangerous_shape(pattern).is_none()
}

/// Back-references are not expressible in the linear-time regex engine, so the
/// `(.)\1{10,}` shape is detected with a plain run-length scan.
fn has_long_character_run(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    let Some(mut previous) = chars.next() else { return false; };
    let mut run = 1usize;

    for c in chars {
        if c == previous {
            run += 1;
            if run > MAX_CHARACTER_RUN {
                return true;
            }
        } else {
            previous = c;
            run = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_patterns_are_safe() {
        assert!(is_safe(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"));
        assert!(is_safe(r"[A-Za-z0-9]{32}"));
        assert!(is_safe(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b"));
    }

    #[test]
    fn test_character_run_threshold() {
        assert!(is_safe("aaaaaaaaaa")); // 10
        assert_eq!(
            detect_dangerous_shape("aaaaaaaaaaa"), // 11
            Some(DangerousShape::RepeatedCharacterRun)
        );
        assert_eq!(
            detect_dangerous_shape(r"x\1\1\1\1\1\1\1\1\1\1\1"),
            None,
            "alternating characters are not a single-character run"
        );
        assert_eq!(
            detect_dangerous_shape("(a)))))))))))))"),
            Some(DangerousShape::RepeatedCharacterRun)
        );
    }

    #[test]
    fn test_chained_quantifiers() {
        assert_eq!(detect_dangerous_shape("(a+b+c+)"), Some(DangerousShape::ChainedQuantifiers));
        assert_eq!(detect_dangerous_shape(r"(\w+\s+\d+)x"), Some(DangerousShape::ChainedQuantifiers));
        assert!(is_safe("(a+b+)"));
        assert!(is_safe("a+b+c+"), "no enclosing group");
    }

    #[test]
    fn test_repeated_wildcard_group() {
        assert_eq!(detect_dangerous_shape("(.*){10,}"), Some(DangerousShape::RepeatedWildcardGroup));
        assert_eq!(detect_dangerous_shape("(?:.+){12}"), Some(DangerousShape::RepeatedWildcardGroup));
        assert_eq!(detect_dangerous_shape("x(.*?){25,30}"), Some(DangerousShape::RepeatedWildcardGroup));
        assert!(is_safe("(.*){9}"));
        assert!(is_safe("(.*)"));
        assert!(is_safe(r"(\d){10,}"));
    }

    #[test]
    fn test_repeated_backreference() {
        assert_eq!(detect_dangerous_shape(r"(.)\1{10,}"), Some(DangerousShape::RepeatedCharacterRun));
        assert_eq!(detect_dangerous_shape(r"(a)(b)\2{40}"), Some(DangerousShape::RepeatedCharacterRun));
        assert_eq!(detect_dangerous_shape(r"(.)\1{9}"), None);
        assert_eq!(detect_dangerous_shape(r"(.)\1"), None);
        assert!(is_safe(r"\d{10,}"));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(
            DangerousShape::RepeatedCharacterRun.to_string(),
            "excessive repetition of a single character"
        );
    }
}
