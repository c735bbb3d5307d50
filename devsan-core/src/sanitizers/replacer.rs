//! replacer.rs - Bounded, repeat-until-fixed-point substitution.
//!
//! A global matcher is applied to its own output again and again until a
//! pass leaves the string unchanged. This is deliberate: a rule like
//! `aa` -> `a` collapses `aaaa` all the way to `a`, not just to `aa`. The
//! flip side is that a replacement which re-creates its own match never
//! converges, so every loop runs under three guards:
//!
//! * the iteration cap, checked before each pass,
//! * the wall-clock budget, measured from the first pass and checked before each pass,
//! * the output ceiling, checked while a pass is being built.
//!
//! Guards only stop *further* work. A single pass is never interrupted midway
//! by the clock.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::time::Instant;

use log::{debug, trace};
use regex::{Captures, Regex};

use crate::config::SafetyLimits;
use crate::errors::{GuardTrip, ReplaceError};
use crate::sanitizers::compiler::{MatchMode, Matcher};

/// The converged string and some bookkeeping about how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub output: String,
    /// Passes run, including the final pass that confirmed the fixed point.
    pub passes: usize,
    /// Matches replaced by the passes that changed the string.
    pub replacements: usize,
}

/// Applies `matcher` to `content` under the default safety limits.
pub fn apply(content: &str, matcher: &Matcher, replacement: &str) -> Result<String, ReplaceError> {
    apply_with_limits(content, matcher, replacement, &SafetyLimits::default()).map(|r| r.output)
}

/// Applies `matcher` to `content` until a fixed point (global mode) or once
/// (first-match mode). On error the caller's `content` is untouched and no
/// partial result is returned.
pub fn apply_with_limits(
    content: &str,
    matcher: &Matcher,
    replacement: &str,
    limits: &SafetyLimits,
) -> Result<Replaced, ReplaceError> {
    let started = Instant::now();
    let ceiling = limits.output_ceiling(content.len());
    let mut current = content.to_string();
    let mut passes = 0usize;
    let mut replacements = 0usize;

    loop {
        passes += 1;
        if passes > limits.max_iterations {
            debug!("Pattern '{}' hit the iteration cap.", matcher.as_str());
            return Err(ReplaceError::ReDoSSuspected(GuardTrip::IterationLimit {
                passes: limits.max_iterations,
            }));
        }
        let elapsed = started.elapsed();
        if elapsed > limits.timeout {
            debug!("Pattern '{}' ran out of time after {} passes.", matcher.as_str(), passes - 1);
            return Err(ReplaceError::ReDoSSuspected(GuardTrip::Timeout { elapsed }));
        }

        let (next, count) =
            substitute_pass(matcher, &current, replacement, ceiling).map_err(ReplaceError::ReDoSSuspected)?;
        let next = match next {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => next,
        };
        if next == current {
            break;
        }
        trace!("Pass {} replaced {} match(es).", passes, count);
        replacements += count;
        current = next;

        if !matcher.is_global() {
            break;
        }
    }

    Ok(Replaced { output: current, passes, replacements })
}

/// One left-to-right substitution over `haystack`. Borrows when nothing matched.
fn substitute_pass<'h>(
    matcher: &Matcher,
    haystack: &'h str,
    replacement: &str,
    ceiling: usize,
) -> Result<(Cow<'h, str>, usize), GuardTrip> {
    let limit = match matcher.mode() {
        MatchMode::Global => usize::MAX,
        MatchMode::First => 1,
    };
    let regex = matcher.regex();
    if !regex.is_match(haystack) {
        return Ok((Cow::Borrowed(haystack), 0));
    }

    let mut out = String::with_capacity(haystack.len());
    let mut last_end = 0usize;
    let mut count = 0usize;

    if replacement.contains('$') {
        for caps in regex.captures_iter(haystack).take(limit) {
            let Some(m) = caps.get(0) else { continue; };
            out.push_str(&haystack[last_end..m.start()]);
            expand_replacement(regex, &caps, replacement, &mut out);
            last_end = m.end();
            count += 1;
            check_ceiling(out.len(), ceiling)?;
        }
    } else {
        for m in regex.find_iter(haystack).take(limit) {
            out.push_str(&haystack[last_end..m.start()]);
            out.push_str(replacement);
            last_end = m.end();
            count += 1;
            check_ceiling(out.len(), ceiling)?;
        }
    }
    out.push_str(&haystack[last_end..]);
    check_ceiling(out.len(), ceiling)?;

    Ok((Cow::Owned(out), count))
}

/// Appends `replacement` to `out`, expanding `$n`, `${n}`, `$name`, `${name}`
/// and `$$`. A reference to a group the pattern does not define is copied
/// through literally, so `password=$REDACTED` stays as written. A bare `$n`
/// takes only the digits, so `$1st` is group 1 followed by `st`.
fn expand_replacement(regex: &Regex, caps: &Captures<'_>, replacement: &str, out: &mut String) {
    let mut rest = replacement;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let after = &rest[1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        // `consumed` counts the leading `$`; zero means no reference was found.
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 3),
                None => ("", 0),
            }
        } else if after.starts_with(|c: char| c.is_ascii_digit()) {
            let end = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
            (&after[..end], end + 1)
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end + 1)
        };

        match group_text(regex, caps, name) {
            Some(text) if consumed > 0 => {
                out.push_str(text);
                rest = &rest[consumed..];
            }
            _ => {
                out.push('$');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

/// Text of the group `name` refers to, or `None` if the pattern has no such group.
/// A defined group that did not participate in the match yields `""`.
fn group_text<'h>(regex: &Regex, caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    if name.is_empty() {
        return None;
    }
    if let Ok(index) = name.parse::<usize>() {
        return (index < regex.captures_len()).then(|| caps.get(index).map_or("", |m| m.as_str()));
    }
    if regex.capture_names().flatten().any(|defined| defined == name) {
        return Some(caps.name(name).map_or("", |m| m.as_str()));
    }
    None
}

fn check_ceiling(len: usize, ceiling: usize) -> Result<(), GuardTrip> {
    if len > ceiling {
        Err(GuardTrip::OutputLimit { len, ceiling })
    } else {
        Ok(())
    }
}
