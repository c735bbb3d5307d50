//! errors.rs - Error types for the devsan-core library.
//!
//! Rule failures never escape the engine: they are captured per rule and
//! surfaced as warnings on the `SanitizationResult`. These enums carry the
//! detail behind each warning so callers can inspect it programmatically.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::validators::DangerousShape;

/// Why a pattern could not be turned into a `Matcher`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// The pattern source matched one of the denylisted ReDoS shapes.
    /// No compilation was attempted.
    #[error("Pattern '{pattern}' contains a dangerous construct: {shape}")]
    UnsafePattern { pattern: String, shape: DangerousShape },

    /// The pattern source is not a valid regular expression.
    #[error("Pattern '{pattern}' is not a valid regular expression: {message}")]
    InvalidSyntax { pattern: String, message: String },
}

/// Why the bounded replacement loop gave up on a rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplaceError {
    #[error("Possible ReDoS, replacement aborted: {0}")]
    ReDoSSuspected(GuardTrip),
}

/// The runtime guard that stopped a replacement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardTrip {
    /// More passes were needed than the iteration cap allows.
    IterationLimit { passes: usize },
    /// The wall-clock budget for the rule ran out.
    Timeout { elapsed: Duration },
    /// A pass grew the working string past the output ceiling.
    OutputLimit { len: usize, ceiling: usize },
}

impl fmt::Display for GuardTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardTrip::IterationLimit { passes } => {
                write!(f, "maximum iteration limit exceeded after {} passes", passes)
            }
            GuardTrip::Timeout { elapsed } => {
                write!(f, "regex execution timeout after {} ms", elapsed.as_millis())
            }
            GuardTrip::OutputLimit { len, ceiling } => {
                write!(f, "output grew to {} bytes, ceiling is {} bytes", len, ceiling)
            }
        }
    }
}
