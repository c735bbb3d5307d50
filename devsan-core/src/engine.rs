// devsan-core/src/engine.rs
//! Defines the core SanitizationEngine trait and the result it produces.
//!
//! An engine owns an ordered rule list and the limits it runs under, and
//! turns raw text into a `SanitizationResult`. Sanitization is best-effort:
//! a rule that cannot be compiled or applied is recorded as a warning and the
//! remaining rules still run, so `sanitize` has no error path.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::config::{Rule, SafetyLimits};
use crate::errors::{CompileError, ReplaceError};

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Applies every rule, in order, to `content`. Each rule sees the output of
    /// the rules before it.
    fn sanitize(&self, content: &str) -> SanitizationResult;

    /// The ordered rules this engine applies.
    fn rules(&self) -> &[Rule];

    /// The limits each rule's replacement loop runs under.
    fn limits(&self) -> &SafetyLimits;
}

/// What happened to one rule during a `sanitize` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleStatus {
    /// Empty pattern or replacement; skipped silently.
    Inert,
    /// Applied and converged.
    Applied { passes: usize, replacements: usize },
    /// Rejected before any replacement ran.
    Skipped {
        #[serde(serialize_with = "serialize_display")]
        error: CompileError,
    },
    /// Aborted by a runtime guard; the rule's partial effect was discarded.
    Failed {
        #[serde(serialize_with = "serialize_display")]
        error: ReplaceError,
    },
}

/// Per-rule entry in a `SanitizationResult`, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub pattern: String,
    #[serde(flatten)]
    pub status: RuleStatus,
}

/// The sanitized text and any advisory warnings, produced fresh per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizationResult {
    pub output: String,
    /// One line per rule that did not run, in rule order. The pattern is not quoted:
    /// `Skipped invalid or unsafe pattern (<type>): <pattern>` for a rejected pattern,
    /// `Failed to apply pattern (<type>): <pattern>` for a tripped guard. The
    /// ` (<type>)` part is omitted when the rule has no type label. Use `reports`
    /// for structured access.
    pub warnings: Vec<String>,
    pub reports: Vec<RuleReport>,
}

impl SanitizationResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total matches replaced across all applied rules.
    pub fn total_replacements(&self) -> usize {
        self.reports
            .iter()
            .map(|report| match report.status {
                RuleStatus::Applied { replacements, .. } => replacements,
                _ => 0,
            })
            .sum()
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
