// devsan-core/src/lib.rs
//! # devsan Core Library
//!
//! `devsan-core` redacts sensitive substrings (emails, API keys, IP addresses,
//! user-defined patterns) from text by applying an ordered list of
//! pattern/replacement rules. User-supplied patterns are untrusted, so every
//! rule goes through three stages:
//!
//! * `validators`: a structural denylist that rejects known ReDoS shapes.
//! * `sanitizers::compiler`: builds an immutable, global `Matcher`.
//! * `sanitizers::replacer`: re-applies the matcher until a fixed point under
//!   iteration, wall-clock and output-size guards.
//!
//! `engines::regex_engine::RegexEngine` drives the rules in order and collects
//! one warning per rule that was skipped or failed. Failures are local:
//! sanitization always returns a result.
//!
//! ## Usage Example
//!
//! ```rust
//! use devsan_core::{sanitize, Rule};
//!
//! let rules = vec![
//!     Rule::new("a", "a", "X"),
//!     Rule::new("x", "X", "Y"),
//! ];
//! let result = sanitize("banana", &rules);
//! assert_eq!(result.output, "bYnYnY");
//! assert!(result.warnings.is_empty());
//! ```
//!
//! ## Error Handling
//!
//! Per-rule problems are reported as `CompileError` / `ReplaceError` inside
//! `RuleReport`s and as plain-text warnings. Only rule-file loading returns
//! `anyhow::Error`.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod sanitizers;
pub mod validators;

/// Re-exports the rule configuration types.
pub use config::{merge_rules, Rule, RuleSet, SafetyLimits, MAX_ITERATIONS, MAX_TIME_MS};

/// Re-exports the error types carried by rule reports.
pub use errors::{CompileError, GuardTrip, ReplaceError};

/// Re-exports the engine trait and its result types.
pub use engine::{RuleReport, RuleStatus, SanitizationEngine, SanitizationResult};

/// Re-exports the concrete regex engine.
pub use engines::regex_engine::RegexEngine;

/// Re-exports the one-shot entry points.
pub use headless::{sanitize, sanitize_with_defaults};

/// Re-exports the pattern pipeline for callers that want a single stage.
pub use sanitizers::compiler::{compile, compile_with_mode, MatchMode, Matcher};
pub use sanitizers::replacer::{apply, apply_with_limits, Replaced};
pub use validators::{detect_dangerous_shape, is_safe, DangerousShape};
