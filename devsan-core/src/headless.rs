// File: devsan-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot sanitization without building an engine by hand.

use anyhow::Result;

use crate::config::{Rule, RuleSet};
use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::engines::regex_engine::RegexEngine;

/// Applies `rules`, in order, to `content` under the default safety limits.
///
/// Never fails: rules that cannot be compiled or applied show up in
/// `SanitizationResult::warnings`.
pub fn sanitize(content: &str, rules: &[Rule]) -> SanitizationResult {
    RegexEngine::new(rules.to_vec()).sanitize(content)
}

/// Applies the built-in seed rules (email, API key, IPv4 address) to `content`.
///
/// Only fails if the embedded rule file cannot be parsed.
pub fn sanitize_with_defaults(content: &str) -> Result<SanitizationResult> {
    let defaults = RuleSet::load_default_rules()?;
    Ok(RegexEngine::from_rule_set(defaults).sanitize(content))
}
