//! Configuration management for `devsan-core`.
//!
//! This module defines the redaction `Rule`, the `SafetyLimits` that bound
//! every replacement loop, and the `RuleSet` container that is loaded from
//! YAML or JSON rule files. Rule order is significant everywhere in this
//! module: nothing here sorts or deduplicates rules.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Maximum number of substitution passes for a single rule.
pub const MAX_ITERATIONS: usize = 100_000;

/// Wall-clock budget for a single rule's replacement loop, in milliseconds.
pub const MAX_TIME_MS: u64 = 5_000;

/// A pass may grow the working string to at most this multiple of the input length...
pub const MAX_GROWTH_FACTOR: usize = 64;

/// ...but never below this many bytes.
pub const MIN_OUTPUT_CEILING: usize = 1 << 20;

/// A single redaction instruction.
///
/// A rule whose `pattern` or `replacement` is empty is inert and is skipped
/// without a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct Rule {
    /// Free-form label (e.g. "email"). Not unique, may be empty.
    #[serde(rename = "type")]
    pub rule_type: String,
    /// The regex pattern source.
    pub pattern: String,
    /// Replacement text. Supports `$1` / `${name}` capture expansion.
    pub replacement: String,
}

impl Rule {
    pub fn new(
        rule_type: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            rule_type: rule_type.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.pattern.is_empty() || self.replacement.is_empty()
    }

    /// The ` (<type>)` clause used in warnings, empty when the rule has no label.
    pub(crate) fn label_clause(&self) -> String {
        if self.rule_type.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.rule_type)
        }
    }
}

/// Runtime bounds for the replacement loop of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SafetyLimits {
    pub max_iterations: usize,
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
    pub max_growth_factor: usize,
    pub min_output_ceiling: usize,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            timeout: Duration::from_millis(MAX_TIME_MS),
            max_growth_factor: MAX_GROWTH_FACTOR,
            min_output_ceiling: MIN_OUTPUT_CEILING,
        }
    }
}

impl SafetyLimits {
    /// The largest working string a rule may produce for an input of `input_len` bytes.
    pub fn output_ceiling(&self, input_len: usize) -> usize {
        input_len
            .saturating_mul(self.max_growth_factor)
            .max(self.min_output_ceiling)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis().try_into().unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// An ordered rule list plus the limits it should run under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSet {
    #[serde(default)]
    pub limits: SafetyLimits,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Rule files may hold either a bare list of rules or a full `RuleSet` mapping.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleFile {
    List(Vec<Rule>),
    Set(RuleSet),
}

impl From<RuleFile> for RuleSet {
    fn from(file: RuleFile) -> Self {
        match file {
            RuleFile::List(rules) => RuleSet { limits: SafetyLimits::default(), rules },
            RuleFile::Set(set) => set,
        }
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { limits: SafetyLimits::default(), rules }
    }

    /// Loads rules from a YAML or JSON file, chosen by extension.
    /// Files without a `.json` extension are parsed as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let set = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        info!("Loaded {} rules from file {}.", set.rules.len(), path.display());
        Ok(set)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: RuleFile = serde_yml::from_str(text).context("Invalid YAML rule list")?;
        Ok(file.into())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: RuleFile = serde_json::from_str(text).context("Invalid JSON rule list")?;
        Ok(file.into())
    }

    /// Loads the built-in seed rules: email, API key and IPv4 address.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let set = Self::from_yaml_str(default_yaml).context("Failed to parse default rules")?;
        debug!("Loaded {} default rules.", set.rules.len());
        Ok(set)
    }

    /// Filters rules by type label. Every rule whose label is in `disable_types`
    /// is dropped; if `enable_types` is non-empty only rules with a listed label survive.
    pub fn set_active_rules(&mut self, enable_types: &[String], disable_types: &[String]) {
        let enable_set: HashSet<&str> = enable_types.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_types.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_types: HashSet<&str> = self.rules.iter().map(|r| r.rule_type.as_str()).collect();
        for rule_type in enable_set.difference(&all_types) {
            warn!("Rule type '{}' in enable list matches no rule.", rule_type);
        }
        for rule_type in disable_set.difference(&all_types) {
            warn!("Rule type '{}' in disable list matches no rule.", rule_type);
        }

        self.rules.retain(|rule| {
            let rule_type = rule.rule_type.as_str();
            !disable_set.contains(rule_type) && (enable_set.is_empty() || enable_set.contains(rule_type))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Appends user rules after the defaults. Labels are not unique, so nothing is
/// replaced or deduplicated; the user's limits win when a user set is given.
pub fn merge_rules(default_set: RuleSet, user_set: Option<RuleSet>) -> RuleSet {
    debug!("merge_rules called. Initial default rules count: {}", default_set.rules.len());

    let Some(user_set) = user_set else {
        return default_set;
    };

    debug!("User rules provided. Appending {} user rules.", user_set.rules.len());
    let mut rules = default_set.rules;
    rules.extend(user_set.rules);

    debug!("Final total rules after merge: {}", rules.len());
    RuleSet { limits: user_set.limits, rules }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_clause() {
        assert_eq!(Rule::new("email", "x", "y").label_clause(), " (email)");
        assert_eq!(Rule::new("", "x", "y").label_clause(), "");
    }

    #[test]
    fn test_inert_rules() {
        assert!(Rule::new("t", "", "[REDACTED]").is_inert());
        assert!(Rule::new("t", "abc", "").is_inert());
        assert!(!Rule::new("", "abc", "x").is_inert());
    }

    #[test]
    fn test_output_ceiling() {
        let limits = SafetyLimits::default();
        assert_eq!(limits.output_ceiling(10), MIN_OUTPUT_CEILING);
        assert_eq!(limits.output_ceiling(1 << 20), (1 << 20) * MAX_GROWTH_FACTOR);
        assert_eq!(limits.output_ceiling(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_bare_list_and_mapping_forms() -> Result<()> {
        let list = RuleSet::from_yaml_str("- type: t\n  pattern: a\n  replacement: b\n")?;
        assert_eq!(list.rules, vec![Rule::new("t", "a", "b")]);
        assert_eq!(list.limits, SafetyLimits::default());

        let set = RuleSet::from_json_str(
            r#"{"limits": {"max_iterations": 7, "timeout_ms": 250}, "rules": [{"pattern": "a", "replacement": "b"}]}"#,
        )?;
        assert_eq!(set.limits.max_iterations, 7);
        assert_eq!(set.limits.timeout, Duration::from_millis(250));
        assert_eq!(set.limits.max_growth_factor, MAX_GROWTH_FACTOR);
        assert_eq!(set.rules[0].rule_type, "");
        Ok(())
    }
}
