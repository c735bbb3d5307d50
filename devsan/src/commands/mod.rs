// devsan/src/commands/mod.rs
//! Command implementations for the devsan CLI.

pub mod check;
pub mod rules;
pub mod sanitize;

use anyhow::Result;
use devsan_core::{merge_rules, RuleSet};
use log::debug;
use std::process::ExitCode;

use crate::cli::RuleSource;

/// How a command finished when it did not hit a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything ran cleanly.
    Success,
    /// Output was produced, but at least one rule or pattern was rejected.
    Warnings,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Warnings => ExitCode::from(2),
        }
    }
}

/// Builds the ordered rule list: defaults first (unless disabled), then the
/// rules file, then the type filters.
pub fn load_rule_set(source: &RuleSource) -> Result<RuleSet> {
    let defaults = if source.no_defaults {
        RuleSet::default()
    } else {
        RuleSet::load_default_rules()?
    };
    let user = source
        .rules_file
        .as_deref()
        .map(RuleSet::load_from_file)
        .transpose()?;

    let mut set = merge_rules(defaults, user);
    if !source.enable.is_empty() || !source.disable.is_empty() {
        set.set_active_rules(&source.enable, &source.disable);
    }
    debug!("Effective rule list has {} rule(s).", set.rules.len());
    Ok(set)
}
