//! `rules` command: print the effective rule list in application order.

use anyhow::{Context, Result};
use std::io::{self, Write};

use devsan_core::Rule;

use super::{load_rule_set, Outcome};
use crate::cli::RulesCommand;

pub fn run_rules(cmd: &RulesCommand) -> Result<Outcome> {
    let set = load_rule_set(&cmd.source)?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &set).context("Failed to serialize rules")?;
        writeln!(writer)?;
    } else {
        write_rule_table(&set.rules, &mut writer)?;
    }
    writer.flush()?;
    Ok(Outcome::Success)
}

pub fn write_rule_table<W: Write>(rules: &[Rule], writer: &mut W) -> io::Result<()> {
    if rules.is_empty() {
        return writeln!(writer, "No rules configured.");
    }
    for (index, rule) in rules.iter().enumerate() {
        let label = if rule.rule_type.is_empty() { "-" } else { rule.rule_type.as_str() };
        let inert = if rule.is_inert() { "  (inert)" } else { "" };
        writeln!(
            writer,
            "{:>3}. {:<12} {}  ->  {}{}",
            index + 1,
            label,
            rule.pattern,
            rule.replacement,
            inert
        )?;
    }
    Ok(())
}
