//! `check` command: run patterns through the validator and compiler only.

use anyhow::Result;
use std::io::{self, Write};

use devsan_core::{compile, CompileError};

use super::Outcome;
use crate::cli::CheckCommand;

pub fn run_check(cmd: &CheckCommand) -> Result<Outcome> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let outcome = check_patterns(&cmd.patterns, &mut writer)?;
    writer.flush()?;
    Ok(outcome)
}

/// Writes one verdict line per pattern: `ok`, `unsafe` or `invalid`.
pub fn check_patterns<W: Write>(patterns: &[String], writer: &mut W) -> Result<Outcome> {
    let mut outcome = Outcome::Success;
    for pattern in patterns {
        match compile(pattern) {
            Ok(_) => writeln!(writer, "ok       {}", pattern)?,
            Err(CompileError::UnsafePattern { shape, .. }) => {
                outcome = Outcome::Warnings;
                writeln!(writer, "unsafe   {}  ({})", pattern, shape)?;
            }
            Err(CompileError::InvalidSyntax { message, .. }) => {
                outcome = Outcome::Warnings;
                // regex errors echo the pattern with a caret; the last line is the reason.
                let reason = message.lines().last().unwrap_or_default().trim();
                writeln!(writer, "invalid  {}  ({})", pattern, reason)?;
            }
            Err(e) => {
                outcome = Outcome::Warnings;
                writeln!(writer, "invalid  {}  ({})", pattern, e)?;
            }
        }
    }
    Ok(outcome)
}
