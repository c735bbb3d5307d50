//! `sanitize` command: read text, apply the rule list, write the result.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use devsan_core::{RegexEngine, SanitizationEngine, SanitizationResult};

use super::{load_rule_set, Outcome};
use crate::cli::SanitizeCommand;
use crate::ui::{diff_viewer, output_format};
use crate::utils::clipboard::copy_to_clipboard;

/// Helper for printing info messages to stderr, unless `quiet`.
pub fn info_msg(msg: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool) -> Result<Outcome> {
    info!("Starting sanitize operation.");

    let mut set = load_rule_set(&cmd.source)?;
    if let Some(max_iterations) = cmd.max_iterations {
        set.limits.max_iterations = max_iterations;
    }
    if let Some(timeout_ms) = cmd.timeout_ms {
        set.limits.timeout = Duration::from_millis(timeout_ms);
    }

    let input = read_input(cmd.input_file.as_deref())?;
    let engine = RegexEngine::from_rule_set(set);
    let result = engine.sanitize(&input);

    debug!(
        "Content sanitized. Original length: {}, Sanitized length: {}",
        input.len(),
        result.output.len()
    );

    handle_primary_output(cmd, &input, &result, quiet)?;

    if cmd.clipboard {
        match copy_to_clipboard(&result.output) {
            Ok(()) => info_msg("Sanitized content copied to clipboard.", quiet),
            Err(e) => warn_msg(format!("Failed to copy to clipboard: {:#}", e)),
        }
    }

    for warning in &result.warnings {
        warn_msg(warning);
    }
    info_msg(
        format!(
            "{} replacement(s) across {} rule(s).",
            result.total_replacements(),
            engine.rules().len()
        ),
        quiet,
    );

    info!("Sanitize operation completed.");
    Ok(if result.has_warnings() { Outcome::Warnings } else { Outcome::Success })
}

/// Reads the whole input as text. Invalid UTF-8 is replaced rather than rejected.
fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            debug!("Reading input from stdin...");
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn handle_primary_output(
    cmd: &SanitizeCommand,
    input: &str,
    result: &SanitizationResult,
    quiet: bool,
) -> Result<()> {
    if let Some(path) = &cmd.output {
        info_msg(format!("Writing sanitized content to file: {}", path.display()), quiet);
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        write_result(cmd, input, result, &mut file, false)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        write_result(cmd, input, result, &mut writer, supports_color)
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn write_result<W: Write>(
    cmd: &SanitizeCommand,
    input: &str,
    result: &SanitizationResult,
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    if cmd.json {
        serde_json::to_writer_pretty(&mut *writer, result).context("Failed to serialize result")?;
        writeln!(writer)?;
    } else if cmd.diff {
        diff_viewer::print_diff(input, &result.output, writer, supports_color)?;
    } else {
        writer.write_all(result.output.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
