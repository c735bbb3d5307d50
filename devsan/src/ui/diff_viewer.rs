// devsan/src/ui/diff_viewer.rs
//! Unified diff of original vs. sanitized text, for previewing redactions.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes the changed lines between `original` and `sanitized`, removed lines
/// prefixed with `-` (red) and added lines with `+` (green).
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    if patch.hunks().is_empty() {
        return writeln!(writer, "No changes detected.");
    }

    writeln!(writer, "--- original")?;
    writeln!(writer, "+++ sanitized")?;
    for hunk in patch.hunks() {
        writeln!(writer, "@@")?;
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    let s = s.trim_end_matches('\n');
                    if supports_color {
                        writeln!(writer, "{}", format!("-{}", s).red())?;
                    } else {
                        writeln!(writer, "-{}", s)?;
                    }
                }
                DiffLine::Insert(s) => {
                    let s = s.trim_end_matches('\n');
                    if supports_color {
                        writeln!(writer, "{}", format!("+{}", s).green())?;
                    } else {
                        writeln!(writer, "+{}", s)?;
                    }
                }
                DiffLine::Context(s) => writeln!(writer, " {}", s.trim_end_matches('\n'))?,
            }
        }
    }
    Ok(())
}
