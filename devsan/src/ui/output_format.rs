// devsan/src/ui/output_format.rs
//! Prefixed, optionally coloured status messages for stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "info:".cyan(), msg)
    } else {
        writeln!(writer, "info: {}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(writer, "error: {}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_messages_have_prefixes() {
        let mut buf = Vec::new();
        print_info_message(&mut buf, "one", false).unwrap();
        print_warn_message(&mut buf, "two", false).unwrap();
        print_error_message(&mut buf, "three", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "info: one\nwarning: two\nerror: three\n");
    }

    #[test]
    fn test_colored_message_keeps_text() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.ends_with("careful\n"));
    }
}
