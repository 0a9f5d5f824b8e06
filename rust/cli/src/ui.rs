//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Writes `question` and reads a yes/no answer. EOF or anything other than
/// `y`/`yes` counts as no.
pub fn confirm(
    out: &mut dyn Write,
    input: &mut dyn std::io::BufRead,
    question: &str,
) -> std::io::Result<bool> {
    write!(out, "{} (y/n): ", question)?;
    out.flush()?;
    Ok(crate::io_utils::read_stdin_line(input)
        .map(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false))
}
