//! Parsing of seat commands typed at the table prompt.

use std::path::PathBuf;

/// Outcome of parsing one line typed at a seat prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Hit,
    Stand,
    /// Save to the given file, or to the last save file when `None`
    Save(Option<PathBuf>),
    /// Shuffle before the next round
    Shuffle,
    /// Rename the seat being played
    Rename(String),
    Quit,
    Invalid(String),
}

/// Parse a line typed at the seat prompt.
///
/// Accepts (case-insensitive keywords):
/// - `h` / `hit`
/// - `s` / `stand`
/// - `save [FILE]`
/// - `shuffle`
/// - `name <NEW NAME>` (the name keeps its case and inner spaces)
/// - `q` / `quit`
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_seat_command, ParseResult};
/// use std::path::PathBuf;
///
/// assert_eq!(parse_seat_command("H"), ParseResult::Hit);
/// assert_eq!(
///     parse_seat_command("save games/table.sav"),
///     ParseResult::Save(Some(PathBuf::from("games/table.sav")))
/// );
/// assert_eq!(
///     parse_seat_command("name Ada Lovelace"),
///     ParseResult::Rename("Ada Lovelace".to_string())
/// );
/// match parse_seat_command("double") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_seat_command(input: &str) -> ParseResult {
    let input = input.trim();
    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (input, ""),
    };

    if keyword.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match keyword.to_ascii_lowercase().as_str() {
        "h" | "hit" => ParseResult::Hit,
        "s" | "stand" => ParseResult::Stand,
        "q" | "quit" => ParseResult::Quit,
        "shuffle" => ParseResult::Shuffle,
        "save" => {
            if rest.is_empty() {
                ParseResult::Save(None)
            } else {
                ParseResult::Save(Some(PathBuf::from(rest)))
            }
        }
        "name" => {
            if rest.is_empty() {
                ParseResult::Invalid("Name requires a value (e.g., 'name Ada')".to_string())
            } else {
                ParseResult::Rename(rest.to_string())
            }
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: hit, stand, save [file], shuffle, name <new>, q",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        assert_eq!(parse_seat_command("h"), ParseResult::Hit);
        assert_eq!(parse_seat_command("hit"), ParseResult::Hit);
        assert_eq!(parse_seat_command("s"), ParseResult::Stand);
        assert_eq!(parse_seat_command("STAND"), ParseResult::Stand);
        assert_eq!(parse_seat_command("q"), ParseResult::Quit);
        assert_eq!(parse_seat_command("quit"), ParseResult::Quit);
        assert_eq!(parse_seat_command("shuffle"), ParseResult::Shuffle);
    }

    #[test]
    fn save_without_file_reuses_last() {
        assert_eq!(parse_seat_command("save"), ParseResult::Save(None));
        assert_eq!(parse_seat_command("  save  "), ParseResult::Save(None));
    }

    #[test]
    fn name_requires_value() {
        assert!(matches!(parse_seat_command("name"), ParseResult::Invalid(_)));
        assert!(matches!(parse_seat_command("name   "), ParseResult::Invalid(_)));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert_eq!(
            parse_seat_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }
}
