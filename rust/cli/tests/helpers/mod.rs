#![allow(dead_code)]

use std::io::Cursor;

/// Captured result of one CLI invocation.
pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI with `args` (program name excluded) and `input` as stdin.
pub fn run_cli(args: &[&str], input: &str) -> CliOutput {
    let mut argv = vec!["blackjack"];
    argv.extend_from_slice(args);
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = blackjack_cli::run_with_input(argv, &mut stdin, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8(out).expect("stdout is utf-8"),
        stderr: String::from_utf8(err).expect("stderr is utf-8"),
    }
}

/// Clears every configuration variable so defaults apply.
pub fn clear_config_env() {
    for key in [
        "BLACKJACK_CONFIG",
        "BLACKJACK_PLAYERS",
        "BLACKJACK_DECKS",
        "BLACKJACK_SEED",
        "BLACKJACK_ACE_RULE",
    ] {
        std::env::remove_var(key);
    }
}
