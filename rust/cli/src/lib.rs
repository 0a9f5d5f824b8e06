//! # Blackjack CLI Library
//!
//! Terminal host for the Blackjack engine: an interactive table, unattended
//! simulations, round-history statistics and a configuration dump.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments and executes the matching
//! subcommand; [`run_with_input`] does the same with an explicit input
//! stream for the interactive prompts.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["blackjack", "sim", "--rounds", "5", "--seed", "42"];
//! let code = blackjack_cli::run(args, &mut io::sink(), &mut io::sink());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play at an interactive table, optionally against automated seats
//! - `sim`: Play rounds with every seat automated and print tallies
//! - `stats`: Aggregate a JSONL round-history file
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod host;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{
    handle_cfg_command, handle_play_command, handle_sim_command, handle_stats_command,
    PlayOptions, SimOptions,
};

pub use cli::Vs;
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "stats", "cfg"];

/// Main entry point for the CLI application.
///
/// Interactive prompts read from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input closes
/// during an interactive session
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Like [`run`], with prompts answered from `stdin`.
///
/// ```
/// use std::io::{self, Cursor};
/// let mut input = Cursor::new(b"q\n");
/// let mut out = Vec::new();
/// let code = blackjack_cli::run_with_input(
///     ["blackjack", "play", "--seed", "7"],
///     &mut input,
///     &mut out,
///     &mut io::sink(),
/// );
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Start of round 1."));
/// ```
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            players,
            decks,
            seed,
            load,
            vs,
            strategy,
            rounds,
            history,
        } => {
            let opts = PlayOptions {
                players: players.map(usize::from),
                decks,
                seed,
                load,
                vs,
                strategy,
                rounds,
                history,
            };
            handle_play_command(opts, out, err, stdin)
        }
        Commands::Sim {
            rounds,
            players,
            decks,
            seed,
            strategy,
            history,
        } => {
            let opts = SimOptions {
                rounds,
                players: players.map(usize::from),
                decks,
                seed,
                strategy,
                history,
            };
            handle_sim_command(opts, out, err)
        }
        Commands::Stats { input } => handle_stats_command(&input, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            // handlers echo their own validation errors; only surface the rest
            if !matches!(e, CliError::InvalidInput(_) | CliError::Config(_))
                && writeln!(err, "Error: {}", e).is_err()
            {
                return exit_code::ERROR;
            }
            e.exit_code()
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Blackjack CLI").is_err()
                || writeln!(err, "Usage: blackjack <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            if writeln!(err, "\nFor full help, run: blackjack --help").is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
