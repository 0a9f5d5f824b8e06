//! # Play Command
//!
//! Interactive Blackjack at the terminal.
//!
//! Seats take turns at a prompt; the dealer plays itself once every seat is
//! done, then the next round is dealt straight away. With `--vs ai` only the
//! first seat is typed, the others follow a [`SeatStrategy`].
//!
//! ## Seat commands
//!
//! - `h` / `hit`, `s` / `stand`
//! - `save [FILE]`: write the session; without a file, reuse the last one
//! - `shuffle`: shuffle before the next round
//! - `name <NEW>`: rename the seat being played
//! - `q` / `quit`

use std::io::{BufRead, Write};
use std::path::PathBuf;

use blackjack_ai::{create_strategy, SeatAction, SeatStrategy};
use blackjack_engine::engine::RoundEngine;
use blackjack_engine::logger::RoundLogger;
use blackjack_engine::rules::TableRules;
use tracing::info;

use super::load_config;
use crate::cli::Vs;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_card, format_seat, format_tally};
use crate::host::{TerminalTable, SHUFFLE_SCHEDULED};
use crate::ui;
use crate::validation::{parse_seat_command, ParseResult};

type Table<'a> = RoundEngine<TerminalTable<'a>>;

/// Options for `play`; unset values fall back to the resolved config.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub players: Option<usize>,
    pub decks: Option<u32>,
    pub seed: Option<u64>,
    pub load: Option<PathBuf>,
    pub vs: Vs,
    pub strategy: String,
    pub rounds: Option<u32>,
    pub history: Option<PathBuf>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            players: None,
            decks: None,
            seed: None,
            load: None,
            vs: Vs::Human,
            strategy: "baseline".to_string(),
            rounds: None,
            history: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Quit,
    RoundLimit,
    InputClosed,
}

/// Handle the play command: run an interactive table until the player quits,
/// the round limit is reached, or input closes.
///
/// # Errors
///
/// * `CliError::Config` for an invalid config or table size
/// * `CliError::InvalidInput` for zero rounds or an unknown strategy
/// * `CliError::Session` when `--load` fails
/// * `CliError::Interrupted` when input closes mid-session
pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let players = opts.players.unwrap_or(cfg.players);
    let decks = opts.decks.unwrap_or(cfg.decks);
    if let Err(msg) = config::validate_table(players, decks) {
        let msg = format!("Invalid table: {}", msg);
        ui::write_error(err, &msg)?;
        return Err(CliError::Config(msg));
    }
    if opts.rounds == Some(0) {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let Some(strategy) = create_strategy(&opts.strategy) else {
        let msg = format!("Unknown strategy '{}'", opts.strategy);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };
    let mut history = match &opts.history {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };

    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let rules = TableRules {
        ace_demotion: cfg.ace_rule,
        ..TableRules::default()
    };

    let mut engine = RoundEngine::with_rules(TerminalTable::new(out, stdin), rules, Some(seed));
    writeln!(
        engine.host_mut().out(),
        "play: vs={} seed={} ace_rule={}",
        opts.vs.as_str(),
        seed,
        rules.ace_demotion.as_str()
    )?;

    let mut save_path = None;
    match &opts.load {
        Some(path) => {
            let narrative = engine.load_from(path)?;
            engine.host_mut().restore_narrative(narrative);
            let (seats, round) = (engine.players().len(), engine.current_round());
            writeln!(
                engine.host_mut().out(),
                "Loaded {}: {} players, round {}",
                path.display(),
                seats,
                round
            )?;
            let recent: Vec<String> = engine.host().narrative().into_iter().take(5).collect();
            let out = engine.host_mut().out();
            for line in recent.iter().rev() {
                writeln!(out, "  {}", line)?;
            }
            save_path = Some(path.clone());
        }
        None => {
            engine.initiate_game(players, decks)?;
            writeln!(
                engine.host_mut().out(),
                "New table: {} players, {} decks",
                players,
                decks
            )?;
            engine.start_game()?;
        }
    }
    info!(seed, players = engine.players().len(), "table opened");

    let mut rounds_played = 0u32;
    let end = loop {
        let finished = engine.take_completed_rounds();
        if !finished.is_empty() {
            rounds_played += finished.len() as u32;
            if let Some(log) = history.as_mut() {
                log.log_rounds(&finished)?;
            }
        }
        engine.host_mut().take_failure()?;
        if opts.rounds.is_some_and(|limit| rounds_played >= limit) {
            break SessionEnd::RoundLimit;
        }

        let Some(seat) = engine.current_player() else {
            return Err(CliError::Engine("no seat is waiting to act".to_string()));
        };

        if opts.vs == Vs::Ai && seat > 0 {
            let action = strategy.decide(&engine.players()[seat], engine.dealer_upcard());
            play_action(&mut engine, seat, action)?;
            continue;
        }

        show_table(&mut engine, seat)?;
        let Some(line) = engine.host_mut().read_line() else {
            break SessionEnd::InputClosed;
        };
        match parse_seat_command(&line) {
            ParseResult::Hit => play_action(&mut engine, seat, SeatAction::Hit)?,
            ParseResult::Stand => play_action(&mut engine, seat, SeatAction::Stand)?,
            ParseResult::Save(requested) => save_table(&mut engine, requested, &mut save_path, err)?,
            ParseResult::Shuffle => {
                engine.request_reshuffle();
                engine.host_mut().note(SHUFFLE_SCHEDULED.to_string());
            }
            ParseResult::Rename(name) => match engine.rename_player(seat, &name) {
                Ok(()) => writeln!(engine.host_mut().out(), "Seat {} is now {}.", seat + 1, name)?,
                Err(e) => ui::write_error(err, &e.to_string())?,
            },
            ParseResult::Quit => break SessionEnd::Quit,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    };

    if end != SessionEnd::RoundLimit && engine.has_unsaved_changes() {
        ui::display_warning(err, "Leaving the table with unsaved changes.")?;
    }
    let tallies: Vec<String> = engine.players().iter().map(format_tally).collect();
    let out = engine.host_mut().out();
    writeln!(out, "Rounds played: {}", rounds_played)?;
    for line in tallies {
        writeln!(out, "{}", line)?;
    }

    match end {
        SessionEnd::InputClosed => Err(CliError::Interrupted("input closed".to_string())),
        SessionEnd::Quit | SessionEnd::RoundLimit => Ok(()),
    }
}

fn play_action(engine: &mut Table<'_>, seat: usize, action: SeatAction) -> Result<(), CliError> {
    match action {
        SeatAction::Hit => {
            engine.hit(seat)?;
        }
        SeatAction::Stand => {
            let line = format!("{} stands.", engine.players()[seat].name());
            engine.host_mut().note(line);
            engine.next_player(seat)?;
        }
    }
    Ok(())
}

fn show_table(engine: &mut Table<'_>, seat: usize) -> Result<(), CliError> {
    let upcard = engine
        .dealer_upcard()
        .map(|c| format_card(&c))
        .unwrap_or_else(|| "-".to_string());
    let header = format!("Round {} | Dealer shows {}", engine.current_round(), upcard);
    let seats: Vec<String> = engine.players().iter().map(format_seat).collect();
    let name = engine.players()[seat].name().to_string();

    let out = engine.host_mut().out();
    writeln!(out, "{}", header)?;
    for line in seats {
        writeln!(out, "  {}", line)?;
    }
    write!(out, "{}> ", name)?;
    out.flush()?;
    Ok(())
}

fn save_table(
    engine: &mut Table<'_>,
    requested: Option<PathBuf>,
    save_path: &mut Option<PathBuf>,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(path) = requested.or_else(|| save_path.clone()) else {
        ui::write_error(err, "No save file yet; use 'save FILE'")?;
        return Ok(());
    };
    let narrative = engine.host().narrative();
    match engine.save_to(&path, &narrative) {
        Ok(()) => {
            writeln!(engine.host_mut().out(), "Game saved to {}.", path.display())?;
            *save_path = Some(path);
        }
        Err(e) => ui::write_error(err, &e.to_string())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn run_play(opts: PlayOptions, input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(opts, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn seeded(seed: u64) -> PlayOptions {
        PlayOptions {
            seed: Some(seed),
            ..PlayOptions::default()
        }
    }

    #[test]
    #[serial]
    fn quit_immediately() {
        let (result, out, err) = run_play(seeded(42), "q\n");
        assert!(result.is_ok());
        assert!(out.contains("play: vs=human seed=42"));
        assert!(out.contains("Start of round 1."));
        assert!(out.contains("Rounds played: 0"));
        assert!(err.contains("unsaved changes"));
    }

    #[test]
    #[serial]
    fn closed_input_is_an_interruption() {
        let (result, _, _) = run_play(seeded(42), "");
        assert!(matches!(result, Err(CliError::Interrupted(_))));
    }

    #[test]
    #[serial]
    fn standing_through_the_round_limit() {
        let opts = PlayOptions {
            rounds: Some(2),
            ..seeded(9)
        };
        let (result, out, _) = run_play(opts, &"s\nn\n".repeat(20));
        assert!(result.is_ok());
        assert!(out.contains("End of round 1."));
        assert!(out.contains("End of round 2."));
        assert!(out.contains("Rounds played: 2"));
    }

    #[test]
    #[serial]
    fn unknown_command_is_reported_and_ignored() {
        let (result, _, err) = run_play(seeded(3), "double\nq\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized command 'double'"));
    }

    #[test]
    #[serial]
    fn save_without_a_file_needs_one_first() {
        let (result, _, err) = run_play(seeded(3), "save\nq\n");
        assert!(result.is_ok());
        assert!(err.contains("No save file yet"));
    }

    #[test]
    #[serial]
    fn zero_rounds_rejected() {
        let opts = PlayOptions {
            rounds: Some(0),
            ..seeded(1)
        };
        let (result, _, _) = run_play(opts, "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    #[serial]
    fn unknown_strategy_rejected() {
        let opts = PlayOptions {
            strategy: "martingale".into(),
            ..seeded(1)
        };
        let (result, _, err) = run_play(opts, "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("martingale"));
    }

    #[test]
    #[serial]
    fn rename_changes_the_prompt() {
        let (result, out, _) = run_play(seeded(5), "name Ada\nq\n");
        assert!(result.is_ok());
        assert!(out.contains("Seat 1 is now Ada."));
        assert!(out.contains("Ada> "));
    }
}
