//! Statistics over round-history JSONL files.
//!
//! Counts rounds, per-seat wins/losses/pushes and dealer busts from files
//! written by `play --history` or `sim --history`. A final line without a
//! trailing newline that fails to parse is treated as an interrupted write
//! and discarded; any other unreadable line counts as corrupted. Repeated
//! `round_id`s are counted once.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::Path;

use blackjack_engine::logger::RoundRecord;
use blackjack_engine::rules::Outcome;

use crate::error::CliError;
use crate::io_utils::read_text;
use crate::ui;

#[derive(Debug, Default)]
struct SeatStats {
    name: String,
    wins: u64,
    losses: u64,
    pushes: u64,
}

#[derive(Debug, Default)]
struct StatsState {
    rounds: u64,
    dealer_busts: u64,
    dealer_blackjacks: u64,
    seats: BTreeMap<usize, SeatStats>,
    seen: HashSet<String>,
    duplicates: u64,
    skipped: u64,
    corrupted: u64,
}

impl StatsState {
    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let record: RoundRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => {
                    if i == lines.len() - 1 && !has_trailing_nl {
                        self.skipped += 1;
                    } else {
                        self.corrupted += 1;
                    }
                    continue;
                }
            };
            if !self.seen.insert(record.round_id.clone()) {
                self.duplicates += 1;
                continue;
            }
            self.add(&record);
        }
    }

    fn add(&mut self, record: &RoundRecord) {
        self.rounds += 1;
        if record.dealer_bust {
            self.dealer_busts += 1;
        }
        if record.dealer_blackjack {
            self.dealer_blackjacks += 1;
        }
        for r in &record.results {
            let seat = self.seats.entry(r.player_id).or_default();
            seat.name.clone_from(&r.name);
            match r.outcome {
                Outcome::Win => seat.wins += 1,
                Outcome::Loss => seat.losses += 1,
                Outcome::Push => seat.pushes += 1,
            }
        }
    }
}

/// Aggregates a round-history file and prints the summary as JSON.
///
/// # Errors
///
/// `CliError::InvalidInput` when the file cannot be read or holds no
/// readable record at all.
pub fn handle_stats_command(
    input: &Path,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text(input) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("Failed to read {}: {}", input.display(), e);
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };

    let mut state = StatsState::default();
    state.consume(&content);

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if state.duplicates > 0 {
        ui::display_warning(
            err,
            &format!("{} duplicate round_id(s) ignored", state.duplicates),
        )?;
    }
    if state.rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let players: Vec<serde_json::Value> = state
        .seats
        .iter()
        .map(|(id, s)| {
            serde_json::json!({
                "player_id": id,
                "name": s.name,
                "wins": s.wins,
                "losses": s.losses,
                "pushes": s.pushes,
            })
        })
        .collect();
    let summary = serde_json::json!({
        "rounds": state.rounds,
        "dealer": {
            "busts": state.dealer_busts,
            "blackjacks": state.dealer_blackjacks,
        },
        "players": players,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
