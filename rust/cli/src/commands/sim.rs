//! Simulation command: every seat played by a strategy.
//!
//! Runs the engine without a terminal host. The low-card query is always
//! answered with a reshuffle, so long runs keep drawing from fresh shoes.
//! Tallies are computed from the round summaries, which lets the run stop
//! exactly at the requested round count even when one action resolves
//! several rounds in a row.

use std::io::Write;
use std::path::PathBuf;

use blackjack_ai::{create_strategy, SeatAction};
use blackjack_engine::engine::{RoundEngine, RoundSummary};
use blackjack_engine::events::TableHost;
use blackjack_engine::logger::RoundLogger;
use blackjack_engine::rules::{Outcome, TableRules};
use tracing::{debug, info};

use super::load_config;
use crate::config;
use crate::error::CliError;
use crate::ui;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub rounds: u32,
    pub players: Option<usize>,
    pub decks: Option<u32>,
    pub seed: Option<u64>,
    pub strategy: String,
    pub history: Option<PathBuf>,
}

/// Host for unattended play: always reshuffles when asked, counts shoe events.
#[derive(Debug, Default)]
struct AutoShuffle {
    reshuffles: u32,
    depletions: u32,
}

impl TableHost for AutoShuffle {
    fn cards_running_low(&mut self) -> bool {
        self.reshuffles += 1;
        true
    }

    fn out_of_cards(&mut self) {
        self.depletions += 1;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SeatTally {
    name: String,
    wins: u32,
    losses: u32,
    pushes: u32,
}

pub fn handle_sim_command(
    opts: SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;
    let players = opts.players.unwrap_or(cfg.players);
    let decks = opts.decks.unwrap_or(cfg.decks);
    if let Err(msg) = config::validate_table(players, decks) {
        let msg = format!("Invalid table: {}", msg);
        ui::write_error(err, &msg)?;
        return Err(CliError::Config(msg));
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
    writeln!(
        out,
        "sim: rounds={} players={} decks={} seed={} strategy={}",
        opts.rounds,
        players,
        decks,
        seed,
        strategy.name()
    )?;

    let mut engine = RoundEngine::with_rules(AutoShuffle::default(), rules, Some(seed));
    engine.initiate_game(players, decks)?;
    engine.start_game()?;

    let target = opts.rounds as usize;
    let mut summaries: Vec<RoundSummary> = Vec::with_capacity(target);
    summaries.extend(engine.take_completed_rounds());
    while summaries.len() < target {
        let Some(seat) = engine.current_player() else {
            return Err(CliError::Engine("no seat is waiting to act".to_string()));
        };
        match strategy.decide(&engine.players()[seat], engine.dealer_upcard()) {
            SeatAction::Hit => {
                engine.hit(seat)?;
            }
            SeatAction::Stand => engine.next_player(seat)?,
        }
        let finished = engine.take_completed_rounds();
        if !finished.is_empty() {
            debug!(rounds = summaries.len() + finished.len(), "rounds resolved");
            summaries.extend(finished);
        }
    }
    summaries.truncate(target);

    if let Some(log) = history.as_mut() {
        log.log_rounds(&summaries)?;
    }

    let tallies = tally(&summaries);
    let dealer_busts = summaries.iter().filter(|s| s.dealer_bust).count();
    let host = engine.host();
    info!(
        rounds = summaries.len(),
        reshuffles = host.reshuffles,
        depletions = host.depletions,
        "simulation finished"
    );

    for t in &tallies {
        writeln!(
            out,
            "{}: {} won, {} lost, {} pushed",
            t.name, t.wins, t.losses, t.pushes
        )?;
    }
    writeln!(
        out,
        "Dealer busted in {} of {} rounds",
        dealer_busts,
        summaries.len()
    )?;
    writeln!(
        out,
        "Shoe: {} reshuffles, {} depletions",
        host.reshuffles, host.depletions
    )?;
    writeln!(out, "Simulated: {} rounds", summaries.len())?;
    Ok(())
}

fn tally(summaries: &[RoundSummary]) -> Vec<SeatTally> {
    let mut tallies: Vec<SeatTally> = Vec::new();
    for summary in summaries {
        for r in &summary.results {
            if tallies.len() <= r.player_id {
                tallies.resize(r.player_id + 1, SeatTally::default());
            }
            let t = &mut tallies[r.player_id];
            t.name.clone_from(&r.name);
            match r.outcome {
                Outcome::Win => t.wins += 1,
                Outcome::Loss => t.losses += 1,
                Outcome::Push => t.pushes += 1,
            }
        }
    }
    tallies
}
