//! Command-line definitions for the `blackjack` binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Blackjack table: play against the dealer, simulate rounds, inspect round history"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at an interactive table
    Play {
        /// Seats at the table (1-7)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
        players: Option<u8>,
        /// Decks in the shoe (1-8)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8))]
        decks: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Resume a saved session instead of starting a new table
        #[arg(long)]
        load: Option<PathBuf>,
        /// Who plays the seats after the first
        #[arg(long, value_enum, default_value_t = Vs::Human)]
        vs: Vs,
        /// Strategy for automated seats
        #[arg(long, default_value = "baseline")]
        strategy: String,
        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<u32>,
        /// Append resolved rounds to this JSONL file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Play rounds with every seat automated
    Sim {
        #[arg(long)]
        rounds: u32,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
        players: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8))]
        decks: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "baseline")]
        strategy: String,
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Summarise a round-history JSONL file
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Who plays the seats after the first in `play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// Every seat takes commands from the terminal
    Human,
    /// Seat 1 takes commands, the rest follow a strategy
    Ai,
}

impl Vs {
    /// ```
    /// # use blackjack_cli::Vs;
    /// assert_eq!(Vs::Ai.as_str(), "ai");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Human => "human",
            Vs::Ai => "ai",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands = vec![
            vec!["blackjack", "cfg"],
            vec!["blackjack", "play"],
            vec!["blackjack", "play", "--vs", "ai", "--players", "3"],
            vec!["blackjack", "play", "--load", "table.sav"],
            vec!["blackjack", "sim", "--rounds", "10"],
            vec!["blackjack", "stats", "--input", "rounds.jsonl"],
        ];
        for args in commands {
            assert!(BlackjackCli::try_parse_from(&args).is_ok(), "{:?}", args);
        }
    }

    #[test]
    fn table_limits_are_enforced_by_the_parser() {
        assert!(BlackjackCli::try_parse_from(["blackjack", "play", "--players", "0"]).is_err());
        assert!(BlackjackCli::try_parse_from(["blackjack", "play", "--players", "8"]).is_err());
        assert!(BlackjackCli::try_parse_from(["blackjack", "sim", "--rounds", "1", "--decks", "9"]).is_err());
    }

    #[test]
    fn play_defaults_to_human_seats() {
        let cli = BlackjackCli::try_parse_from(["blackjack", "play"]).unwrap();
        match cli.cmd {
            Commands::Play { vs, strategy, .. } => {
                assert_eq!(vs, Vs::Human);
                assert_eq!(strategy, "baseline");
            }
            _ => panic!("Expected Commands::Play"),
        }
    }
}
