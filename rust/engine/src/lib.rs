//! # blackjack-engine: Blackjack Table Engine Core
//!
//! A turn-based Blackjack engine for several players against one automated
//! dealer. Provides the shoe lifecycle, hand evaluation, the turn state
//! machine, round resolution and session save/load.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`shoe`] - Multi-deck shoe with low-card and depletion notifications
//! - [`hand`] - Hand scoring and the Ace demotion rules
//! - [`player`] - Participant state, flags and tallies
//! - [`rules`] - Dealer constants and round settlement
//! - [`engine`] - Turn order, dealer play and round flow
//! - [`events`] - Host callbacks ([`events::TableHost`])
//! - [`session`] - Session snapshots and session files
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types for game and session operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::engine::RoundEngine;
//! use blackjack_engine::events::NullHost;
//! use blackjack_engine::player::HandStatus;
//!
//! let mut engine = RoundEngine::with_seed(NullHost, 42);
//! engine.initiate_game(1, 2).unwrap();
//! engine.start_game().unwrap();
//!
//! // Hit while under 17, then stand
//! while let Some(seat) = engine.current_player() {
//!     if engine.players()[seat].score() >= 17 {
//!         engine.next_player(seat).unwrap();
//!         break;
//!     }
//!     if engine.hit(seat).unwrap() != HandStatus::Live {
//!         break;
//!     }
//! }
//!
//! let rounds = engine.take_completed_rounds();
//! assert!(!rounds.is_empty());
//! assert_eq!(rounds[0].lines[0], "End of round 1.");
//! ```
//!
//! ## Host Callbacks
//!
//! Notifications (cards dealt, busts, blackjacks, round results) and the
//! blocking "cards running low" decision are delivered through a
//! [`events::TableHost`] bound once when the engine is built.

pub mod cards;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;
pub mod shoe;
