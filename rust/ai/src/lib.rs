//! # blackjack-ai: Automated Seat Strategies
//!
//! Decides hit or stand for a seat from its current hand and the dealer's
//! face-up card. Used by the CLI to play non-human seats and to run
//! simulations.
//!
//! ## Core Components
//!
//! - [`SeatStrategy`] - Trait every strategy implements
//! - [`baseline`] - Hits below 17, like the dealer
//! - [`upcard`] - Adjusts the stand threshold to the dealer's upcard
//! - [`create_strategy`] - Builds a strategy from its name
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_ai::{create_strategy, SeatAction};
//! use blackjack_engine::engine::RoundEngine;
//! use blackjack_engine::events::NullHost;
//!
//! let strategy = create_strategy("baseline").unwrap();
//!
//! let mut engine = RoundEngine::with_seed(NullHost, 42);
//! engine.initiate_game(1, 1).unwrap();
//! engine.start_game().unwrap();
//!
//! if let Some(seat) = engine.current_player() {
//!     let action = strategy.decide(&engine.players()[seat], engine.dealer_upcard());
//!     match action {
//!         SeatAction::Hit => { engine.hit(seat).unwrap(); }
//!         SeatAction::Stand => engine.next_player(seat).unwrap(),
//!     }
//! }
//! ```

use blackjack_engine::cards::Card;
use blackjack_engine::player::Participant;

pub mod baseline;
pub mod upcard;

/// What a seat does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAction {
    Hit,
    Stand,
}

/// Interface for automated seats.
///
/// # Example Implementation
///
/// ```rust
/// use blackjack_ai::{SeatAction, SeatStrategy};
/// use blackjack_engine::cards::Card;
/// use blackjack_engine::player::Participant;
///
/// struct AlwaysStand;
///
/// impl SeatStrategy for AlwaysStand {
///     fn decide(&self, _seat: &Participant, _upcard: Option<Card>) -> SeatAction {
///         SeatAction::Stand
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysStand"
///     }
/// }
/// ```
pub trait SeatStrategy: Send + Sync {
    /// Picks the next action for `seat`. `dealer_upcard` is the dealer's
    /// first card, `None` before the deal.
    fn decide(&self, seat: &Participant, dealer_upcard: Option<Card>) -> SeatAction;

    fn name(&self) -> &str;
}

/// Names accepted by [`create_strategy`].
pub const STRATEGY_NAMES: [&str; 2] = ["baseline", "upcard"];

/// Builds a strategy by name, `None` for an unknown name.
///
/// ```rust
/// use blackjack_ai::create_strategy;
///
/// assert_eq!(create_strategy("baseline").unwrap().name(), "Baseline");
/// assert!(create_strategy("card-counter").is_none());
/// ```
pub fn create_strategy(name: &str) -> Option<Box<dyn SeatStrategy>> {
    match name {
        "baseline" => Some(Box::new(baseline::BaselineStrategy::new())),
        "upcard" => Some(Box::new(upcard::UpcardStrategy::new())),
        _ => None,
    }
}
