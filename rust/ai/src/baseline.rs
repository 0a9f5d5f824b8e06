//! Baseline strategy: play the seat the way the dealer plays.

use crate::{SeatAction, SeatStrategy};
use blackjack_engine::cards::Card;
use blackjack_engine::player::Participant;
use blackjack_engine::rules::DEALER_STANDS_ON;

/// Hits below 17 and stands otherwise, ignoring the dealer's card.
///
/// Serves as the reference opponent for simulations: it plays exactly the
/// dealer's mandatory rule, so any edge the dealer shows comes from acting
/// last.
///
/// ```rust
/// use blackjack_ai::baseline::BaselineStrategy;
/// use blackjack_ai::SeatStrategy;
///
/// let ai = BaselineStrategy::new();
/// assert_eq!(ai.name(), "Baseline");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineStrategy;

impl BaselineStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SeatStrategy for BaselineStrategy {
    fn decide(&self, seat: &Participant, _dealer_upcard: Option<Card>) -> SeatAction {
        if seat.is_finished() || seat.score() >= DEALER_STANDS_ON {
            SeatAction::Stand
        } else {
            SeatAction::Hit
        }
    }

    fn name(&self) -> &str {
        "Baseline"
    }
}
