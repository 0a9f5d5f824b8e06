//! Upcard-aware strategy.
//!
//! A hard-total simplification of the usual chart: stiff hands (12..=16)
//! stand when the dealer shows a weak card and hit when it shows a strong
//! one. Doubling and splitting do not exist at this table, so the chart has
//! nothing else to say.

use crate::{SeatAction, SeatStrategy};
use blackjack_engine::cards::Card;
use blackjack_engine::player::Participant;
use blackjack_engine::rules::DEALER_STANDS_ON;

/// Plays stiff hands against the dealer's upcard, falls back to the
/// baseline threshold when no upcard is known.
#[derive(Debug, Clone, Default)]
pub struct UpcardStrategy;

impl UpcardStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Lowest total that stands against an upcard worth `up` points.
    fn stand_threshold(up: u32) -> u32 {
        match up {
            2 | 3 => 13,
            4..=6 => 12,
            _ => DEALER_STANDS_ON,
        }
    }
}

impl SeatStrategy for UpcardStrategy {
    fn decide(&self, seat: &Participant, dealer_upcard: Option<Card>) -> SeatAction {
        if seat.is_finished() {
            return SeatAction::Stand;
        }
        let threshold = dealer_upcard
            .map(|c| Self::stand_threshold(c.rank.points()))
            .unwrap_or(DEALER_STANDS_ON);
        if seat.score() >= threshold {
            SeatAction::Stand
        } else {
            SeatAction::Hit
        }
    }

    fn name(&self) -> &str {
        "Upcard"
    }
}
