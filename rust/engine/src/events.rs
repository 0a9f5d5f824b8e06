//! Host capabilities the engine calls back into.
//!
//! A [`TableHost`] is bound once when the [`crate::engine::RoundEngine`] is
//! constructed and stays bound across new games and session loads. Every
//! method has a default so hosts only implement what they render.

use crate::cards::Card;
use crate::player::Participant;

pub trait TableHost {
    /// A card was delivered to `participant` (already appended to its hand).
    fn card_dealt(&mut self, _participant: &Participant, _card: Card) {}

    /// The shoe dropped below its low-card threshold. Blocking decision:
    /// `true` shuffles before the next round, `false` waits for depletion.
    fn cards_running_low(&mut self) -> bool {
        false
    }

    /// The last card left the shoe; an automatic reshuffle follows immediately.
    fn out_of_cards(&mut self) {}

    fn participant_bust(&mut self, _participant: &Participant) {}

    fn participant_blackjack(&mut self, _participant: &Participant) {}

    /// All hands were cleared for `round`, just before it is dealt.
    fn round_reset(&mut self, _round: u32) {}

    /// Banner line followed by one line per compared player.
    fn round_result(&mut self, _lines: &[String]) {}
}

/// Host that ignores every notification and never asks for an early shuffle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl TableHost for NullHost {}

impl<H: TableHost + ?Sized> TableHost for &mut H {
    fn card_dealt(&mut self, participant: &Participant, card: Card) {
        (**self).card_dealt(participant, card)
    }
    fn cards_running_low(&mut self) -> bool {
        (**self).cards_running_low()
    }
    fn out_of_cards(&mut self) {
        (**self).out_of_cards()
    }
    fn participant_bust(&mut self, participant: &Participant) {
        (**self).participant_bust(participant)
    }
    fn participant_blackjack(&mut self, participant: &Participant) {
        (**self).participant_blackjack(participant)
    }
    fn round_reset(&mut self, round: u32) {
        (**self).round_reset(round)
    }
    fn round_result(&mut self, lines: &[String]) {
        (**self).round_result(lines)
    }
}
