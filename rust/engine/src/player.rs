use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{AceDemotion, Hand, BLACKJACK};
use serde::{Deserialize, Serialize};

/// Identifier reserved for the dealer seat.
pub const DEALER_ID: i32 = -1;

/// Where a hand stands after its latest evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum HandStatus {
    /// Still under 21; the owner may keep drawing
    Live,
    /// Over 21
    Bust,
    /// Exactly 21
    Blackjack,
}

/// A seat at the table: a player, or the dealer under [`DEALER_ID`].
/// Holds the current hand with its derived score and flags, plus win/loss
/// tallies that survive from round to round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Seat index for players, [`DEALER_ID`] for the dealer
    id: i32,
    /// Display name
    name: String,
    /// Cards dealt this round
    hand: Hand,
    /// Score derived from `hand`
    score: u32,
    wins: u32,
    losses: u32,
    /// True only while this seat is the one being played
    is_turn_active: bool,
    is_bust: bool,
    has_blackjack: bool,
}

impl Participant {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            score: 0,
            wins: 0,
            losses: 0,
            is_turn_active: false,
            is_bust: false,
            has_blackjack: false,
        }
    }

    pub fn dealer() -> Self {
        Self::new(DEALER_ID, "Dealer")
    }

    pub fn id(&self) -> i32 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn wins(&self) -> u32 {
        self.wins
    }
    pub fn losses(&self) -> u32 {
        self.losses
    }
    pub fn is_turn_active(&self) -> bool {
        self.is_turn_active
    }
    pub fn is_bust(&self) -> bool {
        self.is_bust
    }
    pub fn has_blackjack(&self) -> bool {
        self.has_blackjack
    }
    pub fn is_dealer(&self) -> bool {
        self.id == DEALER_ID
    }

    /// Bust or blackjack: the seat takes no further turn this round.
    pub fn is_finished(&self) -> bool {
        self.is_bust || self.has_blackjack
    }

    pub fn status(&self) -> HandStatus {
        if self.is_bust {
            HandStatus::Bust
        } else if self.has_blackjack {
            HandStatus::Blackjack
        } else {
            HandStatus::Live
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Recomputes the score and applies its consequences.
    ///
    /// Going over 21 marks the seat bust, records a loss and ends its turn;
    /// hitting exactly 21 marks blackjack and ends its turn. Flags are never
    /// cleared here, and the loss is only counted on the transition.
    ///
    /// Returns the new status when this call caused a transition, so the
    /// caller can announce it.
    pub fn evaluate_hand(&mut self, rule: AceDemotion) -> Option<HandStatus> {
        self.score = self.hand.score(rule);
        if self.is_finished() {
            return None;
        }
        if self.score > BLACKJACK {
            self.is_bust = true;
            self.losses += 1;
            self.is_turn_active = false;
            Some(HandStatus::Bust)
        } else if self.score == BLACKJACK {
            self.has_blackjack = true;
            self.is_turn_active = false;
            Some(HandStatus::Blackjack)
        } else {
            None
        }
    }

    /// Re-derives score and flags from the hand without touching tallies.
    pub(crate) fn rescore(&mut self, rule: AceDemotion) {
        self.score = self.hand.score(rule);
        self.is_bust = self.score > BLACKJACK;
        self.has_blackjack = self.score == BLACKJACK;
        if self.is_finished() {
            self.is_turn_active = false;
        }
    }

    /// Clears the hand and flags for a new round. Tallies persist.
    pub fn reset(&mut self) {
        self.hand.clear();
        self.score = 0;
        self.is_turn_active = false;
        self.has_blackjack = false;
        self.is_bust = false;
    }

    pub fn rename(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        self.name = name.to_string();
        Ok(())
    }

    pub(crate) fn set_turn_active(&mut self, active: bool) {
        self.is_turn_active = active;
    }

    pub(crate) fn record_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn record_loss(&mut self) {
        self.losses += 1;
    }
}
