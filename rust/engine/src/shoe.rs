use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;
use crate::events::TableHost;

/// Cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// The pool of cards a table deals from: `multiplier` standard decks, each
/// shuffled on its own and then stacked. Cards are drawn from the front.
///
/// # Examples
///
/// ```
/// use blackjack_engine::events::NullHost;
/// use blackjack_engine::shoe::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(2, 7).unwrap();
/// assert_eq!(shoe.remaining(), 104);
///
/// let card = shoe.draw(&mut NullHost).unwrap();
/// assert_eq!(shoe.remaining(), 103);
/// println!("drew {card}");
/// ```
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
    multiplier: u32,
    max_count: usize,
    pending_reshuffle: bool,
    running_low: bool,
    rng: ChaCha20Rng,
}

/// The persisted part of a [`Shoe`]. Flags and the generator are not saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeState {
    pub cards: Vec<Card>,
    pub multiplier: u32,
    pub max_count: usize,
}

impl Shoe {
    /// A single shuffled deck.
    pub fn new(seed: u64) -> Self {
        let mut shoe = Self {
            cards: VecDeque::with_capacity(DECK_SIZE),
            multiplier: 1,
            max_count: DECK_SIZE,
            pending_reshuffle: false,
            running_low: false,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        shoe.refill(1);
        shoe
    }

    pub fn new_with_seed(multiplier: u32, seed: u64) -> Result<Self, GameError> {
        let mut shoe = Self::new(seed);
        shoe.fill(multiplier)?;
        Ok(shoe)
    }

    /// Replaces the contents with `multiplier` independently shuffled decks.
    pub fn fill(&mut self, multiplier: u32) -> Result<(), GameError> {
        if multiplier == 0 {
            return Err(GameError::InvalidConfiguration(
                "deck multiplier must be >= 1".into(),
            ));
        }
        self.refill(multiplier);
        Ok(())
    }

    /// Full replace with fresh shuffles at the current multiplier.
    pub fn shuffle(&mut self) {
        self.refill(self.multiplier);
    }

    fn refill(&mut self, multiplier: u32) {
        let base = full_deck();
        self.cards.clear();
        for _ in 0..multiplier {
            let mut deck = base.clone();
            deck.shuffle(&mut self.rng);
            self.cards.extend(deck);
        }
        self.multiplier = multiplier;
        self.max_count = multiplier as usize * DECK_SIZE;
        self.pending_reshuffle = false;
        self.running_low = false;
    }

    /// Removes and returns the front card.
    ///
    /// Asks `host` once per depletion cycle whether to shuffle before the next
    /// round when fewer than a quarter of the cards remain. Drawing the last
    /// card notifies the host and refills the shoe straight away.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyShoe`] if called with no cards, which only happens
    /// after restoring an empty saved shoe.
    pub fn draw<H: TableHost + ?Sized>(&mut self, host: &mut H) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyShoe);
        }
        if !self.running_low && self.cards.len() < self.low_threshold() {
            self.running_low = true;
            if host.cards_running_low() {
                self.pending_reshuffle = true;
            }
            debug!(
                remaining = self.cards.len(),
                reshuffle = self.pending_reshuffle,
                "shoe running low"
            );
        }
        let card = self.cards.pop_front().ok_or(GameError::EmptyShoe)?;
        if self.cards.is_empty() {
            warn!(multiplier = self.multiplier, "shoe depleted, reshuffling");
            host.out_of_cards();
            self.shuffle();
        }
        Ok(card)
    }

    /// Manual override: shuffle before the next round regardless of the low-card answer.
    pub fn request_reshuffle(&mut self) {
        self.pending_reshuffle = true;
    }

    pub fn pending_reshuffle(&self) -> bool {
        self.pending_reshuffle
    }

    pub fn is_running_low(&self) -> bool {
        self.running_low
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn low_threshold(&self) -> usize {
        self.max_count / 4
    }

    /// Cards in draw order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    pub fn state(&self) -> ShoeState {
        ShoeState {
            cards: self.cards.iter().copied().collect(),
            multiplier: self.multiplier,
            max_count: self.max_count,
        }
    }

    /// Adopts saved contents. Flags start clear so the low-card query can fire again.
    pub fn restore(&mut self, state: &ShoeState) -> Result<(), GameError> {
        validate_state(state)?;
        self.cards = state.cards.iter().copied().collect();
        self.multiplier = state.multiplier;
        self.max_count = state.max_count;
        self.pending_reshuffle = false;
        self.running_low = false;
        Ok(())
    }
}

#[cfg(test)]
impl Shoe {
    pub(crate) fn empty_for_test(&mut self) {
        self.cards.clear();
    }
}

pub(crate) fn validate_state(state: &ShoeState) -> Result<(), GameError> {
    if state.multiplier == 0 {
        return Err(GameError::InvalidConfiguration(
            "saved shoe has a zero multiplier".into(),
        ));
    }
    if state.cards.is_empty() {
        return Err(GameError::InvalidConfiguration(
            "saved shoe holds no cards".into(),
        ));
    }
    if state.cards.len() > state.max_count {
        return Err(GameError::InvalidConfiguration(format!(
            "saved shoe holds {} cards but its capacity is {}",
            state.cards.len(),
            state.max_count
        )));
    }
    Ok(())
}
