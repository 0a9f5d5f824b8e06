use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Highest score that does not bust.
pub const BLACKJACK: u32 = 21;

/// How Aces fall back from 11 to 1 once a hand totals more than 21.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AceDemotion {
    /// Subtract 10 for every Ace in the hand in one pass, without re-checking
    /// the total between subtractions. Two or more Aces can therefore
    /// over-correct: `A A 9` scores 11 rather than 21.
    #[default]
    SinglePass,
    /// Subtract 10 per Ace only while the total still exceeds 21.
    AsNeeded,
}

impl AceDemotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            AceDemotion::SinglePass => "single-pass",
            AceDemotion::AsNeeded => "as-needed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-pass" | "single" => Some(AceDemotion::SinglePass),
            "as-needed" | "standard" => Some(AceDemotion::AsNeeded),
            _ => None,
        }
    }
}

/// Scores `cards`: Aces 11, court cards 10, others their face value, then
/// demotes Aces per `rule` if the total is over 21.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::{score_cards, AceDemotion};
///
/// let hand = [
///     Card::new(Suit::Hearts, Rank::Ace),
///     Card::new(Suit::Spades, Rank::Ace),
///     Card::new(Suit::Clubs, Rank::Nine),
/// ];
/// assert_eq!(score_cards(&hand, AceDemotion::AsNeeded), 21);
/// assert_eq!(score_cards(&hand, AceDemotion::SinglePass), 11);
/// ```
pub fn score_cards(cards: &[Card], rule: AceDemotion) -> u32 {
    let mut score: u32 = cards.iter().map(|c| c.rank.points()).sum();
    if score <= BLACKJACK {
        return score;
    }
    let aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    match rule {
        AceDemotion::SinglePass => {
            for _ in 0..aces {
                score -= 10;
            }
        }
        AceDemotion::AsNeeded => {
            for _ in 0..aces {
                if score <= BLACKJACK {
                    break;
                }
                score -= 10;
            }
        }
    }
    score
}

/// Cards held by one participant, append-only until cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self, rule: AceDemotion) -> u32 {
        score_cards(&self.cards, rule)
    }

    /// First card dealt, shown face up for the dealer.
    pub fn upcard(&self) -> Option<Card> {
        self.cards.first().copied()
    }
}
