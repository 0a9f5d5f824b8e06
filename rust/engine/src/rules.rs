use serde::{Deserialize, Serialize};

use crate::hand::AceDemotion;
use crate::player::Participant;

/// The dealer draws until reaching at least this score.
pub const DEALER_STANDS_ON: u32 = 17;

/// One chance in this many that a dealer standing between 17 and 21 keeps
/// drawing against players who are ahead.
pub const DEALER_EXTENSION_ODDS: u32 = 5;

/// Upper bound on cards the dealer takes during that extension.
pub const DEALER_EXTENSION_LIMIT: usize = 11;

/// Table-wide rule switches fixed when the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    pub ace_demotion: AceDemotion,
    /// Allow the dealer's occasional extra draws while behind a player
    pub dealer_extension: bool,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            ace_demotion: AceDemotion::SinglePass,
            dealer_extension: true,
        }
    }
}

/// Result of comparing one player's hand against the dealer's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Push => "push",
        }
    }
}

pub fn round_banner(round: u32) -> String {
    format!("End of round {}.", round)
}

/// Settles a non-bust `player` against `dealer`, returning the outcome and
/// the line announced for it.
///
/// Checks run in a fixed order and the first match wins: dealer bust,
/// both blackjack, dealer blackjack, player blackjack, equal scores,
/// higher player score, lower player score.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::AceDemotion;
/// use blackjack_engine::player::Participant;
/// use blackjack_engine::rules::{settle, Outcome};
///
/// let mut player = Participant::new(0, "Player 1");
/// let mut dealer = Participant::dealer();
/// for r in [Rank::Ten, Rank::Nine] {
///     player.receive_card(Card::new(Suit::Clubs, r));
/// }
/// for r in [Rank::Ten, Rank::Seven] {
///     dealer.receive_card(Card::new(Suit::Hearts, r));
/// }
/// player.evaluate_hand(AceDemotion::SinglePass);
/// dealer.evaluate_hand(AceDemotion::SinglePass);
///
/// let (outcome, line) = settle(&player, &dealer);
/// assert_eq!(outcome, Outcome::Win);
/// assert_eq!(line, "Player 1 wins with 19 against dealer's 17.");
/// ```
pub fn settle(player: &Participant, dealer: &Participant) -> (Outcome, String) {
    let name = player.name();
    let ps = player.score();
    let ds = dealer.score();
    if dealer.is_bust() {
        (
            Outcome::Win,
            format!("{} wins with {} as dealer busted with {}.", name, ps, ds),
        )
    } else if dealer.has_blackjack() && player.has_blackjack() {
        (
            Outcome::Push,
            format!("{} and dealer both have Black Jack, push.", name),
        )
    } else if dealer.has_blackjack() {
        (
            Outcome::Loss,
            format!("{} loses with {} against dealer's Black Jack.", name, ps),
        )
    } else if player.has_blackjack() {
        (
            Outcome::Win,
            format!("{} wins with Black Jack against dealer's {}.", name, ds),
        )
    } else if ps == ds {
        (
            Outcome::Push,
            format!("{} and dealer both have {}, push.", name, ds),
        )
    } else if ps > ds {
        (
            Outcome::Win,
            format!("{} wins with {} against dealer's {}.", name, ps, ds),
        )
    } else {
        (
            Outcome::Loss,
            format!("{} loses with {} against dealer's {}.", name, ps, ds),
        )
    }
}
