//! Compact card and seat formatters for the table view.
//!
//! The narrative log spells cards out ("Ace of Spades"); the seat status line
//! uses the short form produced here. Suits render as Unicode symbols where
//! the terminal supports them, with an ASCII fallback.
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_cards};
//!
//! let ace_spades = Card::new(Suit::Spades, Rank::Ace);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_cards(&[ace_spades]).starts_with("[A"));
//! ```

use blackjack_ai::SeatAction;
use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::player::Participant;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
        }
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Spades => "s",
            Suit::Clubs => "c",
        }
    }
}

/// Format a Rank as a string (A, 2-9, T, J, Q, K).
pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in bracket notation, `[]` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// One status line for a seat: name, cards, score and any terminal flag.
///
/// ```rust
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::AceDemotion;
/// use blackjack_engine::player::Participant;
/// # use blackjack_cli::formatters::format_seat;
///
/// let mut p = Participant::new(0, "Ada");
/// p.receive_card(Card::new(Suit::Hearts, Rank::King));
/// p.receive_card(Card::new(Suit::Clubs, Rank::Ace));
/// p.evaluate_hand(AceDemotion::SinglePass);
/// let line = format_seat(&p);
/// assert!(line.starts_with("Ada: [K"));
/// assert!(line.ends_with("(21) BLACK JACK"));
/// ```
pub fn format_seat(seat: &Participant) -> String {
    let flag = if seat.is_bust() {
        " BUST"
    } else if seat.has_blackjack() {
        " BLACK JACK"
    } else {
        ""
    };
    format!(
        "{}: {} ({}){}",
        seat.name(),
        format_cards(seat.hand().cards()),
        seat.score(),
        flag
    )
}

/// Running tally for the end-of-session summary.
pub fn format_tally(seat: &Participant) -> String {
    format!(
        "{}: {} won, {} lost",
        seat.name(),
        seat.wins(),
        seat.losses()
    )
}

pub fn format_action(action: SeatAction) -> &'static str {
    match action {
        SeatAction::Hit => "hit",
        SeatAction::Stand => "stand",
    }
}
