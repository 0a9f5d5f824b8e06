#![allow(dead_code)]

use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::events::TableHost;
use blackjack_engine::hand::AceDemotion;
use blackjack_engine::player::Participant;
use blackjack_engine::session::SessionSnapshot;
use blackjack_engine::shoe::ShoeState;

pub fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

/// Participant holding `ranks`, evaluated card by card like a real deal.
pub fn seat(id: i32, name: &str, ranks: &[Rank]) -> Participant {
    let mut p = Participant::new(id, name);
    for &r in ranks {
        p.receive_card(card(r));
        p.evaluate_hand(AceDemotion::SinglePass);
    }
    p
}

pub fn dealer(ranks: &[Rank]) -> Participant {
    let mut d = Participant::dealer();
    for &r in ranks {
        d.receive_card(card(r));
        d.evaluate_hand(AceDemotion::SinglePass);
    }
    d
}

/// Snapshot of a table mid-round whose shoe will deal `next` first.
pub fn table(players: Vec<Participant>, dealer: Participant, next: &[Rank]) -> SessionSnapshot {
    SessionSnapshot {
        round_number: 1,
        current_player_index: 0,
        shoe: ShoeState {
            cards: next.iter().map(|&r| card(r)).collect(),
            multiplier: 1,
            max_count: 52,
        },
        dealer,
        players,
        narrative: Vec::new(),
        saved_at: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Dealt(i32, Card),
    Low,
    OutOfCards,
    Bust(i32),
    Blackjack(i32),
    Reset(u32),
    Result(Vec<String>),
}

/// Host that records every notification in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub shuffle_when_low: bool,
}

impl Recorder {
    pub fn dealt_to(&self, id: i32) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Dealt(who, _) if *who == id))
            .count()
    }

    pub fn results(&self) -> Vec<Vec<String>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Result(lines) => Some(lines.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TableHost for Recorder {
    fn card_dealt(&mut self, participant: &Participant, card: Card) {
        self.events.push(Event::Dealt(participant.id(), card));
    }
    fn cards_running_low(&mut self) -> bool {
        self.events.push(Event::Low);
        self.shuffle_when_low
    }
    fn out_of_cards(&mut self) {
        self.events.push(Event::OutOfCards);
    }
    fn participant_bust(&mut self, participant: &Participant) {
        self.events.push(Event::Bust(participant.id()));
    }
    fn participant_blackjack(&mut self, participant: &Participant) {
        self.events.push(Event::Blackjack(participant.id()));
    }
    fn round_reset(&mut self, round: u32) {
        self.events.push(Event::Reset(round));
    }
    fn round_result(&mut self, lines: &[String]) {
        self.events.push(Event::Result(lines.to_vec()));
    }
}
