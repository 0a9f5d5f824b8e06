//! Terminal rendering of table events.
//!
//! [`TerminalTable`] is the [`TableHost`] the `play` command binds to its
//! engine. Every notification becomes one narrative line, echoed to the
//! terminal and kept newest-first so it can be saved with the session. The
//! low-card query is answered at a `y/n` prompt.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use blackjack_engine::cards::Card;
use blackjack_engine::events::TableHost;
use blackjack_engine::player::Participant;

use crate::io_utils::read_stdin_line;
use crate::ui;

pub const SHUFFLE_SCHEDULED: &str = "Deck will be shuffled before next round!";
pub const SHUFFLE_DECLINED: &str = "Deck will automatically shuffle after last card!";
pub const SHUFFLED_EMPTY: &str = "Out of cards, deck was shuffled automatically!";

pub struct TerminalTable<'a> {
    out: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
    narrative: VecDeque<String>,
    /// First write failure inside a callback, reported by `take_failure`
    failure: Option<io::Error>,
}

impl<'a> TerminalTable<'a> {
    pub fn new(out: &'a mut dyn Write, input: &'a mut dyn BufRead) -> Self {
        Self {
            out,
            input,
            narrative: VecDeque::new(),
            failure: None,
        }
    }

    pub fn out(&mut self) -> &mut (dyn Write + 'a) {
        &mut *self.out
    }

    pub fn read_line(&mut self) -> Option<String> {
        read_stdin_line(&mut *self.input)
    }

    /// Narrative log, newest first.
    pub fn narrative(&self) -> Vec<String> {
        self.narrative.iter().cloned().collect()
    }

    /// Appends lines from a loaded session behind anything already logged.
    pub fn restore_narrative(&mut self, older: Vec<String>) {
        self.narrative.extend(older);
    }

    /// Records `line` as the newest narrative entry and prints it.
    pub fn note(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.failure.get_or_insert(e);
        }
        self.narrative.push_front(line);
    }

    pub fn take_failure(&mut self) -> io::Result<()> {
        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl TableHost for TerminalTable<'_> {
    fn card_dealt(&mut self, participant: &Participant, card: Card) {
        self.note(format!("{} drew {}.", participant.name(), card));
    }

    fn cards_running_low(&mut self) -> bool {
        match ui::confirm(
            &mut *self.out,
            &mut *self.input,
            "Cards are running low, shuffle deck?",
        ) {
            Ok(true) => {
                self.note(SHUFFLE_SCHEDULED.to_string());
                true
            }
            Ok(false) => {
                self.note(SHUFFLE_DECLINED.to_string());
                false
            }
            Err(e) => {
                self.failure.get_or_insert(e);
                false
            }
        }
    }

    fn out_of_cards(&mut self) {
        self.note(SHUFFLED_EMPTY.to_string());
    }

    fn participant_bust(&mut self, participant: &Participant) {
        self.note(format!(
            "{} busted with a hand of {}.",
            participant.name(),
            participant.score()
        ));
    }

    fn participant_blackjack(&mut self, participant: &Participant) {
        self.note(format!("{} has Black Jack!", participant.name()));
    }

    fn round_reset(&mut self, round: u32) {
        self.note(format!("Start of round {}.", round));
    }

    fn round_result(&mut self, lines: &[String]) {
        for line in lines {
            self.note(line.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn narrative_is_newest_first_and_echoed() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"");
        let mut host = TerminalTable::new(&mut out, &mut input);
        host.round_reset(1);
        host.participant_blackjack(&Participant::new(0, "Ada"));
        assert_eq!(
            host.narrative(),
            vec!["Ada has Black Jack!".to_string(), "Start of round 1.".to_string()]
        );
        drop(host);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Start of round 1.\nAda has Black Jack!\n"
        );
    }

    #[test]
    fn restored_lines_sit_behind_new_ones() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"");
        let mut host = TerminalTable::new(&mut out, &mut input);
        host.note("newer".into());
        host.restore_narrative(vec!["old 2".into(), "old 1".into()]);
        assert_eq!(host.narrative(), vec!["newer", "old 2", "old 1"]);
    }

    #[test]
    fn low_card_prompt_reads_the_answer() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"y\nn\n");
        let mut host = TerminalTable::new(&mut out, &mut input);
        assert!(host.cards_running_low());
        assert!(!host.cards_running_low());
        assert_eq!(host.narrative()[0], SHUFFLE_DECLINED);
        assert_eq!(host.narrative()[1], SHUFFLE_SCHEDULED);
    }

    #[test]
    fn result_lines_are_logged_in_order_received() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"");
        let mut host = TerminalTable::new(&mut out, &mut input);
        host.round_result(&["End of round 2.".into(), "Ada wins with 20 against dealer's 18.".into()]);
        assert_eq!(host.narrative()[1], "End of round 2.");
        assert!(host.take_failure().is_ok());
    }
}
