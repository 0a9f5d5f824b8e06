use std::path::Path;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::errors::{GameError, SessionError};
use crate::events::{NullHost, TableHost};
use crate::hand::BLACKJACK;
use crate::player::{HandStatus, Participant};
use crate::rules::{
    round_banner, settle, Outcome, TableRules, DEALER_EXTENSION_LIMIT, DEALER_EXTENSION_ODDS,
    DEALER_STANDS_ON,
};
use crate::session::SessionSnapshot;
use crate::shoe::{validate_state, Shoe};

/// Upper bound on seats at one table.
pub const MAX_PLAYERS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Player(usize),
    Dealer,
}

/// How one player finished a resolved round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    pub player_id: usize,
    pub name: String,
    pub score: u32,
    pub bust: bool,
    pub blackjack: bool,
    pub outcome: Outcome,
}

/// Everything decided when a round resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub dealer_score: u32,
    pub dealer_bust: bool,
    pub dealer_blackjack: bool,
    /// Every player in seat order; busted players count as losses
    pub results: Vec<SeatResult>,
    /// Lines published to the host, banner first
    pub lines: Vec<String>,
}

/// Table state kept aside while a restore is attempted.
struct Checkpoint {
    rng: ChaCha20Rng,
    shoe: Shoe,
    dealer: Participant,
    players: Vec<Participant>,
    current_round: u32,
    current_player: usize,
    unsaved_changes: bool,
    ever_saved: bool,
    completed: Vec<RoundSummary>,
}

/// Runs a Blackjack table: several players against an automated dealer.
///
/// The engine deals from its [`Shoe`], walks the seats in order, plays the
/// dealer once every seat is done, settles the round and immediately deals
/// the next one. Host notifications go to the [`TableHost`] bound at
/// construction.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::RoundEngine;
/// use blackjack_engine::events::NullHost;
///
/// let mut engine = RoundEngine::with_seed(NullHost, 12345);
/// engine.initiate_game(2, 1).unwrap();
/// engine.start_game().unwrap();
///
/// // Every seat and the dealer hold two cards (or the first round already resolved)
/// assert!(engine.players().iter().all(|p| p.hand().len() >= 2));
///
/// // Stand with whoever is up
/// if let Some(seat) = engine.current_player() {
///     engine.next_player(seat).unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct RoundEngine<H: TableHost = NullHost> {
    host: H,
    rules: TableRules,
    rng: ChaCha20Rng,
    shoe: Shoe,
    dealer: Participant,
    players: Vec<Participant>,
    current_round: u32,
    current_player: usize,
    unsaved_changes: bool,
    ever_saved: bool,
    completed: Vec<RoundSummary>,
}

impl<H: TableHost> RoundEngine<H> {
    /// Engine with default rules and an entropy-seeded generator.
    pub fn new(host: H) -> Self {
        Self::with_rules(host, TableRules::default(), None)
    }

    pub fn with_seed(host: H, seed: u64) -> Self {
        Self::with_rules(host, TableRules::default(), Some(seed))
    }

    pub fn with_rules(host: H, rules: TableRules, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let shoe = Shoe::new(rng.next_u64());
        Self {
            host,
            rules,
            rng,
            shoe,
            dealer: Participant::dealer(),
            players: Vec::new(),
            current_round: 0,
            current_player: 0,
            unsaved_changes: false,
            ever_saved: false,
            completed: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    pub fn rules(&self) -> TableRules {
        self.rules
    }
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }
    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }
    pub fn players(&self) -> &[Participant] {
        &self.players
    }
    pub fn current_round(&self) -> u32 {
        self.current_round
    }
    /// Raw turn pointer; equals the player count while the dealer plays.
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }
    /// The seat whose turn it is, if any.
    pub fn current_player(&self) -> Option<usize> {
        self.players
            .get(self.current_player)
            .filter(|p| p.is_turn_active())
            .map(|_| self.current_player)
    }
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }
    pub fn has_ever_been_saved(&self) -> bool {
        self.ever_saved
    }
    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.hand().upcard()
    }

    /// Drains the summaries of rounds resolved since the last call.
    ///
    /// Summaries accumulate until drained, so a long-running host should call
    /// this after every action. [`restore`](Self::restore) and
    /// [`initiate_game`](Self::initiate_game) discard undrained ones.
    pub fn take_completed_rounds(&mut self) -> Vec<RoundSummary> {
        std::mem::take(&mut self.completed)
    }

    /// Sets up a fresh table: new shoe of `deck_multiplier` decks, seats
    /// `Player 1..=player_count`, round 1. Nothing is dealt until
    /// [`start_game`](Self::start_game).
    pub fn initiate_game(
        &mut self,
        player_count: usize,
        deck_multiplier: u32,
    ) -> Result<(), GameError> {
        if player_count == 0 || player_count > MAX_PLAYERS {
            return Err(GameError::InvalidConfiguration(format!(
                "player count must be between 1 and {}",
                MAX_PLAYERS
            )));
        }
        self.shoe.fill(deck_multiplier)?;
        self.dealer = Participant::dealer();
        self.players = (0..player_count)
            .map(|i| Participant::new(i as i32, format!("Player {}", i + 1)))
            .collect();
        self.current_round = 1;
        self.current_player = 0;
        self.ever_saved = false;
        self.unsaved_changes = true;
        self.completed.clear();
        info!(
            players = player_count,
            decks = deck_multiplier,
            "new game initiated"
        );
        Ok(())
    }

    /// Deals the first round and hands the turn to the first playable seat.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "no game has been initiated".into(),
            ));
        }
        self.host.round_reset(self.current_round);
        self.deal_initial_cards()?;
        self.advance_from(0)
    }

    /// Deals one card to `player`. A bust or blackjack ends the turn.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPlayerId`] for an unknown seat and
    /// [`GameError::NotPlayersTurn`] when another seat is active. Neither
    /// changes any state.
    pub fn hit(&mut self, player: usize) -> Result<HandStatus, GameError> {
        self.check_turn(player)?;
        self.deal_to(Seat::Player(player))?;
        self.unsaved_changes = true;
        let status = self.players[player].status();
        if status != HandStatus::Live {
            self.advance_from(player + 1)?;
        }
        Ok(status)
    }

    /// Stands `player` and passes the turn on; after the last seat the
    /// dealer plays, the round resolves and the next one is dealt.
    pub fn next_player(&mut self, player: usize) -> Result<(), GameError> {
        self.check_turn(player)?;
        self.unsaved_changes = true;
        self.players[player].set_turn_active(false);
        self.advance_from(player + 1)
    }

    /// Shuffle before the next round regardless of the low-card answer.
    pub fn request_reshuffle(&mut self) {
        self.shoe.request_reshuffle();
        self.unsaved_changes = true;
    }

    pub fn rename_player(&mut self, player: usize, name: &str) -> Result<(), GameError> {
        let count = self.players.len();
        let seat = self
            .players
            .get_mut(player)
            .ok_or(GameError::InvalidPlayerId { id: player, count })?;
        seat.rename(name)?;
        self.unsaved_changes = true;
        Ok(())
    }

    /// Replaces the table with `snapshot` and resumes at its turn pointer.
    ///
    /// The snapshot's round number and turn pointer are taken as is. The
    /// shoe is checked before anything is replaced, and if resuming fails the
    /// previous table is put back.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<(), GameError> {
        validate_state(&snapshot.shoe)?;
        let previous = self.checkpoint();
        self.shoe.restore(&snapshot.shoe)?;
        self.dealer = snapshot.dealer.clone();
        self.dealer.rescore(self.rules.ace_demotion);
        self.players = snapshot.players.clone();
        for p in &mut self.players {
            p.set_turn_active(false);
        }
        self.current_round = snapshot.round_number;
        self.current_player = snapshot.current_player_index;
        self.ever_saved = true;
        self.unsaved_changes = false;
        self.completed.clear();
        if let Err(e) = self.advance_from(snapshot.current_player_index) {
            warn!(error = %e, "restore failed, keeping the previous table");
            self.roll_back(previous);
            return Err(e);
        }
        Ok(())
    }

    /// Writes the table and `narrative` to `path`.
    pub fn save_to(&mut self, path: &Path, narrative: &[String]) -> Result<(), SessionError> {
        SessionSnapshot::capture(self, narrative).write_to(path)?;
        self.ever_saved = true;
        self.unsaved_changes = false;
        info!(path = %path.display(), round = self.current_round, "session saved");
        Ok(())
    }

    /// Loads `path` and returns its narrative log. On error the table is unchanged.
    pub fn load_from(&mut self, path: &Path) -> Result<Vec<String>, SessionError> {
        let snapshot = SessionSnapshot::read_from(path)?;
        self.restore(&snapshot)
            .map_err(|e| SessionError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        info!(path = %path.display(), round = self.current_round, "session loaded");
        Ok(snapshot.narrative)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            rng: self.rng.clone(),
            shoe: self.shoe.clone(),
            dealer: self.dealer.clone(),
            players: self.players.clone(),
            current_round: self.current_round,
            current_player: self.current_player,
            unsaved_changes: self.unsaved_changes,
            ever_saved: self.ever_saved,
            completed: self.completed.clone(),
        }
    }

    fn roll_back(&mut self, c: Checkpoint) {
        self.rng = c.rng;
        self.shoe = c.shoe;
        self.dealer = c.dealer;
        self.players = c.players;
        self.current_round = c.current_round;
        self.current_player = c.current_player;
        self.unsaved_changes = c.unsaved_changes;
        self.ever_saved = c.ever_saved;
        self.completed = c.completed;
    }

    fn check_turn(&self, player: usize) -> Result<(), GameError> {
        let seat = self.players.get(player).ok_or(GameError::InvalidPlayerId {
            id: player,
            count: self.players.len(),
        })?;
        if !seat.is_turn_active() {
            return Err(GameError::NotPlayersTurn {
                expected: self.current_player,
                actual: player,
            });
        }
        Ok(())
    }

    fn deal_to(&mut self, seat: Seat) -> Result<Option<HandStatus>, GameError> {
        let card = self.shoe.draw(&mut self.host)?;
        let rule = self.rules.ace_demotion;
        let participant = match seat {
            Seat::Dealer => &mut self.dealer,
            Seat::Player(i) => &mut self.players[i],
        };
        participant.receive_card(card);
        debug!(participant = participant.name(), %card, "card dealt");
        self.host.card_dealt(participant, card);
        let transition = participant.evaluate_hand(rule);
        match transition {
            Some(HandStatus::Bust) => self.host.participant_bust(participant),
            Some(HandStatus::Blackjack) => self.host.participant_blackjack(participant),
            _ => {}
        }
        Ok(transition)
    }

    fn deal_initial_cards(&mut self) -> Result<(), GameError> {
        for i in 0..self.players.len() {
            for _ in 0..2 {
                self.deal_to(Seat::Player(i))?;
            }
        }
        for _ in 0..2 {
            self.deal_to(Seat::Dealer)?;
        }
        self.current_player = 0;
        Ok(())
    }

    /// Activates the first seat from `start` that can still act. When none
    /// can, the dealer plays, the round resolves and the next round is dealt,
    /// repeating until a seat is playable.
    fn advance_from(&mut self, start: usize) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Ok(());
        }
        let mut start = start;
        loop {
            let next = (start..self.players.len()).find(|&i| !self.players[i].is_finished());
            if let Some(i) = next {
                self.current_player = i;
                self.players[i].set_turn_active(true);
                return Ok(());
            }
            self.current_player = self.players.len();
            self.dealer_turn()?;
            self.resolve_round();
            self.begin_next_round()?;
            start = 0;
        }
    }

    fn dealer_turn(&mut self) -> Result<(), GameError> {
        if self.dealer.has_blackjack() || self.players.iter().all(|p| p.is_bust()) {
            return Ok(());
        }
        self.dealer.set_turn_active(true);
        while self.dealer.score() < DEALER_STANDS_ON {
            self.deal_to(Seat::Dealer)?;
        }
        let score = self.dealer.score();
        if self.rules.dealer_extension
            && score > DEALER_STANDS_ON
            && score < BLACKJACK
            && self.rng.random_range(0..DEALER_EXTENSION_ODDS) == 0
        {
            debug!(score, "dealer keeps drawing against leading players");
            let mut drawn = 0;
            while self
                .players
                .iter()
                .any(|p| !p.is_bust() && p.score() > self.dealer.score())
            {
                if drawn == DEALER_EXTENSION_LIMIT {
                    warn!(drawn, "dealer extension stopped at its draw limit");
                    break;
                }
                self.deal_to(Seat::Dealer)?;
                drawn += 1;
            }
        }
        self.dealer.set_turn_active(false);
        Ok(())
    }

    fn resolve_round(&mut self) {
        let mut lines = vec![round_banner(self.current_round)];
        let mut results = Vec::with_capacity(self.players.len());
        for (i, player) in self.players.iter_mut().enumerate() {
            let outcome = if player.is_bust() {
                Outcome::Loss
            } else {
                let (outcome, line) = settle(player, &self.dealer);
                match outcome {
                    Outcome::Win => player.record_win(),
                    Outcome::Loss => player.record_loss(),
                    Outcome::Push => {}
                }
                lines.push(line);
                outcome
            };
            results.push(SeatResult {
                player_id: i,
                name: player.name().to_string(),
                score: player.score(),
                bust: player.is_bust(),
                blackjack: player.has_blackjack(),
                outcome,
            });
        }
        info!(
            round = self.current_round,
            dealer_score = self.dealer.score(),
            settled = lines.len() - 1,
            "round resolved"
        );
        self.host.round_result(&lines);
        self.completed.push(RoundSummary {
            round: self.current_round,
            dealer_score: self.dealer.score(),
            dealer_bust: self.dealer.is_bust(),
            dealer_blackjack: self.dealer.has_blackjack(),
            results,
            lines,
        });
    }

    fn begin_next_round(&mut self) -> Result<(), GameError> {
        if self.shoe.pending_reshuffle() {
            self.shoe.shuffle();
            info!(round = self.current_round + 1, "shoe reshuffled before round");
        }
        self.current_round += 1;
        self.dealer.reset();
        for p in &mut self.players {
            p.reset();
        }
        self.host.round_reset(self.current_round);
        self.deal_initial_cards()
    }
}
