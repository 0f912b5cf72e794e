use super::deck::Deck;
use super::evaluator::{evaluate_holdem, Category, Evaluation};
use super::hand::{CommunityCards, HoleCards};
use crate::engine::{check_roster, PlayerId, SetupError};
use crate::rng::{resolve_seed, stream};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Table settings. Blinds default to zero: hands open with no forced bets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokerConfig {
    pub starting_chips: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub seed: Option<u64>,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self { starting_chips: 1000, small_blind: 0, big_blind: 0, seed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    /// No chips when the hand was dealt.
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Round {
    /// Community cards a betting round is played with; `None` once the hand is over.
    pub const fn community_len(self) -> Option<usize> {
        match self {
            Round::PreFlop => Some(0),
            Round::Flop => Some(3),
            Round::Turn => Some(4),
            Round::River => Some(5),
            Round::Showdown => None,
        }
    }
}

/// A betting decision. `Bet` and `Raise` carry the player's total for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum PokerAction {
    Fold,
    Check,
    Call,
    Bet(u64),
    Raise(u64),
}

impl PokerAction {
    /// Build an action from a loose `(kind, amount)` pair as sent by a client.
    pub fn from_parts(kind: &str, amount: Option<u64>) -> Result<Self, PokerError> {
        let k = kind.trim().to_ascii_lowercase();
        match (k.as_str(), amount) {
            ("fold", _) => Ok(PokerAction::Fold),
            ("check", _) => Ok(PokerAction::Check),
            ("call", _) => Ok(PokerAction::Call),
            ("bet", Some(n)) => Ok(PokerAction::Bet(n)),
            ("raise", Some(n)) => Ok(PokerAction::Raise(n)),
            ("bet" | "raise", None) => Err(PokerError::MissingAmount(k)),
            _ => Err(PokerError::UnknownAction(kind.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PokerAction::Fold => "fold",
            PokerAction::Check => "check",
            PokerAction::Call => "call",
            PokerAction::Bet(_) => "bet",
            PokerAction::Raise(_) => "raise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HistoryVerb {
    Blind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Win,
    Split,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub seat: usize,
    pub verb: HistoryVerb,
    pub amount: Option<u64>,
    pub round: Round,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PokerError {
    #[error("the hand is over")]
    HandOver,
    #[error("the current hand has not finished")]
    HandInProgress,
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
    #[error("player has folded")]
    PlayerFolded,
    #[error("player is all-in")]
    PlayerAllIn,
    #[error("player is sitting out this hand")]
    PlayerOut,
    #[error("cannot check while facing {to_call} to call")]
    CannotCheck { to_call: u64 },
    #[error("betting is not allowed when facing a bet")]
    BetNotAllowed,
    #[error("raising is not allowed without a bet")]
    RaiseNotAllowed,
    #[error("amount must be positive")]
    ZeroAmount,
    #[error("amount too small: min {min}, got {got}")]
    AmountTooSmall { min: u64, got: u64 },
    #[error("amount too large: max {max}, got {got}")]
    AmountTooLarge { max: u64, got: u64 },
    #[error("target must exceed current bet: current {current}, target {target}")]
    TargetTooLow { current: u64, target: u64 },
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("action '{0}' needs an amount")]
    MissingAmount(String),
    #[error("need at least two players with chips to deal a hand")]
    NotEnoughPlayers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokerPlayer {
    pub(crate) id: PlayerId,
    pub(crate) chips: u64,
    pub(crate) bet: u64,
    pub(crate) contributed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) acted: bool,
}

impl PokerPlayer {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Chips behind, not counting anything already in the pot.
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips put in during the current betting round.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Chips put in during the whole hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    fn is_live(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }
}

/// Snapshot of one Hold'em hand. Every transition returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokerState {
    pub(crate) config: PokerConfig,
    pub(crate) players: Vec<PokerPlayer>,
    pub(crate) deck: Deck,
    pub(crate) community: CommunityCards,
    pub(crate) pot: u64,
    pub(crate) current_bet: u64,
    pub(crate) min_raise: u64,
    pub(crate) round: Round,
    pub(crate) dealer: usize,
    pub(crate) current: usize,
    pub(crate) hand_number: u64,
    pub(crate) winners: Vec<usize>,
    pub(crate) payouts: Vec<u64>,
    pub(crate) categories: Vec<Option<Category>>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) seed: u64,
    pub(crate) rng_step: u64,
}

impl PokerState {
    /// Seat the players with the configured starting chips and deal the first hand.
    pub fn new(players: &[PlayerId], config: PokerConfig) -> Result<Self, SetupError> {
        let stacks: Vec<(PlayerId, u64)> =
            players.iter().map(|id| (id.clone(), config.starting_chips)).collect();
        Self::from_stacks(&stacks, config)
    }

    /// Seat players with chip counts carried over from an earlier hand and deal.
    pub fn from_stacks(stacks: &[(PlayerId, u64)], config: PokerConfig) -> Result<Self, SetupError> {
        check_roster(stacks.iter().map(|(id, _)| id), MIN_PLAYERS, MAX_PLAYERS)?;
        if config.small_blind > config.big_blind {
            return Err(SetupError::InvalidConfig(format!(
                "small blind {} exceeds big blind {}",
                config.small_blind, config.big_blind
            )));
        }
        let n = stacks.len();
        let players = stacks
            .iter()
            .map(|(id, chips)| PokerPlayer {
                id: id.clone(),
                chips: *chips,
                bet: 0,
                contributed: 0,
                status: PlayerStatus::Out,
                hole: None,
                acted: false,
            })
            .collect();
        let seed = resolve_seed(config.seed);
        let table = Self {
            min_raise: config.big_blind.max(1),
            config,
            players,
            deck: Deck::standard(),
            community: CommunityCards::default(),
            pot: 0,
            current_bet: 0,
            round: Round::Showdown,
            // The first deal rotates the button onto seat 0.
            dealer: n - 1,
            current: 0,
            hand_number: 0,
            winners: Vec::new(),
            payouts: vec![0; n],
            categories: vec![None; n],
            history: Vec::new(),
            seed,
            rng_step: 0,
        };
        table.start_hand().map_err(|e| SetupError::InvalidConfig(e.to_string()))
    }

    /// Shuffle a fresh deck, move the button and deal two cards to every funded seat.
    ///
    /// Chips carry over from `self`; everything else about the previous hand is reset.
    pub fn start_hand(&self) -> Result<Self, PokerError> {
        if self.players.iter().filter(|p| p.chips > 0).count() < MIN_PLAYERS {
            return Err(PokerError::NotEnoughPlayers);
        }
        let n = self.players.len();
        let mut next = self.clone();
        next.hand_number += 1;
        next.rng_step += 1;
        next.deck = Deck::standard();
        next.deck.shuffle_with(&mut stream(next.seed, next.rng_step));
        next.community = CommunityCards::default();
        next.pot = 0;
        next.current_bet = 0;
        next.min_raise = next.min_bet();
        next.round = Round::PreFlop;
        next.winners.clear();
        next.payouts = vec![0; n];
        next.categories = vec![None; n];
        next.history.clear();

        for p in &mut next.players {
            p.bet = 0;
            p.contributed = 0;
            p.acted = false;
            p.hole = None;
            p.status = if p.chips > 0 { PlayerStatus::Active } else { PlayerStatus::Out };
        }
        next.dealer = next.next_seat_where(next.dealer, |p| p.chips > 0);
        for p in next.players.iter_mut().filter(|p| p.status == PlayerStatus::Active) {
            if let (Some(a), Some(b)) = (next.deck.draw(), next.deck.draw()) {
                p.hole = HoleCards::try_new(a, b).ok();
            }
        }
        next.current = next.next_seat_where(next.dealer, |p| p.status == PlayerStatus::Active);
        next.post_blinds();
        info!(
            "hand {} dealt to {} players, dealer seat {}",
            next.hand_number,
            next.active_count(),
            next.dealer
        );
        if next.betting_complete() {
            next.advance_round();
        }
        Ok(next)
    }

    /// Deal the following hand once this one has been settled.
    pub fn next_hand(&self) -> Result<Self, PokerError> {
        if !self.is_hand_over() {
            return Err(PokerError::HandInProgress);
        }
        self.start_hand()
    }

    fn post_blinds(&mut self) {
        if self.config.big_blind == 0 {
            return;
        }
        let is_active = |p: &PokerPlayer| p.status == PlayerStatus::Active;
        let (sb, bb) = if self.active_count() == 2 {
            (self.dealer, self.next_seat_where(self.dealer, is_active))
        } else {
            let sb = self.next_seat_where(self.dealer, is_active);
            (sb, self.next_seat_where(sb, is_active))
        };
        let sb_paid = self.commit(sb, self.config.small_blind);
        self.record(sb, HistoryVerb::Blind, Some(sb_paid));
        let bb_paid = self.commit(bb, self.config.big_blind);
        self.record(bb, HistoryVerb::Blind, Some(bb_paid));
        self.current_bet = sb_paid.max(bb_paid);
        self.current = if self.active_count() == 2 && is_active(&self.players[sb]) {
            sb
        } else {
            self.next_seat_where(bb, is_active)
        };
    }

    pub fn config(&self) -> &PokerConfig {
        &self.config
    }

    pub fn players(&self) -> &[PokerPlayer] {
        &self.players
    }

    pub fn community(&self) -> &CommunityCards {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Smallest legal raise increment.
    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Seat due to act. Meaningless once the hand is over.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// Seats that were paid at the end of the last hand.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Chips paid to each seat at the end of the last hand.
    pub fn payouts(&self) -> &[u64] {
        &self.payouts
    }

    /// Showdown category per seat; `None` for folded seats or uncontested pots.
    pub fn categories(&self) -> &[Option<Category>] {
        &self.categories
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Chips in stacks plus the pot; constant through a hand.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| p.chips).sum::<u64>() + self.pot
    }

    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn is_hand_over(&self) -> bool {
        self.round == Round::Showdown
    }

    /// At most one player still has chips.
    pub fn is_match_over(&self) -> bool {
        self.is_hand_over() && self.players.iter().filter(|p| p.chips > 0).count() < MIN_PLAYERS
    }

    pub fn current_player(&self) -> Option<&str> {
        (!self.is_hand_over()).then(|| self.players[self.current].id.as_str())
    }

    /// The sole winner of a finished hand. Split pots have none.
    pub fn winner(&self) -> Option<&str> {
        match (self.is_hand_over(), self.winners.as_slice()) {
            (true, [seat]) => Some(self.players[*seat].id.as_str()),
            _ => None,
        }
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        if self.is_hand_over() {
            return 0;
        }
        self.current_bet.saturating_sub(self.players[seat].bet)
    }

    pub fn min_bet(&self) -> u64 {
        self.config.big_blind.max(1)
    }

    /// Largest round total `seat` can reach: its bet plus everything behind.
    pub fn max_total(&self, seat: usize) -> u64 {
        let p = &self.players[seat];
        p.bet + p.chips
    }

    /// Smallest full raise target.
    pub fn min_raise_to(&self) -> u64 {
        self.current_bet + self.min_raise
    }

    /// Apply one betting action for `player`, returning the next snapshot.
    ///
    /// The action is fully validated against `self` before anything is copied.
    pub fn act(&self, player: &str, action: PokerAction) -> Result<Self, PokerError> {
        if self.is_hand_over() {
            return Err(PokerError::HandOver);
        }
        let seat = self.seat_of(player).ok_or_else(|| PokerError::UnknownPlayer(player.into()))?;
        match self.players[seat].status {
            PlayerStatus::Active => {}
            PlayerStatus::Folded => return Err(PokerError::PlayerFolded),
            PlayerStatus::AllIn => return Err(PokerError::PlayerAllIn),
            PlayerStatus::Out => return Err(PokerError::PlayerOut),
        }
        if seat != self.current {
            return Err(PokerError::NotYourTurn(player.into()));
        }
        self.validate(seat, action)?;

        let mut next = self.clone();
        next.apply(seat, action);
        next.settle(seat);
        Ok(next)
    }

    fn validate(&self, seat: usize, action: PokerAction) -> Result<(), PokerError> {
        let to_call = self.to_call(seat);
        let max_total = self.max_total(seat);
        match action {
            PokerAction::Fold | PokerAction::Call => Ok(()),
            PokerAction::Check if to_call > 0 => Err(PokerError::CannotCheck { to_call }),
            PokerAction::Check => Ok(()),
            PokerAction::Bet(_) if self.current_bet > 0 => Err(PokerError::BetNotAllowed),
            PokerAction::Raise(_) if self.current_bet == 0 => Err(PokerError::RaiseNotAllowed),
            PokerAction::Bet(0) | PokerAction::Raise(0) => Err(PokerError::ZeroAmount),
            PokerAction::Bet(amount) => check_target(amount, self.min_bet(), max_total),
            PokerAction::Raise(amount) if amount <= self.current_bet => {
                Err(PokerError::TargetTooLow { current: self.current_bet, target: amount })
            }
            PokerAction::Raise(amount) => check_target(amount, self.min_raise_to(), max_total),
        }
    }

    fn apply(&mut self, seat: usize, action: PokerAction) {
        match action {
            PokerAction::Fold => {
                self.players[seat].status = PlayerStatus::Folded;
                self.record(seat, HistoryVerb::Fold, None);
            }
            PokerAction::Check => self.record(seat, HistoryVerb::Check, None),
            PokerAction::Call => {
                let to_call = self.to_call(seat);
                if to_call == 0 {
                    self.record(seat, HistoryVerb::Check, None);
                } else {
                    let paid = self.commit(seat, to_call);
                    self.record(seat, HistoryVerb::Call, Some(paid));
                }
            }
            PokerAction::Bet(target) | PokerAction::Raise(target) => {
                let need = target.saturating_sub(self.players[seat].bet);
                self.commit(seat, need);
                let new_bet = self.players[seat].bet;
                if new_bet > self.current_bet {
                    let raise_by = new_bet - self.current_bet;
                    // A short all-in raise does not reopen the action.
                    if raise_by >= self.min_raise {
                        self.min_raise = raise_by;
                        for (i, p) in self.players.iter_mut().enumerate() {
                            if i != seat {
                                p.acted = false;
                            }
                        }
                    }
                    self.current_bet = new_bet;
                }
                let verb = if matches!(action, PokerAction::Bet(_)) {
                    HistoryVerb::Bet
                } else {
                    HistoryVerb::Raise
                };
                self.record(seat, verb, Some(new_bet));
            }
        }
        self.players[seat].acted = true;
        debug!("hand {} seat {} {:?}, pot {}", self.hand_number, seat, action, self.pot);
    }

    /// Move up to `amount` chips from `seat` into the pot; returns what was paid.
    fn commit(&mut self, seat: usize, amount: u64) -> u64 {
        let p = &mut self.players[seat];
        let pay = p.chips.min(amount);
        p.chips -= pay;
        p.bet += pay;
        p.contributed += pay;
        if p.chips == 0 && p.status == PlayerStatus::Active {
            p.status = PlayerStatus::AllIn;
        }
        self.pot += pay;
        pay
    }

    fn settle(&mut self, actor: usize) {
        let live: Vec<usize> = (0..self.players.len()).filter(|&i| self.players[i].is_live()).collect();
        if let [only] = live.as_slice() {
            self.award_uncontested(*only);
            return;
        }
        if self.betting_complete() {
            self.advance_round();
        } else {
            self.current = self.next_seat_where(actor, |p| p.status == PlayerStatus::Active);
        }
    }

    /// Every seat that can still bet has acted and matched the current bet.
    fn betting_complete(&self) -> bool {
        let active: Vec<&PokerPlayer> =
            self.players.iter().filter(|p| p.status == PlayerStatus::Active).collect();
        match active.as_slice() {
            [] => true,
            [only] => only.bet >= self.current_bet,
            many => many.iter().all(|p| p.acted && p.bet == self.current_bet),
        }
    }

    fn advance_round(&mut self) {
        loop {
            for p in &mut self.players {
                p.bet = 0;
                p.acted = false;
            }
            self.current_bet = 0;
            self.min_raise = self.min_bet();
            let (round, deal) = match self.round {
                Round::PreFlop => (Round::Flop, 3),
                Round::Flop => (Round::Turn, 1),
                Round::Turn => (Round::River, 1),
                Round::River | Round::Showdown => {
                    self.showdown();
                    return;
                }
            };
            let cards = self.deck.draw_n(deal);
            self.community.extend(cards);
            self.round = round;
            debug!("hand {} {:?}: {:?}", self.hand_number, round, self.community.as_slice());
            // With fewer than two seats able to bet, keep dealing to showdown.
            if self.active_count() >= 2 {
                self.current = self.next_seat_where(self.dealer, |p| p.status == PlayerStatus::Active);
                return;
            }
        }
    }

    fn award_uncontested(&mut self, seat: usize) {
        let amount = self.pot;
        self.players[seat].chips += amount;
        for p in &mut self.players {
            p.bet = 0;
        }
        self.pot = 0;
        self.payouts = vec![0; self.players.len()];
        self.payouts[seat] = amount;
        self.winners = vec![seat];
        self.round = Round::Showdown;
        self.record(seat, HistoryVerb::Win, Some(amount));
        info!("hand {} won uncontested by seat {} ({})", self.hand_number, seat, amount);
    }

    /// Evaluate live hands and pay each contribution level (side pot) to its best hand.
    ///
    /// Tied winners split a level evenly. Odd chips go one each to the tied winners in
    /// seat order starting left of the dealer, so no chip is ever dropped.
    pub(crate) fn showdown(&mut self) {
        self.round = Round::Showdown;
        let n = self.players.len();
        for p in &mut self.players {
            p.bet = 0;
        }
        let contenders: Vec<usize> =
            (0..n).filter(|&i| self.players[i].is_live() && self.players[i].hole.is_some()).collect();
        let mut evals: Vec<Option<Evaluation>> = vec![None; n];
        for &i in &contenders {
            if let Some(hole) = self.players[i].hole {
                if let Ok(ev) = evaluate_holdem(&hole, &self.community) {
                    self.categories[i] = Some(ev.category);
                    evals[i] = Some(ev);
                }
            }
        }

        let mut levels: Vec<u64> =
            self.players.iter().map(|p| p.contributed).filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut payouts = vec![0u64; n];
        let mut prev = 0u64;
        for lvl in levels {
            let contributors: Vec<usize> =
                (0..n).filter(|&i| self.players[i].contributed >= lvl).collect();
            let amount = (lvl - prev) * contributors.len() as u64;
            prev = lvl;
            if amount == 0 {
                continue;
            }
            let eligible: Vec<usize> =
                contenders.iter().copied().filter(|&i| self.players[i].contributed >= lvl).collect();
            // A level nobody live reached (folded overbet) goes to the best live hand.
            let pool = match (eligible.is_empty(), contenders.is_empty()) {
                (false, _) => eligible,
                (true, false) => contenders.clone(),
                (true, true) => contributors,
            };
            let best = pool.iter().map(|&i| evals[i]).max().flatten();
            let level_winners: Vec<usize> =
                pool.iter().copied().filter(|&i| evals[i] == best).collect();
            self.split(amount, &level_winners, &mut payouts);
        }

        for (i, &amt) in payouts.iter().enumerate() {
            if amt == 0 {
                continue;
            }
            self.players[i].chips += amt;
            let verb = if payouts.iter().filter(|&&a| a > 0).count() > 1 {
                HistoryVerb::Split
            } else {
                HistoryVerb::Win
            };
            self.record(i, verb, Some(amt));
        }
        let start = (self.dealer + 1) % n;
        let mut winners: Vec<usize> = (0..n).filter(|&i| payouts[i] > 0).collect();
        winners.sort_by_key(|&i| (i + n - start) % n);
        self.pot = 0;
        self.current_bet = 0;
        self.payouts = payouts;
        self.winners = winners;
        info!("hand {} showdown, winners {:?}", self.hand_number, self.winners);
    }

    fn split(&self, amount: u64, winners: &[usize], payouts: &mut [u64]) {
        if winners.is_empty() {
            return;
        }
        let n = self.players.len();
        let start = (self.dealer + 1) % n;
        let mut ordered = winners.to_vec();
        ordered.sort_by_key(|&i| (i + n - start) % n);
        let share = amount / ordered.len() as u64;
        let remainder = (amount % ordered.len() as u64) as usize;
        for (k, &i) in ordered.iter().enumerate() {
            payouts[i] += share + u64::from(k < remainder);
        }
    }

    fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.status == PlayerStatus::Active).count()
    }

    /// First seat after `start` (wrapping) that satisfies `pred`; `start` if none does.
    fn next_seat_where(&self, start: usize, pred: impl Fn(&PokerPlayer) -> bool) -> usize {
        let n = self.players.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| pred(&self.players[i])).unwrap_or(start)
    }

    fn record(&mut self, seat: usize, verb: HistoryVerb, amount: Option<u64>) {
        self.history.push(HistoryEntry { seat, verb, amount, round: self.round });
    }
}

fn check_target(amount: u64, min: u64, max_total: u64) -> Result<(), PokerError> {
    if amount > max_total {
        return Err(PokerError::AmountTooLarge { max: max_total, got: amount });
    }
    // Going all-in for less than the minimum is always allowed.
    if amount < min && amount < max_total {
        return Err(PokerError::AmountTooSmall { min, got: amount });
    }
    Ok(())
}
