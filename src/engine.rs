// The move/state boundary shared by all three games. Each game implements
// `Rules` over its own state and move types; `Tabletop` dispatches the tagged
// `GameState`/`GameMove` values to the matching rules so a caller can drive any
// game without knowing which one it is.

use crate::backgammon::{BackgammonMove, BackgammonRules, BackgammonState};
use crate::poker::{PokerAction, PokerRules, PokerState};
use crate::words::{Dictionary, WordMove, WordRules, WordsState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Players are owned by the session layer and referenced here by id.
pub type PlayerId = String;

/// Result of proposing one move.
///
/// A rejected move carries the untouched input state and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome<S> {
    pub valid: bool,
    pub state: S,
    pub reason: Option<String>,
    pub score: Option<i64>,
}

impl<S> MoveOutcome<S> {
    pub fn accepted(state: S, score: Option<i64>) -> Self {
        Self { valid: true, state, reason: None, score }
    }

    pub fn rejected(state: S, reason: impl fmt::Display) -> Self {
        Self { valid: false, state, reason: Some(reason.to_string()), score: None }
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> MoveOutcome<T> {
        MoveOutcome { valid: self.valid, state: f(self.state), reason: self.reason, score: self.score }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupError {
    #[error("expected {min}..={max} players, got {got}")]
    PlayerCount { min: usize, max: usize, got: usize },
    #[error("player '{0}' is seated twice")]
    DuplicatePlayer(String),
    #[error("player ids must not be empty")]
    EmptyPlayerId,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Caller contract violations. These are bugs in the caller, not illegal moves.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContractError {
    #[error("the game is already over")]
    GameOver,
    #[error("move for {got} applied to a {expected} game")]
    KindMismatch { expected: GameKind, got: GameKind },
    #[error("unknown game kind '{0}'")]
    UnknownGameKind(String),
    #[error("no player is due to act")]
    NobodyToAct,
}

pub(crate) fn check_roster<'a>(
    ids: impl IntoIterator<Item = &'a PlayerId>,
    min: usize,
    max: usize,
) -> Result<(), SetupError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(SetupError::EmptyPlayerId);
        }
        if !seen.insert(id.as_str()) {
            return Err(SetupError::DuplicatePlayer(id.clone()));
        }
    }
    if !(min..=max).contains(&seen.len()) {
        return Err(SetupError::PlayerCount { min, max, got: seen.len() });
    }
    Ok(())
}

/// One game's rules over its own state and move types.
///
/// Implementations are pure: `apply_move` never mutates its input and either
/// returns a fully consistent new state or the input unchanged.
pub trait Rules {
    type State: Clone;
    type Move;
    type Config: Default;

    const KIND: GameKind;

    fn construct(&self, players: &[PlayerId], config: Self::Config) -> Result<Self::State, SetupError>;

    /// Illegal or malformed moves come back as `valid: false`. Only contract
    /// violations, such as moving in a finished game, are `Err`.
    fn apply_move(
        &self,
        state: &Self::State,
        player: &str,
        mv: &Self::Move,
    ) -> Result<MoveOutcome<Self::State>, ContractError>;

    /// Read-only copy, safe to hand to a serializer.
    fn snapshot(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    fn is_game_over(&self, state: &Self::State) -> bool;

    fn winner(&self, state: &Self::State) -> Option<PlayerId>;

    fn current_player(&self, state: &Self::State) -> Option<PlayerId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Poker,
    Backgammon,
    Words,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Poker, GameKind::Backgammon, GameKind::Words];

    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Poker => "poker",
            GameKind::Backgammon => "backgammon",
            GameKind::Words => "words",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = ContractError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poker" | "holdem" => Ok(GameKind::Poker),
            "backgammon" => Ok(GameKind::Backgammon),
            "words" | "word" | "scrabble" => Ok(GameKind::Words),
            _ => Err(ContractError::UnknownGameKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", content = "state", rename_all = "snake_case")]
pub enum GameState {
    Poker(PokerState),
    Backgammon(BackgammonState),
    Words(WordsState),
}

impl GameState {
    pub fn kind(&self) -> GameKind {
        match self {
            GameState::Poker(_) => GameKind::Poker,
            GameState::Backgammon(_) => GameKind::Backgammon,
            GameState::Words(_) => GameKind::Words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", content = "move", rename_all = "snake_case")]
pub enum GameMove {
    Poker(PokerAction),
    Backgammon(BackgammonMove),
    Words(WordMove),
}

impl GameMove {
    pub fn kind(&self) -> GameKind {
        match self {
            GameMove::Poker(_) => GameKind::Poker,
            GameMove::Backgammon(_) => GameKind::Backgammon,
            GameMove::Words(_) => GameKind::Words,
        }
    }
}

/// Dispatches tagged states and moves to the matching game's rules.
#[derive(Debug, Clone)]
pub struct Tabletop {
    poker: PokerRules,
    backgammon: BackgammonRules,
    words: WordRules,
}

impl Tabletop {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { poker: PokerRules, backgammon: BackgammonRules, words: WordRules::new(dictionary) }
    }

    /// A table whose word game uses the bundled word list.
    pub fn with_builtin_dictionary() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }

    pub fn poker(&self) -> &PokerRules {
        &self.poker
    }

    pub fn backgammon(&self) -> &BackgammonRules {
        &self.backgammon
    }

    pub fn words(&self) -> &WordRules {
        &self.words
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        self.words.dictionary()
    }

    /// Start a game of `kind` with its default configuration.
    pub fn construct(&self, kind: GameKind, players: &[PlayerId]) -> Result<GameState, SetupError> {
        Ok(match kind {
            GameKind::Poker => GameState::Poker(self.poker.construct(players, Default::default())?),
            GameKind::Backgammon => {
                GameState::Backgammon(self.backgammon.construct(players, Default::default())?)
            }
            GameKind::Words => GameState::Words(self.words.construct(players, Default::default())?),
        })
    }

    pub fn apply_move(
        &self,
        state: &GameState,
        player: &str,
        mv: &GameMove,
    ) -> Result<MoveOutcome<GameState>, ContractError> {
        match (state, mv) {
            (GameState::Poker(s), GameMove::Poker(m)) => {
                Ok(self.poker.apply_move(s, player, m)?.map(GameState::Poker))
            }
            (GameState::Backgammon(s), GameMove::Backgammon(m)) => {
                Ok(self.backgammon.apply_move(s, player, m)?.map(GameState::Backgammon))
            }
            (GameState::Words(s), GameMove::Words(m)) => {
                Ok(self.words.apply_move(s, player, m)?.map(GameState::Words))
            }
            (s, m) => Err(ContractError::KindMismatch { expected: s.kind(), got: m.kind() }),
        }
    }

    pub fn is_game_over(&self, state: &GameState) -> bool {
        match state {
            GameState::Poker(s) => self.poker.is_game_over(s),
            GameState::Backgammon(s) => self.backgammon.is_game_over(s),
            GameState::Words(s) => self.words.is_game_over(s),
        }
    }

    pub fn winner(&self, state: &GameState) -> Option<PlayerId> {
        match state {
            GameState::Poker(s) => self.poker.winner(s),
            GameState::Backgammon(s) => self.backgammon.winner(s),
            GameState::Words(s) => self.words.winner(s),
        }
    }

    pub fn current_player(&self, state: &GameState) -> Option<PlayerId> {
        match state {
            GameState::Poker(s) => self.poker.current_player(s),
            GameState::Backgammon(s) => self.backgammon.current_player(s),
            GameState::Words(s) => self.words.current_player(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn roster_rules() {
        assert_eq!(check_roster(&ids(&["a", "b"]), 2, 4), Ok(()));
        assert_eq!(
            check_roster(&ids(&["a"]), 2, 4),
            Err(SetupError::PlayerCount { min: 2, max: 4, got: 1 })
        );
        assert_eq!(
            check_roster(&ids(&["a", "a"]), 2, 4),
            Err(SetupError::DuplicatePlayer("a".into()))
        );
        assert_eq!(check_roster(&ids(&["a", ""]), 2, 4), Err(SetupError::EmptyPlayerId));
    }

    #[test]
    fn game_kind_parses_aliases() {
        assert_eq!("Holdem".parse::<GameKind>(), Ok(GameKind::Poker));
        assert_eq!(" scrabble ".parse::<GameKind>(), Ok(GameKind::Words));
        assert_eq!(
            "chess".parse::<GameKind>(),
            Err(ContractError::UnknownGameKind("chess".into()))
        );
        for kind in GameKind::ALL {
            assert_eq!(kind.to_string().parse::<GameKind>(), Ok(kind));
        }
    }

    #[test]
    fn mismatched_move_is_a_contract_error() {
        let table = Tabletop::with_builtin_dictionary();
        let state = table.construct(GameKind::Backgammon, &ids(&["w", "b"])).unwrap();
        let err = table.apply_move(&state, "w", &GameMove::Poker(PokerAction::Fold)).unwrap_err();
        assert_eq!(
            err,
            ContractError::KindMismatch { expected: GameKind::Backgammon, got: GameKind::Poker }
        );
    }

    #[test]
    fn rejected_outcome_keeps_state() {
        let out = MoveOutcome::rejected(7u8, "nope");
        assert!(!out.valid);
        assert_eq!(out.state, 7);
        assert_eq!(out.reason.as_deref(), Some("nope"));
        assert_eq!(out.map(u16::from).state, 7u16);
    }
}
