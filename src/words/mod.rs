//! The word-placement game: tiles, the premium board, the dictionary and the turn state machine.

pub mod board;
pub mod dictionary;
pub mod game;
pub mod tiles;

pub use board::{Board, Direction, PlacedTile, Premium};
pub use dictionary::{Dictionary, DictionaryError};
pub use game::{
    PlayPreview, WordError, WordMove, WordPlacement, WordPlayer, WordsConfig, WordsState,
};
pub use tiles::Tile;

use crate::engine::{ContractError, GameKind, MoveOutcome, PlayerId, Rules, SetupError};
use log::trace;
use std::sync::Arc;

/// `Rules` adapter for [`WordsState`]. States are plain data, so the dictionary lives here.
#[derive(Debug, Clone)]
pub struct WordRules {
    dictionary: Arc<Dictionary>,
}

impl WordRules {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }
}

impl Default for WordRules {
    fn default() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }
}

impl Rules for WordRules {
    type State = WordsState;
    type Move = WordMove;
    type Config = WordsConfig;

    const KIND: GameKind = GameKind::Words;

    fn construct(&self, players: &[PlayerId], config: WordsConfig) -> Result<WordsState, SetupError> {
        WordsState::new(players, config)
    }

    /// `score` is the points a placement earned.
    fn apply_move(
        &self,
        state: &WordsState,
        player: &str,
        mv: &WordMove,
    ) -> Result<MoveOutcome<WordsState>, ContractError> {
        match state.apply(&self.dictionary, player, mv) {
            Ok((next, points)) => Ok(MoveOutcome::accepted(next, points.map(i64::from))),
            Err(WordError::GameOver) => Err(ContractError::GameOver),
            Err(e) => {
                trace!("words: rejected move from {}: {}", player, e);
                Ok(MoveOutcome::rejected(state.clone(), e))
            }
        }
    }

    fn is_game_over(&self, state: &WordsState) -> bool {
        state.is_over()
    }

    fn winner(&self, state: &WordsState) -> Option<PlayerId> {
        state.winner().map(str::to_string)
    }

    fn current_player(&self, state: &WordsState) -> Option<PlayerId> {
        state.current_player().map(str::to_string)
    }
}
