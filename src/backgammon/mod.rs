//! Backgammon: board positions, dice, the doubling cube and the move state machine.

pub mod board;
pub mod game;

pub use board::{Board, BoardError, Location, Side};
pub use game::{
    BackgammonConfig, BackgammonError, BackgammonMove, BackgammonState, CheckerMove, Cube, Dice,
    Phase,
};

use crate::engine::{ContractError, GameKind, MoveOutcome, PlayerId, Rules, SetupError};
use log::trace;

/// `Rules` adapter for [`BackgammonState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgammonRules;

impl Rules for BackgammonRules {
    type State = BackgammonState;
    type Move = BackgammonMove;
    type Config = BackgammonConfig;

    const KIND: GameKind = GameKind::Backgammon;

    fn construct(
        &self,
        players: &[PlayerId],
        config: BackgammonConfig,
    ) -> Result<BackgammonState, SetupError> {
        BackgammonState::new(players, config)
    }

    /// On the move that ends the game, `score` is the points won, cube included.
    fn apply_move(
        &self,
        state: &BackgammonState,
        player: &str,
        mv: &BackgammonMove,
    ) -> Result<MoveOutcome<BackgammonState>, ContractError> {
        if state.is_over() {
            return Err(ContractError::GameOver);
        }
        match state.apply(player, mv) {
            Ok(next) => {
                let score = next.is_over().then(|| i64::from(next.result_points()));
                Ok(MoveOutcome::accepted(next, score))
            }
            Err(BackgammonError::GameOver) => Err(ContractError::GameOver),
            Err(e) => {
                trace!("backgammon: rejected {:?} from {}: {}", mv, player, e);
                Ok(MoveOutcome::rejected(state.clone(), e))
            }
        }
    }

    fn is_game_over(&self, state: &BackgammonState) -> bool {
        state.is_over()
    }

    fn winner(&self, state: &BackgammonState) -> Option<PlayerId> {
        state.winner().map(|side| state.player(side).to_string())
    }

    fn current_player(&self, state: &BackgammonState) -> Option<PlayerId> {
        state.to_act().map(|side| state.player(side).to_string())
    }
}
