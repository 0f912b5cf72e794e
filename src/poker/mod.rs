//! Texas Hold'em: cards, the hand evaluator and the betting state machine.

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;

pub use cards::{Card, Rank, Suit};
pub use evaluator::{compare_hands, evaluate_best, Category, EvalError, Evaluation};
pub use game::{
    HistoryEntry, HistoryVerb, PlayerStatus, PokerAction, PokerConfig, PokerError, PokerPlayer,
    PokerState, Round,
};
pub use hand::{CommunityCards, HoleCards};

use crate::engine::{ContractError, GameKind, MoveOutcome, PlayerId, Rules, SetupError};
use log::trace;

/// `Rules` adapter for [`PokerState`]. One state is one hand; the game is over at showdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct PokerRules;

impl Rules for PokerRules {
    type State = PokerState;
    type Move = PokerAction;
    type Config = PokerConfig;

    const KIND: GameKind = GameKind::Poker;

    fn construct(&self, players: &[PlayerId], config: PokerConfig) -> Result<PokerState, SetupError> {
        PokerState::new(players, config)
    }

    /// On the move that ends the hand, `score` is the mover's payout.
    fn apply_move(
        &self,
        state: &PokerState,
        player: &str,
        mv: &PokerAction,
    ) -> Result<MoveOutcome<PokerState>, ContractError> {
        match state.act(player, *mv) {
            Ok(next) => {
                let score = next
                    .is_hand_over()
                    .then(|| next.seat_of(player).map_or(0, |seat| next.payouts()[seat] as i64));
                Ok(MoveOutcome::accepted(next, score))
            }
            Err(PokerError::HandOver) => Err(ContractError::GameOver),
            Err(e) => {
                trace!("poker: rejected {} from {}: {}", mv.label(), player, e);
                Ok(MoveOutcome::rejected(state.clone(), e))
            }
        }
    }

    fn is_game_over(&self, state: &PokerState) -> bool {
        state.is_hand_over()
    }

    fn winner(&self, state: &PokerState) -> Option<PlayerId> {
        state.winner().map(str::to_string)
    }

    fn current_player(&self, state: &PokerState) -> Option<PlayerId> {
        state.current_player().map(str::to_string)
    }
}
