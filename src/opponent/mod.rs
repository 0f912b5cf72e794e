//! Scripted opponents.
//!
//! [`OpponentService`] looks at a game state and suggests a move for whoever is
//! due to act. Suggestions are pure functions of `(state, difficulty, seed)`:
//! all randomness comes from a ChaCha8 stream seeded per call. Difficulty only
//! changes which legal move gets picked; every suggestion is accepted by the
//! matching rules.

pub mod backgammon;
pub mod poker;
pub mod words;

use crate::engine::{ContractError, GameKind, GameMove, GameState};
use crate::words::Dictionary;
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}'")]
pub struct DifficultyParseError(String);

impl FromStr for Difficulty {
    type Err = DifficultyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError(s.to_string())),
        }
    }
}

/// A suggested move with a confidence in `0..=1` and a diagnostic rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: GameMove,
    pub confidence: f64,
    pub rationale: String,
}

impl Suggestion {
    pub(crate) fn new(action: GameMove, confidence: f64, rationale: impl Into<String>) -> Self {
        Self { action, confidence: confidence.clamp(0.0, 1.0), rationale: rationale.into() }
    }
}

/// Dispatches to the per-game heuristics.
#[derive(Debug, Clone)]
pub struct OpponentService {
    dictionary: Arc<Dictionary>,
}

impl OpponentService {
    /// `dictionary` should be the one the word game is judged with.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Suggest a move using a fresh seed from the thread RNG.
    pub fn get_move(
        &self,
        kind: GameKind,
        state: &GameState,
        difficulty: Difficulty,
    ) -> Result<Suggestion, ContractError> {
        self.get_move_seeded(kind, state, difficulty, rand::rng().random())
    }

    /// Suggest a move; the same inputs always give the same suggestion.
    pub fn get_move_seeded(
        &self,
        kind: GameKind,
        state: &GameState,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Suggestion, ContractError> {
        if state.kind() != kind {
            return Err(ContractError::KindMismatch { expected: kind, got: state.kind() });
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let suggestion = match state {
            GameState::Poker(s) => poker::suggest(s, difficulty, &mut rng),
            GameState::Backgammon(s) => backgammon::suggest(s, difficulty, &mut rng),
            GameState::Words(s) => words::suggest(s, &self.dictionary, difficulty, &mut rng),
        }?;
        trace!("{kind} opponent ({difficulty}): {}", suggestion.rationale);
        Ok(suggestion)
    }
}

/// Uniform noise in `[-scale, scale]`.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    rng.random_range(-scale..=scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_and_defaults() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert!("brutal".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn kind_must_match_state() {
        let table = crate::engine::Tabletop::with_builtin_dictionary();
        let ids = vec!["a".to_string(), "b".to_string()];
        let state = table.construct(GameKind::Poker, &ids).unwrap();
        let svc = OpponentService::new(table.dictionary().clone());
        assert_eq!(
            svc.get_move_seeded(GameKind::Words, &state, Difficulty::Easy, 1),
            Err(ContractError::KindMismatch { expected: GameKind::Words, got: GameKind::Poker })
        );
    }

    #[test]
    fn confidence_is_clamped() {
        let s = Suggestion::new(GameMove::Poker(crate::poker::PokerAction::Fold), 3.0, "x");
        assert_eq!(s.confidence, 1.0);
    }
}
