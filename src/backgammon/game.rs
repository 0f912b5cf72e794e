use super::board::{Board, BoardError, Location, Side, CHECKERS, POINTS};
use crate::engine::{check_roster, PlayerId, SetupError};
use crate::rng::{resolve_seed, stream};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgammonConfig {
    pub doubling_cube: bool,
    /// Highest value the cube may be turned to.
    pub max_cube: u32,
    pub seed: Option<u64>,
}

impl Default for BackgammonConfig {
    fn default() -> Self {
        Self { doubling_cube: true, max_cube: 64, seed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Rolling,
    Moving,
    /// A double was offered; the opponent must take or drop it.
    Doubling,
    Finished,
}

/// One checker step. `die` indexes into the rolled dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckerMove {
    pub from: Location,
    pub to: Location,
    pub die: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgammonMove {
    Roll,
    Move(CheckerMove),
    OfferDouble,
    AcceptDouble,
    DeclineDouble,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    values: Vec<u8>,
    used: Vec<bool>,
}

impl Dice {
    fn rolled(d1: u8, d2: u8) -> Self {
        let values = if d1 == d2 { vec![d1; 4] } else { vec![d1, d2] };
        let used = vec![false; values.len()];
        Self { values, used }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn is_used(&self, idx: usize) -> bool {
        self.used.get(idx).copied().unwrap_or(true)
    }

    /// Unused dice as `(index, value)`, one entry per distinct value.
    pub fn distinct_unused(&self) -> Vec<(usize, u8)> {
        let mut out: Vec<(usize, u8)> = Vec::new();
        for (i, &v) in self.values.iter().enumerate() {
            if !self.used[i] && !out.iter().any(|&(_, seen)| seen == v) {
                out.push((i, v));
            }
        }
        out
    }

    pub fn remaining(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cube {
    pub value: u32,
    /// `None` while the cube is in the middle.
    pub owner: Option<Side>,
}

impl Default for Cube {
    fn default() -> Self {
        Self { value: 1, owner: None }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackgammonError {
    #[error("the game is over")]
    GameOver,
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
    #[error("cannot do that while {0:?}")]
    WrongPhase(Phase),
    #[error("die value {0} is not 1-6")]
    InvalidDie(u8),
    #[error("no die at index {0}")]
    InvalidDieIndex(usize),
    #[error("die {0} is already used")]
    DieUsed(usize),
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Location, to: Location },
    #[error("the doubling cube is disabled")]
    CubeDisabled,
    #[error("the cube belongs to the opponent")]
    CubeNotYours,
    #[error("the cube is already at its maximum of {0}")]
    CubeAtMax(u32),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Snapshot of a backgammon game. White is seated first and moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgammonState {
    pub(crate) config: BackgammonConfig,
    pub(crate) players: [PlayerId; 2],
    pub(crate) board: Board,
    pub(crate) dice: Dice,
    pub(crate) turn: Side,
    pub(crate) cube: Cube,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<Side>,
    pub(crate) points: u32,
    pub(crate) seed: u64,
    pub(crate) rng_step: u64,
}

impl BackgammonState {
    pub fn new(players: &[PlayerId], config: BackgammonConfig) -> Result<Self, SetupError> {
        Self::from_position(players, Board::standard(), Side::White, config)
    }

    /// Start from an arbitrary position with `turn` to roll.
    pub fn from_position(
        players: &[PlayerId],
        board: Board,
        turn: Side,
        config: BackgammonConfig,
    ) -> Result<Self, SetupError> {
        check_roster(players, 2, 2)?;
        if config.max_cube == 0 {
            return Err(SetupError::InvalidConfig("max_cube must be at least 1".into()));
        }
        let seed = resolve_seed(config.seed);
        info!("backgammon: {} (white) vs {} (black)", players[0], players[1]);
        Ok(Self {
            config,
            players: [players[0].clone(), players[1].clone()],
            board,
            dice: Dice::default(),
            turn,
            cube: Cube::default(),
            phase: Phase::Rolling,
            winner: None,
            points: 0,
            seed,
            rng_step: 0,
        })
    }

    pub fn config(&self) -> &BackgammonConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn cube(&self) -> Cube {
        self.cube
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Points won, cube included. Zero until the game ends.
    pub fn result_points(&self) -> u32 {
        self.points
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn player(&self, side: Side) -> &str {
        &self.players[side.index()]
    }

    pub fn side_of(&self, player: &str) -> Option<Side> {
        Side::ALL.into_iter().find(|s| self.players[s.index()] == player)
    }

    /// Side expected to act: the responder while a double is pending.
    pub fn to_act(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished => None,
            Phase::Doubling => Some(self.turn.opponent()),
            Phase::Rolling | Phase::Moving => Some(self.turn),
        }
    }

    /// The side to act may turn the cube now.
    pub fn can_double(&self) -> bool {
        self.phase == Phase::Rolling
            && self.config.doubling_cube
            && self.cube.owner.map_or(true, |o| o == self.turn)
            && self.cube.value.saturating_mul(2) <= self.config.max_cube
    }

    /// Apply any move for `player`, checking it is their turn.
    pub fn apply(&self, player: &str, mv: &BackgammonMove) -> Result<Self, BackgammonError> {
        let side = self.side_of(player).ok_or_else(|| BackgammonError::UnknownPlayer(player.into()))?;
        let due = self.to_act().ok_or(BackgammonError::GameOver)?;
        if side != due {
            return Err(BackgammonError::NotYourTurn(player.into()));
        }
        match *mv {
            BackgammonMove::Roll => self.roll(),
            BackgammonMove::Move(m) => self.make_move(m),
            BackgammonMove::OfferDouble => self.offer_double(),
            BackgammonMove::AcceptDouble => self.accept_double(),
            BackgammonMove::DeclineDouble => self.decline_double(),
        }
    }

    /// Roll two dice from the game's seeded stream.
    pub fn roll(&self) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Rolling)?;
        let mut rng = stream(self.seed, self.rng_step + 1);
        let d1 = rng.random_range(1..=6);
        let d2 = rng.random_range(1..=6);
        let mut next = self.begin_moving(d1, d2);
        next.rng_step = self.rng_step + 1;
        Ok(next)
    }

    /// Use the given dice instead of rolling.
    pub fn with_dice(&self, d1: u8, d2: u8) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Rolling)?;
        for d in [d1, d2] {
            if !(1..=6).contains(&d) {
                return Err(BackgammonError::InvalidDie(d));
            }
        }
        Ok(self.begin_moving(d1, d2))
    }

    fn begin_moving(&self, d1: u8, d2: u8) -> Self {
        let mut next = self.clone();
        next.dice = Dice::rolled(d1, d2);
        next.phase = Phase::Moving;
        debug!("backgammon: {} rolled {}-{}", next.turn, d1, d2);
        if next.available_moves().is_empty() {
            debug!("backgammon: {} cannot move", next.turn);
            next.end_turn();
        }
        next
    }

    /// Every legal single-checker move for the side to move, one per distinct die value.
    pub fn available_moves(&self) -> Vec<CheckerMove> {
        if self.phase != Phase::Moving {
            return Vec::new();
        }
        let side = self.turn;
        let dice = self.dice.distinct_unused();
        let mut moves = Vec::new();

        if self.board.bar(side) > 0 {
            for &(die, value) in &dice {
                let to = Board::entry_point(side, value);
                if !self.board.is_blocked(side, to) {
                    moves.push(CheckerMove { from: Location::Bar, to: point(to), die });
                }
            }
            return moves;
        }

        let bearing_off = self.board.all_home(side);
        for from in (0..POINTS).filter(|&p| self.board.count(side, p) > 0) {
            for &(die, value) in &dice {
                match Board::destination(side, from, value) {
                    Some(to) if !self.board.is_blocked(side, to) => {
                        moves.push(CheckerMove { from: point(from), to: point(to), die });
                    }
                    Some(_) => {}
                    None if bearing_off && self.may_bear_off(from, value) => {
                        moves.push(CheckerMove { from: point(from), to: Location::Off, die });
                    }
                    None => {}
                }
            }
        }
        moves
    }

    fn may_bear_off(&self, from: usize, die: u8) -> bool {
        let distance = Board::distance_to_off(self.turn, from);
        let die = u32::from(die);
        die == distance || (die > distance && !self.board.has_checker_behind(self.turn, from))
    }

    /// Move one checker. The die may be any unused die showing the same value as a legal move.
    pub fn make_move(&self, mv: CheckerMove) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Moving)?;
        let value = *self.dice.values.get(mv.die).ok_or(BackgammonError::InvalidDieIndex(mv.die))?;
        if self.dice.used[mv.die] {
            return Err(BackgammonError::DieUsed(mv.die));
        }
        let legal = self
            .available_moves()
            .into_iter()
            .any(|m| m.from == mv.from && m.to == mv.to && self.dice.values[m.die] == value);
        if !legal {
            return Err(BackgammonError::IllegalMove { from: mv.from, to: mv.to });
        }

        let mut next = self.clone();
        let side = next.turn;
        next.board.remove(side, mv.from);
        let hit = next.board.place(side, mv.to);
        next.dice.used[mv.die] = true;
        debug!(
            "backgammon: {} {} -> {} ({}){}",
            side,
            mv.from,
            mv.to,
            value,
            if hit { " hit" } else { "" }
        );

        if next.board.off(side) == CHECKERS {
            let multiplier = next.win_multiplier(side);
            next.finish(side, next.cube.value * multiplier);
        } else if next.available_moves().is_empty() {
            next.end_turn();
        }
        Ok(next)
    }

    pub fn offer_double(&self) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Rolling)?;
        if !self.config.doubling_cube {
            return Err(BackgammonError::CubeDisabled);
        }
        if self.cube.owner.is_some_and(|o| o != self.turn) {
            return Err(BackgammonError::CubeNotYours);
        }
        if self.cube.value.saturating_mul(2) > self.config.max_cube {
            return Err(BackgammonError::CubeAtMax(self.config.max_cube));
        }
        let mut next = self.clone();
        next.phase = Phase::Doubling;
        debug!("backgammon: {} offers the cube at {}", self.turn, self.cube.value * 2);
        Ok(next)
    }

    /// The responder takes the cube; the offering side then rolls.
    pub fn accept_double(&self) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Doubling)?;
        let mut next = self.clone();
        next.cube = Cube { value: self.cube.value * 2, owner: Some(self.turn.opponent()) };
        next.phase = Phase::Rolling;
        Ok(next)
    }

    /// The responder drops; the offering side wins at the current cube value.
    pub fn decline_double(&self) -> Result<Self, BackgammonError> {
        self.expect_phase(Phase::Doubling)?;
        let mut next = self.clone();
        next.finish(self.turn, self.cube.value);
        Ok(next)
    }

    /// 1 for a plain win, 2 for a gammon, 3 for a backgammon.
    fn win_multiplier(&self, winner: Side) -> u32 {
        let loser = winner.opponent();
        if self.board.off(loser) > 0 {
            return 1;
        }
        let trapped = self.board.bar(loser) > 0
            || (0..POINTS).any(|p| Board::is_home(winner, p) && self.board.count(loser, p) > 0);
        if trapped {
            3
        } else {
            2
        }
    }

    fn finish(&mut self, winner: Side, points: u32) {
        self.phase = Phase::Finished;
        self.winner = Some(winner);
        self.points = points;
        self.dice = Dice::default();
        info!(
            "backgammon: {} ({}) wins {} point(s)",
            self.players[winner.index()],
            winner,
            points
        );
    }

    fn end_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.phase = Phase::Rolling;
        self.dice = Dice::default();
    }

    fn expect_phase(&self, phase: Phase) -> Result<(), BackgammonError> {
        match self.phase {
            Phase::Finished => Err(BackgammonError::GameOver),
            p if p == phase => Ok(()),
            p => Err(BackgammonError::WrongPhase(p)),
        }
    }
}

fn point(p: usize) -> Location {
    Location::Point(p as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> Vec<PlayerId> {
        vec!["white".to_string(), "black".to_string()]
    }

    fn fresh() -> BackgammonState {
        BackgammonState::new(&players(), BackgammonConfig { seed: Some(5), ..Default::default() })
            .unwrap()
    }

    #[test]
    fn doubles_give_four_moves() {
        let g = fresh().with_dice(6, 6).unwrap();
        assert_eq!(g.dice.values(), &[6, 6, 6, 6]);
        assert_eq!(g.dice.distinct_unused(), vec![(0, 6)]);
        let mut g = g;
        for _ in 0..4 {
            let mv = CheckerMove { from: Location::Point(12), to: Location::Point(6), die: 0 };
            let idx = (0..4).find(|&i| !g.dice.is_used(i)).unwrap();
            g = g.make_move(CheckerMove { die: idx, ..mv }).unwrap();
        }
        assert_eq!(g.board.count(Side::White, 6), 4);
        assert_eq!(g.turn, Side::Black);
        assert_eq!(g.phase, Phase::Rolling);
    }

    #[test]
    fn equivalent_die_index_is_accepted() {
        let g = fresh().with_dice(4, 4).unwrap();
        let mv = CheckerMove { from: Location::Point(12), to: Location::Point(8), die: 2 };
        let g = g.make_move(mv).unwrap();
        assert!(g.dice.is_used(2));
        assert_eq!(g.dice.remaining(), 3);
    }

    #[test]
    fn bearing_off_needs_every_checker_home() {
        let mut points = [0i8; POINTS];
        points[2] = 14;
        points[8] = 1;
        points[20] = -15;
        let board = Board::from_parts(points, [0, 0], [0, 0]).unwrap();
        let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .with_dice(3, 6)
            .unwrap();
        let moves = g.available_moves();
        assert!(moves.iter().any(|m| m.from == Location::Point(2)));
        assert!(moves.iter().all(|m| m.to != Location::Off), "straggler on 8");

        let g = g.make_move(CheckerMove { from: Location::Point(8), to: Location::Point(2), die: 1 }).unwrap();
        assert_eq!(g.turn, Side::White);
        assert!(g.available_moves().contains(&CheckerMove { from: Location::Point(2), to: Location::Off, die: 0 }));
    }

    #[test]
    fn bar_checker_must_enter_first() {
        let mut points = [0i8; POINTS];
        points[5] = 14;
        points[18] = -15;
        let board = Board::from_parts(points, [1, 0], [0, 0]).unwrap();
        let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .with_dice(3, 5)
            .unwrap();
        let moves = g.available_moves();
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from == Location::Bar));
        assert!(moves.iter().any(|m| m.to == Location::Point(21)));
        assert!(moves.iter().any(|m| m.to == Location::Point(19)));
    }

    #[test]
    fn fully_blocked_roll_passes_the_turn() {
        let mut points = [0i8; POINTS];
        for p in 18..24 {
            points[p] = -2;
        }
        points[0] = -3;
        points[5] = 14;
        let board = Board::from_parts(points, [1, 0], [0, 0]).unwrap();
        let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .with_dice(2, 3)
            .unwrap();
        assert_eq!(g.turn, Side::Black);
        assert_eq!(g.phase, Phase::Rolling);
    }

    #[test]
    fn larger_die_bears_off_only_from_the_back() {
        let mut points = [0i8; POINTS];
        points[0] = 10;
        points[2] = 5;
        points[23] = -15;
        let board = Board::from_parts(points, [0, 0], [0, 0]).unwrap();
        let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .with_dice(6, 1)
            .unwrap();
        let offs: Vec<_> = g.available_moves().into_iter().filter(|m| m.to == Location::Off).collect();
        assert!(offs.iter().any(|m| m.from == Location::Point(2)), "6 bears off the back checker");
        assert!(offs.iter().any(|m| m.from == Location::Point(0)), "1 bears off exactly");
        assert!(!offs.iter().any(|m| m.from == Location::Point(0) && g.dice.values()[m.die] == 6));
    }

    #[test]
    fn declined_double_ends_the_game() {
        let g = fresh().offer_double().unwrap();
        assert_eq!(g.phase, Phase::Doubling);
        assert_eq!(g.to_act(), Some(Side::Black));
        let dropped = g.decline_double().unwrap();
        assert_eq!(dropped.winner, Some(Side::White));
        assert_eq!(dropped.points, 1);
        let taken = g.accept_double().unwrap();
        assert_eq!(taken.cube, Cube { value: 2, owner: Some(Side::Black) });
        assert!(!taken.can_double(), "white no longer owns the cube");
    }

    #[test]
    fn gammon_and_backgammon_multipliers() {
        let mut points = [0i8; POINTS];
        points[0] = 1;
        points[3] = -15;
        let board = Board::from_parts(points, [0, 0], [14, 0]).unwrap();
        let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .with_dice(1, 2)
            .unwrap();
        let done = g
            .make_move(CheckerMove { from: Location::Point(0), to: Location::Off, die: 0 })
            .unwrap();
        assert_eq!(done.winner, Some(Side::White));
        assert_eq!(done.points, 3, "black checkers left in white's home board");
    }
}
