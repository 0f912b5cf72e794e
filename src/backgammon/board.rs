use serde::{Deserialize, Serialize};
use std::fmt;

pub const POINTS: usize = 24;
pub const CHECKERS: u8 = 15;
const HOME_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Moves toward point 0; home is points 0–5.
    White,
    /// Moves toward point 23; home is points 18–23.
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    fn sign(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::White => "white",
            Side::Black => "black",
        })
    }
}

/// Where a checker moves from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Bar,
    /// 0-indexed board point.
    Point(u8),
    Off,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Bar => f.write_str("bar"),
            Location::Point(p) => write!(f, "{p}"),
            Location::Off => f.write_str("off"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoardError {
    #[error("{side} has {got} checkers, expected 15")]
    CheckerCount { side: Side, got: u32 },
}

/// Checker positions. A point's sign is its owner (positive = White) and its
/// magnitude the stack height.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    points: [i8; POINTS],
    bar: [u8; 2],
    off: [u8; 2],
}

impl Board {
    /// ```
    /// use tabletop::backgammon::board::{Board, Side};
    ///
    /// let board = Board::standard();
    /// assert_eq!(board.pip_count(Side::White), 167);
    /// assert_eq!(board.pip_count(Side::Black), 167);
    /// ```
    pub fn standard() -> Self {
        let mut points = [0i8; POINTS];
        for (idx, count) in [(23, 2), (12, 5), (7, 3), (5, 5)] {
            points[idx] = count;
            points[POINTS - 1 - idx] = -count;
        }
        Self { points, bar: [0; 2], off: [0; 2] }
    }

    /// Build an arbitrary position; each side must still account for all 15 checkers.
    pub fn from_parts(points: [i8; POINTS], bar: [u8; 2], off: [u8; 2]) -> Result<Self, BoardError> {
        let board = Self { points, bar, off };
        for side in Side::ALL {
            let got = board.total(side);
            if got != u32::from(CHECKERS) {
                return Err(BoardError::CheckerCount { side, got });
            }
        }
        Ok(board)
    }

    pub fn points(&self) -> &[i8; POINTS] {
        &self.points
    }

    pub fn owner(&self, point: usize) -> Option<Side> {
        match self.points[point] {
            0 => None,
            n if n > 0 => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    /// Checkers `side` has on `point`.
    pub fn count(&self, side: Side, point: usize) -> u8 {
        let n = i16::from(self.points[point]) * i16::from(side.sign());
        u8::try_from(n.max(0)).unwrap_or(u8::MAX)
    }

    pub fn bar(&self, side: Side) -> u8 {
        self.bar[side.index()]
    }

    pub fn off(&self, side: Side) -> u8 {
        self.off[side.index()]
    }

    pub fn on_board(&self, side: Side) -> u32 {
        (0..POINTS).map(|p| u32::from(self.count(side, p))).sum()
    }

    /// Board, bar and borne-off checkers together.
    pub fn total(&self, side: Side) -> u32 {
        self.on_board(side) + u32::from(self.bar(side)) + u32::from(self.off(side))
    }

    /// Pips a checker on `point` needs to bear off.
    pub fn distance_to_off(side: Side, point: usize) -> u32 {
        match side {
            Side::White => point as u32 + 1,
            Side::Black => (POINTS - point) as u32,
        }
    }

    /// Total pips `side` needs to bear everything off; a checker on the bar counts 25.
    pub fn pip_count(&self, side: Side) -> u32 {
        let on_board: u32 = (0..POINTS)
            .map(|p| u32::from(self.count(side, p)) * Self::distance_to_off(side, p))
            .sum();
        on_board + u32::from(self.bar(side)) * 25
    }

    pub fn is_home(side: Side, point: usize) -> bool {
        match side {
            Side::White => point < HOME_SIZE,
            Side::Black => point >= POINTS - HOME_SIZE,
        }
    }

    /// Every checker not yet borne off is in the home board.
    pub fn all_home(&self, side: Side) -> bool {
        self.bar(side) == 0 && (0..POINTS).all(|p| self.count(side, p) == 0 || Self::is_home(side, p))
    }

    /// Point a checker enters on from the bar with `die`.
    pub fn entry_point(side: Side, die: u8) -> usize {
        match side {
            Side::White => POINTS - usize::from(die),
            Side::Black => usize::from(die) - 1,
        }
    }

    /// Point reached moving `die` pips from `from`; `None` when that runs off the board.
    pub fn destination(side: Side, from: usize, die: u8) -> Option<usize> {
        let die = usize::from(die);
        match side {
            Side::White => from.checked_sub(die),
            Side::Black => Some(from + die).filter(|&p| p < POINTS),
        }
    }

    /// Two or more opposing checkers hold the point.
    pub fn is_blocked(&self, side: Side, point: usize) -> bool {
        self.count(side.opponent(), point) >= 2
    }

    /// A lone checker of `side` is on the point.
    pub fn is_blot(&self, side: Side, point: usize) -> bool {
        self.count(side, point) == 1
    }

    /// `side` has a checker on a point farther from home than `point`.
    pub fn has_checker_behind(&self, side: Side, point: usize) -> bool {
        let mut behind = match side {
            Side::White => point + 1..POINTS,
            Side::Black => 0..point,
        };
        behind.any(|p| self.count(side, p) > 0)
    }

    pub(crate) fn remove(&mut self, side: Side, from: Location) {
        match from {
            Location::Bar => self.bar[side.index()] -= 1,
            Location::Point(p) => self.points[usize::from(p)] -= side.sign(),
            Location::Off => self.off[side.index()] -= 1,
        }
    }

    /// Put a checker of `side` on `to`; returns true if it hit an opposing blot.
    pub(crate) fn place(&mut self, side: Side, to: Location) -> bool {
        match to {
            Location::Bar => {
                self.bar[side.index()] += 1;
                false
            }
            Location::Off => {
                self.off[side.index()] += 1;
                false
            }
            Location::Point(p) => {
                let p = usize::from(p);
                let opp = side.opponent();
                let hit = self.count(opp, p) == 1;
                if hit {
                    self.points[p] = 0;
                    self.bar[opp.index()] += 1;
                }
                self.points[p] += side.sign();
                hit
            }
        }
    }
}

/// Two rows of points, 12..=23 over 11..=0, then bar and off counts.
/// White stacks print as `W3`, Black as `B2`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |p: usize| match self.points[p] {
            0 => " .".to_string(),
            n if n > 0 => format!("W{n}"),
            n => format!("B{}", -n),
        };
        let top: Vec<String> = (12..POINTS).map(cell).collect();
        let bottom: Vec<String> = (0..12).rev().map(cell).collect();
        writeln!(f, "{}", top.join(" "))?;
        writeln!(f, "{}", bottom.join(" "))?;
        write!(
            f,
            "bar W{} B{}  off W{} B{}",
            self.bar[0], self.bar[1], self.off[0], self.off[1]
        )
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
