use super::tiles::{letter_value, Tile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIZE: usize = 15;
pub const CENTER: (usize, usize) = (7, 7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    pub fn cross(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// `(row, col)` of the cell `offset` steps from `start`, if on the board.
    pub fn offset(self, start: (usize, usize), offset: isize) -> Option<(usize, usize)> {
        let (row, col) = start;
        let (row, col) = match self {
            Direction::Across => (Some(row), col.checked_add_signed(offset)),
            Direction::Down => (row.checked_add_signed(offset), Some(col)),
        };
        match (row, col) {
            (Some(r), Some(c)) if r < SIZE && c < SIZE => Some((r, c)),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction '{0}'")]
pub struct DirectionParseError(String);

impl FromStr for Direction {
    type Err = DirectionParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "across" | "a" | "h" | "horizontal" => Ok(Direction::Across),
            "down" | "d" | "v" | "vertical" => Ok(Direction::Down),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Premium {
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }
}

/// Premium square at `(row, col)` on the standard board.
///
/// The layout has the board's eight symmetries, so each cell is folded into one
/// octant before lookup.
pub fn premium_at(row: usize, col: usize) -> Option<Premium> {
    if row >= SIZE || col >= SIZE {
        return None;
    }
    let r = row.min(SIZE - 1 - row);
    let c = col.min(SIZE - 1 - col);
    let key = (r.min(c), r.max(c));
    match key {
        (0, 0) | (0, 7) => Some(Premium::TripleWord),
        (1, 1) | (2, 2) | (3, 3) | (4, 4) | (7, 7) => Some(Premium::DoubleWord),
        (1, 5) | (5, 5) => Some(Premium::TripleLetter),
        (0, 3) | (2, 6) | (3, 7) | (6, 6) => Some(Premium::DoubleLetter),
        _ => None,
    }
}

/// A tile on the board. A blank keeps the letter it was played as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub letter: char,
    pub blank: bool,
}

impl PlacedTile {
    pub fn value(self) -> u32 {
        if self.blank {
            0
        } else {
            letter_value(self.letter)
        }
    }

    /// The physical tile, for tile accounting.
    pub fn tile(self) -> Tile {
        if self.blank {
            Tile::Blank
        } else {
            Tile::Letter(self.letter)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<PlacedTile>>,
}

impl Default for Board {
    fn default() -> Self {
        Self { cells: vec![None; SIZE * SIZE] }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<PlacedTile> {
        if row < SIZE && col < SIZE {
            self.cells[row * SIZE + col]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells as `(row, col, tile)` in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, PlacedTile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|t| (i / SIZE, i % SIZE, t)))
    }

    /// Some orthogonal neighbour holds a tile.
    pub fn has_neighbor(&self, row: usize, col: usize) -> bool {
        Direction::ALL.iter().any(|d| {
            [-1, 1]
                .iter()
                .filter_map(|&o| d.offset((row, col), o))
                .any(|(r, c)| self.is_occupied(r, c))
        })
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, tile: PlacedTile) {
        self.cells[row * SIZE + col] = Some(tile);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let line: String = (0..SIZE)
                .map(|col| match self.get(row, col) {
                    Some(t) if t.blank => t.letter.to_ascii_lowercase(),
                    Some(t) => t.letter,
                    None => '.',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_layout_matches_standard_board() {
        assert_eq!(premium_at(0, 0), Some(Premium::TripleWord));
        assert_eq!(premium_at(7, 14), Some(Premium::TripleWord));
        assert_eq!(premium_at(7, 7), Some(Premium::DoubleWord));
        assert_eq!(premium_at(13, 13), Some(Premium::DoubleWord));
        assert_eq!(premium_at(5, 9), Some(Premium::TripleLetter));
        assert_eq!(premium_at(7, 3), Some(Premium::DoubleLetter));
        assert_eq!(premium_at(14, 11), Some(Premium::DoubleLetter));
        assert_eq!(premium_at(7, 6), None);

        let count = |p: Premium| {
            (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c))).filter(|&(r, c)| premium_at(r, c) == Some(p)).count()
        };
        assert_eq!(count(Premium::TripleWord), 8);
        assert_eq!(count(Premium::DoubleWord), 17);
        assert_eq!(count(Premium::TripleLetter), 12);
        assert_eq!(count(Premium::DoubleLetter), 24);
    }

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(Direction::Across.offset((7, 14), 1), None);
        assert_eq!(Direction::Down.offset((0, 3), -1), None);
        assert_eq!(Direction::Down.offset((7, 3), 2), Some((9, 3)));
    }

    #[test]
    fn neighbours() {
        let mut b = Board::new();
        b.set(7, 7, PlacedTile { letter: 'A', blank: false });
        assert!(b.has_neighbor(7, 8));
        assert!(b.has_neighbor(6, 7));
        assert!(!b.has_neighbor(6, 6));
        assert_eq!(b.tile_count(), 1);
    }
}
