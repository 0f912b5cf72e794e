use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Letter, tile count and face value for the standard 100-tile English set.
pub const DISTRIBUTION: [(char, u32, u32); 26] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

pub const BLANKS: u32 = 2;
pub const TILE_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Letter(char),
    /// Stands for any letter and scores nothing.
    Blank,
}

impl Tile {
    /// `?` or `_` is a blank; letters are upper-cased.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '?' | '_' => Some(Tile::Blank),
            c if c.is_ascii_alphabetic() => Some(Tile::Letter(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Tile::Letter(c) => Some(c),
            Tile::Blank => None,
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Tile::Letter(c) => letter_value(c),
            Tile::Blank => 0,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Letter(c) => write!(f, "{c}"),
            Tile::Blank => f.write_str("?"),
        }
    }
}

pub fn letter_value(c: char) -> u32 {
    let c = c.to_ascii_uppercase();
    DISTRIBUTION.iter().find(|(l, _, _)| *l == c).map_or(0, |&(_, _, v)| v)
}

/// All 100 tiles in a fixed order; shuffle before drawing.
pub fn full_bag() -> Vec<Tile> {
    let mut bag: Vec<Tile> = DISTRIBUTION
        .iter()
        .flat_map(|&(c, n, _)| std::iter::repeat(Tile::Letter(c)).take(n as usize))
        .collect();
    bag.extend(std::iter::repeat(Tile::Blank).take(BLANKS as usize));
    bag
}

/// Face value of a set of tiles.
pub fn rack_value(tiles: &[Tile]) -> u32 {
    tiles.iter().map(|t| t.value()).sum()
}

/// Multiset of tiles, keyed by tile.
pub fn tile_counts<I: IntoIterator<Item = Tile>>(tiles: I) -> BTreeMap<Tile, u32> {
    let mut counts = BTreeMap::new();
    for t in tiles {
        *counts.entry(t).or_insert(0) += 1;
    }
    counts
}

/// Parse a rack such as `"CAT?S"`.
pub fn parse_tiles(s: &str) -> Option<Vec<Tile>> {
    s.chars().filter(|c| !c.is_whitespace()).map(Tile::from_char).collect()
}

/// Remove one copy of each of `tiles` from `from`; `Err` names the first missing tile.
pub(crate) fn take_tiles(from: &mut Vec<Tile>, tiles: &[Tile]) -> Result<(), Tile> {
    let mut pool = from.clone();
    for &t in tiles {
        let pos = pool.iter().position(|&p| p == t).ok_or(t)?;
        pool.remove(pos);
    }
    *from = pool;
    Ok(())
}
