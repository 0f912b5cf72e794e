//! Five-to-seven card hand evaluation.
//!
//! A hand's strength is its [`Category`] followed by an ordered list of
//! tiebreak ranks: ranks grouped by how often they occur, most frequent first,
//! then highest first. Straights are keyed by their top card only, with the
//! wheel (A-2-3-4-5) counting as five-high.

use super::cards::{Card, Rank};
use super::hand::{validate_holdem, CommunityCards, HandError, HoleCards};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Compact, comparable hand strength. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Hand categories from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const STRONGEST: Category = Category::RoyalFlush;

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl HandValue {
    const CATEGORY_SHIFT: u32 = 48;
    const RANK_BITS: u32 = 6;

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five tiebreak ranks, most significant first.
    pub fn from_parts(category: Category, tiebreak: &[Rank]) -> Self {
        // [ category (8) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | unused ]
        let mut v = (category as u64) << Self::CATEGORY_SHIFT;
        for (i, r) in tiebreak.iter().take(5).enumerate() {
            let offset = Self::CATEGORY_SHIFT - Self::RANK_BITS * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }

    /// The tiebreak ranks packed by [`HandValue::from_parts`].
    pub fn tiebreak(self) -> Vec<Rank> {
        (0..5u32)
            .map(|i| {
                let offset = Self::CATEGORY_SHIFT - Self::RANK_BITS * (i + 1);
                ((self.0 >> offset) & 0x3f) as u8
            })
            .take_while(|&v| v != 0)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Detailed evaluation result. Ordering and equality follow `value` only.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Ordered kicker list used after the category to break ties.
    pub fn kickers(&self) -> Vec<Rank> {
        self.value.tiebreak()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("need at least five cards to evaluate, got {0}")]
    NotEnoughCards(usize),
    #[error("at most seven cards can be evaluated, got {0}")]
    TooManyCards(usize),
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.cmp(a));

    let mut counts = [0u8; 15];
    for c in &sorted {
        counts[c.rank().value() as usize] += 1;
    }
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .filter_map(|&r| match counts[r.value() as usize] {
            0 => None,
            n => Some((n, r)),
        })
        .collect();
    groups.sort_by(|a, b| b.cmp(a));
    let shape: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let by_frequency: Vec<Rank> = groups.iter().map(|g| g.1).collect();

    let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
    let straight = straight_top(&by_frequency);

    let (category, tiebreak) = match (straight, is_flush) {
        (Some(Rank::Ace), true) => (Category::RoyalFlush, vec![Rank::Ace]),
        (Some(top), true) => (Category::StraightFlush, vec![top]),
        _ if shape[0] >= 4 => (Category::FourOfAKind, by_frequency),
        _ if shape.starts_with(&[3, 2]) => (Category::FullHouse, by_frequency),
        (_, true) => (Category::Flush, by_frequency),
        (Some(top), false) => (Category::Straight, vec![top]),
        _ if shape[0] == 3 => (Category::ThreeOfAKind, by_frequency),
        _ if shape.starts_with(&[2, 2]) => (Category::TwoPair, by_frequency),
        _ if shape[0] == 2 => (Category::Pair, by_frequency),
        _ => (Category::HighCard, by_frequency),
    };
    let value = HandValue::from_parts(category, &tiebreak);
    Evaluation { category, best_five: sorted, value }
}

fn straight_top(desc: &[Rank]) -> Option<Rank> {
    if desc.len() != 5 {
        return None;
    }
    let vals: Vec<u8> = desc.iter().map(|r| r.value()).collect();
    if vals[0] - vals[4] == 4 {
        Some(desc[0])
    } else if vals == [14, 5, 4, 3, 2] {
        Some(Rank::Five)
    } else {
        None
    }
}

/// Call `f` once for every five-card subset of `cards`, in index order.
pub fn for_each_five(cards: &[Card], mut f: impl FnMut([Card; 5])) {
    let n = cards.len();
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        f([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

fn best_of(cards: &[Card]) -> Option<Evaluation> {
    let mut best: Option<Evaluation> = None;
    for_each_five(cards, |five| {
        let eval = evaluate_five(&five);
        if best.map_or(true, |cur| eval > cur) {
            best = Some(eval);
        }
    });
    best
}

/// Best five-card hand out of five, six or seven cards.
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    match cards.len() {
        n if n < 5 => Err(EvalError::NotEnoughCards(n)),
        n if n > 7 => Err(EvalError::TooManyCards(n)),
        n => best_of(cards).ok_or(EvalError::NotEnoughCards(n)),
    }
}

/// Best hand out of seven cards: all 21 five-card combinations are tried.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    best_of(cards)
        .unwrap_or_else(|| evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]))
}

/// Evaluate hole cards against a complete (five-card) community.
///
/// ```
/// use tabletop::poker::evaluator::{evaluate_holdem, Category};
/// use tabletop::poker::hand::{CommunityCards, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let community: CommunityCards = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &community).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(
    hole: &HoleCards,
    community: &CommunityCards,
) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, community)?;
    let board = community.as_slice();
    if board.len() < CommunityCards::MAX {
        return Err(EvalError::NotEnoughCards(2 + board.len()));
    }
    let seven = [hole.first(), hole.second(), board[0], board[1], board[2], board[3], board[4]];
    Ok(evaluate_seven(&seven))
}

/// Compare the best hands that can be made from two card sets.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(evaluate_best(a)?.cmp(&evaluate_best(b)?))
}
