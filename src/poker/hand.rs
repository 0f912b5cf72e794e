use super::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyCommunityCards(usize),
    #[error("duplicate community cards")]
    DuplicateCommunityCards,
    #[error("hole cards overlap with community cards")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private cards.
///
/// ```
/// use tabletop::poker::cards::{Card, Rank, Suit};
/// use tabletop::poker::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert!(hole.is_suited());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        match cards.as_slice() {
            [a, b] => Self::try_new(*a, *b),
            other => Err(HandError::HoleCount(other.len())),
        }
    }
}

/// Shared cards in the middle of the table: empty, flop, turn or river.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityCards {
    cards: Vec<Card>,
}

impl CommunityCards {
    pub const MAX: usize = 5;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX {
            return Err(HandError::TooManyCommunityCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCommunityCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }
}

impl FromStr for CommunityCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        CommunityCards::try_new(cards)
    }
}

/// Check that hole and community cards could come from one deck.
pub fn validate_holdem(hole: &HoleCards, community: &CommunityCards) -> Result<(), HandError> {
    if community.len() > CommunityCards::MAX {
        return Err(HandError::TooManyCommunityCards(community.len()));
    }
    let set: HashSet<Card> = community.as_slice().iter().copied().collect();
    if set.len() != community.len() {
        return Err(HandError::DuplicateCommunityCards);
    }
    if set.contains(&hole.first()) || set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateHoleCards)));
    }

    #[test]
    fn community_limits_and_dupes() {
        let turn: CommunityCards = "2c 3c 4c 5c".parse().unwrap();
        assert_eq!(turn.len(), 4);
        assert!(matches!(
            "2c 3c 4c 5c 6c 7c".parse::<CommunityCards>(),
            Err(HandError::TooManyCommunityCards(6))
        ));
        assert!(matches!(
            "2c 2c".parse::<CommunityCards>(),
            Err(HandError::DuplicateCommunityCards)
        ));
    }

    #[test]
    fn overlap_is_caught() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community: CommunityCards = "As 2c 3c".parse().unwrap();
        assert!(matches!(validate_holdem(&hole, &community), Err(HandError::Overlap)));
    }

    #[test]
    fn parsing_hole_cards_requires_two() {
        assert!(matches!("As".parse::<HoleCards>(), Err(HandError::HoleCount(1))));
        let hole: HoleCards = "As Kd".parse().unwrap();
        assert!(!hole.is_suited());
        assert!(!hole.is_pair());
    }
}
