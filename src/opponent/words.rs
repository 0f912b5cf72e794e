use super::{jitter, Difficulty, Suggestion};
use crate::engine::{ContractError, GameMove};
use crate::words::board::{premium_at, Board, CENTER, SIZE};
use crate::words::tiles::tile_counts;
use crate::words::{Dictionary, Direction, PlayPreview, Premium, Tile, WordMove, WordPlacement, WordsState};
use rand::Rng;
use std::collections::BTreeSet;

/// How a tier ranks and picks among candidate plays.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct WordProfile {
    /// The play is drawn uniformly from this many best-valued candidates.
    pub top_n: usize,
    pub noise: f64,
    /// Weight of the rack left behind.
    pub leave_weight: f64,
    /// Weight of premium squares a play opens for the next player.
    pub defense_weight: f64,
}

impl WordProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self { top_n: 5, noise: 6.0, leave_weight: 0.0, defense_weight: 0.0 },
            Difficulty::Medium => Self { top_n: 3, noise: 2.0, leave_weight: 0.5, defense_weight: 0.5 },
            Difficulty::Hard => Self { top_n: 1, noise: 0.0, leave_weight: 1.0, defense_weight: 1.0 },
        }
    }
}

fn index(c: char) -> usize {
    usize::from(c as u8 - b'A')
}

/// Letters the rack cannot supply for `word`, after spending blanks.
fn deficit(word: &str, have: &[u8; 26], blanks: usize) -> usize {
    let mut need = [0u8; 26];
    for c in word.chars() {
        need[index(c)] += 1;
    }
    let short: usize = need.iter().zip(have).map(|(&n, &h)| usize::from(n.saturating_sub(h))).sum();
    short.saturating_sub(blanks)
}

/// Offset of the first cell from `start` a word must reach to touch play.
fn first_anchor(board: &Board, start: (usize, usize), dir: Direction) -> Option<usize> {
    (0..SIZE).map_while(|i| dir.offset(start, i as isize)).position(|(r, c)| {
        if board.is_empty() {
            (r, c) == CENTER
        } else {
            board.is_occupied(r, c) || board.has_neighbor(r, c)
        }
    })
}

/// Cheap shape and rack check; `preview` has the final say.
fn fits(board: &Board, start: (usize, usize), dir: Direction, word: &str, rack: ([u8; 26], usize)) -> bool {
    let (mut have, mut blanks) = rack;
    if dir.offset(start, word.len() as isize).is_some_and(|(r, c)| board.is_occupied(r, c)) {
        return false;
    }
    let mut fresh = 0;
    for (i, ch) in word.chars().enumerate() {
        let Some((r, c)) = dir.offset(start, i as isize) else { return false };
        match board.get(r, c) {
            Some(t) if t.letter == ch => {}
            Some(_) => return false,
            None => {
                fresh += 1;
                let k = index(ch);
                if have[k] > 0 {
                    have[k] -= 1;
                } else if blanks > 0 {
                    blanks -= 1;
                } else {
                    return false;
                }
            }
        }
    }
    fresh > 0
}

/// Every legal placement for `seat`, in board order.
pub fn candidates(
    state: &WordsState,
    dict: &Dictionary,
    seat: usize,
) -> Vec<(WordPlacement, PlayPreview)> {
    let Some(player) = state.players().get(seat) else { return Vec::new() };
    let board = state.board();
    let mut have = [0u8; 26];
    let mut blanks = 0;
    for t in player.rack() {
        match t.letter() {
            Some(c) => have[index(c)] += 1,
            None => blanks += 1,
        }
    }
    let on_board = board.tile_count();
    let words: Vec<&str> = dict
        .words()
        .filter(|w| w.len() <= SIZE && deficit(w, &have, blanks) <= on_board)
        .collect();

    let mut out = Vec::new();
    for dir in Direction::ALL {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let start = (row, col);
                if dir.offset(start, -1).is_some_and(|(r, c)| board.is_occupied(r, c)) {
                    continue;
                }
                let Some(anchor) = first_anchor(board, start, dir) else { continue };
                for &word in words.iter().filter(|w| w.len() > anchor) {
                    if !fits(board, start, dir, word, (have, blanks)) {
                        continue;
                    }
                    let placement = WordPlacement::new(word, row, col, dir);
                    if let Ok(preview) = state.preview(dict, seat, &placement) {
                        out.push((placement, preview));
                    }
                }
            }
        }
    }
    out
}

/// Rough worth of the tiles kept after playing `used`.
fn leave_value(rack: &[Tile], used: &[Tile]) -> f64 {
    let mut left = rack.to_vec();
    for u in used {
        if let Some(p) = left.iter().position(|t| t == u) {
            left.swap_remove(p);
        }
    }
    if left.is_empty() {
        return 0.0;
    }
    let mut value = 0.0;
    for t in &left {
        match t {
            Tile::Blank => value += 3.0,
            Tile::Letter('S') => value += 2.0,
            Tile::Letter('Q') => value -= 3.0,
            _ => {}
        }
    }
    let vowels = left.iter().filter(|t| matches!(t.letter(), Some('A' | 'E' | 'I' | 'O' | 'U'))).count();
    value -= (vowels as f64 - left.len() as f64 * 0.4).abs() * 1.5;
    let dupes: u32 = tile_counts(left).values().map(|n| n.saturating_sub(1)).sum();
    value - f64::from(dupes)
}

/// Word premiums left empty next to the new tiles.
fn opened_premiums(board: &Board, preview: &PlayPreview) -> f64 {
    let placed: BTreeSet<(usize, usize)> = preview.tiles.iter().map(|&(r, c, _)| (r, c)).collect();
    let mut open = BTreeSet::new();
    for &(r, c) in &placed {
        for dir in Direction::ALL {
            for step in [-1, 1] {
                if let Some((nr, nc)) = dir.offset((r, c), step) {
                    if !board.is_occupied(nr, nc) && !placed.contains(&(nr, nc)) {
                        open.insert((nr, nc));
                    }
                }
            }
        }
    }
    open.into_iter()
        .filter_map(|(r, c)| premium_at(r, c))
        .map(|p| match p {
            Premium::TripleWord => 3.0,
            Premium::DoubleWord => 1.5,
            _ => 0.0,
        })
        .sum()
}

/// Tiles to throw back: everything except a blank and one each of S, E and the other vowels.
fn exchange_choice(rack: &[Tile]) -> Vec<Tile> {
    let mut kept = Vec::new();
    let mut give = Vec::new();
    for &t in rack {
        let keep = match t {
            Tile::Blank => true,
            Tile::Letter(c) => "SEAIOU".contains(c) && !kept.contains(&t),
        };
        if keep {
            kept.push(t);
        } else {
            give.push(t);
        }
    }
    if give.is_empty() {
        rack.to_vec()
    } else {
        give
    }
}

pub(crate) fn suggest<R: Rng + ?Sized>(
    state: &WordsState,
    dict: &Dictionary,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Suggestion, ContractError> {
    if state.is_over() {
        return Err(ContractError::GameOver);
    }
    let seat = state.current();
    let rack = state.players().get(seat).ok_or(ContractError::NobodyToAct)?.rack();
    let profile = WordProfile::for_difficulty(difficulty);

    let mut scored: Vec<(f64, WordPlacement, PlayPreview)> = candidates(state, dict, seat)
        .into_iter()
        .map(|(placement, preview)| {
            let value = f64::from(preview.score)
                + profile.leave_weight * leave_value(rack, &preview.used)
                - profile.defense_weight * opened_premiums(state.board(), &preview)
                + jitter(rng, profile.noise);
            (value, placement, preview)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    if !scored.is_empty() {
        let pick = rng.random_range(0..scored.len().min(profile.top_n.max(1)));
        let (value, placement, preview) = scored.swap_remove(pick);
        let confidence = f64::from(preview.score) / (f64::from(preview.score) + 10.0);
        let rationale = format!(
            "{} at ({}, {}) {:?} for {} (value {:.1}, {} candidates)",
            placement.word,
            placement.row,
            placement.col,
            placement.direction,
            preview.score,
            value,
            scored.len() + 1
        );
        return Ok(Suggestion::new(GameMove::Words(WordMove::Place(placement)), confidence, rationale));
    }

    if !rack.is_empty() && state.bag_len() >= state.config().min_bag_for_exchange {
        let tiles = exchange_choice(rack);
        let rationale = format!("no playable word; exchanging {} tile(s)", tiles.len());
        return Ok(Suggestion::new(GameMove::Words(WordMove::Exchange { tiles }), 0.4, rationale));
    }
    Ok(Suggestion::new(GameMove::Words(WordMove::Pass), 0.3, "no playable word; pass"))
}
