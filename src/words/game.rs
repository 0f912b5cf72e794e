use super::board::{premium_at, Board, Direction, PlacedTile, CENTER, SIZE};
use super::dictionary::Dictionary;
use super::tiles::{full_bag, rack_value, take_tiles, Tile};
use crate::engine::{check_roster, PlayerId, SetupError};
use crate::rng::{resolve_seed, stream};
use log::{debug, info};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub rack_size: usize,
    /// Added when a single play empties a full rack.
    pub bingo_bonus: u32,
    /// Consecutive scoreless turns allowed per player before the game ends.
    pub skips_per_player: u32,
    /// Tiles that must remain in the bag for an exchange.
    pub min_bag_for_exchange: usize,
    pub seed: Option<u64>,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self { rack_size: 7, bingo_bonus: 50, skips_per_player: 3, min_bag_for_exchange: 7, seed: None }
    }
}

/// A word laid on the board starting at `(row, col)`.
///
/// `word` is read from `(row, col)` and may include letters already on the
/// board. Tiles touching either end join the line that is looked up.
/// `blanks` lists word indices that must be played with a blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPlacement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    #[serde(default)]
    pub blanks: Vec<usize>,
}

impl WordPlacement {
    pub fn new(word: impl Into<String>, row: usize, col: usize, direction: Direction) -> Self {
        Self { word: word.into(), row, col, direction, blanks: Vec::new() }
    }

    pub fn with_blanks(mut self, blanks: Vec<usize>) -> Self {
        self.blanks = blanks;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WordMove {
    Place(WordPlacement),
    Exchange { tiles: Vec<Tile> },
    Pass,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("the game is over")]
    GameOver,
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("no seat {0}")]
    UnknownSeat(usize),
    #[error("it is not {0}'s turn")]
    NotYourTurn(String),
    #[error("word is empty")]
    EmptyWord,
    #[error("'{0}' is not alphabetic")]
    NotAlphabetic(String),
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("a {len}-letter word runs off the board")]
    RunsOffBoard { len: usize },
    #[error("blank index {0} is outside the word")]
    BlankIndex(usize),
    #[error("'{0}' is not in the dictionary")]
    NotInDictionary(String),
    #[error("rack has no tile for '{0}'")]
    MissingTile(char),
    #[error("({row}, {col}) already holds '{found}'")]
    Conflict { row: usize, col: usize, found: char },
    #[error("placement adds no tiles")]
    NoNewTiles,
    #[error("the first word must cover the centre square")]
    MustCoverCenter,
    #[error("placement does not connect to any tile on the board")]
    Disconnected,
    #[error("placement forms '{0}', which is not a word")]
    InvalidWord(String),
    #[error("nothing to exchange")]
    EmptyExchange,
    #[error("bag holds {available} tiles, exchanging needs {needed}")]
    BagTooSmall { needed: usize, available: usize },
    #[error("tile {0} is not available")]
    NotInRack(Tile),
    #[error("a rack holds at most {0} tiles")]
    RackTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPlayer {
    pub(crate) id: PlayerId,
    pub(crate) rack: Vec<Tile>,
    pub(crate) score: i64,
}

impl WordPlayer {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}

/// What a placement would do, computed without touching the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayPreview {
    /// New tiles and where they go.
    pub tiles: Vec<(usize, usize, PlacedTile)>,
    /// Rack tiles consumed.
    pub used: Vec<Tile>,
    /// Every word formed, main word first.
    pub words: Vec<String>,
    pub score: u32,
    pub bingo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsState {
    pub(crate) config: WordsConfig,
    pub(crate) players: Vec<WordPlayer>,
    pub(crate) board: Board,
    pub(crate) bag: Vec<Tile>,
    pub(crate) current: usize,
    pub(crate) scoreless_turns: u32,
    pub(crate) finished: bool,
    pub(crate) turn_number: u32,
    pub(crate) seed: u64,
    pub(crate) rng_step: u64,
}

impl WordsState {
    pub fn new(players: &[PlayerId], config: WordsConfig) -> Result<Self, SetupError> {
        check_roster(players, MIN_PLAYERS, MAX_PLAYERS)?;
        if config.rack_size == 0 || config.rack_size * players.len() > full_bag().len() {
            return Err(SetupError::InvalidConfig(format!(
                "cannot deal racks of {} to {} players",
                config.rack_size,
                players.len()
            )));
        }
        let seed = resolve_seed(config.seed);
        let mut bag = full_bag();
        bag.shuffle(&mut stream(seed, 1));
        let mut state = Self {
            players: players
                .iter()
                .map(|id| WordPlayer { id: id.clone(), rack: Vec::new(), score: 0 })
                .collect(),
            config,
            board: Board::new(),
            bag,
            current: 0,
            scoreless_turns: 0,
            finished: false,
            turn_number: 0,
            seed,
            rng_step: 1,
        };
        for seat in 0..state.players.len() {
            state.refill(seat);
        }
        info!("words: new game for {} players", state.players.len());
        Ok(state)
    }

    pub fn config(&self) -> &WordsConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[WordPlayer] {
        &self.players
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> Option<&str> {
        (!self.finished).then(|| self.players[self.current].id.as_str())
    }

    pub fn scoreless_turns(&self) -> u32 {
        self.scoreless_turns
    }

    /// Consecutive scoreless turns that end the game.
    pub fn scoreless_limit(&self) -> u32 {
        self.config.skips_per_player * self.players.len() as u32
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The unique top scorer of a finished game.
    pub fn winner(&self) -> Option<&str> {
        if !self.finished {
            return None;
        }
        let best = self.players.iter().map(|p| p.score).max()?;
        match self.players.iter().filter(|p| p.score == best).collect::<Vec<_>>().as_slice() {
            [only] => Some(only.id.as_str()),
            _ => None,
        }
    }

    /// Every tile in the game: board, racks and bag.
    pub fn all_tiles(&self) -> Vec<Tile> {
        self.board
            .tiles()
            .map(|(_, _, t)| t.tile())
            .chain(self.players.iter().flat_map(|p| p.rack.iter().copied()))
            .chain(self.bag.iter().copied())
            .collect()
    }

    /// Replace a seat's rack with `tiles`, trading with the bag.
    pub fn with_rack(&self, seat: usize, tiles: &[Tile]) -> Result<Self, WordError> {
        if seat >= self.players.len() {
            return Err(WordError::UnknownSeat(seat));
        }
        if tiles.len() > self.config.rack_size {
            return Err(WordError::RackTooLarge(self.config.rack_size));
        }
        let mut next = self.clone();
        let mut pool = std::mem::take(&mut next.players[seat].rack);
        pool.append(&mut next.bag);
        take_tiles(&mut pool, tiles).map_err(WordError::NotInRack)?;
        next.players[seat].rack = tiles.to_vec();
        next.bag = pool;
        Ok(next)
    }

    /// Validate `placement` for `seat` and work out its score.
    ///
    /// Checks run in a fixed order: shape, dictionary, rack, board, then every
    /// word the play forms.
    pub fn preview(
        &self,
        dict: &Dictionary,
        seat: usize,
        placement: &WordPlacement,
    ) -> Result<PlayPreview, WordError> {
        let rack = &self.players.get(seat).ok_or(WordError::UnknownSeat(seat))?.rack;
        let word: Vec<char> = placement.word.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
        if word.is_empty() {
            return Err(WordError::EmptyWord);
        }
        if !word.iter().all(char::is_ascii_alphabetic) {
            return Err(WordError::NotAlphabetic(placement.word.clone()));
        }
        if placement.row >= SIZE || placement.col >= SIZE {
            return Err(WordError::OutOfBounds { row: placement.row, col: placement.col });
        }
        let start = (placement.row, placement.col);
        let dir = placement.direction;
        let cells: Vec<(usize, usize)> = (0..word.len())
            .map(|i| dir.offset(start, i as isize))
            .collect::<Option<_>>()
            .ok_or(WordError::RunsOffBoard { len: word.len() })?;
        if let Some(&bad) = placement.blanks.iter().find(|&&i| i >= word.len()) {
            return Err(WordError::BlankIndex(bad));
        }

        let mut head = adjoining_letters(&self.board, start, dir, -1);
        head.reverse();
        let tail = cells.last().map_or_else(Vec::new, |&end| adjoining_letters(&self.board, end, dir, 1));
        let text: String = head.iter().chain(&word).chain(&tail).collect();
        if !dict.contains(&text) {
            return Err(WordError::NotInDictionary(text));
        }

        let mut pool = rack.clone();
        let mut tiles = Vec::new();
        let mut used = Vec::new();
        for (i, (&ch, &(r, c))) in word.iter().zip(&cells).enumerate() {
            if self.board.is_occupied(r, c) {
                continue;
            }
            let tile = if !placement.blanks.contains(&i) && pool.contains(&Tile::Letter(ch)) {
                Tile::Letter(ch)
            } else {
                Tile::Blank
            };
            let pos = pool.iter().position(|&t| t == tile).ok_or(WordError::MissingTile(ch))?;
            pool.swap_remove(pos);
            used.push(tile);
            tiles.push((r, c, PlacedTile { letter: ch, blank: tile == Tile::Blank }));
        }

        for (&ch, &(r, c)) in word.iter().zip(&cells) {
            if let Some(existing) = self.board.get(r, c) {
                if existing.letter != ch {
                    return Err(WordError::Conflict { row: r, col: c, found: existing.letter });
                }
            }
        }
        if tiles.is_empty() {
            return Err(WordError::NoNewTiles);
        }
        if self.board.is_empty() {
            if !cells.contains(&CENTER) {
                return Err(WordError::MustCoverCenter);
            }
        } else if !cells
            .iter()
            .any(|&(r, c)| self.board.is_occupied(r, c) || self.board.has_neighbor(r, c))
        {
            return Err(WordError::Disconnected);
        }

        let mut scratch = self.board.clone();
        for &(r, c, t) in &tiles {
            scratch.set(r, c, t);
        }
        let fresh: HashSet<(usize, usize)> = tiles.iter().map(|&(r, c, _)| (r, c)).collect();
        let cross: Vec<Vec<(usize, usize)>> = tiles
            .iter()
            .map(|&(r, c, _)| run_through(&scratch, (r, c), dir.cross()))
            .filter(|run| run.len() >= 2)
            .collect();
        let main = run_through(&scratch, start, dir);
        let mut runs = Vec::with_capacity(cross.len() + 1);
        if main.len() >= 2 || cross.is_empty() {
            runs.push(main);
        }
        runs.extend(cross);

        let mut words = Vec::with_capacity(runs.len());
        let mut score = 0;
        for run in &runs {
            let w = spell(&scratch, run);
            if !dict.contains(&w) {
                return Err(WordError::InvalidWord(w));
            }
            score += score_run(&scratch, run, &fresh);
            words.push(w);
        }
        let bingo = tiles.len() == self.config.rack_size;
        if bingo {
            score += self.config.bingo_bonus;
        }
        Ok(PlayPreview { tiles, used, words, score, bingo })
    }

    /// Play a word for `player`; returns the new state and the points scored.
    pub fn place(
        &self,
        dict: &Dictionary,
        player: &str,
        placement: &WordPlacement,
    ) -> Result<(Self, u32), WordError> {
        let seat = self.expect_turn(player)?;
        let play = self.preview(dict, seat, placement)?;
        let mut next = self.clone();
        for &(r, c, t) in &play.tiles {
            next.board.set(r, c, t);
        }
        take_tiles(&mut next.players[seat].rack, &play.used).map_err(WordError::NotInRack)?;
        next.players[seat].score += i64::from(play.score);
        next.refill(seat);
        next.scoreless_turns = 0;
        debug!("words: {} plays {:?} for {}", player, play.words, play.score);
        if next.bag.is_empty() && next.players[seat].rack.is_empty() {
            next.finish(Some(seat));
        } else {
            next.advance();
        }
        Ok((next, play.score))
    }

    pub fn pass(&self, player: &str) -> Result<Self, WordError> {
        self.expect_turn(player)?;
        let mut next = self.clone();
        debug!("words: {} passes", player);
        next.scoreless_turn();
        Ok(next)
    }

    /// Swap rack tiles for fresh ones from the bag, then reshuffle the bag.
    pub fn exchange(&self, player: &str, tiles: &[Tile]) -> Result<Self, WordError> {
        let seat = self.expect_turn(player)?;
        if tiles.is_empty() {
            return Err(WordError::EmptyExchange);
        }
        if self.bag.len() < self.config.min_bag_for_exchange {
            return Err(WordError::BagTooSmall {
                needed: self.config.min_bag_for_exchange,
                available: self.bag.len(),
            });
        }
        let mut next = self.clone();
        take_tiles(&mut next.players[seat].rack, tiles).map_err(WordError::NotInRack)?;
        for _ in 0..tiles.len() {
            if let Some(t) = next.bag.pop() {
                next.players[seat].rack.push(t);
            }
        }
        next.bag.extend_from_slice(tiles);
        next.rng_step += 1;
        next.bag.shuffle(&mut stream(next.seed, next.rng_step));
        debug!("words: {} exchanges {} tiles", player, tiles.len());
        next.scoreless_turn();
        Ok(next)
    }

    /// Apply any move; the score is returned for placements.
    pub fn apply(
        &self,
        dict: &Dictionary,
        player: &str,
        mv: &WordMove,
    ) -> Result<(Self, Option<u32>), WordError> {
        match mv {
            WordMove::Place(p) => self.place(dict, player, p).map(|(s, pts)| (s, Some(pts))),
            WordMove::Exchange { tiles } => self.exchange(player, tiles).map(|s| (s, None)),
            WordMove::Pass => self.pass(player).map(|s| (s, None)),
        }
    }

    fn expect_turn(&self, player: &str) -> Result<usize, WordError> {
        if self.finished {
            return Err(WordError::GameOver);
        }
        let seat = self.seat_of(player).ok_or_else(|| WordError::UnknownPlayer(player.into()))?;
        if seat != self.current {
            return Err(WordError::NotYourTurn(player.into()));
        }
        Ok(seat)
    }

    fn refill(&mut self, seat: usize) {
        while self.players[seat].rack.len() < self.config.rack_size {
            match self.bag.pop() {
                Some(t) => self.players[seat].rack.push(t),
                None => break,
            }
        }
    }

    fn scoreless_turn(&mut self) {
        self.scoreless_turns += 1;
        if self.scoreless_turns >= self.scoreless_limit() {
            self.finish(None);
        } else {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.turn_number += 1;
        self.current = (self.current + 1) % self.players.len();
    }

    /// Settle rack values. Whoever went out collects everyone else's.
    fn finish(&mut self, went_out: Option<usize>) {
        let mut collected = 0i64;
        for (i, p) in self.players.iter_mut().enumerate() {
            if Some(i) == went_out {
                continue;
            }
            let left = i64::from(rack_value(&p.rack));
            p.score -= left;
            collected += left;
        }
        if let Some(i) = went_out {
            self.players[i].score += collected;
        }
        self.finished = true;
        let scores: Vec<i64> = self.players.iter().map(|p| p.score).collect();
        info!("words: game over after {} turns, scores {:?}", self.turn_number, scores);
    }
}

/// Letters on consecutive occupied cells stepping away from `from`, nearest first.
fn adjoining_letters(board: &Board, from: (usize, usize), dir: Direction, step: isize) -> Vec<char> {
    let mut letters = Vec::new();
    let mut at = from;
    while let Some((cell, tile)) = dir.offset(at, step).and_then(|(r, c)| board.get(r, c).map(|t| ((r, c), t))) {
        letters.push(tile.letter);
        at = cell;
    }
    letters
}

/// The maximal run of occupied cells through `cell` along `dir`.
fn run_through(board: &Board, cell: (usize, usize), dir: Direction) -> Vec<(usize, usize)> {
    let mut start = cell;
    while let Some(prev) = dir.offset(start, -1).filter(|&(r, c)| board.is_occupied(r, c)) {
        start = prev;
    }
    let mut run = vec![start];
    let mut end = start;
    while let Some(next) = dir.offset(end, 1).filter(|&(r, c)| board.is_occupied(r, c)) {
        run.push(next);
        end = next;
    }
    run
}

fn spell(board: &Board, run: &[(usize, usize)]) -> String {
    run.iter().filter_map(|&(r, c)| board.get(r, c)).map(|t| t.letter).collect()
}

/// Letter premiums apply under new tiles only; word premiums of new tiles multiply once.
fn score_run(board: &Board, run: &[(usize, usize)], fresh: &HashSet<(usize, usize)>) -> u32 {
    let mut sum = 0;
    let mut multiplier = 1;
    for &(r, c) in run {
        let Some(tile) = board.get(r, c) else { continue };
        let mut value = tile.value();
        if fresh.contains(&(r, c)) {
            if let Some(p) = premium_at(r, c) {
                value *= p.letter_multiplier();
                multiplier *= p.word_multiplier();
            }
        }
        sum += value;
    }
    sum * multiplier
}
