//! tabletop: rules engines and scripted opponents for three turn-based games.
//!
//! - [`poker`]: no-limit Texas Hold'em with side pots and a seven-card evaluator
//! - [`backgammon`]: two-player backgammon with the doubling cube
//! - [`words`]: a 15x15 word-placement game with premium squares and a dictionary
//! - [`opponent`]: Easy/Medium/Hard heuristics that suggest legal moves
//!
//! States are immutable values: every operation returns a new state and leaves
//! its input untouched. Randomness is drawn from a per-game seed, so replaying
//! the same moves from the same seed reproduces the game.
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use tabletop::poker::cards::{Card, Rank, Suit};
//! use tabletop::poker::evaluator::{evaluate_holdem, Category};
//! use tabletop::poker::hand::{CommunityCards, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = CommunityCards::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Quick start: ask an opponent for a move
//! ```
//! use tabletop::engine::{GameKind, Tabletop};
//! use tabletop::opponent::{Difficulty, OpponentService};
//!
//! let table = Tabletop::with_builtin_dictionary();
//! let players = vec!["ann".to_string(), "bob".to_string()];
//! let state = table.construct(GameKind::Backgammon, &players).unwrap();
//! let bot = OpponentService::new(table.dictionary().clone());
//! let hint = bot.get_move_seeded(GameKind::Backgammon, &state, Difficulty::Hard, 7).unwrap();
//! assert!(table.apply_move(&state, "ann", &hint.action).unwrap().valid);
//! ```

pub mod backgammon;
pub mod engine;
pub mod opponent;
pub mod poker;
pub mod rng;
pub mod words;

pub use engine::{
    ContractError, GameKind, GameMove, GameState, MoveOutcome, PlayerId, Rules, SetupError, Tabletop,
};
pub use opponent::{Difficulty, OpponentService, Suggestion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
