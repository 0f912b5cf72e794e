use clap::Parser;
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tabletop::backgammon::{BackgammonConfig, BackgammonState};
use tabletop::poker::{PokerConfig, PokerState};
use tabletop::words::{Dictionary, WordsConfig, WordsState};
use tabletop::{Difficulty, GameKind, GameState, OpponentService, PlayerId, Tabletop};

/// Scripted self-play for the tabletop engines
#[derive(Parser, Debug)]
#[command(name = "tabletop")]
#[command(version, about = "Watch scripted opponents play Hold'em, backgammon or the word game")]
struct Cli {
    /// Game to play: poker, backgammon or words
    #[arg(short, long, default_value = "poker")]
    game: GameKind,

    /// Number of seats
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Opponent difficulty: easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Seed for the game and the opponents; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Word list for the word game, one word per line
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Poker hands to play before stopping
    #[arg(long, default_value_t = 10)]
    hands: u64,

    /// Give up after this many moves in one game or hand
    #[arg(long, default_value_t = 2000)]
    max_turns: usize,
}

fn setup(cli: &Cli, ids: &[PlayerId]) -> Result<GameState, Box<dyn Error>> {
    Ok(match cli.game {
        GameKind::Poker => GameState::Poker(PokerState::new(
            ids,
            PokerConfig { small_blind: 5, big_blind: 10, seed: cli.seed, ..Default::default() },
        )?),
        GameKind::Backgammon => GameState::Backgammon(BackgammonState::new(
            ids,
            BackgammonConfig { seed: cli.seed, ..Default::default() },
        )?),
        GameKind::Words => {
            GameState::Words(WordsState::new(ids, WordsConfig { seed: cli.seed, ..Default::default() })?)
        }
    })
}

/// Play until the game (or poker hand) ends; returns the number of moves made.
fn play_out(
    table: &Tabletop,
    bot: &OpponentService,
    cli: &Cli,
    state: &mut GameState,
    seed: &mut u64,
) -> Result<usize, Box<dyn Error>> {
    let mut turns = 0;
    while !table.is_game_over(state) {
        if turns >= cli.max_turns {
            warn!("stopping after {} moves", turns);
            break;
        }
        let Some(who) = table.current_player(state) else { break };
        let hint = bot.get_move_seeded(cli.game, state, cli.difficulty, *seed)?;
        *seed = seed.wrapping_add(1);
        let outcome = table.apply_move(state, &who, &hint.action)?;
        if !outcome.valid {
            let reason = outcome.reason.unwrap_or_default();
            return Err(format!("{who} suggested an illegal move: {reason}").into());
        }
        info!("{who}: {} ({:.2})", hint.rationale, hint.confidence);
        *state = outcome.state;
        turns += 1;
    }
    Ok(turns)
}

fn report(table: &Tabletop, state: &GameState) {
    match state {
        GameState::Poker(s) => {
            for p in s.players() {
                println!("{:>8} {:>6} chips", p.id(), p.chips());
            }
        }
        GameState::Backgammon(s) => {
            println!("{}", s.board());
            if let Some(side) = s.winner() {
                println!("{} ({}) wins {} point(s)", s.player(side), side, s.result_points());
            }
        }
        GameState::Words(s) => {
            println!("{}", s.board());
            for p in s.players() {
                println!("{:>8} {:>4}", p.id(), p.score());
            }
        }
    }
    match table.winner(state) {
        Some(id) => println!("winner: {id}"),
        None => println!("no single winner"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let dictionary = match &cli.dictionary {
        Some(path) => Dictionary::load(path)?,
        None => Dictionary::builtin(),
    };
    let dictionary = Arc::new(dictionary);
    let table = Tabletop::new(dictionary.clone());
    let bot = OpponentService::new(dictionary);

    let ids: Vec<PlayerId> = (1..=cli.players).map(|i| format!("bot{i}")).collect();
    let mut state = setup(&cli, &ids)?;
    let mut seed = cli.seed.unwrap_or_else(rand::random);
    println!("tabletop {} | {} | {} players | {}", tabletop::VERSION, cli.game, ids.len(), cli.difficulty);

    let mut turns = play_out(&table, &bot, &cli, &mut state, &mut seed)?;
    if let GameState::Poker(hand) = &state {
        let mut hand = hand.clone();
        while hand.hand_number() < cli.hands && hand.is_hand_over() && !hand.is_match_over() {
            let mut next = GameState::Poker(hand.next_hand()?);
            turns += play_out(&table, &bot, &cli, &mut next, &mut seed)?;
            let GameState::Poker(h) = next else { break };
            hand = h;
        }
        state = GameState::Poker(hand);
    }

    println!("{turns} moves played");
    report(&table, &state);
    Ok(())
}
