use proptest::prelude::*;
use std::io::Write;
use tabletop::engine::Rules;
use tabletop::words::tiles::{full_bag, parse_tiles, tile_counts};
use tabletop::words::{
    Dictionary, DictionaryError, Direction, WordError, WordMove, WordPlacement, WordRules, WordsConfig,
    WordsState,
};
use tabletop::{Difficulty, GameKind, GameState, OpponentService};
use std::sync::Arc;

fn game(seed: u64) -> WordsState {
    let players = vec!["ann".to_string(), "bob".to_string()];
    WordsState::new(&players, WordsConfig { seed: Some(seed), ..Default::default() }).unwrap()
}

/// Fix both racks; seat 1 is emptied first so seat 0 can draw anything.
fn with_racks(first: &str, second: &str) -> WordsState {
    game(4)
        .with_rack(1, &[])
        .and_then(|g| g.with_rack(0, &parse_tiles(first).unwrap()))
        .and_then(|g| g.with_rack(1, &parse_tiles(second).unwrap()))
        .unwrap()
}

fn across(word: &str, row: usize, col: usize) -> WordPlacement {
    WordPlacement::new(word, row, col, Direction::Across)
}

#[test]
fn first_word_must_cover_the_centre() {
    let dict = Dictionary::builtin();
    let g = with_racks("CATDOGS", "EEEE");
    assert_eq!(g.place(&dict, "ann", &across("cat", 3, 3)).unwrap_err(), WordError::MustCoverCenter);
    let (g, pts) = g.place(&dict, "ann", &across("cat", 7, 5)).unwrap();
    assert_eq!(pts, 10);
    assert!(g.board().is_occupied(7, 7));
}

#[test]
fn later_words_must_connect() {
    let dict = Dictionary::builtin();
    let g = with_racks("CATSDOG", "DOGSEAT");
    let (g, _) = g.place(&dict, "ann", &across("CAT", 7, 5)).unwrap();
    assert_eq!(g.place(&dict, "bob", &across("DOG", 0, 0)).unwrap_err(), WordError::Disconnected);

    let rules = WordRules::new(Arc::new(dict));
    let outcome = rules
        .apply_move(&g, "bob", &WordMove::Place(across("DOG", 0, 0)))
        .unwrap();
    assert!(!outcome.valid);
    assert_eq!(outcome.state, g);
    assert!(outcome.reason.unwrap().contains("connect"));
}

#[test]
fn extending_a_word_scores_only_new_premiums() {
    let dict = Dictionary::builtin();
    let g = with_racks("CATQZXJ", "SEEEEEE");
    let (g, _) = g.place(&dict, "ann", &across("CAT", 7, 5)).unwrap();
    let (g, pts) = g.place(&dict, "bob", &across("CATS", 7, 5)).unwrap();
    assert_eq!(pts, 6, "the centre double word is not reused");
    assert_eq!(g.players()[1].score(), 6);
}

#[test]
fn full_rack_play_earns_the_bingo() {
    let dict = Dictionary::builtin();
    let g = with_racks("GARDENS", "EEEE");
    let preview = g.preview(&dict, 0, &across("GARDENS", 7, 1)).unwrap();
    assert!(preview.bingo);
    assert_eq!(preview.score, 20 + 50);
    let (g, pts) = g.place(&dict, "ann", &across("GARDENS", 7, 1)).unwrap();
    assert_eq!(pts, 70);
    assert_eq!(g.players()[0].rack().len(), 7, "rack refilled from the bag");
}

#[test]
fn placement_checks_run_in_order() {
    let dict = Dictionary::builtin();
    let g = with_racks("CATS", "EEEE");
    assert_eq!(g.preview(&dict, 0, &across("", 7, 7)), Err(WordError::EmptyWord));
    assert_eq!(g.preview(&dict, 0, &across("c4t", 7, 7)), Err(WordError::NotAlphabetic("c4t".into())));
    assert_eq!(g.preview(&dict, 0, &across("cats", 7, 13)), Err(WordError::RunsOffBoard { len: 4 }));
    assert_eq!(g.preview(&dict, 0, &across("qzxv", 7, 7)), Err(WordError::NotInDictionary("QZXV".into())));
    assert_eq!(g.preview(&dict, 0, &across("dog", 7, 7)), Err(WordError::MissingTile('D')));
}

#[test]
fn dictionary_lookup_is_case_insensitive() {
    let dict = Dictionary::from_words(["Garden", "cat"]);
    assert!(dict.contains("GARDEN"));
    assert!(dict.contains("garden"));
    assert!(dict.contains("Cat"));
    assert!(!dict.contains(""));
    assert!(!dict.contains("dog"));
    assert_eq!(dict.max_len(), 6);
}

#[test]
fn dictionary_loads_from_a_file() {
    let path = std::env::temp_dir().join(format!("tabletop-words-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "# test list\nalpha\nbeta\n\ngamma").unwrap();
    let dict = Dictionary::load(&path).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("Beta"));
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(Dictionary::load(&path), Err(DictionaryError::Io { .. })));
}

#[test]
fn opponent_plays_a_whole_game_legally() {
    let dict = Arc::new(Dictionary::from_words([
        "at", "ta", "to", "on", "no", "in", "it", "is", "as", "an", "na", "re", "er", "ne", "en",
        "oe", "te", "ti", "es", "so", "ate", "eat", "tea", "tan", "ant", "net", "ten", "not", "ton",
        "tin", "nit", "sit", "its", "set", "rat", "tar", "art", "ear", "are", "era", "one", "eon",
        "toe", "rose", "sore", "stone", "notes", "onset", "tones", "rates", "stare", "tears",
    ]));
    let svc = OpponentService::new(dict.clone());
    let rules = WordRules::new(dict);
    let mut g = game(12);
    let mut turns = 0;
    while !g.is_over() && turns < 1000 {
        let who = g.current_player().unwrap().to_string();
        let state = GameState::Words(g.clone());
        let hint = svc.get_move_seeded(GameKind::Words, &state, Difficulty::Hard, turns).unwrap();
        let tabletop::GameMove::Words(mv) = hint.action else { panic!("wrong game") };
        let outcome = rules.apply_move(&g, &who, &mv).unwrap();
        assert!(outcome.valid, "{mv:?} rejected: {:?}", outcome.reason);
        g = outcome.state;
        assert_eq!(tile_counts(g.all_tiles()), tile_counts(full_bag()));
        turns += 1;
    }
    assert!(g.is_over(), "game should finish by passing out or going out");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn tiles_are_conserved_through_passes_and_exchanges(
        seed in any::<u64>(),
        script in proptest::collection::vec((any::<bool>(), 1usize..8), 1..12),
    ) {
        let mut g = game(seed);
        for (exchange, count) in script {
            if g.is_over() {
                break;
            }
            let seat = g.current();
            let who = g.players()[seat].id().to_string();
            let next = if exchange {
                let rack = g.players()[seat].rack();
                let tiles = rack[..count.min(rack.len())].to_vec();
                g.exchange(&who, &tiles)
            } else {
                g.pass(&who)
            };
            g = next.unwrap();
            prop_assert_eq!(tile_counts(g.all_tiles()), tile_counts(full_bag()));
            prop_assert!(g.players().iter().all(|p| p.rack().len() <= 7));
        }
    }
}
