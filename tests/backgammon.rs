use proptest::prelude::*;
use tabletop::backgammon::board::{CHECKERS, POINTS};
use tabletop::backgammon::{
    BackgammonConfig, BackgammonError, BackgammonMove, BackgammonRules, BackgammonState, Board,
    CheckerMove, Location, Phase, Side,
};
use tabletop::engine::Rules;

fn players() -> Vec<String> {
    vec!["white".to_string(), "black".to_string()]
}

fn opening() -> BackgammonState {
    BackgammonState::new(&players(), BackgammonConfig { seed: Some(9), ..Default::default() }).unwrap()
}

fn checkers(board: &Board, side: Side) -> u32 {
    (0..POINTS).map(|p| u32::from(board.count(side, p))).sum::<u32>()
        + u32::from(board.bar(side))
        + u32::from(board.off(side))
}

#[test]
fn opening_three_five_moves_from_white_points_only() {
    let g = opening().with_dice(3, 5).unwrap();
    let moves = g.available_moves();
    assert!(!moves.is_empty());
    for m in &moves {
        let Location::Point(from) = m.from else { panic!("unexpected source {}", m.from) };
        assert!([23, 12, 7, 5].contains(&from), "moved from {from}");
        let Location::Point(to) = m.to else { panic!("unexpected destination {}", m.to) };
        let pips = from - to;
        assert!(pips == 3 || pips == 5);
        assert!(g.board().count(Side::Black, usize::from(to)) < 2, "{to} is blocked");
    }
    // 23 -> 18 lands on Black's five-checker point.
    assert!(!moves.iter().any(|m| m.from == Location::Point(23) && m.to == Location::Point(18)));
    assert!(moves.iter().any(|m| m.from == Location::Point(12) && m.to == Location::Point(7)));
}

#[test]
fn wrong_player_and_phase_are_rejected() {
    let rules = BackgammonRules;
    let g = opening();
    let outcome = rules.apply_move(&g, "black", &BackgammonMove::Roll).unwrap();
    assert!(!outcome.valid);
    assert_eq!(outcome.state, g);

    let mv = CheckerMove { from: Location::Point(12), to: Location::Point(9), die: 0 };
    assert_eq!(g.make_move(mv), Err(BackgammonError::WrongPhase(Phase::Rolling)));
    assert_eq!(g.with_dice(0, 3), Err(BackgammonError::InvalidDie(0)));
}

#[test]
fn illegal_step_is_refused() {
    let g = opening().with_dice(3, 5).unwrap();
    let mv = CheckerMove { from: Location::Point(12), to: Location::Point(10), die: 0 };
    assert_eq!(
        g.make_move(mv),
        Err(BackgammonError::IllegalMove { from: Location::Point(12), to: Location::Point(10) })
    );
}

#[test]
fn roll_is_reproducible_from_the_seed() {
    let a = opening().roll().unwrap();
    let b = opening().roll().unwrap();
    assert_eq!(a.dice(), b.dice());
    let values = a.dice().values();
    assert!(values.len() == 2 || values.len() == 4);
    assert!(values.iter().all(|v| (1..=6).contains(v)));
}

#[test]
fn hitting_sends_a_blot_to_the_bar() {
    let mut points = [0i8; POINTS];
    points[10] = 15;
    points[7] = -1;
    points[20] = -14;
    let board = Board::from_parts(points, [0, 0], [0, 0]).unwrap();
    let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
        .unwrap()
        .with_dice(3, 1)
        .unwrap();
    let g = g.make_move(CheckerMove { from: Location::Point(10), to: Location::Point(7), die: 0 }).unwrap();
    assert_eq!(g.board().bar(Side::Black), 1);
    assert_eq!(g.board().owner(7), Some(Side::White));
    assert_eq!(checkers(g.board(), Side::Black), u32::from(CHECKERS));
}

#[test]
fn cube_value_scales_the_result() {
    let mut points = [0i8; POINTS];
    points[0] = 1;
    points[20] = -13;
    let board = Board::from_parts(points, [0, 0], [14, 2]).unwrap();
    let g = BackgammonState::from_position(&players(), board, Side::White, Default::default())
        .unwrap()
        .offer_double()
        .unwrap()
        .accept_double()
        .unwrap();
    assert_eq!(g.cube().value, 2);
    assert_eq!(g.cube().owner, Some(Side::Black));
    let g = g.with_dice(1, 2).unwrap();
    let done = g.make_move(CheckerMove { from: Location::Point(0), to: Location::Off, die: 0 }).unwrap();
    assert!(done.is_over());
    assert_eq!(done.winner(), Some(Side::White));
    assert_eq!(done.result_points(), 2, "single game at cube 2");
}

#[test]
fn disabled_cube_cannot_be_offered() {
    let g = BackgammonState::new(
        &players(),
        BackgammonConfig { doubling_cube: false, seed: Some(1), ..Default::default() },
    )
    .unwrap();
    assert!(!g.can_double());
    assert_eq!(g.offer_double(), Err(BackgammonError::CubeDisabled));
}

proptest! {
    #[test]
    fn checkers_are_conserved(seed in any::<u64>(), picks in proptest::collection::vec(any::<usize>(), 1..200)) {
        let mut g = BackgammonState::new(
            &players(),
            BackgammonConfig { seed: Some(seed), ..Default::default() },
        ).unwrap();
        for pick in picks {
            if g.is_over() {
                break;
            }
            g = match g.phase() {
                Phase::Rolling => g.roll().unwrap(),
                Phase::Moving => {
                    let moves = g.available_moves();
                    prop_assert!(!moves.is_empty(), "a moving phase always has a move");
                    g.make_move(moves[pick % moves.len()]).unwrap()
                }
                Phase::Doubling | Phase::Finished => break,
            };
            for side in Side::ALL {
                prop_assert_eq!(checkers(g.board(), side), u32::from(CHECKERS));
            }
        }
    }
}
