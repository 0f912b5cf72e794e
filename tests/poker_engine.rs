use proptest::prelude::*;
use tabletop::engine::{GameKind, GameMove, GameState, Rules, Tabletop};
use tabletop::poker::{HistoryEntry, HistoryVerb, PlayerStatus, PokerAction, PokerConfig, PokerError, PokerRules, PokerState, Round};

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn heads_up() -> PokerState {
    PokerState::new(&ids(&["a", "b"]), PokerConfig { seed: Some(42), ..Default::default() }).unwrap()
}

fn seat_name(state: &PokerState) -> String {
    state.players()[state.current()].id().to_string()
}

#[test]
fn bet_and_call_builds_a_two_hundred_pot() {
    let g = heads_up();
    assert_eq!(g.round(), Round::PreFlop);
    assert_eq!(g.pot(), 0);
    for p in g.players() {
        assert_eq!(p.chips(), 1000);
        assert!(p.hole().is_some());
    }

    let bettor = seat_name(&g);
    let g = g.act(&bettor, PokerAction::Bet(100)).unwrap();
    assert_eq!(g.pot(), 100);
    assert_eq!(g.current_bet(), 100);
    assert_eq!(g.round(), Round::PreFlop, "caller still owes chips");

    let caller = seat_name(&g);
    assert_ne!(caller, bettor);
    let g = g.act(&caller, PokerAction::Call).unwrap();
    assert_eq!(g.pot(), 200);
    for p in g.players() {
        assert_eq!(p.contributed(), 100);
        assert_eq!(p.chips(), 900);
    }
    // Matched bets close the round inside the call itself; the street's
    // 100-chip bets survive as contributions and in the history.
    assert_eq!(g.round(), Round::Flop);
    assert_eq!(g.community().len(), 3);
    assert!(g.players().iter().all(|p| p.bet() == 0));
    let bettor_seat = g.seat_of(&bettor).unwrap();
    let caller_seat = g.seat_of(&caller).unwrap();
    assert_eq!(
        g.history(),
        &[
            HistoryEntry { seat: bettor_seat, verb: HistoryVerb::Bet, amount: Some(100), round: Round::PreFlop },
            HistoryEntry { seat: caller_seat, verb: HistoryVerb::Call, amount: Some(100), round: Round::PreFlop },
        ]
    );
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let g = heads_up();
    let mover = seat_name(&g);
    let waiting = g.players().iter().find(|p| p.id() != mover).unwrap().id().to_string();

    assert_eq!(g.act(&waiting, PokerAction::Check), Err(PokerError::NotYourTurn(waiting.clone())));
    assert_eq!(g.act("nobody", PokerAction::Check), Err(PokerError::UnknownPlayer("nobody".into())));
    assert_eq!(g.act(&mover, PokerAction::Raise(50)), Err(PokerError::RaiseNotAllowed));
    assert_eq!(
        g.act(&mover, PokerAction::Bet(5000)),
        Err(PokerError::AmountTooLarge { max: 1000, got: 5000 })
    );

    let rules = PokerRules;
    let outcome = rules.apply_move(&g, &waiting, &PokerAction::Check).unwrap();
    assert!(!outcome.valid);
    assert_eq!(outcome.state, g);
    assert!(outcome.reason.unwrap().contains("turn"));
}

#[test]
fn fold_ends_the_hand_and_reports_the_winner() {
    let table = Tabletop::with_builtin_dictionary();
    let state = GameState::Poker(heads_up());
    let mover = table.current_player(&state).unwrap();
    let outcome = table.apply_move(&state, &mover, &GameMove::Poker(PokerAction::Bet(50))).unwrap();
    let state = outcome.state;
    let folder = table.current_player(&state).unwrap();
    let outcome = table.apply_move(&state, &folder, &GameMove::Poker(PokerAction::Fold)).unwrap();
    assert!(outcome.valid);
    assert!(table.is_game_over(&outcome.state));
    assert_eq!(table.winner(&outcome.state), Some(mover.clone()));
    assert_eq!(table.current_player(&outcome.state), None);

    let after = table.apply_move(&outcome.state, &mover, &GameMove::Poker(PokerAction::Check));
    assert_eq!(after, Err(tabletop::ContractError::GameOver));
    assert_eq!(outcome.state.kind(), GameKind::Poker);
}

#[test]
fn all_in_runs_the_board_out() {
    let g = heads_up();
    let first = seat_name(&g);
    let g = g.act(&first, PokerAction::Bet(1000)).unwrap();
    let second = seat_name(&g);
    let g = g.act(&second, PokerAction::Call).unwrap();
    assert!(g.is_hand_over());
    assert_eq!(g.community().len(), 5);
    assert_eq!(g.total_chips(), 2000);
    assert_eq!(g.payouts().iter().sum::<u64>(), 2000);
}

#[test]
fn history_records_the_hand() {
    let g = PokerState::new(
        &ids(&["a", "b", "c"]),
        PokerConfig { small_blind: 5, big_blind: 10, seed: Some(1), ..Default::default() },
    )
    .unwrap();
    assert_eq!(g.history().len(), 2, "two blinds posted");
    let utg = seat_name(&g);
    let g = g.act(&utg, PokerAction::Fold).unwrap();
    assert_eq!(g.history().len(), 3);
    assert_eq!(g.players()[g.seat_of(&utg).unwrap()].status(), PlayerStatus::Folded);
}

/// Pick a legal-looking action from a random byte; illegal picks are simply rejected.
fn action_for(state: &PokerState, pick: u8, size: u64) -> PokerAction {
    let seat = state.current();
    match pick % 5 {
        0 => PokerAction::Fold,
        1 => PokerAction::Check,
        2 => PokerAction::Call,
        3 => PokerAction::Bet(size.max(1)),
        _ => PokerAction::Raise(state.current_bet() + size.max(state.min_raise()).min(state.max_total(seat))),
    }
}

proptest! {
    #[test]
    fn chips_are_conserved_within_a_hand(
        seed in any::<u64>(),
        players in 2usize..6,
        script in proptest::collection::vec((any::<u8>(), 1u64..400), 1..80),
    ) {
        let names: Vec<String> = (0..players).map(|i| format!("p{i}")).collect();
        let mut g = PokerState::new(
            &names,
            PokerConfig { small_blind: 5, big_blind: 10, seed: Some(seed), ..Default::default() },
        ).unwrap();
        let total = g.total_chips();
        for (pick, size) in script {
            if g.is_hand_over() {
                break;
            }
            let who = seat_name(&g);
            let action = action_for(&g, pick, size);
            if let Ok(next) = g.act(&who, action) {
                g = next;
            }
            prop_assert_eq!(g.total_chips(), total);
            if let Some(n) = g.round().community_len() {
                prop_assert_eq!(g.community().len(), n);
            }
        }
    }
}
