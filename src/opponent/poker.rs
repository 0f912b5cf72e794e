use super::{jitter, Difficulty, Suggestion};
use crate::engine::{ContractError, GameMove};
use crate::poker::cards::Card;
use crate::poker::evaluator::evaluate_best;
use crate::poker::{HoleCards, PlayerStatus, PokerAction, PokerState, Round};
use rand::Rng;

/// Play-style knobs for one difficulty tier.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct PokerProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    /// Chance of betting a weak hand when checked to.
    pub bluff: f64,
    /// Scale of the error added to the strength estimate.
    pub mistake_rate: f64,
}

impl PokerProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff, mistake_rate) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03, 0.28),
            Difficulty::Medium => (0.5, 0.35, 0.05, 0.14),
            Difficulty::Hard => (0.62, 0.48, 0.08, 0.06),
        };
        Self { difficulty, tightness, aggression, bluff, mistake_rate }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    HeadsUp,
    Early,
    Middle,
    Late,
}

fn position_of(seat: usize, dealer: usize, num_players: usize) -> Position {
    if num_players <= 2 {
        return Position::HeadsUp;
    }
    let dist = (seat + num_players - dealer) % num_players;
    let frac = dist as f64 / num_players as f64;
    if dist == 0 || frac >= 0.7 {
        Position::Late
    } else if frac <= 0.3 {
        Position::Early
    } else {
        Position::Middle
    }
}

/// Strength points for acting early or late.
fn position_adjustment(position: Position) -> f64 {
    match position {
        Position::HeadsUp => 3.0,
        Position::Early => -5.0,
        Position::Middle => 0.0,
        Position::Late => 5.0,
    }
}

/// Pre-flop strength in `0..=100` from ranks, pairing, suitedness and gap.
pub fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = f64::from(hole.first().rank().value());
    let b = f64::from(hole.second().rank().value());
    let high = a.max(b);
    let low = a.min(b);
    let gap = high - low;

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if hole.is_pair() {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if hole.is_suited() {
        score += 0.05;
    }
    if gap == 1.0 {
        score += 0.05;
    } else if gap == 2.0 {
        score += 0.02;
    } else if gap > 4.0 {
        score -= 0.05;
    }
    score.clamp(0.0, 1.0) * 100.0
}

/// Extra points for flush and straight draws while cards are still to come.
fn draw_bonus(cards: &[Card]) -> f64 {
    let mut suits = [0u8; 4];
    let mut seen = [false; 15];
    for c in cards {
        suits[c.suit().index()] += 1;
        seen[usize::from(c.rank().value())] = true;
    }
    seen[1] = seen[14];
    let mut bonus = 0.0;
    if suits.iter().any(|&n| n == 4) {
        bonus += 8.0;
    }
    let open_ended = (1..=10).any(|lo| (lo..lo + 4).all(|r| seen[r]));
    if open_ended {
        bonus += 6.0;
    }
    bonus
}

/// Hand strength in `0..=100`.
///
/// With a board, the best hand's category supplies 85 points and its top card
/// 15; draws add a little before the river. Without one, a pre-flop formula is
/// used. Table position shifts either estimate.
pub fn hand_strength(state: &PokerState, seat: usize) -> Option<f64> {
    let hole = state.players().get(seat)?.hole()?;
    let position = position_of(seat, state.dealer(), state.players().len());
    let board = state.community().as_slice();
    let base = if board.is_empty() {
        preflop_strength(&hole)
    } else {
        let mut cards = hole.as_array().to_vec();
        cards.extend_from_slice(board);
        match evaluate_best(&cards) {
            Ok(eval) => {
                let category = f64::from(eval.category.ordinal()) / 9.0;
                let top = f64::from(eval.best_five[0].rank().value()) / 14.0;
                let mut s = category * 85.0 + top * 15.0;
                if state.round() < Round::River {
                    s += draw_bonus(&cards);
                }
                s
            }
            Err(_) => preflop_strength(&hole),
        }
    };
    Some((base + position_adjustment(position)).clamp(0.0, 100.0))
}

fn bet_target(state: &PokerState, seat: usize, aggression: f64, strength: f64) -> u64 {
    let min_bet = state.min_bet();
    let max_total = state.max_total(seat);
    if max_total <= min_bet {
        return max_total;
    }
    let factor = if strength > 0.8 {
        0.9
    } else if strength > 0.6 {
        0.6
    } else {
        0.33
    };
    let scale = 0.8 + aggression * 0.4;
    let size = ((state.pot() as f64) * factor * scale).round() as u64;
    size.max(min_bet).min(max_total)
}

/// A legal raise target, or `None` when the seat cannot put in more than the current bet.
fn raise_target(state: &PokerState, seat: usize, aggression: f64, strength: f64) -> Option<u64> {
    let max_total = state.max_total(seat);
    if max_total <= state.current_bet() {
        return None;
    }
    if max_total <= state.min_raise_to() {
        return Some(max_total);
    }
    let factor = if strength > 0.85 {
        1.0
    } else if strength > 0.65 {
        0.7
    } else {
        0.5
    };
    let scale = 0.9 + aggression * 0.3;
    let raise = ((state.pot().max(state.current_bet()) as f64) * factor * scale).round() as u64;
    Some((state.current_bet() + state.min_raise().max(raise)).min(max_total))
}

pub(crate) fn suggest<R: Rng + ?Sized>(
    state: &PokerState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Suggestion, ContractError> {
    if state.is_hand_over() {
        return Err(ContractError::GameOver);
    }
    let seat = state.current();
    let player = &state.players()[seat];
    if player.status() != PlayerStatus::Active {
        return Err(ContractError::NobodyToAct);
    }
    let strength = hand_strength(state, seat).ok_or(ContractError::NobodyToAct)? / 100.0;
    let profile = PokerProfile::for_difficulty(difficulty);

    let to_call = state.to_call(seat);
    let pot_odds = if to_call == 0 {
        0.0
    } else {
        to_call as f64 / (state.pot() + to_call) as f64
    };
    let adjusted = (strength + jitter(rng, profile.mistake_rate * 0.18)).clamp(0.0, 1.0);
    let fold_threshold = (0.2 + profile.tightness * 0.25 + pot_odds * 0.4).clamp(0.1, 0.9);
    let raise_threshold = (0.68 - profile.aggression * 0.25).clamp(0.15, 0.9);
    let note = |what: &str| {
        format!("{what}: strength {:.0}, pot odds {:.2}", strength * 100.0, pot_odds)
    };

    let (action, confidence, rationale) = if to_call > 0 {
        if adjusted < fold_threshold && adjusted < pot_odds + 0.15 {
            (PokerAction::Fold, 1.0 - adjusted, note("fold"))
        } else if adjusted > raise_threshold && rng.random::<f64>() < profile.aggression {
            match raise_target(state, seat, profile.aggression, adjusted) {
                Some(t) => (PokerAction::Raise(t), adjusted, note("value raise")),
                None => (PokerAction::Call, adjusted, note("call")),
            }
        } else {
            (PokerAction::Call, 1.0 - (fold_threshold - adjusted).abs(), note("call"))
        }
    } else {
        let value = adjusted > raise_threshold && rng.random::<f64>() < profile.aggression;
        let bluff = !value && adjusted < fold_threshold && rng.random::<f64>() < profile.bluff;
        let reason = if value { "value" } else { "bluff" };
        let confidence = if value { adjusted } else { 1.0 - adjusted };
        match (value || bluff, state.current_bet()) {
            (false, _) => (PokerAction::Check, 0.5, note("check")),
            (true, 0) => {
                let t = bet_target(state, seat, profile.aggression, adjusted);
                (PokerAction::Bet(t), confidence, note(&format!("{reason} bet")))
            }
            (true, _) => match raise_target(state, seat, profile.aggression, adjusted) {
                Some(t) => (PokerAction::Raise(t), confidence, note(&format!("{reason} raise"))),
                None => (PokerAction::Check, 0.5, note("check")),
            },
        }
    };
    Ok(Suggestion::new(GameMove::Poker(action), confidence, rationale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::PokerConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn preflop_ranks_premium_pairs_above_junk() {
        let aces: HoleCards = "As Ah".parse().unwrap();
        let junk: HoleCards = "7c 2d".parse().unwrap();
        assert!(preflop_strength(&aces) > 80.0);
        assert!(preflop_strength(&junk) < 40.0);
    }

    #[test]
    fn draws_are_rewarded() {
        let cards: Vec<Card> = crate::poker::cards::parse_cards("Ah Kh 2h 9h 5c").unwrap();
        assert_eq!(draw_bonus(&cards), 8.0);
        let cards: Vec<Card> = crate::poker::cards::parse_cards("9c Td Jh Qs 2c").unwrap();
        assert_eq!(draw_bonus(&cards), 6.0);
    }

    #[test]
    fn suggestions_are_always_legal() {
        for seed in 0..40u64 {
            let ids: Vec<String> = (0..4).map(|i| format!("p{i}")).collect();
            let mut state = PokerState::new(
                &ids,
                PokerConfig { small_blind: 5, big_blind: 10, seed: Some(seed), ..Default::default() },
            )
            .unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut guard = 0;
            while !state.is_hand_over() && guard < 200 {
                guard += 1;
                let difficulty = Difficulty::ALL[guard % 3];
                let s = suggest(&state, difficulty, &mut rng).unwrap();
                let GameMove::Poker(action) = s.action else { panic!("wrong game") };
                let who = state.players()[state.current()].id().to_string();
                state = state.act(&who, action).unwrap_or_else(|e| panic!("{action:?} rejected: {e}"));
            }
            assert!(state.is_hand_over());
        }
    }
}
