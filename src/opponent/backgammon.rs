use super::{jitter, Difficulty, Suggestion};
use crate::backgammon::board::POINTS;
use crate::backgammon::{BackgammonMove, BackgammonState, Board, CheckerMove, Phase, Side};
use crate::engine::{ContractError, GameMove};
use rand::Rng;

/// Feature weights for scoring a position, plus the noise added per candidate.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Weights {
    /// Per pip of race lead.
    pub race: f64,
    /// Per blot the opponent can hit.
    pub blot: f64,
    /// Per made point, doubled in the home board.
    pub block: f64,
    /// Per checker borne off.
    pub bear_off: f64,
    /// Per opposing checker on the bar.
    pub hit: f64,
    pub noise: f64,
    /// Race lead, as a share of the opponent's pip count, needed to offer a double.
    pub double_lead: Option<f64>,
}

impl Weights {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                race: 0.05,
                blot: 1.0,
                block: 0.5,
                bear_off: 1.0,
                hit: 1.5,
                noise: 4.0,
                double_lead: None,
            },
            Difficulty::Medium => Self {
                race: 0.1,
                blot: 2.0,
                block: 1.0,
                bear_off: 2.0,
                hit: 2.5,
                noise: 1.5,
                double_lead: Some(0.25),
            },
            Difficulty::Hard => Self {
                race: 0.12,
                blot: 2.5,
                block: 1.2,
                bear_off: 2.5,
                hit: 3.0,
                noise: 0.3,
                double_lead: Some(0.15),
            },
        }
    }
}

/// A blot of `side` on `point` that some opposing checker could reach in one roll.
fn is_exposed(board: &Board, side: Side, point: usize) -> bool {
    let opp = side.opponent();
    if board.bar(opp) > 0 {
        let entry_distance = match opp {
            Side::White => POINTS - point,
            Side::Black => point + 1,
        };
        if entry_distance <= 12 {
            return true;
        }
    }
    (1..=12).any(|d| {
        let from = match opp {
            Side::White => point.checked_add(d).filter(|&p| p < POINTS),
            Side::Black => point.checked_sub(d),
        };
        from.is_some_and(|p| board.count(opp, p) > 0)
    })
}

/// Position value for `side`; higher is better.
pub fn evaluate(board: &Board, side: Side, w: &Weights) -> f64 {
    let opp = side.opponent();
    let race = f64::from(board.pip_count(opp)) - f64::from(board.pip_count(side));
    let mut blots = 0.0;
    let mut blocks = 0.0;
    for p in 0..POINTS {
        let n = board.count(side, p);
        if n == 1 && is_exposed(board, side, p) {
            blots += 1.0;
        } else if n >= 2 {
            blocks += if Board::is_home(side, p) { 2.0 } else { 1.0 };
        }
    }
    w.race * race - w.blot * blots + w.block * blocks
        + w.bear_off * f64::from(board.off(side))
        + w.hit * f64::from(board.bar(opp))
}

fn best_move<R: Rng + ?Sized>(
    state: &BackgammonState,
    w: &Weights,
    rng: &mut R,
) -> Option<(CheckerMove, f64, f64)> {
    let side = state.turn();
    let mut scored: Vec<(CheckerMove, f64)> = state
        .available_moves()
        .into_iter()
        .filter_map(|m| {
            let next = state.make_move(m).ok()?;
            Some((m, evaluate(next.board(), side, w) + jitter(rng, w.noise)))
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    let (mv, best) = *scored.first()?;
    let margin = scored.get(1).map_or(f64::INFINITY, |s| best - s.1);
    Some((mv, best, margin))
}

pub(crate) fn suggest<R: Rng + ?Sized>(
    state: &BackgammonState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Suggestion, ContractError> {
    let w = Weights::for_difficulty(difficulty);
    let side = state.to_act().ok_or(ContractError::GameOver)?;
    let board = state.board();
    let mine = f64::from(board.pip_count(side));
    let theirs = f64::from(board.pip_count(side.opponent()));
    let lead = (theirs - mine) / theirs.max(1.0);

    let suggestion = match state.phase() {
        Phase::Finished => return Err(ContractError::GameOver),
        Phase::Rolling => match w.double_lead {
            Some(needed) if state.can_double() && lead >= needed => Suggestion::new(
                GameMove::Backgammon(BackgammonMove::OfferDouble),
                (0.5 + lead).min(0.95),
                format!("double: race lead {:.0}%", lead * 100.0),
            ),
            _ => Suggestion::new(GameMove::Backgammon(BackgammonMove::Roll), 1.0, "roll"),
        },
        Phase::Doubling => {
            // `side` is the responder here; a large deficit is a drop.
            let hopeless =
                lead < -0.3 || (board.off(side.opponent()) >= 10 && board.off(side) == 0);
            let verdict = if hopeless { "drop" } else { "take" };
            let action = if hopeless {
                BackgammonMove::DeclineDouble
            } else {
                BackgammonMove::AcceptDouble
            };
            Suggestion::new(
                GameMove::Backgammon(action),
                (0.5 + lead.abs()).min(0.95),
                format!("{verdict} double: race lead {:.0}%", lead * 100.0),
            )
        }
        Phase::Moving => {
            let (mv, value, margin) = best_move(state, &w, rng).ok_or(ContractError::NobodyToAct)?;
            Suggestion::new(
                GameMove::Backgammon(BackgammonMove::Move(mv)),
                0.5 + (margin / 10.0).min(0.49),
                format!("{} -> {} scores {:.1}", mv.from, mv.to, value),
            )
        }
    };
    Ok(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backgammon::{BackgammonConfig, Location};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn players() -> Vec<String> {
        vec!["w".into(), "b".into()]
    }

    #[test]
    fn prefers_hitting_a_blot() {
        let mut points = [0i8; POINTS];
        points[10] = 15;
        points[7] = -1;
        points[20] = -14;
        let board = Board::from_parts(points, [0, 0], [0, 0]).unwrap();
        let state =
            BackgammonState::from_position(&players(), board, Side::White, BackgammonConfig::default())
                .unwrap()
                .with_dice(3, 5)
                .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let s = suggest(&state, Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(
            s.action,
            GameMove::Backgammon(BackgammonMove::Move(CheckerMove {
                from: Location::Point(10),
                to: Location::Point(7),
                die: 0
            }))
        );
    }

    #[test]
    fn hopeless_double_is_dropped() {
        let mut points = [0i8; POINTS];
        points[0] = 2;
        points[2] = -15;
        let board = Board::from_parts(points, [0, 0], [13, 0]).unwrap();
        let state = BackgammonState::from_position(&players(), board, Side::White, Default::default())
            .unwrap()
            .offer_double()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let s = suggest(&state, Difficulty::Medium, &mut rng).unwrap();
        assert_eq!(s.action, GameMove::Backgammon(BackgammonMove::DeclineDouble));
    }

    #[test]
    fn easy_never_doubles() {
        let mut points = [0i8; POINTS];
        points[0] = 2;
        points[2] = -15;
        let board = Board::from_parts(points, [0, 0], [13, 0]).unwrap();
        let state =
            BackgammonState::from_position(&players(), board, Side::White, Default::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let easy = suggest(&state, Difficulty::Easy, &mut rng).unwrap();
        assert_eq!(easy.action, GameMove::Backgammon(BackgammonMove::Roll));
        let hard = suggest(&state, Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(hard.action, GameMove::Backgammon(BackgammonMove::OfferDouble));
    }
}
