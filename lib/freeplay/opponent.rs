use crate::chess::{Board, Color, Square};
use crate::freeplay::{GameState, Transition};
use derive_more::DebugCustom;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::instrument;

/// Every (whence, whither) pair available to `side` on a [`Board`].
///
/// Any piece of `side` may move onto any square not occupied by a piece of the same side,
/// regardless of how that piece moves in chess or of what stands in the way.
pub fn candidates(board: &Board, side: Color) -> Vec<(Square, Square)> {
    board
        .by_color(side)
        .flat_map(|whence| {
            Square::iter()
                .filter(move |&whither| board[whither].map(|p| p.color()) != Some(side))
                .map(move |whither| (whence, whither))
        })
        .collect()
}

/// An opponent that picks uniformly at random among the [`candidates`].
#[derive(DebugCustom)]
#[debug(fmt = "Opponent")]
pub struct Opponent(StdRng);

/// Initializes an [`Opponent`] seeded by [system entropy].
///
/// [system entropy]: rand::rngs::StdRng::from_entropy
impl Default for Opponent {
    fn default() -> Self {
        Opponent(StdRng::from_entropy())
    }
}

impl Opponent {
    /// Constructs a deterministic [`Opponent`] from a seed.
    pub fn seeded(seed: u64) -> Self {
        Opponent(StdRng::seed_from_u64(seed))
    }

    /// Picks one of the [`candidates`] for `side`, if any.
    pub fn pick(&mut self, board: &Board, side: Color) -> Option<(Square, Square)> {
        candidates(board, side).choose(&mut self.0).copied()
    }

    /// Plays a random move for the side to move.
    ///
    /// Does nothing if the game is over or if there are no [`candidates`].
    #[instrument(level = "debug", skip(state), ret)]
    pub fn play(&mut self, state: GameState) -> (GameState, Transition) {
        if state.is_over() {
            return (state, Transition::Ignored);
        }

        match self.pick(state.board(), state.turn()) {
            Some((whence, whither)) => state.relocate(whence, whither),
            None => (state, Transition::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Piece, Role};
    use crate::freeplay::Ending;
    use std::collections::{HashMap, HashSet};
    use test_strategy::proptest;

    #[proptest]
    fn candidates_are_all_pairs_from_own_pieces_to_squares_not_occupied_by_own_pieces(
        b: Board,
        c: Color,
    ) {
        let expected: HashSet<_> = Square::iter()
            .flat_map(|p| Square::iter().map(move |t| (p, t)))
            .filter(|&(p, t)| {
                b[p].map(|x| x.color()) == Some(c) && b[t].map(|x| x.color()) != Some(c)
            })
            .collect();

        let actual: Vec<_> = candidates(&b, c);
        assert_eq!(actual.len(), expected.len());
        assert_eq!(actual.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[proptest]
    fn starting_arrangement_has_sixteen_pieces_with_forty_eight_destinations_each(c: Color) {
        assert_eq!(candidates(&Board::default(), c).len(), 16 * 48);
    }

    #[proptest]
    fn picked_move_is_one_of_the_candidates(b: Board, c: Color, seed: u64) {
        let mut opponent = Opponent::seeded(seed);
        match opponent.pick(&b, c) {
            Some(m) => assert!(candidates(&b, c).contains(&m)),
            None => assert!(candidates(&b, c).is_empty()),
        }
    }

    #[proptest]
    fn opponent_is_deterministic_given_a_seed(b: Board, c: Color, seed: u64) {
        assert_eq!(
            Opponent::seeded(seed).pick(&b, c),
            Opponent::seeded(seed).pick(&b, c)
        );
    }

    #[proptest]
    fn opponent_does_nothing_without_candidates(c: Color, seed: u64) {
        let mut b = Board::empty();
        b[Square::E1] = Some(Piece::new(Role::King, !c));

        let state = GameState::new(b, c);
        assert_eq!(Opponent::seeded(seed).play(state), (state, Transition::Ignored));
    }

    #[proptest]
    fn opponent_moves_a_piece_of_the_side_to_move(
        b: Board,
        #[filter(!candidates(&#b, #c).is_empty())] c: Color,
        seed: u64,
    ) {
        let state = GameState::new(b, c);
        match Opponent::seeded(seed).play(state) {
            (next, Transition::Moved { whence, whither, .. }) => {
                assert_eq!(b[whence].map(|p| p.color()), Some(c));
                assert_eq!(next.board()[whither], b[whence]);
                assert_eq!(next.turn(), !c);
            }

            (_, t) => panic!("unexpected {:?}", t),
        }
    }

    #[test]
    fn every_candidate_is_equally_likely_to_be_picked() {
        let mut b = Board::empty();
        b[Square::D4] = Some(Piece::new(Role::Knight, Color::Black));

        let mut opponent = Opponent::seeded(42);
        let mut counts = HashMap::new();
        for _ in 0..63_000 {
            let m = opponent.pick(&b, Color::Black);
            *counts.entry(m).or_insert(0usize) += 1;
        }

        assert_eq!(counts.len(), 63);
        for (m, n) in counts {
            assert!((750..=1250).contains(&n), "{:?} was picked {} times", m, n);
        }
    }

    #[test]
    fn opponent_can_capture_the_white_king() {
        let mut b = Board::empty();
        b[Square::E1] = Some(Piece::new(Role::King, Color::White));
        b[Square::H8] = Some(Piece::new(Role::Pawn, Color::Black));

        let state = GameState::new(b, Color::Black);
        let over = (0..1000)
            .map(|seed| Opponent::seeded(seed).play(state).0)
            .find(GameState::is_over);

        assert_eq!(
            over.and_then(|s| s.ending()),
            Some(Ending::KingCaptured(Color::Black))
        );
    }

    #[test]
    fn opponent_ignores_finished_games() {
        let mut b = Board::empty();
        b[Square::A1] = Some(Piece::new(Role::Rook, Color::White));
        b[Square::A8] = Some(Piece::new(Role::King, Color::Black));

        let (over, _) = GameState::new(b, Color::White).relocate(Square::A1, Square::A8);
        assert_eq!(Opponent::seeded(7).play(over), (over, Transition::Ignored));
    }
}
