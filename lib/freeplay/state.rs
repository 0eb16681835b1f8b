use crate::chess::{Board, Color, Piece, Role, Square};
use derive_more::Display;
use test_strategy::Arbitrary;

/// How a game of free play ended.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Ending {
    /// The king of the other side was captured.
    #[display(fmt = "{} captured the king and wins!", "_0.name()")]
    KingCaptured(Color),
}

/// What a click or a relocation did to the [`GameState`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Transition {
    /// A piece of the side to move was selected.
    Selected(Square),
    /// The destination held a piece of the same side, nothing was moved.
    Rejected,
    /// A piece was moved, possibly capturing another one.
    Moved {
        whence: Square,
        whither: Square,
        captured: Option<Piece>,
    },
    /// Nothing happened.
    Ignored,
}

/// A game of chess without rules.
///
/// Pieces are relocated anywhere that is not occupied by a piece of the same side,
/// there is no notion of check, and the game ends only when a king is captured.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameState {
    board: Board,
    turn: Color,
    selected: Option<Square>,
    ending: Option<Ending>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Board::default(), Color::White)
    }
}

impl GameState {
    /// Starts a game from an arbitrary [`Board`] with `turn` to move.
    pub fn new(board: Board, turn: Color) -> Self {
        GameState {
            board,
            turn,
            selected: None,
            ending: None,
        }
    }

    /// The current arrangement of pieces.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The currently selected [`Square`], if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// How the game ended, if it has.
    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// The state after a click on a [`Square`].
    ///
    /// Without a selection, clicking a piece of the side to move selects it.
    /// With a selection, any click clears it and attempts to [relocate](`Self::relocate`)
    /// the selected piece onto the clicked square.
    pub fn click(self, s: Square) -> (Self, Transition) {
        if self.is_over() {
            return (self, Transition::Ignored);
        }

        match self.selected {
            None => match self.board[s] {
                Some(p) if p.color() == self.turn => {
                    let next = GameState {
                        selected: Some(s),
                        ..self
                    };

                    (next, Transition::Selected(s))
                }

                _ => (self, Transition::Ignored),
            },

            Some(whence) => self.relocate(whence, s),
        }
    }

    /// The state after moving the piece on `whence` onto `whither`.
    ///
    /// The move is rejected if `whither` holds a piece of the same side,
    /// otherwise it's made unconditionally and the turn passes.
    /// Capturing a king ends the game. The selection is cleared in any case.
    pub fn relocate(self, whence: Square, whither: Square) -> (Self, Transition) {
        if self.is_over() {
            return (self, Transition::Ignored);
        }

        let deselected = GameState {
            selected: None,
            ..self
        };

        let piece = match self.board[whence] {
            Some(p) => p,
            None => return (deselected, Transition::Ignored),
        };

        let captured = self.board[whither];
        if captured.map(|p| p.color()) == Some(piece.color()) {
            return (deselected, Transition::Rejected);
        }

        let mut board = self.board;
        board[whence] = None;
        board[whither] = Some(piece);

        let ending = match captured {
            Some(p) if p.role() == Role::King => Some(Ending::KingCaptured(piece.color())),
            _ => None,
        };

        let next = GameState {
            board,
            turn: !self.turn,
            selected: None,
            ending,
        };

        let transition = Transition::Moved {
            whence,
            whither,
            captured,
        };

        (next, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn game_starts_from_the_standard_arrangement_with_white_to_move() {
        let state = GameState::default();
        assert_eq!(state.board(), &Board::default());
        assert_eq!(state.turn(), Color::White);
        assert_eq!(state.selected(), None);
        assert_eq!(state.ending(), None);
    }

    #[proptest]
    fn clicking_a_piece_of_the_side_to_move_selects_it(
        b: Board,
        c: Color,
        #[filter(#b[#s].map(|p| p.color()) == Some(#c))] s: Square,
    ) {
        let (state, t) = GameState::new(b, c).click(s);
        assert_eq!(t, Transition::Selected(s));
        assert_eq!(state.selected(), Some(s));
        assert_eq!(state.board(), &b);
        assert_eq!(state.turn(), c);
    }

    #[proptest]
    fn clicking_anything_else_without_selection_is_ignored(
        b: Board,
        c: Color,
        #[filter(#b[#s].map(|p| p.color()) != Some(#c))] s: Square,
    ) {
        let state = GameState::new(b, c);
        assert_eq!(state.click(s), (state, Transition::Ignored));
    }

    #[proptest]
    fn move_is_accepted_iff_destination_is_not_occupied_by_the_same_side(
        b: Board,
        c: Color,
        #[filter(#b[#whence].map(|p| p.color()) == Some(#c))] whence: Square,
        whither: Square,
    ) {
        let (selected, _) = GameState::new(b, c).click(whence);
        let (state, t) = selected.click(whither);

        assert_eq!(state.selected(), None);

        if b[whither].map(|p| p.color()) == Some(c) {
            assert_eq!(t, Transition::Rejected);
            assert_eq!(state.board(), &b);
            assert_eq!(state.turn(), c);
        } else {
            assert_eq!(
                t,
                Transition::Moved {
                    whence,
                    whither,
                    captured: b[whither]
                }
            );

            assert_eq!(state.board()[whither], b[whence]);
            assert_eq!(state.board()[whence], None);
            assert_eq!(state.turn(), !c);
        }
    }

    #[proptest]
    fn clicking_the_selected_square_is_rejected(
        b: Board,
        c: Color,
        #[filter(#b[#s].map(|p| p.color()) == Some(#c))] s: Square,
    ) {
        let (selected, _) = GameState::new(b, c).click(s);
        let (state, t) = selected.click(s);
        assert_eq!(t, Transition::Rejected);
        assert_eq!(state, GameState::new(b, c));
    }

    #[proptest]
    fn moves_need_not_follow_the_rules_of_chess(c: Color, whence: Square, whither: Square) {
        let mut b = Board::empty();
        b[whence] = Some(Piece::new(Role::Pawn, c));

        let (state, _) = GameState::new(b, c).relocate(whence, whither);
        assert_eq!(state.board()[whither], b[whence]);
    }

    #[proptest]
    fn relocating_from_an_empty_square_is_ignored(
        b: Board,
        c: Color,
        #[filter(#b[#whence].is_none())] whence: Square,
        whither: Square,
    ) {
        let state = GameState::new(b, c);
        assert_eq!(state.relocate(whence, whither), (state, Transition::Ignored));
    }

    #[proptest]
    fn capturing_a_king_ends_the_game(
        c: Color,
        r: Role,
        whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let mut b = Board::empty();
        b[whence] = Some(Piece::new(r, c));
        b[whither] = Some(Piece::new(Role::King, !c));

        let (state, _) = GameState::new(b, c).relocate(whence, whither);
        assert_eq!(state.ending(), Some(Ending::KingCaptured(c)));
    }

    #[proptest]
    fn nothing_happens_once_the_game_is_over(
        c: Color,
        whence: Square,
        #[filter(#whence != #whither)] whither: Square,
        s: Square,
        t: Square,
    ) {
        let mut b = Board::empty();
        b[whence] = Some(Piece::new(Role::Queen, c));
        b[whither] = Some(Piece::new(Role::King, !c));

        let (over, _) = GameState::new(b, c).relocate(whence, whither);
        assert_eq!(over.click(s), (over, Transition::Ignored));
        assert_eq!(over.relocate(s, t), (over, Transition::Ignored));
    }

    #[test]
    fn banner_names_the_winner() {
        assert_eq!(
            Ending::KingCaptured(Color::White).to_string(),
            "White captured the king and wins!"
        );
    }
}
