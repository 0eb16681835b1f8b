use crate::chess::{Color, File, Piece, Position, Rank, Role, Square};
use std::fmt::{self, Display, Formatter};
use std::ops::{Index, IndexMut};

/// A raw arrangement of [`Piece`]s on the chess board.
///
/// This type does not validate whether the arrangement it holds is valid
/// according to any set of chess rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board([Option<Piece>; 64]);

impl Board {
    /// A board without any pieces.
    pub const fn empty() -> Self {
        Board([None; 64])
    }

    /// An iterator over the occupied [`Square`]s and their [`Piece`]s.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |s| self[s].map(|p| (s, p)))
    }

    /// An iterator over the [`Square`]s occupied by pieces of a [`Color`].
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, p)| p.color() == c)
            .map(|(s, _)| s)
    }

    /// A printable diagram of this board with an optionally highlighted [`Square`].
    pub fn diagram(&self, highlight: Option<Square>) -> Diagram<'_> {
        Diagram {
            board: self,
            highlight,
        }
    }
}

/// The standard starting arrangement.
impl Default for Board {
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (f, r) in File::iter().zip(back) {
            board[Square::new(f, Rank::First)] = Some(Piece::new(r, Color::White));
            board[Square::new(f, Rank::Second)] = Some(Piece::new(Pawn, Color::White));
            board[Square::new(f, Rank::Seventh)] = Some(Piece::new(Pawn, Color::Black));
            board[Square::new(f, Rank::Eighth)] = Some(Piece::new(r, Color::Black));
        }

        board
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, s: Square) -> &Self::Output {
        &self.0[s.index()]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, s: Square) -> &mut Self::Output {
        &mut self.0[s.index()]
    }
}

impl From<&Position> for Board {
    fn from(pos: &Position) -> Self {
        let mut board = Board::empty();
        for s in Square::iter() {
            board[s] = pos.piece_on(s);
        }

        board
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.diagram(None), f)
    }
}

/// A board drawn as a grid, ranks `8` to `1` and files `a` to `h`.
#[derive(Debug, Copy, Clone)]
pub struct Diagram<'a> {
    board: &'a Board,
    highlight: Option<Square>,
}

impl<'a> Display for Diagram<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for file in File::iter() {
            write!(f, "   {}", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for rank in Rank::iter().rev() {
            write!(f, " {} |", rank)?;

            for file in File::iter() {
                let s = Square::new(file, rank);
                let (l, r) = if self.highlight == Some(s) {
                    ('[', ']')
                } else {
                    (' ', ' ')
                };

                match self.board[s] {
                    Some(piece) => write!(f, "{}{:#}{}|", l, piece, r)?,
                    None => write!(f, "{} {}|", l, r)?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "  ")?;
        for file in File::iter() {
            write!(f, "   {}", file)?;
        }

        Ok(())
    }
}

// We provide a custom implementation of Arbitrary rather than deriving,
// otherwise proptest overflows the stack generating large arrays.
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        proptest::collection::vec(any::<Option<Piece>>(), 64)
            .prop_map(|v| {
                let mut board = Board::empty();
                for (s, p) in Square::iter().zip(v) {
                    board[s] = p;
                }

                board
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn default_board_matches_the_starting_position() {
        assert_eq!(Board::default(), Board::from(&Position::default()));
    }

    #[test]
    fn empty_board_has_no_pieces() {
        assert_eq!(Board::empty().pieces().count(), 0);
    }

    #[proptest]
    fn pieces_returns_every_occupied_square(b: Board) {
        for s in Square::iter() {
            assert_eq!(b.pieces().find(|&(t, _)| t == s).map(|(_, p)| p), b[s]);
        }
    }

    #[proptest]
    fn by_color_returns_squares_occupied_by_pieces_of_a_color(b: Board, c: Color) {
        for s in b.by_color(c) {
            assert_eq!(b[s].map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn board_can_be_derived_from_position(pos: Position, s: Square) {
        assert_eq!(Board::from(&pos)[s], pos.piece_on(s));
    }

    #[proptest]
    fn diagram_has_a_cell_per_square(b: Board) {
        let diagram = b.to_string();
        assert_eq!(diagram.lines().count(), 19);
        assert_eq!(diagram.matches('|').count(), 9 * 8);
    }

    #[proptest]
    fn diagram_shows_every_piece(b: Board) {
        let diagram = b.to_string();
        for (_, p) in b.pieces() {
            assert!(diagram.contains(p.glyph()));
        }
    }

    #[proptest]
    fn highlighted_diagram_brackets_exactly_one_cell(b: Board, s: Square) {
        let diagram = b.diagram(Some(s)).to_string();
        assert_eq!(diagram.matches('[').count(), 1);
        assert_eq!(diagram.matches(']').count(), 1);
    }

    #[test]
    fn starting_diagram_shows_black_at_the_top() {
        let diagram = Board::default().to_string();
        let lines: Vec<_> = diagram.lines().collect();
        assert_eq!(lines[2], " 8 | ♜ | ♞ | ♝ | ♛ | ♚ | ♝ | ♞ | ♜ | 8");
        assert_eq!(lines[16], " 1 | ♖ | ♘ | ♗ | ♕ | ♔ | ♗ | ♘ | ♖ | 1");
    }
}
