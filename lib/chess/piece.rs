use crate::chess::{Color, Role};
use shakmaty as sm;
use std::fmt::{self, Formatter, Write};
use test_strategy::Arbitrary;

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// Formats as its FEN letter, uppercase for white and lowercase for black,
/// or as its Unicode glyph with the alternate flag `{:#}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub struct Piece {
    role: Role,
    color: Color,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    pub const fn new(role: Role, color: Color) -> Self {
        Piece { role, color }
    }

    /// This piece's [`Role`].
    pub const fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The Unicode glyph of this piece.
    pub fn glyph(&self) -> char {
        use Color::*;
        use Role::*;
        match (self.role, self.color) {
            (Pawn, White) => '♙',
            (Knight, White) => '♘',
            (Bishop, White) => '♗',
            (Rook, White) => '♖',
            (Queen, White) => '♕',
            (King, White) => '♔',
            (Pawn, Black) => '♟',
            (Knight, Black) => '♞',
            (Bishop, Black) => '♝',
            (Rook, Black) => '♜',
            (Queen, Black) => '♛',
            (King, Black) => '♚',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f.write_char(self.glyph());
        }

        let letter = self.role.to_string();
        match self.color {
            Color::White => f.write_str(&letter.to_uppercase()),
            Color::Black => f.write_str(&letter),
        }
    }
}

#[doc(hidden)]
impl From<sm::Piece> for Piece {
    fn from(p: sm::Piece) -> Self {
        Piece::new(p.role.into(), p.color.into())
    }
}

#[doc(hidden)]
impl From<Piece> for sm::Piece {
    fn from(p: Piece) -> Self {
        sm::Piece {
            role: p.role().into(),
            color: p.color().into(),
        }
    }
}
