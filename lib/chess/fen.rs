use crate::chess::{Piece, Position, Square};
use derive_more::{DebugCustom, Display, Error};
use proptest::{collection::hash_map, prelude::*};
use shakmaty as sm;
use std::str::FromStr;
use test_strategy::Arbitrary;

/// A representation of the [Forsyth–Edwards Notation].
///
/// [Forsyth–Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(DebugCustom, Display, Default, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[debug(fmt = "Fen(\"{}\")", self)]
#[display(fmt = "{}", _0)]
pub struct Fen(
    #[strategy(hash_map(any::<Square>(), any::<Piece>(), 0..=64)
        .prop_map(|setup| setup
            .into_iter()
            .map(|(s, p)| (sm::Square::from(s), sm::Piece::from(p)))
            .collect::<sm::Board>())
        .prop_map(|board| sm::fen::Fen(sm::Setup { board, ..Default::default() }))
    )]
    sm::fen::Fen,
);

impl Fen {
    /// The piece placement, side to move, castling rights and en passant fields.
    ///
    /// Two positions sharing this key are considered the same position
    /// for the purpose of detecting repetitions.
    pub fn key(&self) -> String {
        let s = self.to_string();
        s.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }
}

/// The reason why the string is not valid FEN.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display(fmt = "syntax error at the piece placement field")]
    InvalidPlacement,
    #[display(fmt = "syntax error at the side to move field")]
    InvalidTurn,
    #[display(fmt = "syntax error at the castling rights field")]
    InvalidCastlingRights,
    #[display(fmt = "syntax error at the en passant square field")]
    InvalidEnPassantSquare,
    #[display(fmt = "syntax error at the halfmove clock field")]
    InvalidHalfmoveClock,
    #[display(fmt = "syntax error at the fullmove counter field")]
    InvalidFullmoves,
    #[display(fmt = "unspecified syntax error")]
    InvalidSyntax,
}

#[doc(hidden)]
impl From<sm::fen::ParseFenError> for ParseFenError {
    fn from(e: sm::fen::ParseFenError) -> Self {
        use ParseFenError::*;
        match e {
            sm::fen::ParseFenError::InvalidBoard => InvalidPlacement,
            sm::fen::ParseFenError::InvalidTurn => InvalidTurn,
            sm::fen::ParseFenError::InvalidCastling => InvalidCastlingRights,
            sm::fen::ParseFenError::InvalidEpSquare => InvalidEnPassantSquare,
            sm::fen::ParseFenError::InvalidHalfmoveClock => InvalidHalfmoveClock,
            sm::fen::ParseFenError::InvalidFullmoves => InvalidFullmoves,
            _ => InvalidSyntax,
        }
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Fen(s.parse()?))
    }
}

impl From<&Position> for Fen {
    fn from(pos: &Position) -> Self {
        sm::Setup::from(pos).into()
    }
}

#[doc(hidden)]
impl From<sm::Setup> for Fen {
    fn from(setup: sm::Setup) -> Self {
        Fen(sm::fen::Fen(setup))
    }
}

#[doc(hidden)]
impl From<Fen> for sm::Setup {
    fn from(fen: Fen) -> Self {
        fen.0 .0
    }
}
