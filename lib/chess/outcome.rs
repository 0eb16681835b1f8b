use crate::chess::Color;
use derive_more::Display;
use test_strategy::Arbitrary;

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Outcome {
    #[display(fmt = "checkmate by the {} player", _0)]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by insufficient material")]
    DrawByInsufficientMaterial,

    #[display(fmt = "draw by the 50-move rule")]
    DrawBy50MoveRule,

    #[display(fmt = "draw by threefold repetition")]
    DrawByThreefoldRepetition,
}

impl Outcome {
    /// The winning side, if any.
    ///
    /// Every outcome other than a checkmate is a [draw].
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            _ => None,
        }
    }
}
