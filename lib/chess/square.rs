use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use shakmaty as sm;
use std::{fmt, str::FromStr};
use test_strategy::Arbitrary;
use vampirc_uci::UciSquare;

/// A square on the chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// All squares, ordered by [`Square::index`].
    #[rustfmt::skip]
    pub const ALL: [Square; 64] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    pub fn new(f: File, r: Rank) -> Self {
        Self::ALL[r.index() * 8 + f.index()]
    }

    /// This square's [`File`].
    pub fn file(&self) -> File {
        File::ALL[self.index() % 8]
    }

    /// This square's [`Rank`].
    pub fn rank(&self) -> Rank {
        Rank::ALL[self.index() / 8]
    }

    /// This square's index, `rank * 8 + file`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// An iterator over all squares, from `a1` to `h8`.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Self::ALL[u32::from(s) as usize]
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        sm::Square::from_coords(s.file().into(), s.rank().into())
    }
}

#[doc(hidden)]
impl From<Square> for UciSquare {
    fn from(s: Square) -> Self {
        UciSquare {
            file: s.file().char(),
            rank: s.rank().index() as u8 + 1,
        }
    }
}

#[doc(hidden)]
impl TryFrom<UciSquare> for Square {
    type Error = ParseSquareError;

    fn try_from(s: UciSquare) -> Result<Self, Self::Error> {
        format!("{}{}", s.file, s.rank).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Square>>(), size_of::<Square>());
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[proptest]
    fn square_index_is_rank_major(f: File, r: Rank) {
        assert_eq!(Square::new(f, r).index(), r.index() * 8 + f.index());
    }

    #[test]
    fn squares_are_iterated_from_a1_to_h8() {
        assert_eq!(Square::iter().next(), Some(Square::A1));
        assert_eq!(Square::iter().last(), Some(Square::H8));
        assert_eq!(Square::iter().len(), 64);
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.chars().count() != 2)] s: String) {
        assert_eq!(s.parse::<Square>().ok(), None);
    }

    #[proptest]
    fn square_has_an_equivalent_shakmaty_representation(sq: Square) {
        assert_eq!(Square::from(sm::Square::from(sq)), sq);
    }

    #[proptest]
    fn square_has_an_equivalent_vampirc_uci_representation(sq: Square) {
        assert_eq!(Square::try_from(Into::<UciSquare>::into(sq)), Ok(sq));
    }
}
