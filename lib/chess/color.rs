use derive_more::Display;
use shakmaty as sm;
use std::ops::Not;
use test_strategy::Arbitrary;

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Color {
    /// The side's name as shown to the player.
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[doc(hidden)]
impl From<sm::Color> for Color {
    fn from(c: sm::Color) -> Self {
        match c {
            sm::Color::White => Color::White,
            sm::Color::Black => Color::Black,
        }
    }
}

#[doc(hidden)]
impl From<Color> for sm::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::White => sm::Color::White,
            Color::Black => sm::Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_ne!(!c, c);
        assert_eq!(!!c, c);
    }

    #[proptest]
    fn color_name_is_capitalized_display(c: Color) {
        assert_eq!(c.name().to_lowercase(), c.to_string());
    }

    #[proptest]
    fn color_has_an_equivalent_shakmaty_representation(c: Color) {
        assert_eq!(Color::from(sm::Color::from(c)), c);
    }
}
