use crate::chess::Role;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::str::FromStr;
use test_strategy::Arbitrary;
use vampirc_uci::UciPiece;

/// A promotion specifier.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
pub enum Promotion {
    #[display(fmt = "")]
    None,
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

impl Default for Promotion {
    fn default() -> Self {
        Promotion::None
    }
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion, expected one of `n`, `b`, `r`, `q`, or nothing")]
pub struct ParsePromotionError;

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Promotion::None),
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(Role::Knight),
            Promotion::Bishop => Some(Role::Bishop),
            Promotion::Rook => Some(Role::Rook),
            Promotion::Queen => Some(Role::Queen),
        }
    }
}

#[doc(hidden)]
impl From<Promotion> for Option<UciPiece> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(UciPiece::Knight),
            Promotion::Bishop => Some(UciPiece::Bishop),
            Promotion::Rook => Some(UciPiece::Rook),
            Promotion::Queen => Some(UciPiece::Queen),
        }
    }
}

#[doc(hidden)]
impl TryFrom<Option<UciPiece>> for Promotion {
    type Error = ParsePromotionError;

    fn try_from(p: Option<UciPiece>) -> Result<Self, Self::Error> {
        match p {
            None => Ok(Promotion::None),
            Some(UciPiece::Knight) => Ok(Promotion::Knight),
            Some(UciPiece::Bishop) => Ok(Promotion::Bishop),
            Some(UciPiece::Rook) => Ok(Promotion::Rook),
            Some(UciPiece::Queen) => Ok(Promotion::Queen),
            Some(_) => Err(ParsePromotionError),
        }
    }
}

#[doc(hidden)]
impl From<Option<sm::Role>> for Promotion {
    fn from(p: Option<sm::Role>) -> Self {
        match p {
            Some(sm::Role::Knight) => Promotion::Knight,
            Some(sm::Role::Bishop) => Promotion::Bishop,
            Some(sm::Role::Rook) => Promotion::Rook,
            Some(sm::Role::Queen) => Promotion::Queen,
            _ => Promotion::None,
        }
    }
}

#[doc(hidden)]
impl From<Promotion> for Option<sm::Role> {
    fn from(p: Promotion) -> Self {
        Option::<Role>::from(p).map(Into::into)
    }
}
