use crate::chess::{Color, Fen, Move, Outcome, ParseFenError, Piece, Promotion, Square};
use derive_more::{DebugCustom, Display, Error, From};
use proptest::{prelude::*, sample::Selector};
use shakmaty as sm;
use std::str::FromStr;
use test_strategy::Arbitrary;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in position `{}`", _0, _1)]
pub struct IllegalMove(pub Move, pub Position);

/// The current position on the chess board.
///
/// This type guarantees that it only holds valid positions.
#[derive(DebugCustom, Display, Default, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[debug(fmt = "Position(\"{}\")", self)]
#[display(fmt = "{}", "Fen::from(self)")]
pub struct Position(
    #[strategy((0..256, any::<Selector>()).prop_map(|(moves, selector)| {
        let mut chess = sm::Chess::default();
        for _ in 0..moves {
            match selector.try_select(sm::Position::legal_moves(&chess)) {
                Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                _ => break,
            }
        }
        chess
    }).no_shrink())]
    sm::Chess,
);

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The number of halfmoves since the last capture or pawn advance.
    pub fn halfmoves(&self) -> u32 {
        sm::Position::halfmoves(&self.0)
    }

    /// The [`Piece`] on a [`Square`], if any.
    pub fn piece_on(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Into::into)
    }

    /// Whether the side to move is in [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        sm::Position::is_check(&self.0)
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        sm::Position::is_checkmate(&self.0)
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        sm::Position::is_stalemate(&self.0)
    }

    /// Whether neither side has enough material to deliver checkmate.
    pub fn is_material_insufficient(&self) -> bool {
        sm::Position::is_insufficient_material(&self.0)
    }

    /// The [`Outcome`] of the game, if this position ends it.
    ///
    /// Repetitions depend on the history of the game and are not detected here.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            Some(Outcome::Checkmate(!self.turn()))
        } else if self.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if self.is_material_insufficient() {
            Some(Outcome::DrawByInsufficientMaterial)
        } else if self.halfmoves() >= 100 {
            Some(Outcome::DrawBy50MoveRule)
        } else {
            None
        }
    }

    /// An iterator over the legal [`Move`]s that can be played in this position.
    pub fn moves(&self) -> impl Iterator<Item = Move> {
        sm::Position::legal_moves(&self.0)
            .into_iter()
            .filter_map(|vm| Move::try_from(sm::uci::Uci::from_standard(&vm)).ok())
    }

    /// Play a [`Move`] if legal in this position.
    ///
    /// The move is matched against the legal moves by its source and destination squares,
    /// the promotion specifier is only taken into account for pawns reaching the last rank.
    /// Returns the move actually played.
    pub fn make(&mut self, m: Move) -> Result<Move, IllegalMove> {
        let found = sm::Position::legal_moves(&self.0)
            .into_iter()
            .find_map(|vm| match Move::try_from(sm::uci::Uci::from_standard(&vm)) {
                Ok(c) if c.whence() == m.whence()
                    && c.whither() == m.whither()
                    && (c.promotion() == Promotion::None || c.promotion() == m.promotion()) =>
                {
                    Some((c, vm))
                }
                _ => None,
            });

        match found {
            Some((played, vm)) => {
                sm::Position::play_unchecked(&mut self.0, &vm);
                Ok(played)
            }

            None => Err(IllegalMove(m, self.clone())),
        }
    }
}

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

impl TryFrom<Fen> for Position {
    type Error = IllegalPosition;

    fn try_from(fen: Fen) -> Result<Self, Self::Error> {
        let setup = fen.into();
        let chess = <sm::Chess as sm::FromSetup>::from_setup(setup, sm::CastlingMode::Standard)?;
        Ok(Position(chess))
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "failed to parse position")]
    InvalidFen(ParseFenError),
    #[display(fmt = "failed to parse position")]
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Position::try_from(s.parse::<Fen>()?)?)
    }
}

#[doc(hidden)]
impl From<&Position> for sm::Setup {
    fn from(pos: &Position) -> Self {
        sm::Position::into_setup(pos.0.clone(), sm::EnPassantMode::Legal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Role;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[proptest]
    fn turn_returns_the_current_side_to_play(pos: Position) {
        assert_eq!(pos.turn(), sm::Setup::from(&pos).turn.into());
    }

    #[proptest]
    fn halfmoves_returns_the_number_of_halfmoves_since_last_irreversible_move(pos: Position) {
        assert_eq!(pos.halfmoves(), sm::Setup::from(&pos).halfmoves);
    }

    #[proptest]
    fn piece_on_returns_the_piece_on_the_square(pos: Position, s: Square) {
        assert_eq!(
            pos.piece_on(s),
            sm::Setup::from(&pos).board.piece_at(s.into()).map(Into::into)
        );
    }

    #[proptest]
    fn checkmate_implies_check(pos: Position) {
        assert!(!pos.is_checkmate() || pos.is_check());
    }

    #[proptest]
    fn checkmate_and_stalemate_are_mutually_exclusive(pos: Position) {
        assert!(!(pos.is_checkmate() && pos.is_stalemate()));
    }

    #[proptest]
    fn there_are_no_legal_moves_if_the_game_is_over(
        #[filter(#pos.is_checkmate() || #pos.is_stalemate())] pos: Position,
    ) {
        assert_eq!(pos.moves().count(), 0);
    }

    #[proptest]
    fn moves_are_played_by_the_side_to_move(pos: Position) {
        for m in pos.moves() {
            assert_eq!(pos.piece_on(m.whence()).map(|p| p.color()), Some(pos.turn()));
        }
    }

    #[proptest]
    fn legal_moves_can_be_made(pos: Position) {
        for m in pos.moves() {
            let mut p = pos.clone();
            assert_eq!(p.make(m), Ok(m));
            assert_eq!(p.turn(), !pos.turn());
        }
    }

    #[proptest]
    fn making_a_move_ignores_promotion_unless_pawn_reaches_last_rank(pos: Position) {
        for m in pos.moves().filter(|m| m.promotion() == Promotion::None) {
            let mut p = pos.clone();
            assert_eq!(p.make(m.queened()), Ok(m));
        }
    }

    #[proptest]
    fn making_an_illegal_move_fails(
        #[by_ref] pos: Position,
        #[filter(!#pos.moves().any(|m| (m.whence(), m.whither()) == (#m.whence(), #m.whither())))]
        m: Move,
    ) {
        let mut p = pos.clone();
        assert_eq!(p.make(m), Err(IllegalMove(m, pos.clone())));
        assert_eq!(p, pos);
    }

    #[test]
    fn pawn_reaching_last_rank_requires_a_promotion() {
        let mut pos: Position = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1".parse().unwrap();

        let push = Move(Square::E7, Square::E8, Promotion::None);
        assert!(pos.make(push).is_err());

        assert_eq!(pos.make(push.queened()), Ok(push.queened()));
        assert_eq!(
            pos.piece_on(Square::E8),
            Some(Piece::new(Role::Queen, Color::White))
        );
    }

    #[test]
    fn castling_is_expressed_as_a_king_move() {
        let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let castles: HashSet<_> = pos.moves().filter(|m| m.whence() == Square::E1).collect();
        let castle = Move(Square::E1, Square::G1, Promotion::None);
        assert!(castles.contains(&castle));
        assert_eq!(pos.make(castle), Ok(castle));
        assert_eq!(
            pos.piece_on(Square::F1),
            Some(Piece::new(Role::Rook, Color::White))
        );
    }

    #[test]
    fn checkmate_is_won_by_the_side_that_delivered_it() {
        let pos: Position = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();

        assert_eq!(pos.outcome(), Some(Outcome::Checkmate(Color::Black)));
    }

    #[test]
    fn stalemate_is_a_draw() {
        let pos: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let pos: Position = "8/8/8/8/8/8/k7/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::DrawByInsufficientMaterial));
    }

    #[test]
    fn one_hundred_halfmoves_without_progress_is_a_draw() {
        let pos: Position = "8/8/8/8/8/8/kr6/4K3 w - - 100 80".parse().unwrap();
        assert_eq!(pos.outcome(), Some(Outcome::DrawBy50MoveRule));
    }

    #[test]
    fn starting_position_is_not_over() {
        assert_eq!(Position::default().outcome(), None);
        assert_eq!(Position::default().moves().count(), 20);
    }

    #[test]
    fn parsing_position_fails_without_kings() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(ParsePositionError::IllegalPosition(IllegalPosition::MissingKing))
        );
    }

    #[proptest]
    fn parsing_printed_position_is_an_identity(pos: Position) {
        let fen = pos.to_string();
        assert_eq!(fen.parse::<Position>().map(|p| p.to_string()), Ok(fen));
    }
}
