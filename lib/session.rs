use crate::chess::{Board, Fen, IllegalMove, Move, Outcome, Position, Promotion, Square};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// What a click on a [`Square`] did to the [`Session`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Click {
    /// A piece of the side to move was selected.
    Selected(Square),
    /// The selection was cleared without moving.
    ///
    /// Cancelling and attempting an illegal move are indistinguishable.
    Deselected,
    /// The selected piece was moved.
    Moved(Move),
    /// Nothing happened.
    Ignored,
}

/// A rule-checked game of chess, as seen by the player clicking on squares.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    position: Position,
    selected: Option<Square>,
    repetitions: HashMap<String, usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Position::default())
    }
}

impl Session {
    /// Starts a session from a [`Position`].
    pub fn new(position: Position) -> Self {
        let mut repetitions = HashMap::new();
        repetitions.insert(Fen::from(&position).key(), 1);

        Session {
            position,
            selected: None,
            repetitions,
        }
    }

    /// The current [`Position`].
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The currently selected [`Square`], if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// The current arrangement of pieces.
    pub fn board(&self) -> Board {
        Board::from(&self.position)
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// The [`Outcome`] of the game, if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome().or_else(|| {
            let key = Fen::from(&self.position).key();
            match self.repetitions.get(&key) {
                Some(&n) if n >= 3 => Some(Outcome::DrawByThreefoldRepetition),
                _ => None,
            }
        })
    }

    /// The status line shown to the player.
    pub fn status(&self) -> String {
        let turn = self.position.turn().name();
        match self.outcome().map(|o| o.winner()) {
            Some(Some(c)) => format!("Checkmate! {} wins.", c.name()),
            Some(None) => "Draw!".to_string(),
            None if self.position.is_check() => format!("{}'s turn, Check!", turn),
            None => format!("{}'s turn", turn),
        }
    }

    /// Handles a click on a [`Square`].
    ///
    /// Moves attempted by clicking always promote to a queen.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn click(&mut self, s: Square) -> Click {
        if self.is_over() {
            return Click::Ignored;
        }

        match self.selected.take() {
            None => match self.position.piece_on(s) {
                Some(p) if p.color() == self.position.turn() => {
                    self.selected = Some(s);
                    Click::Selected(s)
                }
                _ => Click::Ignored,
            },

            Some(whence) => match self.play(Move(whence, s, Promotion::Queen)) {
                Ok(m) => Click::Moved(m),
                Err(e) => {
                    debug!(%e, "deselecting");
                    Click::Deselected
                }
            },
        }
    }

    /// Plays a [`Move`], normalizing any promotion to a queen.
    ///
    /// Returns the move actually played. No move is legal once the game is over.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play(&mut self, m: Move) -> Result<Move, IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove(m, self.position.clone()));
        }

        let played = self.position.make(m.queened())?;
        self.selected = None;
        *self
            .repetitions
            .entry(Fen::from(&self.position).key())
            .or_insert(0) += 1;

        Ok(played)
    }

    /// Starts a new game from the starting position.
    pub fn reset(&mut self) {
        *self = Session::default();
    }
}
