use async_trait::async_trait;
use lib::chess::{Move, Position};

/// Trait for types that know how to play chess.
#[async_trait]
#[cfg_attr(test, mockall::automock(type Error = String;))]
pub trait Play {
    /// The reason why a [`Move`] could not be played.
    type Error;

    /// Finds the best [`Move`] in a [`Position`], searching up to `depth` plies.
    async fn play(&mut self, pos: &Position, depth: u8) -> Result<Move, Self::Error>;
}
