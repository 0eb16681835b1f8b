use crate::play::Play;
use async_trait::async_trait;
use derive_more::{Display, Error};
use lib::chess::{Move, Position};
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use tracing::instrument;

/// The reason why [`Randomizer`] could not play a [`Move`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "there are no legal moves in this position")]
pub struct RandomizerError;

/// A trivial bot that plays any one of the legal moves with equal probability.
#[derive(Debug)]
pub struct Randomizer(StdRng);

impl Randomizer {
    /// Constructs a [`Randomizer`], reproducible if `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Randomizer(StdRng::seed_from_u64(s)),
            None => Randomizer(StdRng::from_entropy()),
        }
    }
}

#[async_trait]
impl Play for Randomizer {
    type Error = RandomizerError;

    #[instrument(level = "debug", skip(self, pos), ret(Display), err, fields(%pos))]
    async fn play(&mut self, pos: &Position, _: u8) -> Result<Move, Self::Error> {
        pos.moves().choose(&mut self.0).ok_or(RandomizerError)
    }
}
