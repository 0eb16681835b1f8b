use crate::{io::Process, play::Play};
use async_trait::async_trait;
use derive_more::{DebugCustom, Display, Error, From};
use lib::chess::{Move, Position};
use proptest::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use test_strategy::Arbitrary;

mod random;
mod uci;

pub use random::*;
pub use uci::*;

/// The reason why parsing engine configuration failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse engine configuration")]
pub struct ParseEngineConfigError(ron::de::SpannedError);

/// Runtime configuration for an [`Engine`].
#[derive(Debug, Clone, Eq, PartialEq, Arbitrary, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum EngineConfig {
    /// A UCI engine, launched from a command line such as `"stockfish"` or `"lc0 --threads=2"`.
    Uci(
        String,
        #[serde(default)] UciOptions,
        #[serde(default, with = "humantime_serde")]
        #[strategy(proptest::option::of((1u64..=3_600_000).prop_map(Duration::from_millis)))]
        Option<Duration>,
    ),

    /// A bot that plays uniformly random legal moves.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::Uci("stockfish".into(), UciOptions::default(), None)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for EngineConfig {
    type Err = ParseEngineConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// The reason why [`Engine`] failed to play a [`Move`].
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    Uci(UciError),
    Random(RandomizerError),
}

/// A generic chess engine.
#[derive(DebugCustom, From)]
pub enum Engine {
    #[debug(fmt = "{:?}", _0)]
    Uci(Uci<Process>),
    #[debug(fmt = "{:?}", _0)]
    Random(Randomizer),
}

#[async_trait]
impl Play for Engine {
    type Error = EngineError;

    async fn play(&mut self, pos: &Position, depth: u8) -> Result<Move, Self::Error> {
        match self {
            Engine::Uci(e) => Ok(e.play(pos, depth).await?),
            Engine::Random(e) => Ok(e.play(pos, depth).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_engine_config_is_an_identity(c: EngineConfig) {
        assert_eq!(c.to_string().parse(), Ok(c));
    }

    #[proptest]
    fn uci_config_is_deserializable(#[strategy("[a-z/]+")] path: String) {
        assert_eq!(
            format!("uci({:?})", path).parse(),
            Ok(EngineConfig::Uci(path.clone(), UciOptions::default(), None))
        );

        assert_eq!(
            format!(r#"uci({:?}, {{"Hash": Some("16"), "Ponder": None}})"#, path).parse(),
            Ok(EngineConfig::Uci(
                path.clone(),
                UciOptions::from([
                    ("Hash".into(), Some("16".into())),
                    ("Ponder".into(), None)
                ]),
                None
            ))
        );

        assert_eq!(
            format!(r#"uci({:?}, {{}}, Some("5s"))"#, path).parse(),
            Ok(EngineConfig::Uci(
                path,
                UciOptions::default(),
                Some(Duration::from_secs(5))
            ))
        );
    }

    #[proptest]
    fn random_config_is_deserializable(seed: u64) {
        assert_eq!("random()".parse(), Ok(EngineConfig::Random { seed: None }));

        assert_eq!(
            format!("random(seed: Some({}))", seed).parse(),
            Ok(EngineConfig::Random { seed: Some(seed) })
        );
    }

    #[proptest]
    fn unknown_engines_are_rejected(
        #[strategy("[a-z]+")]
        #[filter(#name != "uci" && #name != "random")]
        name: String,
    ) {
        assert!(format!("{}()", name).parse::<EngineConfig>().is_err());
    }
}
