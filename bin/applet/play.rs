use crate::io::{Io, Pipe};
use crate::prompt::{Cmd, Prompt};
use crate::{build::Build, engine::EngineConfig};
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use humantime_serde::re::humantime::parse_duration;
use lib::chess::Color;
use lib::session::{Click, Session};
use std::{fmt::Display, io, time::Duration};
use tokio::io::{stdin, stdout};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Play chess against an engine, with the rules of chess enforced.
///
/// You play the white pieces.
#[derive(Debug, Parser)]
pub struct Play {
    /// The engine to play against, e.g. `uci("stockfish")` or `random()`.
    #[clap(short, long, default_value_t)]
    engine: EngineConfig,

    /// How many plies the engine searches before moving.
    #[clap(short, long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=20))]
    depth: u8,

    /// How long to wait before asking the engine to move.
    #[clap(long, default_value = "250ms", value_parser = parse_duration)]
    delay: Duration,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            engine: EngineConfig::default(),
            depth: 10,
            delay: Duration::from_millis(250),
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let engine = self
            .engine
            .build()
            .context("failed to start the engine")?;

        let prompt = Prompt::new(Pipe::new(stdout(), stdin()));
        Match::new(engine, prompt, self.depth, self.delay).run().await
    }
}

/// A game between the player, with the white pieces, and an engine.
struct Match<E, T: Io> {
    engine: E,
    prompt: Prompt<T>,
    session: Session,
    depth: u8,
    delay: Duration,
    stalled: bool,
}

impl<E, T> Match<E, T>
where
    E: crate::play::Play,
    E::Error: Display,
    T: Io,
{
    fn new(engine: E, prompt: Prompt<T>, depth: u8, delay: Duration) -> Self {
        Match {
            engine,
            prompt,
            session: Session::default(),
            depth,
            delay,
            stalled: false,
        }
    }

    fn engine_to_move(&self) -> bool {
        !self.stalled && !self.session.is_over() && self.session.position().turn() == Color::Black
    }

    async fn engine_move(&mut self) -> Result<(), Anyhow> {
        let pos = self.session.position().clone();

        let reason = match self.engine.play(&pos, self.depth).await {
            Ok(m) => match self.session.play(m) {
                Ok(m) => {
                    info!(%m, "the engine moved");
                    return Ok(());
                }

                Err(e) => e.to_string(),
            },

            Err(e) => e.to_string(),
        };

        warn!(%reason, "the engine failed to move");
        self.stalled = true;

        self.prompt
            .say(&format!("The engine did not move ({}), type `go` to ask again.", reason))
            .await?;

        Ok(())
    }

    async fn run(&mut self) -> Result<(), Anyhow> {
        loop {
            let board = self.session.board();
            let diagram = board.diagram(self.session.selected());
            self.prompt.show(diagram, &self.session.status()).await?;

            if self.engine_to_move() {
                if !self.delay.is_zero() {
                    sleep(self.delay).await;
                }

                self.engine_move().await?;
                continue;
            }

            let cmd = match self.prompt.read().await {
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break Ok(()),
                cmd => cmd?,
            };

            match cmd {
                Cmd::Select { square } => match self.session.click(square) {
                    Click::Moved(m) => info!(%m, "the player moved"),
                    Click::Deselected => warn!(%square, "the move was not made"),
                    Click::Selected(_) | Click::Ignored => {}
                },

                Cmd::Move { descriptor } => match self.session.play(descriptor) {
                    Ok(m) => info!(%m, "the player moved"),
                    Err(e) => warn!("{}", e),
                },

                Cmd::Go => {
                    self.stalled = false;
                    if !self.session.is_over() && !self.engine_to_move() {
                        self.engine_move().await?;
                    }
                }

                Cmd::New => {
                    self.stalled = false;
                    self.session.reset();
                }

                Cmd::Quit => break Ok(()),
            }

            if let Some(o) = self.session.outcome() {
                info!(outcome = %o, "the game is over");
            }
        }
    }
}
