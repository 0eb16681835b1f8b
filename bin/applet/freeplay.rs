use crate::io::{Io, Pipe};
use crate::prompt::{Cmd, Prompt};
use anyhow::Error as Anyhow;
use clap::Parser;
use humantime_serde::re::humantime::parse_duration;
use lib::chess::Color;
use lib::freeplay::{GameState, Opponent, Transition};
use std::{io, time::Duration};
use tokio::io::{stdin, stdout};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Play chess without rules against a random bot.
///
/// Any piece may go anywhere that is not occupied by a piece of its own side,
/// and whoever captures the opposing king wins. You play the white pieces.
#[derive(Debug, Parser)]
pub struct Freeplay {
    /// Seeds the bot for reproducible games.
    #[clap(long)]
    seed: Option<u64>,

    /// How long the bot waits before moving.
    #[clap(long, default_value = "250ms", value_parser = parse_duration)]
    delay: Duration,
}

impl Freeplay {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let opponent = match self.seed {
            Some(s) => Opponent::seeded(s),
            None => Opponent::default(),
        };

        let prompt = Prompt::new(Pipe::new(stdout(), stdin()));
        Table::new(opponent, prompt, self.delay).run().await
    }
}

/// The status line of a game of free play.
fn status(state: &GameState) -> String {
    match state.ending() {
        Some(e) => e.to_string(),
        None => format!("{}'s turn", state.turn().name()),
    }
}

fn record(t: Transition) {
    match t {
        Transition::Moved {
            whence,
            whither,
            captured: Some(p),
        } => info!(%whence, %whither, captured = %p, "moved"),
        Transition::Moved { whence, whither, .. } => info!(%whence, %whither, "moved"),
        Transition::Rejected => warn!("cannot capture a piece of the same side"),
        Transition::Selected(_) | Transition::Ignored => {}
    }
}

/// A game of free play between the player, with the white pieces, and a random bot.
struct Table<T: Io> {
    opponent: Opponent,
    prompt: Prompt<T>,
    state: GameState,
    delay: Duration,
}

impl<T: Io> Table<T> {
    fn new(opponent: Opponent, prompt: Prompt<T>, delay: Duration) -> Self {
        Table {
            opponent,
            prompt,
            state: GameState::default(),
            delay,
        }
    }

    async fn run(&mut self) -> Result<(), Anyhow> {
        loop {
            let diagram = self.state.board().diagram(self.state.selected());
            self.prompt.show(diagram, &status(&self.state)).await?;

            if !self.state.is_over() && self.state.turn() == Color::Black {
                if !self.delay.is_zero() {
                    sleep(self.delay).await;
                }

                let (state, t) = self.opponent.play(self.state);
                self.state = state;
                record(t);

                if t != Transition::Ignored {
                    continue;
                }
            }

            let cmd = match self.prompt.read().await {
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break Ok(()),
                cmd => cmd?,
            };

            match cmd {
                Cmd::Select { square } => {
                    let (state, t) = self.state.click(square);
                    self.state = state;
                    record(t);
                }

                Cmd::Move { descriptor: m } => {
                    let owner = self.state.board()[m.whence()].map(|p| p.color());
                    if owner == Some(self.state.turn()) {
                        let (state, t) = self.state.relocate(m.whence(), m.whither());
                        self.state = state;
                        record(t);
                    }
                }

                Cmd::Go => self.prompt.say("There is no engine to ask in free play.").await?,
                Cmd::New => self.state = GameState::default(),
                Cmd::Quit => break Ok(()),
            }

            if let Some(e) = self.state.ending() {
                info!(ending = %e, "the game is over");
            }
        }
    }
}
