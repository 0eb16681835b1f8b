use crate::io::Io;
use clap::Parser;
use derive_more::{Constructor, Display};
use lib::chess::{Move, Square};
use std::{fmt, io};
use tracing::instrument;

#[cfg(test)]
use test_strategy::Arbitrary;

/// A command typed by the player.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Parser)]
#[cfg_attr(test, derive(Arbitrary))]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub enum Cmd {
    /// Click on a square, either to pick up a piece or to put it down.
    #[display(fmt = "select {}", square)]
    #[clap(visible_alias = "s")]
    Select {
        /// A square in algebraic notation, like `e4`.
        square: Square,
    },

    /// Move a piece on the board, same as selecting both squares in order.
    #[display(fmt = "move {}", descriptor)]
    #[clap(after_help = r#"SYNTAX:
    <DESCRIPTOR>    ::= <SQUARE:from><SQUARE:to>
    <SQUARE>        ::= <FILE><RANK>
    <FILE>          ::= a|b|c|d|e|f|g|h
    <RANK>          ::= 1|2|3|4|5|6|7|8"#)]
    Move {
        /// A chess move in pure coordinate notation.
        descriptor: Move,
    },

    /// Ask the opponent to move now.
    #[display(fmt = "go")]
    Go,

    /// Start a new game.
    #[display(fmt = "new")]
    New,

    /// Leave the game.
    #[display(fmt = "quit")]
    Quit,
}

/// The player's side of the terminal.
#[derive(Debug, Constructor)]
pub struct Prompt<T: Io> {
    io: T,
}

impl<T: Io> Prompt<T> {
    /// Shows the board followed by a status line.
    #[instrument(level = "trace", skip(self, diagram), err)]
    pub async fn show(&mut self, diagram: impl fmt::Display, status: &str) -> io::Result<()> {
        let diagram = diagram.to_string();
        self.io.send(&diagram).await?;
        self.io.send(status).await?;
        self.io.flush().await
    }

    /// Tells the player something.
    #[instrument(level = "trace", skip(self), err)]
    pub async fn say(&mut self, msg: &str) -> io::Result<()> {
        self.io.send(msg).await?;
        self.io.flush().await
    }

    /// Waits for a valid [`Cmd`], explaining what went wrong with invalid ones.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub async fn read(&mut self) -> io::Result<Cmd> {
        loop {
            let line = self.io.recv().await?;

            match Cmd::try_parse_from(line.split_whitespace()) {
                Ok(cmd) => break Ok(cmd),
                Err(e) => {
                    self.io.send(e.to_string().trim_end()).await?;
                    self.io.flush().await?;
                }
            }
        }
    }
}
