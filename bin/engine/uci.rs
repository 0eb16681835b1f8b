use crate::{io::Io, play::Play};
use anyhow::{Context, Error as Anyhow};
use async_trait::async_trait;
use derive_more::{DebugCustom, Display, Error};
use lib::chess::{Move, ParseMoveError, Position};
use std::{collections::HashMap, fmt::Debug, future::Future, io, mem, pin::Pin, time::Duration};
use tokio::{runtime, task::block_in_place, time::timeout};
use tracing::{debug, error, instrument, warn};
use vampirc_uci::{self as uci, UciFen, UciMessage, UciMove, UciSearchControl};

pub type UciOptions = HashMap<String, Option<String>>;

#[derive(DebugCustom)]
#[debug(bound = "T: Debug")]
enum Lazy<T> {
    #[debug(fmt = "Lazy({:?})", _0)]
    Initialized(T),
    #[debug(fmt = "Lazy(?)")]
    Uninitialized(Pin<Box<dyn Future<Output = Result<T, UciError>> + Send + 'static>>),
    #[debug(fmt = "Lazy(!)")]
    Failed,
}

impl<T> Lazy<T> {
    /// Drives the initialization to completion, exactly once.
    async fn get_or_init(&mut self) -> Result<&mut T, UciError> {
        if let Lazy::Uninitialized(_) = self {
            if let Lazy::Uninitialized(f) = mem::replace(self, Lazy::Failed) {
                *self = Lazy::Initialized(f.await?);
            }
        }

        match self {
            Lazy::Initialized(v) => Ok(v),
            Lazy::Uninitialized(_) | Lazy::Failed => Err(UciError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "the UCI server failed to initialize",
            ))),
        }
    }
}

/// Where the client stands in the request/reply cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Flight {
    Idle,
    Awaiting,
    Stopped,
}

/// The reason why a [`Move`] could not be obtained from the UCI server.
#[derive(Debug, Display, Error)]
pub enum UciError {
    #[display(fmt = "the UCI server encountered an error")]
    Io(io::Error),

    #[display(fmt = "a request is already awaiting its reply")]
    Busy,

    #[display(fmt = "there is no request awaiting a reply")]
    Idle,

    #[display(fmt = "the UCI server did not reply within {:?}", _0)]
    Timeout(#[error(not(source))] Duration),

    #[display(fmt = "the UCI server replied with an invalid move")]
    InvalidMove(ParseMoveError),
}

impl From<io::Error> for UciError {
    fn from(e: io::Error) -> Self {
        UciError::Io(e)
    }
}

impl From<ParseMoveError> for UciError {
    fn from(e: ParseMoveError) -> Self {
        UciError::InvalidMove(e)
    }
}

/// Reads messages until a `bestmove` arrives, skipping everything else.
async fn best_move<T: Io>(io: &mut T) -> Result<UciMove, UciError> {
    loop {
        let msg = io.recv().await?;
        match uci::parse_one(msg.trim()) {
            UciMessage::BestMove { best_move, .. } => break Ok(best_move),
            _ => debug!(%msg, "ignored message from the UCI server"),
        }
    }
}

/// A Universal Chess Interface client that keeps at most one search in flight.
#[derive(Debug)]
pub struct Uci<T: Io> {
    io: Lazy<T>,
    flight: Flight,
    timeout: Option<Duration>,
}

impl<T: Io + Send + 'static> Uci<T> {
    /// Constructs [`Uci`] with the given [`UciOptions`] and an optional reply timeout.
    ///
    /// The handshake is deferred until the first request.
    pub fn new(mut io: T, options: UciOptions, timeout: Option<Duration>) -> Self {
        Uci {
            timeout,
            flight: Flight::Idle,
            io: Lazy::Uninitialized(Box::pin(async move {
                io.send(&UciMessage::Uci.to_string()).await?;
                io.flush().await?;

                while !matches!(uci::parse_one(io.recv().await?.trim()), UciMessage::UciOk) {}

                for (name, value) in options {
                    let set_option = UciMessage::SetOption { name, value };
                    io.send(&set_option.to_string()).await?;
                }

                io.send(&UciMessage::UciNewGame.to_string()).await?;
                io.send(&UciMessage::IsReady.to_string()).await?;
                io.flush().await?;

                while !matches!(uci::parse_one(io.recv().await?.trim()), UciMessage::ReadyOk) {}

                Ok(io)
            })),
        }
    }

    /// Consumes the `bestmove` still owed by an abandoned search.
    async fn drain(&mut self) -> Result<(), UciError> {
        let io = self.io.get_or_init().await?;

        let stale = match self.timeout {
            None => best_move(io).await?,
            Some(t) => match timeout(t, best_move(io)).await {
                Ok(m) => m?,
                Err(_) => return Err(UciError::Timeout(t)),
            },
        };

        debug!(%stale, "drained the reply to an abandoned search");
        self.flight = Flight::Idle;
        Ok(())
    }

    /// Asks the UCI server to search `pos` up to `depth` plies.
    ///
    /// Fails with [`UciError::Busy`] while a previous reply is still pending.
    #[instrument(level = "debug", skip(self, pos), err, fields(%pos))]
    pub async fn request(&mut self, pos: &Position, depth: u8) -> Result<(), UciError> {
        match self.flight {
            Flight::Awaiting => return Err(UciError::Busy),
            Flight::Stopped => self.drain().await?,
            Flight::Idle => {}
        }

        let position = UciMessage::Position {
            startpos: false,
            fen: Some(UciFen(pos.to_string())),
            moves: Vec::new(),
        };

        let go = UciMessage::Go {
            search_control: Some(UciSearchControl::depth(depth)),
            time_control: None,
        };

        let io = self.io.get_or_init().await?;
        io.send(&position.to_string()).await?;
        io.send(&go.to_string()).await?;
        io.flush().await?;

        self.flight = Flight::Awaiting;
        Ok(())
    }

    /// Waits for the `bestmove` that answers the pending request.
    ///
    /// Fails with [`UciError::Idle`] if there is no such request.
    #[instrument(level = "debug", skip(self), ret(Display), err)]
    pub async fn reply(&mut self) -> Result<Move, UciError> {
        if self.flight != Flight::Awaiting {
            return Err(UciError::Idle);
        }

        // Until it arrives the reply is owed.
        self.flight = Flight::Stopped;

        let io = self.io.get_or_init().await?;
        let m = match self.timeout {
            None => best_move(io).await?,
            Some(t) => match timeout(t, best_move(io)).await {
                Ok(m) => m?,
                Err(_) => {
                    warn!(timeout = ?t, "the UCI server is taking too long, stopping the search");
                    io.send(&UciMessage::Stop.to_string()).await?;
                    io.flush().await?;
                    return Err(UciError::Timeout(t));
                }
            },
        };

        self.flight = Flight::Idle;
        Ok(Move::try_from(m)?)
    }
}

impl<T: Io> Drop for Uci<T> {
    #[instrument(level = "trace", skip(self))]
    fn drop(&mut self) {
        if let Lazy::Initialized(io) = &mut self.io {
            let result: Result<(), Anyhow> = block_in_place(|| {
                runtime::Handle::try_current()?.block_on(async {
                    io.send(&UciMessage::Stop.to_string()).await?;
                    io.send(&UciMessage::Quit.to_string()).await?;
                    io.flush().await?;
                    Ok(())
                })
            });

            if let Err(e) = result.context("failed to gracefully shutdown the uci engine") {
                error!("{:?}", e);
            }
        }
    }
}

#[async_trait]
impl<T: Io + Send + 'static> Play for Uci<T> {
    type Error = UciError;

    #[instrument(level = "debug", skip(self, pos), ret(Display), err, fields(%pos))]
    async fn play(&mut self, pos: &Position, depth: u8) -> Result<Move, Self::Error> {
        self.request(pos, depth).await?;
        self.reply().await
    }
}
