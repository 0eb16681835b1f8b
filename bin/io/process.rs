use super::{Io, Pipe};
use anyhow::{anyhow, Context, Error as Anyhow};
use async_trait::async_trait;
use std::{io, time::Duration};
use tokio::{runtime, task::block_in_place, time::timeout};
use tracing::{error, field::display, instrument, Span};

#[cfg(test)]
#[async_trait]
#[mockall::automock]
trait Child {
    async fn wait(&mut self) -> io::Result<String>;
    async fn kill(&mut self) -> io::Result<()>;
}

/// How an engine is launched: the program followed by its arguments.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    /// Splits an engine command line on whitespace.
    pub fn parse(cmdline: &str) -> io::Result<Self> {
        let mut words = cmdline.split_whitespace().map(String::from);
        match words.next() {
            Some(program) => Ok(Command {
                program,
                args: words.collect(),
            }),

            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "the engine command is empty",
            )),
        }
    }

    /// The engine executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments passed to the engine.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// An engine running as a child process, spoken to over its standard input and output.
#[derive(Debug)]
pub struct Process {
    command: Command,

    #[cfg(test)]
    pipe: Pipe<tokio::io::DuplexStream, tokio::io::DuplexStream>,

    #[cfg(not(test))]
    pipe: Pipe<tokio::process::ChildStdin, tokio::process::ChildStdout>,

    #[cfg(test)]
    child: MockChild,

    #[cfg(not(test))]
    child: tokio::process::Child,
}

impl Process {
    /// How long the engine is given to quit before it's killed.
    #[cfg(test)]
    const GRACE: Duration = Duration::ZERO;

    #[cfg(not(test))]
    const GRACE: Duration = Duration::from_secs(1);

    /// Launches the engine described by the command line `cmdline`.
    ///
    /// Errors name the engine that could not be started.
    #[instrument(level = "debug", err)]
    pub fn spawn(cmdline: &str) -> io::Result<Self> {
        let command = Command::parse(cmdline)?;

        #[cfg(test)]
        {
            Ok(Process {
                command,
                pipe: tokio::io::duplex(1).into(),
                child: MockChild::new(),
            })
        }

        #[cfg(not(test))]
        {
            let failed = |e: io::Error| {
                let reason = format!("failed to start the engine `{}`: {}", command.program, e);
                io::Error::new(e.kind(), reason)
            };

            let mut child = tokio::process::Command::new(command.program())
                .args(command.args())
                .stdin(std::process::Stdio::piped())
                .stdout(std::process::Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(failed)?;

            tracing::info!(engine = %command.program, pid = child.id(), "engine started");

            let stdio = Option::zip(child.stdin.take(), child.stdout.take());
            let (stdin, stdout) = stdio.ok_or_else(|| {
                failed(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "its standard input and output are not available",
                ))
            })?;

            Ok(Process {
                command,
                pipe: Pipe::new(stdin, stdout),
                child,
            })
        }
    }

    /// How this engine was launched.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Flushes pending messages, then waits for the engine to quit, killing it after [`Self::GRACE`].
    async fn terminate(&mut self) -> Result<String, Anyhow> {
        self.flush().await?;

        match timeout(Self::GRACE, self.child.wait()).await {
            Ok(status) => Ok(status?.to_string()),
            Err(_) => {
                self.child.kill().await?;
                Err(anyhow!("the engine did not quit within {:?} and was killed", Self::GRACE))
            }
        }
    }
}

impl Drop for Process {
    #[instrument(level = "debug", skip(self), fields(engine = %self.command().program(), status))]
    fn drop(&mut self) {
        let result: Result<_, Anyhow> = block_in_place(|| {
            let rt = runtime::Handle::try_current()?;
            rt.block_on(self.terminate())
        });

        let engine = self.command().program();
        match result.with_context(|| format!("failed to shut down `{}`", engine)) {
            Err(e) => error!("{:?}", e),
            Ok(s) => {
                Span::current().record("status", display(s));
            }
        }
    }
}

#[async_trait]
impl Io for Process {
    async fn recv(&mut self) -> io::Result<String> {
        self.pipe.recv().await
    }

    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.pipe.send(msg).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.pipe.flush().await
    }
}
