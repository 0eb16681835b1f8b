use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod freeplay;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Freeplay(freeplay::Freeplay),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => Ok(a.execute().await?),
            Applet::Freeplay(a) => Ok(a.execute().await?),
        }
    }
}
