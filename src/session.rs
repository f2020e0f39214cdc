#![cfg(feature = "std")]

//! Serialized access to one match from several command producers.
//!
//! [`SharedMatch`] guards the match with a mutex held for exactly one
//! command. [`MatchHandle`] gives the match to a task that applies commands
//! one at a time in arrival order.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::anyhow;
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::board::Grid;
use crate::common::{EngineError, ShotOutcome};
use crate::game::{Match, MatchEvent, Outcome, Phase};
use crate::player::{PlayerId, Stats};
use crate::protocol::MatchApi;

/// A match behind a mutex, cloneable across threads.
#[derive(Clone)]
pub struct SharedMatch {
    inner: Arc<Mutex<Match>>,
}

impl SharedMatch {
    pub fn new(game: Match) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Run one command with exclusive access to the match.
    pub fn with<T>(&self, f: impl FnOnce(&mut Match) -> T) -> T {
        let mut game = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut game)
    }

    pub fn start<R: Rng>(&self, rng: &mut R) -> Result<PlayerId, EngineError> {
        self.with(|m| m.start(rng))
    }

    /// Snapshot of the match as it stands.
    pub fn snapshot(&self) -> Match {
        self.with(|m| m.clone())
    }
}

#[async_trait::async_trait]
impl MatchApi for SharedMatch {
    async fn fire_shot(&self, player: PlayerId, x: u8, y: u8) -> anyhow::Result<ShotOutcome> {
        Ok(self.with(|m| m.fire_shot(player, x, y))?)
    }

    async fn forfeit(&self, player: PlayerId) -> anyhow::Result<Outcome> {
        Ok(self.with(|m| m.forfeit(player))?)
    }

    async fn grid(&self, player: PlayerId) -> anyhow::Result<Grid> {
        Ok(self.with(|m| m.grid(player)))
    }

    async fn stats(&self, player: PlayerId) -> anyhow::Result<Stats> {
        Ok(self.with(|m| m.stats(player)))
    }

    async fn phase(&self) -> anyhow::Result<Phase> {
        Ok(self.with(|m| m.phase()))
    }

    async fn active_player(&self) -> anyhow::Result<Option<PlayerId>> {
        Ok(self.with(|m| m.active_player()))
    }

    async fn drain_events(&self) -> anyhow::Result<Vec<MatchEvent>> {
        Ok(self.with(|m| m.drain_events()))
    }
}

enum Command {
    Fire {
        player: PlayerId,
        x: u8,
        y: u8,
        reply: oneshot::Sender<Result<ShotOutcome, EngineError>>,
    },
    Forfeit {
        player: PlayerId,
        reply: oneshot::Sender<Result<Outcome, EngineError>>,
    },
    Grid {
        player: PlayerId,
        reply: oneshot::Sender<Grid>,
    },
    Stats {
        player: PlayerId,
        reply: oneshot::Sender<Stats>,
    },
    Phase {
        reply: oneshot::Sender<Phase>,
    },
    Active {
        reply: oneshot::Sender<Option<PlayerId>>,
    },
    Drain {
        reply: oneshot::Sender<Vec<MatchEvent>>,
    },
}

/// Cloneable handle to a match owned by a background task.
///
/// The task stops once every handle is dropped and hands the match back
/// through its `JoinHandle`.
#[derive(Clone)]
pub struct MatchHandle {
    tx: mpsc::Sender<Command>,
}

impl MatchHandle {
    /// Move `game` onto a new task. Must be called inside a tokio runtime.
    pub fn spawn(game: Match) -> (Self, JoinHandle<Match>) {
        let (tx, rx) = mpsc::channel(32);
        let task = tokio::spawn(run(game, rx));
        (Self { tx }, task)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> anyhow::Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| anyhow!("match task has stopped"))?;
        response.await.map_err(|_| anyhow!("match task dropped the reply"))
    }
}

async fn run(mut game: Match, mut rx: mpsc::Receiver<Command>) -> Match {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            Command::Fire { player, x, y, reply } => {
                let _ = reply.send(game.fire_shot(player, x, y));
            }
            Command::Forfeit { player, reply } => {
                let _ = reply.send(game.forfeit(player));
            }
            Command::Grid { player, reply } => {
                let _ = reply.send(game.grid(player));
            }
            Command::Stats { player, reply } => {
                let _ = reply.send(game.stats(player));
            }
            Command::Phase { reply } => {
                let _ = reply.send(game.phase());
            }
            Command::Active { reply } => {
                let _ = reply.send(game.active_player());
            }
            Command::Drain { reply } => {
                let _ = reply.send(game.drain_events());
            }
        }
    }
    log::debug!("all match handles dropped, stopping match task");
    game
}

#[async_trait::async_trait]
impl MatchApi for MatchHandle {
    async fn fire_shot(&self, player: PlayerId, x: u8, y: u8) -> anyhow::Result<ShotOutcome> {
        Ok(self
            .request(|reply| Command::Fire { player, x, y, reply })
            .await??)
    }

    async fn forfeit(&self, player: PlayerId) -> anyhow::Result<Outcome> {
        Ok(self.request(|reply| Command::Forfeit { player, reply }).await??)
    }

    async fn grid(&self, player: PlayerId) -> anyhow::Result<Grid> {
        self.request(|reply| Command::Grid { player, reply }).await
    }

    async fn stats(&self, player: PlayerId) -> anyhow::Result<Stats> {
        self.request(|reply| Command::Stats { player, reply }).await
    }

    async fn phase(&self) -> anyhow::Result<Phase> {
        self.request(|reply| Command::Phase { reply }).await
    }

    async fn active_player(&self) -> anyhow::Result<Option<PlayerId>> {
        self.request(|reply| Command::Active { reply }).await
    }

    async fn drain_events(&self) -> anyhow::Result<Vec<MatchEvent>> {
        self.request(|reply| Command::Drain { reply }).await
    }
}
