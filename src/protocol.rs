#![cfg(feature = "std")]

//! Asynchronous command surface shared by the match front-ends.

use crate::board::Grid;
use crate::common::ShotOutcome;
use crate::game::{MatchEvent, Outcome, Phase};
use crate::player::{PlayerId, Stats};

/// Commands and queries one command producer can issue against a match.
///
/// Engine rejections surface as [`crate::EngineError`] inside the
/// `anyhow::Error` and can be recovered with `downcast_ref`.
#[async_trait::async_trait]
pub trait MatchApi: Send + Sync {
    async fn fire_shot(&self, player: PlayerId, x: u8, y: u8) -> anyhow::Result<ShotOutcome>;
    async fn forfeit(&self, player: PlayerId) -> anyhow::Result<Outcome>;
    async fn grid(&self, player: PlayerId) -> anyhow::Result<Grid>;
    async fn stats(&self, player: PlayerId) -> anyhow::Result<Stats>;
    async fn phase(&self) -> anyhow::Result<Phase>;
    async fn active_player(&self) -> anyhow::Result<Option<PlayerId>>;
    async fn drain_events(&self) -> anyhow::Result<Vec<MatchEvent>>;
}
