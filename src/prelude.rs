//! Commonly used types and utilities for ease of import.

pub use crate::{
    Cell, Coord, EngineError, Match, MatchEvent, Outcome, Phase, PlacementSession,
    PlacementStep, PlayerId, ShipKind, ShotOutcome, SinkPolicy,
};

#[cfg(feature = "std")]
pub use crate::{MatchApi, MatchHandle, SharedMatch};
