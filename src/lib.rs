#![cfg_attr(not(feature = "std"), no_std)]

//! Rules engine for two-player Battleships: fleet placement with edge
//! adjacency checks, per-player boards and a turn-based match state machine.

extern crate alloc;

mod bitboard;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod coord;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
mod player;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
mod ship;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::{Orientations, PlacementSession, PlacementState, PlacementStep};
pub use player::*;
#[cfg(feature = "std")]
pub use protocol::MatchApi;
#[cfg(feature = "std")]
pub use session::{MatchHandle, SharedMatch};
pub use ship::*;
