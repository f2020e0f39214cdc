//! Players: a finished board and fleet plus shot counters.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::board::Board;
use crate::common::{Cell, EngineError, ShotOutcome};
use crate::config::{SinkPolicy, FLEET_SIZE};
use crate::ship::{Ship, ShipKind};

/// Placed ships grouped by kind, in placement order within each kind.
pub type Fleet = BTreeMap<ShipKind, Vec<Ship>>;

/// Seat of a player in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            PlayerId::A => PlayerId::B,
            PlayerId::B => PlayerId::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::A => 0,
            PlayerId::B => 1,
        }
    }
}

/// Derived per-player statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub shots_missed: u32,
    /// Truncated percentage, zero before the first shot.
    pub hit_percent: u32,
    pub miss_percent: u32,
    pub hits_taken: u32,
    pub ships_left: usize,
    pub ship_parts_left: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shots fired: {}", self.shots_fired)?;
        writeln!(f, "Shots hit: {} ({} %)", self.shots_hit, self.hit_percent)?;
        writeln!(f, "Shots missed: {} ({} %)", self.shots_missed, self.miss_percent)?;
        writeln!(f, "Hits taken: {}", self.hits_taken)?;
        writeln!(f, "Ships left: {}", self.ships_left)?;
        write!(f, "Ship parts left: {}", self.ship_parts_left)
    }
}

/// Result of an incoming shot as seen by the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Impact {
    pub outcome: ShotOutcome,
    /// Kind and parts left of the ship that was hit.
    pub ship: Option<(ShipKind, usize)>,
    pub ships_left: usize,
}

/// A player with a complete fleet, ready for a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    board: Board,
    fleet: Fleet,
    shots_fired: u32,
    shots_hit: u32,
    hits_taken: u32,
    ships_left: usize,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, board: Board, fleet: Fleet) -> Self {
        Self {
            id,
            name,
            board,
            fleet,
            shots_fired: 0,
            shots_hit: 0,
            hits_taken: 0,
            ships_left: FLEET_SIZE,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// All ships, grouped by kind.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.fleet.values().flatten()
    }

    /// The ship occupying (`x`, `y`), if any.
    pub fn ship_at(&self, x: u8, y: u8) -> Option<&Ship> {
        self.ships().find(|s| s.contains(x, y))
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    pub fn ships_left(&self) -> usize {
        self.ships_left
    }

    /// Unhit cells summed over the fleet.
    pub fn ship_parts_left(&self) -> usize {
        self.ships().map(Ship::parts_left).sum()
    }

    pub fn stats(&self) -> Stats {
        let shots_missed = self.shots_fired - self.shots_hit;
        let (hit_percent, miss_percent) = if self.shots_fired == 0 {
            (0, 0)
        } else {
            (
                self.shots_hit * 100 / self.shots_fired,
                shots_missed * 100 / self.shots_fired,
            )
        };
        Stats {
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            shots_missed,
            hit_percent,
            miss_percent,
            hits_taken: self.hits_taken,
            ships_left: self.ships_left,
            ship_parts_left: self.ship_parts_left(),
        }
    }

    /// Count a shot fired by this player.
    pub(crate) fn record_shot_fired(&mut self, outcome: ShotOutcome) {
        self.shots_fired += 1;
        if outcome == ShotOutcome::Hit {
            self.shots_hit += 1;
        }
    }

    /// Resolve a shot against this player's board and fleet.
    ///
    /// Fails without touching any state when the cell was already resolved
    /// or lies off the board.
    pub(crate) fn receive_shot(
        &mut self,
        x: u8,
        y: u8,
        policy: SinkPolicy,
    ) -> Result<Impact, EngineError> {
        match self.board.cell_state(x, y)? {
            Cell::Hit | Cell::Miss => Err(EngineError::CellAlreadyResolved),
            Cell::Water => {
                let outcome = self.board.record_shot(x, y)?;
                Ok(Impact {
                    outcome,
                    ship: None,
                    ships_left: self.ships_left,
                })
            }
            Cell::ShipPart => {
                let ship = self
                    .fleet
                    .values_mut()
                    .flatten()
                    .find(|s| s.contains(x, y))
                    .ok_or(EngineError::UnknownShip { x, y })?;
                let outcome = self.board.record_shot(x, y)?;
                let parts_left = ship
                    .assign_hit(x, y, policy)
                    .unwrap_or_else(|| ship.parts_left());
                self.hits_taken += 1;
                if parts_left == 0 {
                    // Under one-hit sinking the rest of the hull goes down too.
                    self.board.mark_hits(ship.mask());
                    self.ships_left = self.ships_left.saturating_sub(1);
                }
                Ok(Impact {
                    outcome,
                    ship: Some((ship.kind(), parts_left)),
                    ships_left: self.ships_left,
                })
            }
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
