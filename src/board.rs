//! Per-player board: ship occupancy and shot outcomes as bitboards.

use crate::bitboard::BitBoard;
use crate::common::{Cell, EngineError, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::coord::Coord;

/// Bitboard covering one player's board.
pub type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Snapshot of every cell, indexed `[y][x]`.
pub type Grid = [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Ship placements, hits and misses of one player.
///
/// The board trusts its caller about ship overlap (placement is validated
/// upstream) but refuses to resolve the same cell twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// Create an empty board (all water, no shots).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the cells of a ship as occupied.
    pub fn mark_ship(&mut self, cells: BB) {
        self.ship_map |= cells;
    }

    /// Resolve a shot at (`x`, `y`).
    pub fn record_shot(&mut self, x: u8, y: u8) -> Result<ShotOutcome, EngineError> {
        let (x, y) = on_board(x, y)?;
        if self.hits.get(x, y)? || self.misses.get(x, y)? {
            return Err(EngineError::CellAlreadyResolved);
        }
        if self.ship_map.get(x, y)? {
            self.hits.set(x, y)?;
            Ok(ShotOutcome::Hit)
        } else {
            self.misses.set(x, y)?;
            Ok(ShotOutcome::Miss)
        }
    }

    /// Mark every ship cell in `cells` as hit, e.g. a ship destroyed by one
    /// hit. Water cells in the mask are left alone.
    pub fn mark_hits(&mut self, cells: BB) {
        self.hits |= cells & self.ship_map;
    }

    pub fn cell_state(&self, x: u8, y: u8) -> Result<Cell, EngineError> {
        let (x, y) = on_board(x, y)?;
        Ok(if self.hits.get(x, y)? {
            Cell::Hit
        } else if self.misses.get(x, y)? {
            Cell::Miss
        } else if self.ship_map.get(x, y)? {
            Cell::ShipPart
        } else {
            Cell::Water
        })
    }

    /// Every cell state, indexed `[y][x]`.
    pub fn grid(&self) -> Grid {
        let mut grid = [[Cell::Water; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (x, y) in self.ship_map.cells() {
            grid[y][x] = Cell::ShipPart;
        }
        for (x, y) in self.misses.cells() {
            grid[y][x] = Cell::Miss;
        }
        for (x, y) in self.hits.cells() {
            grid[y][x] = Cell::Hit;
        }
        grid
    }

    /// Occupancy mask of all ships, hit or not.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Cells that have been fired upon.
    pub fn resolved(&self) -> BB {
        self.hits | self.misses
    }

    /// Remove every ship and shot.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

fn on_board(x: u8, y: u8) -> Result<(usize, usize), EngineError> {
    let c = Coord::new(x, y).ok_or(EngineError::OutOfBounds { x, y })?;
    Ok((c.x as usize, c.y as usize))
}
