//! Ship kinds and placed ships, with hits tracked in a `BitBoard`.

use core::fmt;

use crate::board::BB;
use crate::common::PlacementError;
use crate::config::{SinkPolicy, BOARD_SIZE};
use crate::coord::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends to the right of the origin.
    Horizontal,
    /// Extends downwards from the origin.
    Vertical,
}

/// Kind of ship: fixes its name and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Destroyer,
    Submarine,
}

impl ShipKind {
    /// Number of cells a ship of this kind occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Submarine => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells covered by a ship of `size` starting at (`x`, `y`).
pub fn footprint(
    x: u8,
    y: u8,
    size: usize,
    orientation: Orientation,
) -> Result<BB, PlacementError> {
    let (x, y) = (x as usize, y as usize);
    let n = BOARD_SIZE as usize;
    let fits = match orientation {
        Orientation::Horizontal => y < n && x < n && size <= n - x,
        Orientation::Vertical => x < n && y < n && size <= n - y,
    };
    if size == 0 || !fits {
        return Err(PlacementError::OutOfBounds);
    }
    BB::from_cells((0..size).map(|i| match orientation {
        Orientation::Horizontal => (x + i, y),
        Orientation::Vertical => (x, y + i),
    }))
    .map_err(|_| PlacementError::OutOfBounds)
}

/// A ship placed on the board.
///
/// The occupied cells never change after construction; only the set of
/// remaining (unhit) cells shrinks as hits are assigned.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    orientation: Orientation,
    origin: Coord,
    mask: BB,
    remaining: BB,
    hits_taken: usize,
}

impl Ship {
    /// Place a ship of `kind` at `origin` with `orientation`.
    pub fn new(
        kind: ShipKind,
        orientation: Orientation,
        origin: Coord,
    ) -> Result<Self, PlacementError> {
        let mask = footprint(origin.x, origin.y, kind.size(), orientation)?;
        Ok(Ship {
            kind,
            orientation,
            origin,
            mask,
            remaining: mask,
            hits_taken: 0,
        })
    }

    /// Record a hit at (`x`, `y`) and return how many parts are left.
    ///
    /// Returns `None` without changing anything when the cell is not one of
    /// the remaining parts.
    pub fn assign_hit(&mut self, x: u8, y: u8, policy: SinkPolicy) -> Option<usize> {
        if !self.remaining.get(x as usize, y as usize).unwrap_or(false) {
            return None;
        }
        self.hits_taken += 1;
        match policy {
            SinkPolicy::OneHitSinks => self.remaining.clear_all(),
            SinkPolicy::AllPartsSinks => {
                let _ = self.remaining.clear(x as usize, y as usize);
            }
        }
        Some(self.remaining.count_ones())
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// First (top-left) cell of the ship.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BB {
        self.mask
    }

    /// Occupied cells in order from the origin.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self.origin;
        let orientation = self.orientation;
        (0..self.kind.size() as u8).map(move |i| match orientation {
            Orientation::Horizontal => Coord { x: x + i, y },
            Orientation::Vertical => Coord { x, y: y + i },
        })
    }

    /// Cells not hit yet.
    pub fn remaining_cells(&self) -> impl Iterator<Item = Coord> {
        self.remaining.cells().map(|(x, y)| Coord {
            x: x as u8,
            y: y as u8,
        })
    }

    pub fn contains(&self, x: u8, y: u8) -> bool {
        self.mask.get(x as usize, y as usize).unwrap_or(false)
    }

    pub fn parts_left(&self) -> usize {
        self.remaining.count_ones()
    }

    /// Hits assigned so far.
    pub fn hits_taken(&self) -> usize {
        self.hits_taken
    }

    pub fn is_destroyed(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, origin: {}, orientation: {:?}, parts_left: {}, hits_taken: {} }}",
            self.kind,
            self.origin,
            self.orientation,
            self.parts_left(),
            self.hits_taken,
        )
    }
}
