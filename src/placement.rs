//! Fleet placement: legality checks and the incremental placement session.
//!
//! A placement is legal when the footprint stays on the board, covers no
//! ship part and shares no edge with another ship. Ships may touch
//! diagonally.
//!
//! The session drives a player through [`PLACEMENT_ORDER`]. Proposing an
//! origin either commits the ship at once (only one orientation fits) or
//! waits for the player to pick the cell to the right of the origin
//! (horizontal) or below it (vertical).

use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;

use crate::board::{Board, BB};
use crate::common::{EngineError, PlacementError};
use crate::config::{BOARD_SIZE, FLEET_SIZE, PLACEMENT_ORDER};
use crate::coord::Coord;
use crate::player::{Fleet, Player, PlayerId};
use crate::ship::{footprint, Orientation, Ship, ShipKind};

/// Full board restarts tried by [`PlacementSession::place_randomly`].
const RANDOM_RESTARTS: usize = 64;

/// Which orientations are legal at an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientations {
    pub vertical_ok: bool,
    pub horizontal_ok: bool,
}

impl Orientations {
    pub fn any(self) -> bool {
        self.vertical_ok || self.horizontal_ok
    }

    pub fn both(self) -> bool {
        self.vertical_ok && self.horizontal_ok
    }

    /// The orientation when exactly one is legal.
    pub fn single(self) -> Option<Orientation> {
        match (self.horizontal_ok, self.vertical_ok) {
            (true, false) => Some(Orientation::Horizontal),
            (false, true) => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// Check one orientation and return the footprint when it is legal.
pub fn check(
    board: &Board,
    x: u8,
    y: u8,
    size: usize,
    orientation: Orientation,
) -> Result<BB, PlacementError> {
    let cells = footprint(x, y, size, orientation)?;
    let ships = board.ship_map();
    if cells.intersects(&ships) {
        return Err(PlacementError::Overlap);
    }
    if cells.grow_orthogonal().intersects(&ships) {
        return Err(PlacementError::Adjacent);
    }
    Ok(cells)
}

/// Legal orientations for a ship of `size` with its origin at (`x`, `y`).
///
/// A single-cell ship looks the same either way, so only the vertical pass
/// runs and `horizontal_ok` stays false.
pub fn evaluate(board: &Board, x: u8, y: u8, size: usize) -> Orientations {
    let vertical_ok = check(board, x, y, size, Orientation::Vertical).is_ok();
    if size == 1 {
        return Orientations {
            vertical_ok,
            horizontal_ok: false,
        };
    }
    Orientations {
        vertical_ok,
        horizontal_ok: check(board, x, y, size, Orientation::Horizontal).is_ok(),
    }
}

/// Most specific reason why no orientation fits at (`x`, `y`).
fn rejection(board: &Board, x: u8, y: u8, size: usize) -> PlacementError {
    let vertical = check(board, x, y, size, Orientation::Vertical).err();
    let horizontal = check(board, x, y, size, Orientation::Horizontal).err();
    match (vertical, horizontal) {
        (Some(v), Some(h)) => v.min(h),
        (Some(e), None) | (None, Some(e)) => e,
        (None, None) => PlacementError::UnexpectedCell,
    }
}

/// Origins where a ship of `size` fits in at least one orientation.
pub fn legal_origins(board: &Board, size: usize) -> BB {
    let mut origins = BB::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            if evaluate(board, x, y, size).any() {
                let _ = origins.set(x as usize, y as usize);
            }
        }
    }
    origins
}

/// Where a placement session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    /// Waiting for the origin of the next ship.
    AwaitingOrigin,
    /// Both orientations fit at `origin`; waiting for the cell to its right
    /// or below it.
    AwaitingOrientation { origin: Coord },
    /// All ships placed; finalize or reset.
    FleetComplete,
}

/// Result of an accepted placement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStep {
    /// Pick the cell right of (horizontal) or below (vertical) `origin`.
    ChooseOrientation { origin: Coord },
    /// `ship` was committed; `next` is the following ship to place.
    Placed { ship: Ship, next: ShipKind },
    /// `ship` was the last of the fleet.
    FleetComplete { ship: Ship },
}

/// Builds one player's fleet ship by ship.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    player: PlayerId,
    name: String,
    board: Board,
    fleet: Fleet,
    placed: usize,
    state: PlacementState,
}

impl PlacementSession {
    /// Start placing the fleet of `player`.
    pub fn begin(player: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player,
            name: name.into(),
            board: Board::new(),
            fleet: Fleet::new(),
            placed: 0,
            state: PlacementState::AwaitingOrigin,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
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

    /// Number of ships committed so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.placed == FLEET_SIZE
    }

    /// The ship the session is currently placing.
    pub fn next_ship(&self) -> Option<ShipKind> {
        PLACEMENT_ORDER.get(self.placed).copied()
    }

    /// Legal orientations for the next ship at (`x`, `y`).
    pub fn evaluate(&self, x: u8, y: u8) -> Orientations {
        match self.next_ship() {
            Some(kind) => evaluate(&self.board, x, y, kind.size()),
            None => Orientations::default(),
        }
    }

    /// Cells that are valid input in the current state.
    pub fn selectable_cells(&self) -> BB {
        match self.state {
            PlacementState::AwaitingOrigin => match self.next_ship() {
                Some(kind) => legal_origins(&self.board, kind.size()),
                None => BB::new(),
            },
            PlacementState::AwaitingOrientation { origin } => {
                let mut cells = BB::new();
                for c in [origin.right(), origin.down()].into_iter().flatten() {
                    let _ = cells.set(c.x as usize, c.y as usize);
                }
                cells
            }
            PlacementState::FleetComplete => BB::new(),
        }
    }

    /// Route a cell selection according to the current state.
    pub fn select(&mut self, x: u8, y: u8) -> Result<PlacementStep, EngineError> {
        match self.state {
            PlacementState::AwaitingOrientation { .. } => self.choose_orientation(x, y),
            _ => self.propose_origin(x, y),
        }
    }

    /// Propose (`x`, `y`) as the origin of the next ship.
    pub fn propose_origin(&mut self, x: u8, y: u8) -> Result<PlacementStep, EngineError> {
        let kind = match self.state {
            PlacementState::AwaitingOrigin => self
                .next_ship()
                .ok_or(PlacementError::FleetComplete)?,
            PlacementState::AwaitingOrientation { .. } => {
                return Err(PlacementError::UnexpectedCell.into())
            }
            PlacementState::FleetComplete => return Err(PlacementError::FleetComplete.into()),
        };
        let origin = Coord::new(x, y).ok_or(PlacementError::OutOfBounds)?;
        let orientations = evaluate(&self.board, x, y, kind.size());
        if orientations.both() {
            self.state = PlacementState::AwaitingOrientation { origin };
            return Ok(PlacementStep::ChooseOrientation { origin });
        }
        match orientations.single() {
            Some(orientation) => self.commit(kind, origin, orientation),
            None => Err(rejection(&self.board, x, y, kind.size()).into()),
        }
    }

    /// Pick the orientation of a pending ship by selecting the cell right of
    /// its origin (horizontal) or below it (vertical).
    pub fn choose_orientation(&mut self, x: u8, y: u8) -> Result<PlacementStep, EngineError> {
        let PlacementState::AwaitingOrientation { origin } = self.state else {
            return Err(PlacementError::UnexpectedCell.into());
        };
        let kind = self.next_ship().ok_or(PlacementError::FleetComplete)?;
        let picked = Coord::new(x, y);
        let orientation = if picked.is_some() && picked == origin.right() {
            Orientation::Horizontal
        } else if picked.is_some() && picked == origin.down() {
            Orientation::Vertical
        } else {
            return Err(PlacementError::UnexpectedCell.into());
        };
        self.commit(kind, origin, orientation)
    }

    /// Clear the board and restart from the first ship.
    pub fn reset(&mut self) {
        self.board.clear();
        self.fleet.clear();
        self.placed = 0;
        self.state = PlacementState::AwaitingOrigin;
    }

    /// Produce the finished player.
    pub fn finalize(&self) -> Result<Player, EngineError> {
        if !self.is_complete() {
            return Err(EngineError::IncompleteFleet {
                placed: self.placed,
            });
        }
        Ok(Player::new(
            self.player,
            self.name.clone(),
            self.board,
            self.fleet.clone(),
        ))
    }

    /// Place every remaining ship at random legal positions.
    ///
    /// A pending orientation choice is dropped. Ships already committed stay
    /// where they are; if the remaining ships cannot be fitted around them
    /// the session is left unchanged and `NoRoom` is returned.
    pub fn place_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(PlacementError::FleetComplete.into());
        }
        let snapshot = self.clone();
        self.state = PlacementState::AwaitingOrigin;
        for _ in 0..RANDOM_RESTARTS {
            if self.fill_randomly(rng) {
                return Ok(());
            }
            *self = snapshot.clone();
            self.state = PlacementState::AwaitingOrigin;
        }
        *self = snapshot;
        Err(PlacementError::NoRoom.into())
    }

    fn fill_randomly<R: Rng>(&mut self, rng: &mut R) -> bool {
        while let Some(kind) = self.next_ship() {
            let mut candidates = Vec::new();
            for y in 0..BOARD_SIZE {
                for x in 0..BOARD_SIZE {
                    let fits = evaluate(&self.board, x, y, kind.size());
                    if fits.horizontal_ok {
                        candidates.push((x, y, Orientation::Horizontal));
                    }
                    if fits.vertical_ok {
                        candidates.push((x, y, Orientation::Vertical));
                    }
                }
            }
            if candidates.is_empty() {
                return false;
            }
            let (x, y, orientation) = candidates[rng.random_range(0..candidates.len())];
            if self.commit(kind, Coord { x, y }, orientation).is_err() {
                return false;
            }
        }
        true
    }

    fn commit(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<PlacementStep, EngineError> {
        check(&self.board, origin.x, origin.y, kind.size(), orientation)?;
        let ship = Ship::new(kind, orientation, origin)?;
        self.board.mark_ship(ship.mask());
        self.fleet.entry(kind).or_default().push(ship);
        self.placed += 1;
        log::debug!(
            "{} placed {} at {} ({:?})",
            self.name,
            kind,
            origin,
            orientation
        );
        match self.next_ship() {
            Some(next) => {
                self.state = PlacementState::AwaitingOrigin;
                Ok(PlacementStep::Placed { ship, next })
            }
            None => {
                self.state = PlacementState::FleetComplete;
                Ok(PlacementStep::FleetComplete { ship })
            }
        }
    }
}
