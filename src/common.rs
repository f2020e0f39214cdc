//! Common types for Battleships: cell states, shot outcomes and engine errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Open water, never fired upon.
    Water,
    /// Unhit part of a placed ship.
    ShipPart,
    /// Ship part that has been shot.
    Hit,
    /// Water that has been shot.
    Miss,
}

/// Result of a shot resolved against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Hit,
    Miss,
}

/// Why a placement was refused.
///
/// Variants are ordered from the most to the least specific so that the
/// smaller of two reasons is the one worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlacementError {
    /// A footprint cell already holds a ship part.
    Overlap,
    /// A footprint cell shares an edge with another ship.
    Adjacent,
    /// The footprint leaves the board.
    OutOfBounds,
    /// The cell is not a valid input in the current placement state.
    UnexpectedCell,
    /// Every ship of the fleet has already been placed.
    FleetComplete,
    /// No legal position is left for the remaining ships.
    NoRoom,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Overlap => write!(f, "ship would overlap another ship"),
            PlacementError::Adjacent => write!(f, "ship would touch another ship"),
            PlacementError::OutOfBounds => write!(f, "ship would leave the board"),
            PlacementError::UnexpectedCell => {
                write!(f, "cell is not selectable while placing this ship")
            }
            PlacementError::FleetComplete => write!(f, "all ships are already placed"),
            PlacementError::NoRoom => write!(f, "no room left for the remaining ships"),
        }
    }
}

/// Errors returned by placement sessions, boards and matches.
///
/// Every error is recoverable; a rejected command leaves all state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Placement refused for the given reason.
    InvalidPlacement(PlacementError),
    /// The target cell was already fired upon.
    CellAlreadyResolved,
    /// A shot came from the player who does not hold the turn.
    NotYourTurn,
    /// The match has not started yet or is already over.
    MatchNotInProgress,
    /// `start` was called on a match that is not in its initial phase.
    AlreadyStarted,
    /// The fleet cannot be finalized before all ships are placed.
    IncompleteFleet { placed: usize },
    /// Both players share a name.
    DuplicateName,
    /// A player was seated in the slot belonging to the other identity.
    WrongSeat,
    /// A shot coordinate lies off the board.
    OutOfBounds { x: u8, y: u8 },
    /// Board and fleet disagree about the ship at a cell. Placement keeps
    /// both in step, so this only surfaces for a corrupted player.
    UnknownShip { x: u8, y: u8 },
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
}

impl From<BitBoardError> for EngineError {
    fn from(err: BitBoardError) -> Self {
        EngineError::BitBoard(err)
    }
}

impl From<PlacementError> for EngineError {
    fn from(err: PlacementError) -> Self {
        EngineError::InvalidPlacement(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidPlacement(reason) => write!(f, "Invalid placement: {}", reason),
            EngineError::CellAlreadyResolved => write!(f, "That cell has already been fired upon"),
            EngineError::NotYourTurn => write!(f, "It is not your turn"),
            EngineError::MatchNotInProgress => write!(f, "The match is not in progress"),
            EngineError::AlreadyStarted => write!(f, "The match has already been started"),
            EngineError::IncompleteFleet { placed } => {
                write!(f, "Fleet incomplete: only {} ships placed", placed)
            }
            EngineError::DuplicateName => write!(f, "Players can't have the same name"),
            EngineError::WrongSeat => write!(f, "Player seated in the wrong slot"),
            EngineError::OutOfBounds { x, y } => {
                write!(f, "({}, {}) is off the board", x, y)
            }
            EngineError::UnknownShip { x, y } => {
                write!(f, "No ship recorded at ({}, {})", x, y)
            }
            EngineError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
