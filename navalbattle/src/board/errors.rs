//! Errors used by the `Board` and `BoardSetup`.

use thiserror::Error;

use crate::board::{Coordinate, Orientation};

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// At least one cell of the ship would fall outside the board.
    #[error("the ship does not fit on the board at that position")]
    OutOfBounds,
    /// A cell of the ship is occupied by, or touches (diagonals included), another ship.
    #[error("the ship would overlap or touch another ship")]
    OverlapOrAdjacency,
    /// Ships must cover at least one cell.
    #[error("ship size must be positive")]
    InvalidSize,
    /// The fleet has no unplaced entry matching the ship.
    #[error("no unplaced ship of that kind remains in the fleet")]
    NotInFleet,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place ship at {start}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    start: Coordinate,
    orientation: Orientation,
}

impl PlaceError {
    /// Construct a placement error from a reason and the rejected placement.
    pub(crate) fn new(reason: CannotPlaceReason, start: Coordinate, orientation: Orientation) -> Self {
        Self {
            reason,
            start,
            orientation,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the cell where placement was attempted.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Get the orientation placement was attempted with.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Reason why a particular cell could not be shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the board.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// A shot has already been fired at that cell.
    #[error("the target cell was already shot")]
    AlreadyTargeted,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not shoot cell {coord}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(crate) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}
