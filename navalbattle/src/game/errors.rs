use thiserror::Error;

use crate::{
    board::{self, Coordinate},
    game::Player,
};

/// Error returned when a player tries to leave setup too early.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SetupError {
    /// Some fleet entries are still unplaced.
    #[error("{player:?} still has {remaining} ship(s) to place")]
    FleetIncomplete {
        /// The player whose setup was not finished.
        player: Player,
        /// Number of fleet entries without a placement.
        remaining: usize,
    },
    /// The game was configured with a fleet that has no ships.
    #[error("the fleet has no ships")]
    EmptyFleet,
}

/// Reason why a shot in the game failed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The game is already over.
    #[error("the game is already over")]
    GameOver,

    /// The specified cell is out of bounds for the grid.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// The specified cell has already been shot.
    #[error("the target cell was already shot")]
    AlreadyTargeted,
}

impl From<board::CannotShootReason> for CannotShootReason {
    fn from(reason: board::CannotShootReason) -> Self {
        match reason {
            board::CannotShootReason::OutOfBounds => CannotShootReason::OutOfBounds,
            board::CannotShootReason::AlreadyTargeted => CannotShootReason::AlreadyTargeted,
        }
    }
}

/// Error returned when a shot was not taken. The turn stays with the same player.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("{player:?} could not shoot cell {coord}: {reason}")]
pub struct ShotError {
    reason: CannotShootReason,
    player: Player,
    coord: Coordinate,
}

impl ShotError {
    pub(super) fn new(reason: CannotShootReason, player: Player, coord: Coordinate) -> Self {
        Self {
            reason,
            player,
            coord,
        }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the player who tried to shoot.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Get the targeted coordinate.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

impl From<(Player, board::ShotError)> for ShotError {
    fn from((player, err): (Player, board::ShotError)) -> Self {
        Self::new(err.reason().into(), player, err.coord())
    }
}
