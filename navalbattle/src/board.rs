//! Types that make up the game board.

use log::debug;

use crate::ships::{Ship, ShipId};

use self::grid::Grid;
pub use self::{
    coordinate::{project, Coordinate, Neighbors, Orientation, ShapeProjection, BOARD_SIZE},
    errors::{CannotPlaceReason, CannotShootReason, PlaceError, ShotError},
    grid::CellState,
    setup::BoardSetup,
};

mod coordinate;
mod errors;
mod grid;
pub mod setup;

/// Result of a shot on a single player's board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the ship with the given ID, but did not sink it.
    Hit(ShipId),
    /// The shot hit the ship with the given ID and sank it.
    Sunk(ShipId),
}

impl ShotOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) => Some(id),
        }
    }

    /// Whether the shot struck a ship. A hit lets the shooter fire again.
    pub fn is_hit(&self) -> bool {
        self.ship().is_some()
    }
}

/// Represents a single player's board in play, including their ships and their side of
/// the ocean. Only obtainable by finishing a [`BoardSetup`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    /// Grid of cells occupied by ships.
    grid: Grid,

    /// All ships on the board, indexed by [`ShipId`].
    ships: Vec<Ship>,
}

impl Board {
    /// Returns true if the coordinate lies on the board.
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.is_valid()
    }

    /// Returns true if all of this player's ships have been sunk. Vacuously true for a
    /// board without ships.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Get an iterator over all ships on this board.
    pub fn iter_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Get the ship with the specified ID if it exists.
    pub fn get_ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    /// Get the ship covering the given cell, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.grid
            .get(&coord)
            .and_then(|cell| cell.ship)
            .and_then(|id| self.get_ship(id))
    }

    /// Get the state of the cell at the given coordinate, or `None` if it is out of
    /// bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid.get(&coord).map(|cell| cell.state())
    }

    /// Get an iterator over the board's rows as seen by a player. Ships that have not been
    /// hit are only shown when `reveal_ships` is set.
    pub fn rows(
        &self,
        reveal_ships: bool,
    ) -> impl '_ + Iterator<Item = impl '_ + Iterator<Item = CellState>> {
        self.grid
            .rows()
            .map(move |row| row.map(move |cell| cell.visible(reveal_ships)))
    }

    /// Check whether a ship of the given size would fit at the given position under the
    /// placement rules. Purely a query, ships cannot be added once play has begun.
    pub fn check_placement(
        &self,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), CannotPlaceReason> {
        self.grid
            .check_placement(start, size, orientation)
            .map(|_| ())
    }

    /// Returns true if a ship of the given size would fit at the given position.
    pub fn can_place(&self, start: Coordinate, size: usize, orientation: Orientation) -> bool {
        self.check_placement(start, size, orientation).is_ok()
    }

    /// Fire a shot at this board, returning a result indicating why the shot was aborted
    /// or what it struck. Rejected shots leave the board unchanged.
    pub fn shoot(&mut self, coord: Coordinate) -> Result<ShotOutcome, ShotError> {
        let hit_ship = match self.grid.get_mut(&coord) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
            Some(cell) if cell.shot => {
                return Err(ShotError::new(CannotShootReason::AlreadyTargeted, coord))
            }
            Some(cell) => {
                cell.shot = true;
                cell.ship
            }
        };
        let outcome = match hit_ship.and_then(|id| self.ships.get_mut(id.index())) {
            None => ShotOutcome::Miss,
            Some(ship) => {
                ship.register_hit();
                if ship.is_sunk() {
                    ShotOutcome::Sunk(ship.id())
                } else {
                    ShotOutcome::Hit(ship.id())
                }
            }
        };
        debug!("shot at {}: {:?}", coord, outcome);
        Ok(outcome)
    }
}
