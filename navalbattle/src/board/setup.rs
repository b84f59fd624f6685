//! Implements the setup phase of the board.
use log::debug;

use crate::{
    board::{Board, CannotPlaceReason, CellState, Coordinate, Grid, Orientation, PlaceError},
    ships::{Fleet, Ship, ShipId, ShipSpec},
};

/// Setup phase for a [`Board`]. Allows placing ships and does not allow shooting.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    /// Grid for placement of ships.
    grid: Grid,

    /// Ships that must be placed before the board can be played.
    fleet: Fleet,

    /// Placed ship for each fleet entry, indexed like `fleet`.
    ships: Vec<Option<Ship>>,
}

impl BoardSetup {
    /// Begin setup by constructing an empty board that expects the given fleet.
    pub fn new(fleet: Fleet) -> Self {
        let ships = vec![None; fleet.len()];
        Self {
            grid: Grid::new(),
            fleet,
            ships,
        }
    }

    /// Get the fleet this board is being set up with.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Checks if this board is ready to start. Returns `true` if the fleet has at least
    /// one ship and all ships are placed.
    pub fn ready(&self) -> bool {
        !self.fleet.is_empty() && self.ships.iter().all(Option::is_some)
    }

    /// Get an iterator over the IDs and specs of ships which still need to be placed, in
    /// fleet order.
    pub fn pending_ships(&self) -> impl Iterator<Item = (ShipId, &ShipSpec)> {
        self.fleet
            .iter()
            .zip(self.ships.iter())
            .enumerate()
            .filter_map(|(i, (spec, ship))| match ship {
                Some(_) => None,
                None => Some((ShipId::new(i), spec)),
            })
    }

    /// The first fleet entry that still needs to be placed.
    pub fn next_pending(&self) -> Option<(ShipId, &ShipSpec)> {
        self.pending_ships().next()
    }

    /// Get an iterator over the ships placed so far.
    pub fn iter_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    /// Returns true if the coordinate lies on the board.
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.is_valid()
    }

    /// Get the state of the cell at the given coordinate, or `None` if it is out of
    /// bounds. No cell is ever shot during setup.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid.get(&coord).map(|cell| cell.state())
    }

    /// Get an iterator over the board's rows. The iterator's item is another iterator that
    /// iterates over a single row.
    pub fn rows(&self) -> impl '_ + Iterator<Item = impl '_ + Iterator<Item = CellState>> {
        self.grid.rows()
    }

    /// Check if a ship of the given size could be placed, without placing it.
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

    /// Returns true if a ship of the given size could be placed.
    pub fn can_place(&self, start: Coordinate, size: usize, orientation: Orientation) -> bool {
        self.check_placement(start, size, orientation).is_ok()
    }

    /// Place a ship of the given kind. The ship fills the first unplaced fleet entry equal
    /// to `spec`. Nothing changes if placement fails.
    pub fn place(
        &mut self,
        start: Coordinate,
        spec: &ShipSpec,
        orientation: Orientation,
    ) -> Result<ShipId, PlaceError> {
        let id = self
            .pending_ships()
            .find(|(_, pending)| *pending == spec)
            .map(|(id, _)| id)
            .ok_or_else(|| PlaceError::new(CannotPlaceReason::NotInFleet, start, orientation))?;
        self.place_entry(id, start, orientation)
    }

    /// Place the first fleet entry that has not been placed yet.
    pub fn place_next(
        &mut self,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlaceError> {
        let id = self
            .next_pending()
            .map(|(id, _)| id)
            .ok_or_else(|| PlaceError::new(CannotPlaceReason::NotInFleet, start, orientation))?;
        self.place_entry(id, start, orientation)
    }

    /// Validate and place the unplaced fleet entry `id`.
    fn place_entry(
        &mut self,
        id: ShipId,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlaceError> {
        let spec = self.fleet.get(id.index()).cloned().ok_or_else(|| {
            PlaceError::new(CannotPlaceReason::NotInFleet, start, orientation)
        })?;
        let proj = self
            .grid
            .check_placement(start, spec.size(), orientation)
            .map_err(|reason| {
                debug!("rejected {} at {} {:?}: {}", spec.name(), start, orientation, reason);
                PlaceError::new(reason, start, orientation)
            })?;
        // Already ensured that every position is valid and free.
        for coord in proj.iter() {
            self.grid[coord].ship = Some(id);
        }
        debug!("placed {} {} at {} {:?}", spec.name(), id, start, orientation);
        self.ships[id.index()] = Some(Ship::new(id, spec, proj));
        Ok(id)
    }

    /// Clear the placement of the specified ship, returning it to the pending list.
    /// Returns the removed ship, or `None` if it was not placed.
    pub fn unplace(&mut self, id: ShipId) -> Option<Ship> {
        let ship = self.ships.get_mut(id.index())?.take()?;
        for coord in ship.coords() {
            self.grid[coord].ship = None;
        }
        debug!("unplaced {} {}", ship.name(), id);
        Some(ship)
    }

    /// Remove every placement, leaving the whole fleet pending.
    pub fn clear(&mut self) {
        self.grid = Grid::new();
        for ship in self.ships.iter_mut() {
            *ship = None;
        }
    }

    /// Tries to finish setup. If all ships are placed, returns a [`Board`] with the
    /// current placements. Otherwise returns self.
    pub fn start(self) -> Result<Board, Self> {
        if !self.ready() {
            return Err(self);
        }
        Ok(Board {
            grid: self.grid,
            ships: self.ships.into_iter().flatten().collect(),
        })
    }
}
