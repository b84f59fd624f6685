//! Defines the types that make up the grid. These are shared between the board's setup
//! and playing versions.

use std::ops::{Index, IndexMut};

use crate::{
    board::{
        coordinate::{project, ShapeProjection},
        CannotPlaceReason, Coordinate, Orientation, BOARD_SIZE,
    },
    ships::ShipId,
};

/// Classification of a single cell as seen by a renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Nothing here and nothing fired here yet.
    Empty,
    /// An unhit part of a ship.
    Ship,
    /// A part of a ship that has been shot.
    Hit,
    /// A shot that landed in open water.
    Miss,
}

impl CellState {
    /// The state as shown to a player who may or may not see the ships on this board.
    /// Unhit ship cells are reported as [`CellState::Empty`] when `reveal_ships` is false.
    pub fn visible(self, reveal_ships: bool) -> Self {
        match self {
            CellState::Ship if !reveal_ships => CellState::Empty,
            other => other,
        }
    }

    /// Whether a shot has already been resolved on this cell.
    pub fn is_targeted(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// A single cell in the player's grid.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(super) struct GridCell {
    /// The ID of the ship that occupies this cell, if any.
    pub(super) ship: Option<ShipId>,

    /// Whether this cell has been shot previously or not.
    pub(super) shot: bool,
}

impl GridCell {
    pub(super) fn state(&self) -> CellState {
        match (self.ship, self.shot) {
            (Some(_), true) => CellState::Hit,
            (Some(_), false) => CellState::Ship,
            (None, true) => CellState::Miss,
            (None, false) => CellState::Empty,
        }
    }
}

/// Grid structure shared between [`BoardSetup`][crate::board::BoardSetup] and
/// [`Board`][crate::board::Board].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(super) struct Grid {
    /// Cells in row-major order.
    cells: Box<[GridCell]>,
}

impl Grid {
    pub(super) fn new() -> Self {
        let cells = (0..BOARD_SIZE * BOARD_SIZE)
            .map(|_| Default::default())
            .collect();
        Self { cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: &Coordinate) -> Option<&GridCell> {
        coord.try_linearize().and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: &Coordinate) -> Option<&mut GridCell> {
        coord
            .try_linearize()
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Whether a ship sits on the cell, regardless of whether it has been hit.
    fn occupied(&self, coord: &Coordinate) -> bool {
        self.get(coord).map_or(false, |cell| cell.ship.is_some())
    }

    /// Compute the cells a ship would cover, rejecting any placement that leaves the
    /// board, lands on a ship, or touches a ship along an edge or a corner.
    pub(super) fn check_placement(
        &self,
        start: Coordinate,
        size: usize,
        orientation: Orientation,
    ) -> Result<ShapeProjection, CannotPlaceReason> {
        if size == 0 {
            return Err(CannotPlaceReason::InvalidSize);
        }
        let proj = project(start, size, orientation).ok_or(CannotPlaceReason::OutOfBounds)?;
        for coord in proj.iter() {
            if self.occupied(coord) || coord.neighbors().any(|n| self.occupied(&n)) {
                return Err(CannotPlaceReason::OverlapOrAdjacency);
            }
        }
        Ok(proj)
    }

    /// Iterate rows of cell states, top to bottom.
    pub(super) fn rows(&self) -> impl '_ + Iterator<Item = impl '_ + Iterator<Item = CellState>> {
        self.cells
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(GridCell::state))
    }
}

impl Index<&Coordinate> for Grid {
    type Output = GridCell;

    fn index(&self, coord: &Coordinate) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl IndexMut<&Coordinate> for Grid {
    fn index_mut(&mut self, coord: &Coordinate) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_state_follows_ship_and_shot() {
        let mut cell = GridCell::default();
        assert_eq!(cell.state(), CellState::Empty);
        cell.shot = true;
        assert_eq!(cell.state(), CellState::Miss);
        cell.ship = Some(ShipId::new(0));
        assert_eq!(cell.state(), CellState::Hit);
        cell.shot = false;
        assert_eq!(cell.state(), CellState::Ship);
    }

    #[test]
    fn hidden_ships_render_as_empty() {
        assert_eq!(CellState::Ship.visible(false), CellState::Empty);
        assert_eq!(CellState::Ship.visible(true), CellState::Ship);
        assert_eq!(CellState::Hit.visible(false), CellState::Hit);
        assert_eq!(CellState::Miss.visible(false), CellState::Miss);
    }

    #[test]
    fn rows_cover_the_whole_board() {
        let grid = Grid::new();
        let rows: Vec<Vec<_>> = grid.rows().map(|row| row.collect()).collect();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert!(rows
            .iter()
            .all(|row| row.len() == BOARD_SIZE && row.iter().all(|&c| c == CellState::Empty)));
    }

    #[test]
    fn zero_sized_ship_is_rejected() {
        let grid = Grid::new();
        assert_eq!(
            grid.check_placement(Coordinate::new(0, 0), 0, Orientation::Vertical),
            Err(CannotPlaceReason::InvalidSize)
        );
    }
}
