//! Coordinates on the fixed-size square grid and the shapes ships project onto it.
use std::fmt;

/// Number of rows and columns of every board.
pub const BOARD_SIZE: usize = 10;

/// The coordinates of a cell in the board. `x` selects the row and `y` the column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Row of the cell.
    pub x: usize,
    /// Column of the cell.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns true if both components lie in `[0, BOARD_SIZE)`.
    pub fn is_valid(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Linear index of this coordinate in row-major order, or `None` if it is out of
    /// bounds.
    pub(crate) fn try_linearize(&self) -> Option<usize> {
        if self.is_valid() {
            Some(self.x * BOARD_SIZE + self.y)
        } else {
            None
        }
    }

    /// Coordinate `offset` cells further along `orientation`, if it stays on the board.
    pub fn step(&self, orientation: Orientation, offset: usize) -> Option<Self> {
        let next = match orientation {
            Orientation::Horizontal => Self::new(self.x, self.y.checked_add(offset)?),
            Orientation::Vertical => Self::new(self.x.checked_add(offset)?, self.y),
        };
        if next.is_valid() {
            Some(next)
        } else {
            None
        }
    }

    /// Iterate the in-bounds cells within Chebyshev distance 1 of this coordinate,
    /// diagonals included. The coordinate itself is not yielded.
    pub fn neighbors(&self) -> Neighbors {
        Neighbors {
            coord: *self,
            // Out of bounds coordinates have no neighbors worth reporting.
            next: if self.is_valid() { 0 } else { OFFSETS.len() },
        }
    }

    /// Returns true if `other` is one of the eight cells surrounding this one.
    pub fn is_neighbor(&self, other: &Coordinate) -> bool {
        let dx = self.x.max(other.x) - self.x.min(other.x);
        let dy = self.y.max(other.y) - self.y.min(other.y);
        self != other && dx <= 1 && dy <= 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

/// Direction a ship extends in from its starting cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Along the row, increasing `y`.
    Horizontal,
    /// Along the column, increasing `x`.
    Vertical,
}

/// Cells occupied by a ship, in order from its starting cell.
pub type ShapeProjection = Vec<Coordinate>;

/// Project a straight ship of `size` cells from `start` along `orientation`. Returns
/// `None` if any of the cells would fall off the board.
pub fn project(start: Coordinate, size: usize, orientation: Orientation) -> Option<ShapeProjection> {
    (0..size).map(|i| start.step(orientation, i)).collect()
}

/// Row/column deltas of the eight surrounding cells.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterator over the neighbors of a coordinate, see [`Coordinate::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    coord: Coordinate,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&(dx, dy)) = OFFSETS.get(self.next) {
            self.next += 1;
            let x = self.coord.x as isize + dx;
            let y = self.coord.y as isize + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let neighbor = Coordinate::new(x as usize, y as usize);
            if neighbor.is_valid() {
                return Some(neighbor);
            }
        }
        None
    }
}
