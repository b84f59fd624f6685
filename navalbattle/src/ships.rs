// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Types used for defining ships, fleets and per-ship damage.
use std::{fmt, iter::FromIterator, slice};

use crate::board::{Coordinate, ShapeProjection};

/// Identifies a ship within a single player's board. The ID is the index of the ship's
/// entry in the [`Fleet`] the board was set up with, so it is stable for the whole game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(usize);

impl ShipId {
    pub(crate) fn new(index: usize) -> Self {
        ShipId(index)
    }

    /// Position of the ship's entry in the fleet.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entry of a fleet: a category name and the number of cells a ship of that kind
/// covers. Names are labels and need not be unique.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSpec {
    name: String,
    size: usize,
}

impl ShipSpec {
    /// Construct a ship spec with the specified name and size. Panics if size is 0.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        assert!(size > 0, "ship size must be positive");
        Self {
            name: name.into(),
            size,
        }
    }

    /// Construct a ship spec, returning `None` if size is 0.
    pub fn try_new(name: impl Into<String>, size: usize) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(Self::new(name, size))
        }
    }

    /// Get the name of this kind of ship.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of cells this kind of ship covers.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Ordered list of ships every player must place before the game starts.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet(Vec<ShipSpec>);

impl Fleet {
    /// The standard fleet: four one-masters, three two-masters, two three-masters and a
    /// single four-master.
    pub fn standard() -> Self {
        const LAYOUT: [(&str, usize, usize); 4] = [
            ("one-master", 1, 4),
            ("two-master", 2, 3),
            ("three-master", 3, 2),
            ("four-master", 4, 1),
        ];
        LAYOUT
            .iter()
            .flat_map(|&(name, size, count)| (0..count).map(move |_| ShipSpec::new(name, size)))
            .collect()
    }

    /// Number of ships in the fleet.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the fleet has no ships.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of cells covered by the whole fleet.
    pub fn total_cells(&self) -> usize {
        self.0.iter().map(ShipSpec::size).sum()
    }

    /// Get the entry at the given position.
    pub fn get(&self, index: usize) -> Option<&ShipSpec> {
        self.0.get(index)
    }

    /// Iterate the fleet in order.
    pub fn iter(&self) -> slice::Iter<'_, ShipSpec> {
        self.0.iter()
    }
}

impl FromIterator<ShipSpec> for Fleet {
    fn from_iter<T: IntoIterator<Item = ShipSpec>>(iter: T) -> Self {
        Fleet(iter.into_iter().collect())
    }
}

impl From<Vec<ShipSpec>> for Fleet {
    fn from(ships: Vec<ShipSpec>) -> Self {
        Fleet(ships)
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a ShipSpec;
    type IntoIter = slice::Iter<'a, ShipSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A ship placed on a board, with the cells it covers and the damage it has taken.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    spec: ShipSpec,
    coords: ShapeProjection,
    hits: usize,
}

impl Ship {
    /// Build an undamaged ship. `coords` must hold exactly `spec.size()` cells.
    pub(crate) fn new(id: ShipId, spec: ShipSpec, coords: ShapeProjection) -> Self {
        debug_assert_eq!(coords.len(), spec.size());
        Self {
            id,
            spec,
            coords,
            hits: 0,
        }
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Get the fleet entry this ship was built from.
    pub fn spec(&self) -> &ShipSpec {
        &self.spec
    }

    /// Get the name of the ship.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Get the number of cells the ship covers.
    pub fn size(&self) -> usize {
        self.spec.size()
    }

    /// Get the cells covered by this ship, from its starting cell onwards.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Returns true if the ship covers the given cell.
    pub fn occupies(&self, coord: &Coordinate) -> bool {
        self.coords.contains(coord)
    }

    /// Number of hits the ship has taken.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if this ship has been sunk.
    pub fn is_sunk(&self) -> bool {
        self.hits == self.size()
    }

    /// Record one hit on this ship. The board only calls this once per covered cell, so
    /// the count never passes the ship's size.
    pub(crate) fn register_hit(&mut self) {
        debug_assert!(self.hits < self.size(), "{} hit after sinking", self.name());
        self.hits = (self.hits + 1).min(self.size());
    }
}
