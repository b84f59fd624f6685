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

//! Engine for a two-player naval battle game.
//!
//! Each player owns a 10x10 [`board`] and places a [`ships::Fleet`] of straight ships on
//! it. Ships may neither overlap nor touch, not even diagonally. Once both players are
//! done, they take turns firing at each other's board. A player keeps firing as long as
//! they hit something; the turn passes on a miss. The first player to sink the whole
//! opposing fleet wins.
//!
//! ```
//! use navalbattle::{Coordinate, Fleet, GameSetup, Orientation, ShipSpec, ShotOutcome};
//!
//! let fleet: Fleet = vec![ShipSpec::new("one-master", 1)].into();
//! let mut setup = GameSetup::new(fleet);
//! for _ in 0..2 {
//!     let board = setup.board_mut().unwrap();
//!     board.place_next(Coordinate::new(0, 0), Orientation::Horizontal).unwrap();
//!     setup.complete_player().unwrap();
//! }
//! let mut game = setup.start().unwrap();
//! assert!(matches!(game.shoot(Coordinate::new(0, 0)), Ok(ShotOutcome::Victory(_))));
//! ```

pub mod board;
pub mod game;
#[cfg(feature = "rng_gen")]
mod rng;
pub mod ships;

pub use crate::{
    board::{Board, BoardSetup, CellState, Coordinate, Orientation, BOARD_SIZE},
    game::{Game, GameSetup, Phase, Player, ShotOutcome},
    ships::{Fleet, Ship, ShipId, ShipSpec},
};
