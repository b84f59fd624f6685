//! Random generation helpers, available with the `rng_gen` feature.
use log::debug;
use rand::{
    distributions::{Distribution, Standard},
    seq::SliceRandom,
    Rng,
};

use crate::{
    board::{BoardSetup, Coordinate, Orientation, BOARD_SIZE},
    game::Player,
    ships::ShipId,
};

/// Number of times [`BoardSetup::place_all_random`] starts over from an empty board before
/// giving up.
const MAX_RESTARTS: usize = 64;

static ORIENTATIONS: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl Distribution<Player> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Player {
        if rng.gen() {
            Player::P1
        } else {
            Player::P2
        }
    }
}

impl BoardSetup {
    /// Place the next pending fleet entry at a position chosen uniformly among all valid
    /// placements. Returns `None` if nothing is pending or the entry fits nowhere.
    pub fn place_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ShipId> {
        let size = self.next_pending()?.1.size();
        let candidates: Vec<_> = (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| Coordinate::new(x, y)))
            .flat_map(|start| {
                ORIENTATIONS
                    .iter()
                    .map(move |&orientation| (start, orientation))
            })
            .filter(|&(start, orientation)| self.can_place(start, size, orientation))
            .collect();
        let &(start, orientation) = candidates.choose(rng)?;
        self.place_next(start, orientation).ok()
    }

    /// Randomly place every pending fleet entry. Placements made before the call are kept
    /// on the first attempt; if the remaining ships do not fit, the board is cleared and
    /// the whole fleet is placed again, a bounded number of times. Returns whether the
    /// board ended up ready.
    pub fn place_all_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        for attempt in 0..=MAX_RESTARTS {
            if attempt > 0 {
                debug!("random placement stuck, restarting (attempt {})", attempt);
                self.clear();
            }
            while self.next_pending().is_some() {
                if self.place_random(rng).is_none() {
                    break;
                }
            }
            if self.ready() {
                return true;
            }
        }
        false
    }
}
