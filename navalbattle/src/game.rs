//! Implementation of the match as a whole: two players set up their boards one after the
//! other, then take turns firing at each other until one fleet is gone.
//!
//! [`GameSetup`] covers the setup phase and only hands out mutable access to the board of
//! the player currently placing ships. [`Game`] is obtained from it once both fleets are
//! complete and covers the playing and finished phases.
use enumflags2::BitFlags;
use log::{debug, info};

use crate::{
    board::{self, Board, BoardSetup, Coordinate},
    ships::{Fleet, ShipId},
};

pub use self::errors::{CannotShootReason, SetupError, ShotError};

mod errors;

/// Player ID. Either `P1` or `P2`.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Player {
    P1 = 0b01,
    P2 = 0b10,
}

impl Player {
    /// Both players, in seating order.
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Position of this player's board in per-player storage.
    fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

/// Where a match stands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// The given player is placing ships.
    Setup(Player),
    /// The given player is firing.
    Playing(Player),
    /// The given player sank the opposing fleet.
    Finished(Player),
}

impl Phase {
    /// Compute the phase that follows a resolved shot by the active player. A hit keeps
    /// the turn, a miss passes it, and sinking the defender's last ship ends the match.
    /// Phases other than [`Phase::Playing`] are returned unchanged.
    pub fn after_shot(self, outcome: &board::ShotOutcome, defender_defeated: bool) -> Phase {
        match self {
            Phase::Playing(attacker) if defender_defeated => Phase::Finished(attacker),
            Phase::Playing(attacker) if outcome.is_hit() => Phase::Playing(attacker),
            Phase::Playing(attacker) => Phase::Playing(attacker.opponent()),
            other => other,
        }
    }
}

/// Struct used to set up a game. Acts as a builder for [`Game`].
#[derive(Debug, Clone)]
pub struct GameSetup {
    /// Setup boards indexed by player.
    boards: [BoardSetup; 2],

    /// Player who set up first. They also fire first.
    first: Player,

    /// Player currently placing ships.
    current: Player,

    /// Players that have completed their setup.
    ready: BitFlags<Player>,
}

impl GameSetup {
    /// Create a [`GameSetup`] where both players must place the given fleet. `P1` sets up
    /// and fires first.
    pub fn new(fleet: Fleet) -> Self {
        Self::with_first_player(fleet, Player::P1)
    }

    /// Create a [`GameSetup`] where `first` sets up and fires first.
    pub fn with_first_player(fleet: Fleet, first: Player) -> Self {
        Self {
            boards: [BoardSetup::new(fleet.clone()), BoardSetup::new(fleet)],
            first,
            current: first,
            ready: BitFlags::empty(),
        }
    }

    /// Current phase. Always [`Phase::Setup`] for the player placing ships, or for the
    /// last player to finish once everyone is ready.
    pub fn phase(&self) -> Phase {
        Phase::Setup(self.current)
    }

    /// Get the player currently placing ships.
    pub fn current(&self) -> Player {
        self.current
    }

    /// Get the player who will fire first.
    pub fn first_player(&self) -> Player {
        self.first
    }

    /// Get the setup board of the specified player.
    pub fn board(&self, player: Player) -> &BoardSetup {
        &self.boards[player.index()]
    }

    /// Mutably get the setup board of the player currently placing ships. Returns `None`
    /// once that player has completed setup.
    pub fn board_mut(&mut self) -> Option<&mut BoardSetup> {
        if self.ready.contains(self.current) {
            None
        } else {
            Some(&mut self.boards[self.current.index()])
        }
    }

    /// Check if the specified player has completed setup.
    pub fn is_player_ready(&self, player: Player) -> bool {
        self.ready.contains(player)
    }

    /// Return true if both players have completed setup.
    pub fn ready(&self) -> bool {
        self.ready == BitFlags::all()
    }

    /// Finish setup for the current player and hand setup to the opponent. Returns the
    /// player who should place ships next, or `None` once both players are done. Fails
    /// if the current player still has ships to place.
    pub fn complete_player(&mut self) -> Result<Option<Player>, SetupError> {
        let player = self.current;
        if !self.ready.contains(player) {
            let board = &self.boards[player.index()];
            if board.fleet().is_empty() {
                return Err(SetupError::EmptyFleet);
            }
            let remaining = board.pending_ships().count();
            if remaining > 0 {
                return Err(SetupError::FleetIncomplete { player, remaining });
            }
            self.ready.insert(player);
            info!("{:?} completed setup", player);
        }
        let next = player.opponent();
        if self.ready.contains(next) {
            Ok(None)
        } else {
            self.current = next;
            Ok(Some(next))
        }
    }

    /// Tries to start the game. If both players are ready, returns a [`Game`], otherwise
    /// returns self.
    pub fn start(self) -> Result<Game, Self> {
        if !self.ready() || !self.boards.iter().all(BoardSetup::ready) {
            return Err(self);
        }
        let first = self.first;
        let [b1, b2] = self.boards;
        match (b1.start(), b2.start()) {
            (Ok(b1), Ok(b2)) => {
                info!("game started, {:?} fires first", first);
                Ok(Game {
                    boards: [b1, b2],
                    current: first,
                    winner: None,
                    shots: 0,
                })
            }
            // Readiness of both boards was checked above.
            _ => unreachable!(),
        }
    }
}

impl Default for GameSetup {
    /// Setup for a game with the standard fleet.
    fn default() -> Self {
        Self::new(Fleet::standard())
    }
}

/// Outcome of a successfully-fired shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Nothing was hit. The turn passes to the opponent.
    Miss,
    /// The given ship was hit but not sunk. The shooter fires again.
    Hit(ShipId),
    /// The given ship was hit and sunk, but the target still has other ships. The shooter
    /// fires again.
    Sunk(ShipId),
    /// The given ship was hit and sunk, and the target has no remaining ships.
    Victory(ShipId),
}

impl ShotOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) | ShotOutcome::Victory(id) => Some(id),
        }
    }
}

/// A match in progress or finished.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    /// Gameplay boards for the players.
    boards: [Board; 2],

    /// Player whose turn it is. Only flipped by a miss.
    current: Player,

    /// Winner, once a fleet has been sunk.
    winner: Option<Player>,

    /// Number of shots resolved so far, rejected shots excluded.
    shots: usize,
}

impl Game {
    /// Get the player whose turn it currently is.
    pub fn current(&self) -> Player {
        self.current
    }

    /// Get the winner of the game, or `None` while the game is in progress.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Current phase, [`Phase::Playing`] or [`Phase::Finished`].
    pub fn phase(&self) -> Phase {
        match self.winner {
            Some(winner) => Phase::Finished(winner),
            None => Phase::Playing(self.current),
        }
    }

    /// Get the board of the specified player.
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    /// Number of shots that landed on a fresh cell so far.
    pub fn shots_fired(&self) -> usize {
        self.shots
    }

    /// Fire at the current player's opponent on the specified coordinate. A rejected shot
    /// changes nothing and the same player must shoot again.
    pub fn shoot(&mut self, coord: Coordinate) -> Result<ShotOutcome, ShotError> {
        let attacker = match self.phase() {
            Phase::Playing(player) => player,
            _ => {
                return Err(ShotError::new(
                    CannotShootReason::GameOver,
                    self.current,
                    coord,
                ))
            }
        };
        let target = &mut self.boards[attacker.opponent().index()];
        let outcome = target.shoot(coord).map_err(|err| ShotError::from((attacker, err)))?;
        self.shots += 1;

        match Phase::Playing(attacker).after_shot(&outcome, target.all_sunk()) {
            Phase::Finished(winner) => {
                info!("{:?} wins after {} shots", winner, self.shots);
                self.winner = Some(winner);
            }
            Phase::Playing(next) => {
                if next != attacker {
                    debug!("turn passes to {:?}", next);
                }
                self.current = next;
            }
            // Never produced from a playing phase.
            Phase::Setup(_) => {}
        }

        Ok(match (outcome, self.winner) {
            (board::ShotOutcome::Sunk(id), Some(_)) => ShotOutcome::Victory(id),
            (board::ShotOutcome::Sunk(id), None) => ShotOutcome::Sunk(id),
            (board::ShotOutcome::Hit(id), _) => ShotOutcome::Hit(id),
            (board::ShotOutcome::Miss, _) => ShotOutcome::Miss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Orientation;
    use crate::ships::ShipSpec;

    fn two_ship_fleet() -> Fleet {
        vec![ShipSpec::new("two-master", 2), ShipSpec::new("one-master", 1)].into()
    }

    /// Both players put the two-master at (0,0)-(0,1) and the one-master at (5,5).
    fn started() -> Game {
        let mut setup = GameSetup::new(two_ship_fleet());
        for _ in 0..2 {
            let board = setup.board_mut().unwrap();
            board
                .place_next(Coordinate::new(0, 0), Orientation::Horizontal)
                .unwrap();
            board
                .place_next(Coordinate::new(5, 5), Orientation::Horizontal)
                .unwrap();
            setup.complete_player().unwrap();
        }
        setup.start().unwrap()
    }

    #[test]
    fn phase_transitions() {
        let hit = board::ShotOutcome::Hit(ShipId::new(0));
        let sunk = board::ShotOutcome::Sunk(ShipId::new(0));
        let miss = board::ShotOutcome::Miss;
        let playing = Phase::Playing(Player::P1);

        assert_eq!(playing.after_shot(&hit, false), playing);
        assert_eq!(playing.after_shot(&sunk, false), playing);
        assert_eq!(playing.after_shot(&miss, false), Phase::Playing(Player::P2));
        assert_eq!(playing.after_shot(&sunk, true), Phase::Finished(Player::P1));

        let finished = Phase::Finished(Player::P2);
        assert_eq!(finished.after_shot(&miss, false), finished);
        let setup = Phase::Setup(Player::P1);
        assert_eq!(setup.after_shot(&hit, false), setup);
    }

    #[test]
    fn setup_passes_between_players() {
        let mut setup = GameSetup::with_first_player(two_ship_fleet(), Player::P2);
        assert_eq!(setup.phase(), Phase::Setup(Player::P2));
        setup
            .board_mut()
            .unwrap()
            .place_next(Coordinate::new(0, 0), Orientation::Vertical)
            .unwrap();
        assert_eq!(
            setup.complete_player(),
            Err(SetupError::FleetIncomplete {
                player: Player::P2,
                remaining: 1
            })
        );
        assert_eq!(setup.phase(), Phase::Setup(Player::P2));

        setup
            .board_mut()
            .unwrap()
            .place_next(Coordinate::new(9, 9), Orientation::Vertical)
            .unwrap();
        assert_eq!(setup.complete_player(), Ok(Some(Player::P1)));
        assert!(setup.is_player_ready(Player::P2));
        assert_eq!(setup.board(Player::P1).iter_ships().count(), 0);
        assert_eq!(setup.board(Player::P2).iter_ships().count(), 2);

        let setup = setup.start().unwrap_err();
        assert!(!setup.ready());
    }

    #[test]
    fn finished_board_is_frozen() {
        let mut setup = GameSetup::new(vec![ShipSpec::new("one-master", 1)].into());
        setup
            .board_mut()
            .unwrap()
            .place_next(Coordinate::new(0, 0), Orientation::Vertical)
            .unwrap();
        setup.complete_player().unwrap();
        setup
            .board_mut()
            .unwrap()
            .place_next(Coordinate::new(0, 0), Orientation::Vertical)
            .unwrap();
        assert_eq!(setup.complete_player(), Ok(None));
        assert!(setup.board_mut().is_none());
        assert_eq!(setup.complete_player(), Ok(None));
        assert!(setup.ready());
    }

    #[test]
    fn empty_fleet_cannot_complete() {
        let mut setup = GameSetup::new(Fleet::default());
        assert_eq!(setup.complete_player(), Err(SetupError::EmptyFleet));
        assert!(setup.start().is_err());
    }

    #[test]
    fn first_player_fires_first() {
        let mut setup =
            GameSetup::with_first_player(vec![ShipSpec::new("one-master", 1)].into(), Player::P2);
        for _ in 0..2 {
            setup
                .board_mut()
                .unwrap()
                .place_next(Coordinate::new(3, 3), Orientation::Vertical)
                .unwrap();
            setup.complete_player().unwrap();
        }
        let game = setup.start().unwrap();
        assert_eq!(game.phase(), Phase::Playing(Player::P2));
    }

    #[test]
    fn hits_keep_the_turn_and_misses_pass_it() {
        let mut game = started();
        assert_eq!(game.current(), Player::P1);
        assert_eq!(
            game.shoot(Coordinate::new(0, 0)),
            Ok(ShotOutcome::Hit(ShipId::new(0)))
        );
        assert_eq!(game.current(), Player::P1);
        assert_eq!(
            game.shoot(Coordinate::new(0, 1)),
            Ok(ShotOutcome::Sunk(ShipId::new(0)))
        );
        assert_eq!(game.current(), Player::P1);
        assert_eq!(game.shoot(Coordinate::new(9, 0)), Ok(ShotOutcome::Miss));
        assert_eq!(game.current(), Player::P2);
        assert_eq!(game.shots_fired(), 3);
        assert_eq!(
            game.board(Player::P2).cell(Coordinate::new(9, 0)),
            Some(board::CellState::Miss)
        );
    }

    #[test]
    fn input_errors_keep_the_turn() {
        let mut game = started();
        game.shoot(Coordinate::new(9, 0)).unwrap();
        assert_eq!(game.current(), Player::P2);
        game.shoot(Coordinate::new(7, 7)).unwrap();
        assert_eq!(game.current(), Player::P1);

        let err = game.shoot(Coordinate::new(9, 0)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyTargeted);
        assert_eq!(err.player(), Player::P1);
        let err = game.shoot(Coordinate::new(0, 10)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::OutOfBounds);
        assert_eq!(game.current(), Player::P1);
        assert_eq!(game.shots_fired(), 2);
    }

    #[test]
    fn sinking_the_last_ship_wins() {
        let mut game = started();
        game.shoot(Coordinate::new(0, 0)).unwrap();
        game.shoot(Coordinate::new(0, 1)).unwrap();
        assert_eq!(
            game.shoot(Coordinate::new(5, 5)),
            Ok(ShotOutcome::Victory(ShipId::new(1)))
        );
        assert_eq!(game.winner(), Some(Player::P1));
        assert_eq!(game.phase(), Phase::Finished(Player::P1));
        assert!(game.board(Player::P2).all_sunk());
        assert!(!game.board(Player::P1).all_sunk());

        let err = game.shoot(Coordinate::new(4, 4)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::GameOver);
        assert_eq!(game.shots_fired(), 3);
    }
}
