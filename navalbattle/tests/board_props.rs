use navalbattle::{
    board::{CannotShootReason, ShotOutcome},
    game, Board, BoardSetup, CellState, Coordinate, Fleet, GameSetup, Orientation, Player, ShipSpec,
    BOARD_SIZE,
};
use proptest::prelude::*;

/// Candidate ship: start row, start column, horizontal flag, size.
type Proposal = (usize, usize, bool, usize);

fn coord() -> impl Strategy<Value = Coordinate> {
    (0..BOARD_SIZE, 0..BOARD_SIZE).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn proposals() -> impl Strategy<Value = Vec<Proposal>> {
    prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE, any::<bool>(), 1usize..=4), 1..20)
}

fn orientation(horizontal: bool) -> Orientation {
    if horizontal {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    }
}

/// Keep only the proposals that fit next to the ones accepted before them.
fn accepted(proposals: &[Proposal]) -> Vec<Proposal> {
    let fleet: Fleet = proposals
        .iter()
        .map(|&(_, _, _, size)| ShipSpec::new("ship", size))
        .collect();
    let mut scratch = BoardSetup::new(fleet);
    let mut kept = Vec::new();
    for &(x, y, h, size) in proposals {
        let start = Coordinate::new(x, y);
        if scratch.can_place(start, size, orientation(h)) {
            scratch
                .place(start, &ShipSpec::new("ship", size), orientation(h))
                .unwrap();
            kept.push((x, y, h, size));
        }
    }
    kept
}

/// Set up a board holding the given ships, followed by optional unplaced extra entries.
fn setup_with(ships: &[Proposal], extra: &[ShipSpec]) -> BoardSetup {
    let fleet: Fleet = ships
        .iter()
        .map(|&(_, _, _, size)| ShipSpec::new("ship", size))
        .chain(extra.iter().cloned())
        .collect();
    let mut setup = BoardSetup::new(fleet);
    for &(x, y, h, _) in ships {
        setup
            .place_next(Coordinate::new(x, y), orientation(h))
            .unwrap();
    }
    setup
}

fn revealed(board: &Board) -> Vec<Vec<CellState>> {
    board.rows(true).map(|row| row.collect()).collect()
}

fn hits(board: &Board) -> Vec<usize> {
    board.iter_ships().map(|ship| ship.hits()).collect()
}

fn started(proposals: &[Proposal]) -> Option<Board> {
    let ships = accepted(proposals);
    if ships.is_empty() {
        None
    } else {
        setup_with(&ships, &[]).start().ok()
    }
}

proptest! {
    #[test]
    fn placed_ships_never_touch(proposals in proposals()) {
        let setup = setup_with(&accepted(&proposals), &[]);
        let ships: Vec<_> = setup.iter_ships().collect();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                for ca in a.coords() {
                    for cb in b.coords() {
                        prop_assert!(ca != cb && !ca.is_neighbor(cb));
                    }
                }
            }
        }
    }

    #[test]
    fn rejected_placement_is_idempotent(
        proposals in proposals(),
        (x, y) in (0..BOARD_SIZE + 2, 0..BOARD_SIZE + 2),
        horizontal in any::<bool>(),
        size in 1usize..=5,
    ) {
        let mut setup = setup_with(&accepted(&proposals), &[ShipSpec::new("extra", size)]);
        let start = Coordinate::new(x, y);
        let o = orientation(horizontal);
        let before: Vec<Vec<_>> = setup.rows().map(|r| r.collect()).collect();
        if let Err(first) = setup.place_next(start, o) {
            let second = setup.place_next(start, o).unwrap_err();
            prop_assert_eq!(first, second);
            let after: Vec<Vec<_>> = setup.rows().map(|r| r.collect()).collect();
            prop_assert_eq!(before, after);
            prop_assert!(!setup.ready());
        }
    }

    #[test]
    fn second_shot_is_already_targeted(
        proposals in proposals(),
        shots in prop::collection::vec(coord(), 1..60),
    ) {
        if let Some(mut board) = started(&proposals) {
            // Sink the first ship so repeats on sunk ships are covered too.
            let mut fired: Vec<Coordinate> = board.iter_ships().next().unwrap().coords().to_vec();
            for &coord in fired.iter() {
                prop_assert!(board.shoot(coord).is_ok());
            }
            prop_assert!(board.iter_ships().next().unwrap().is_sunk());
            for shot in shots {
                if board.shoot(shot).is_ok() {
                    fired.push(shot);
                }
            }

            let (rows_before, hits_before) = (revealed(&board), hits(&board));
            let sunk_before = board.all_sunk();
            for target in fired {
                let second = board.shoot(target).map_err(|e| e.reason());
                prop_assert_eq!(second, Err(CannotShootReason::AlreadyTargeted));
                prop_assert_eq!(&revealed(&board), &rows_before);
                prop_assert_eq!(&hits(&board), &hits_before);
                prop_assert_eq!(board.all_sunk(), sunk_before);
            }
        }
    }

    #[test]
    fn ship_sinks_after_exactly_its_size_in_hits(proposals in proposals()) {
        if let Some(mut board) = started(&proposals) {
            let ships: Vec<_> = board.iter_ships().cloned().collect();
            for ship in ships {
                let (last, rest) = ship.coords().split_last().unwrap();
                for &coord in rest {
                    prop_assert_eq!(board.shoot(coord), Ok(ShotOutcome::Hit(ship.id())));
                    prop_assert!(!board.get_ship(ship.id()).unwrap().is_sunk());
                }
                prop_assert_eq!(board.shoot(*last), Ok(ShotOutcome::Sunk(ship.id())));
                prop_assert_eq!(board.get_ship(ship.id()).unwrap().hits(), ship.size());
            }
            prop_assert!(board.all_sunk());
        }
    }

    #[test]
    fn all_sunk_iff_every_ship_sunk(
        proposals in proposals(),
        shots in prop::collection::vec(coord(), 0..120),
    ) {
        if let Some(mut board) = started(&proposals) {
            for shot in shots {
                let _ = board.shoot(shot);
                let every = board.iter_ships().all(|s| s.hits() == s.size());
                prop_assert_eq!(board.all_sunk(), every);
            }
        }
    }

    #[test]
    fn turn_flips_exactly_on_misses(
        proposals in proposals(),
        shots in prop::collection::vec(coord(), 0..150),
    ) {
        let ships = accepted(&proposals);
        if !ships.is_empty() {
            let fleet = setup_with(&ships, &[]).fleet().clone();
            let mut setup = GameSetup::new(fleet);
            for _ in 0..2 {
                let board = setup.board_mut().unwrap();
                for &(x, y, h, _) in ships.iter() {
                    board.place_next(Coordinate::new(x, y), orientation(h)).unwrap();
                }
                setup.complete_player().unwrap();
            }
            let mut game = setup.start().unwrap();

            for shot in shots {
                let before = game.current();
                match game.shoot(shot) {
                    Ok(game::ShotOutcome::Miss) => {
                        prop_assert_eq!(game.current(), before.opponent());
                    }
                    _ => prop_assert_eq!(game.current(), before),
                }
                if let Some(winner) = game.winner() {
                    prop_assert!(game.board(winner.opponent()).all_sunk());
                    prop_assert!(Player::ALL.iter().any(|&p| game.board(p).all_sunk()));
                }
            }
        }
    }
}
