use navalbattle::{Coordinate, Fleet, Game, GameSetup, Orientation, Player, ShipSpec};

fn mid_game() -> Game {
    let fleet: Fleet = vec![ShipSpec::new("two-master", 2), ShipSpec::new("one-master", 1)].into();
    let mut setup = GameSetup::new(fleet);
    for _ in 0..2 {
        let board = setup.board_mut().unwrap();
        board
            .place_next(Coordinate::new(1, 1), Orientation::Vertical)
            .unwrap();
        board
            .place_next(Coordinate::new(7, 7), Orientation::Vertical)
            .unwrap();
        setup.complete_player().unwrap();
    }
    let mut game = setup.start().unwrap();
    game.shoot(Coordinate::new(1, 1)).unwrap();
    game.shoot(Coordinate::new(0, 9)).unwrap();
    game.shoot(Coordinate::new(7, 7)).unwrap();
    game
}

#[test]
fn snapshot_restores_the_match() {
    let game = mid_game();
    let json = serde_json::to_string(&game).unwrap();
    let mut restored: Game = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.current(), Player::P2);
    assert_eq!(restored.shots_fired(), game.shots_fired());
    assert_eq!(restored.phase(), game.phase());
    for &player in Player::ALL.iter() {
        let expected: Vec<Vec<_>> = game.board(player).rows(true).map(|r| r.collect()).collect();
        let actual: Vec<Vec<_>> = restored
            .board(player)
            .rows(true)
            .map(|r| r.collect())
            .collect();
        assert_eq!(expected, actual);
    }
    assert_eq!(
        serde_json::to_value(&restored).unwrap(),
        serde_json::to_value(&game).unwrap()
    );

    // The restored match keeps going from where it left off.
    assert!(restored.shoot(Coordinate::new(1, 1)).unwrap().ship().is_some());
    assert_eq!(restored.current(), Player::P2);
}
