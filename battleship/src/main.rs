use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use log::{debug, info};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;

use navalbattle::{
    board::{CannotPlaceReason, CellState},
    game::{CannotShootReason, ShotOutcome},
    BoardSetup, Coordinate, Fleet, Game, GameSetup, Orientation, Player, ShipSpec, BOARD_SIZE,
};

fn main() -> io::Result<()> {
    env_logger::init();

    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player hotseat naval battle on the command line.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first-player")
                .value_name("FIRST_PLAYER")
                .help("which player sets up and shoots first")
                .takes_value(true)
                .possible_values(&["p1", "p2", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("fleet")
                .long("fleet")
                .value_name("FLEET")
                .help("custom fleet as comma-separated COUNTxSIZE items, e.g. 4x1,3x2,2x3,1x4")
                .takes_value(true)
                .validator(|spec| parse_fleet(&spec).map(|_| ())),
        )
        .arg(
            Arg::with_name("no_pause")
                .long("no-pause")
                .help("don't blank the screen and wait for Enter when the turn passes"),
        )
        .get_matches();

    let fleet = match matches.value_of("fleet") {
        Some(spec) => {
            parse_fleet(spec).map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?
        }
        None => Fleet::standard(),
    };
    let pause = !matches.is_present("no_pause");

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    let first = choose_first_player(&matches, &mut rng);
    info!("{} ships per player, {} goes first", fleet.len(), PlayerName(first));
    let mut setup = GameSetup::with_first_player(fleet, first);

    if let Some(next) = choose_placements(&mut rng, &mut setup, &mut input)? {
        hand_over(next, pause, &mut input)?;
        choose_placements(&mut rng, &mut setup, &mut input)?;
    }
    let mut game = match setup.start() {
        Ok(game) => game,
        // choose_placements only returns once the player's fleet is complete.
        Err(_) => unreachable!(),
    };
    hand_over(game.current(), pause, &mut input)?;

    play(&mut game, pause, &mut input)
}

/// Decide which [`Player`] goes first based on the command line.
fn choose_first_player(matches: &ArgMatches, rng: &mut impl Rng) -> Player {
    match matches.value_of("first_player").map(str::to_ascii_lowercase) {
        Some(choice) if choice == "p2" => Player::P2,
        Some(choice) if choice == "random" || choice == "rand" => rng.gen(),
        _ => Player::P1,
    }
}

/// Parse a fleet description such as `4x1,3x2,2x3,1x4`.
fn parse_fleet(spec: &str) -> Result<Fleet, String> {
    static ITEM: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*(?P<count>[0-9]+)\s*[xX]\s*(?P<size>[0-9]+)\s*$").unwrap());

    let mut ships = Vec::new();
    let mut cells = 0usize;
    for item in spec.split(',') {
        let captures = ITEM
            .captures(item)
            .ok_or_else(|| format!("invalid fleet item \"{}\", expected COUNTxSIZE", item))?;
        let count: usize = captures["count"]
            .parse()
            .map_err(|_| format!("invalid ship count in \"{}\"", item))?;
        let size: usize = captures["size"]
            .parse()
            .map_err(|_| format!("invalid ship size in \"{}\"", item))?;
        if size == 0 || size > BOARD_SIZE {
            return Err(format!(
                "ship size must be in range [1,{}], got {}",
                BOARD_SIZE, size
            ));
        }
        cells = count
            .checked_mul(size)
            .and_then(|item_cells| cells.checked_add(item_cells))
            .filter(|&total| total <= BOARD_SIZE * BOARD_SIZE)
            .ok_or_else(|| {
                format!(
                    "the fleet covers more than the {} cells of the board",
                    BOARD_SIZE * BOARD_SIZE
                )
            })?;
        ships.extend((0..count).map(|_| ShipSpec::new(ship_name(size), size)));
    }
    if ships.is_empty() {
        return Err("the fleet must contain at least one ship".to_string());
    }
    let fleet: Fleet = ships.into();

    // Ships may not touch, so fitting the cells is not enough.
    let mut scratch = BoardSetup::new(fleet.clone());
    if !scratch.place_all_random(&mut StdRng::seed_from_u64(FLEET_CHECK_SEED)) {
        return Err("the ships do not fit on the board without touching".to_string());
    }
    Ok(fleet)
}

/// Seed for the trial placement that checks a custom fleet fits on the board.
const FLEET_CHECK_SEED: u64 = 0x5EA;

/// Name for ships of the given size.
fn ship_name(size: usize) -> String {
    match size {
        1 => "one-master".to_string(),
        2 => "two-master".to_string(),
        3 => "three-master".to_string(),
        4 => "four-master".to_string(),
        5 => "five-master".to_string(),
        n => format!("{}-master", n),
    }
}

/// Parse `<x> <y>` or `<x>,<y>`. Prints a message and returns `None` for malformed input.
/// Coordinates past the board edge are passed through so the game can reject them.
fn parse_coordinate(input: &str) -> Option<Coordinate> {
    static COORD: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<x>-?[0-9]+)(?:\s*,\s*|\s+)(?P<y>-?[0-9]+)$").unwrap()
    });

    let captures = match COORD.captures(input) {
        Some(captures) => captures,
        None => {
            println!("Enter the target as \"<x> <y>\".");
            return None;
        }
    };
    match (captures["x"].parse(), captures["y"].parse()) {
        (Ok(x), Ok(y)) => Some(Coordinate::new(x, y)),
        _ => {
            println!(
                "Coordinates must be in range [0,{}], got {}.",
                BOARD_SIZE - 1,
                input
            );
            None
        }
    }
}

/// Let the current setup player place their fleet. Returns once their setup is complete,
/// with the player who sets up next, if any.
fn choose_placements(
    rng: &mut impl Rng,
    setup: &mut GameSetup,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<Option<Player>> {
    enum Command {
        Done,
        Place(Coordinate, Orientation),
        Clear,
        Random,
        Help,
    }
    let player = setup.current();
    println!();
    println!("{}, place your ships. Type help or ? for commands.", PlayerName(player));
    loop {
        static PLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:place|put)\s+
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)\s+
        (?P<dir>\w+)$",
            )
            .unwrap()
        });

        println!();
        let board = setup.board(player);
        match board.next_pending() {
            Some((_, spec)) => println!(
                "Next ship: {} (size {}), {} left to place",
                spec.name(),
                spec.size(),
                board.pending_ships().count()
            ),
            None => println!("All ships placed, type done to finish."),
        }
        println!("Your board:");
        show_board(board.rows().map(|row| row.map(CellSymbol)));
        println!();

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::Random),
            "done" | "start" => Some(Command::Done),
            "clear" => Some(Command::Clear),
            other => {
                if let Some(captures) = PLACE.captures(other) {
                    let coord = match (captures["x"].parse(), captures["y"].parse()) {
                        (Ok(x), Ok(y)) => Coordinate::new(x, y),
                        _ => {
                            println!("invalid coordinate in \"{}\"", other);
                            return None;
                        }
                    };
                    let dir = match &captures["dir"] {
                        "h" | "horizontal" | "right" | "r" => Orientation::Horizontal,
                        "v" | "vertical" | "down" | "d" => Orientation::Vertical,
                        other => {
                            println!("invalid direction {}, choose \"h\" or \"v\"", other);
                            return None;
                        }
                    };
                    Some(Command::Place(coord, dir))
                } else {
                    println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::Done => match setup.complete_player() {
                Ok(next) => return Ok(next),
                Err(err) => println!("Cannot finish setup: {}.", err),
            },
            Command::Place(start, dir) => {
                if let Some(board) = setup.board_mut() {
                    match board.place_next(start, dir) {
                        Ok(id) => debug!("{} placed ship {}", PlayerName(player), id),
                        Err(err) => match err.reason() {
                            CannotPlaceReason::OutOfBounds => {
                                println!("Invalid placement: the ship does not fit on the board.")
                            }
                            CannotPlaceReason::OverlapOrAdjacency => println!(
                                "Invalid placement: ships may not overlap or touch, not even diagonally."
                            ),
                            CannotPlaceReason::InvalidSize | CannotPlaceReason::NotInFleet => {
                                println!("There are no ships left to place.")
                            }
                        },
                    }
                }
            }
            Command::Clear => {
                if let Some(board) = setup.board_mut() {
                    board.clear();
                }
            }
            Command::Random => {
                if let Some(board) = setup.board_mut() {
                    if !board.place_all_random(rng) {
                        println!("Could not fit the remaining ships.");
                    }
                }
            }
            Command::Help => {
                println!(
                    "Available Commands:
    done                  if all ships are placed, finish setup.
    place <x> <y> <dir>   place the next ship starting at row x, column y.
        Possible directions are \"h\" (along the row) and \"v\" (down the column).
    clear                 clears all ship placements.
    random                randomly place the remaining ships.

Ships may not overlap or touch each other, not even at the corners."
                );
            }
        }
    }
}

/// Run turns until somebody wins.
fn play(game: &mut Game, pause: bool, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    while game.winner().is_none() {
        let player = game.current();
        let opponent = player.opponent();
        println!();
        println!("{}, your fleet:", PlayerName(player));
        show_board(game.board(player).rows(true).map(|row| row.map(CellSymbol)));
        println!();
        println!("{}'s waters:", PlayerName(opponent));
        show_board(game.board(opponent).rows(false).map(|row| row.map(CellSymbol)));
        println!();

        let target = input.read_input("Target (x y):", parse_coordinate)?;
        match game.shoot(target) {
            Ok(ShotOutcome::Miss) => {
                println!("Miss.");
                hand_over(opponent, pause, input)?;
            }
            Ok(ShotOutcome::Hit(_)) => println!("Hit! Shoot again."),
            Ok(ShotOutcome::Sunk(id)) => {
                let name = ship_label(game, opponent, id);
                println!("Hit and sunk: {}! Shoot again.", name);
            }
            Ok(ShotOutcome::Victory(id)) => {
                let name = ship_label(game, opponent, id);
                println!("Hit and sunk: {}!", name);
            }
            Err(err) => match err.reason() {
                CannotShootReason::OutOfBounds => println!(
                    "{} is off the board, coordinates must be in range [0,{}].",
                    err.coord(),
                    BOARD_SIZE - 1
                ),
                CannotShootReason::AlreadyTargeted => {
                    println!("You already shot at {}, pick another cell.", err.coord())
                }
                CannotShootReason::GameOver => break,
            },
        }
    }

    if let Some(winner) = game.winner() {
        println!();
        println!(
            "{} sank the whole fleet and wins after {} shots!",
            PlayerName(winner),
            game.shots_fired()
        );
        for &player in Player::ALL.iter() {
            println!();
            println!("{}'s board:", PlayerName(player));
            show_board(game.board(player).rows(true).map(|row| row.map(CellSymbol)));
        }
    }
    Ok(())
}

/// Name of a ship on the given player's board.
fn ship_label(game: &Game, owner: Player, id: navalbattle::ShipId) -> String {
    game.board(owner)
        .get_ship(id)
        .map_or_else(|| id.to_string(), |ship| ship.name().to_string())
}

/// Blank the screen and wait for the next player to take the keyboard.
fn hand_over(next: Player, pause: bool, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    if !pause {
        return Ok(());
    }
    print!("\x1B[2J\x1B[1;1H");
    let prompt = format!("Pass the keyboard to {} and press Enter.", PlayerName(next));
    input.read_input(&prompt, |_| Some(()))
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..BOARD_SIZE {
        print!("{:^3}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^3}", cell);
        }
        println!();
    }
}

/// Display helper that prints a cell as a single symbol.
struct CellSymbol(CellState);

impl fmt::Display for CellSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            CellState::Hit => "X",
            CellState::Miss => "O",
            CellState::Ship => "S",
            CellState::Empty => ".",
        })
    }
}

/// Display helper that prints a player's name.
struct PlayerName(Player);

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            Player::P1 => "Player 1",
            Player::P2 => "Player 2",
        })
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Exits the
    /// program when stdin is closed.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
