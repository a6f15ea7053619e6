//! Line-oriented terminal frontend for a session.

use std::io::BufRead;

use rand::Rng;

use escape_room::code::UnlockCode;
use escape_room::geometry::{Coord, Point};
use escape_room::pinmatch::GuessOutcome;
use escape_room::session::SessionObserver;
use escape_room::wordsearch::SelectionOutcome;
use escape_room::{ConfirmOutcome, PuzzleId, Room, RoomState, Session};

const HELP: &str = "\
Commands:
  rooms               list rooms and progress
  enter <n>           go to room n
  home                back to the start screen
  show                redraw the current room
  move <from> <to>    timeline: move an event (1-based positions)
  check               timeline: check the current order
  reset               timeline: back to the order you were dealt
  select r,c r,c ...  word search: select a line of cells
  pin <x> <y>         map: drop a pin
  code <value>        enter an unlock code
  restart             new puzzle for this room
  quit";

/// Prints session notifications to stdout.
pub struct TerminalDisplay;

impl SessionObserver for TerminalDisplay {
    fn room_solved(&mut self, room: PuzzleId, code: &UnlockCode) {
        println!("Unlocked {room}! Your code: {code}");
    }

    fn order_rejected(&mut self, _room: PuzzleId) {
        println!("Not quite. Try moving a couple around in the middle.");
    }

    fn code_rejected(&mut self, _room: PuzzleId) {
        println!("That code doesn't open anything.");
    }

    fn room_confirmed(&mut self, room: PuzzleId, completed: usize, total: usize) {
        println!("{room} complete ({completed}/{total}).");
    }

    fn room_transition(&mut self, _from: Option<PuzzleId>, to: Option<PuzzleId>) {
        match to {
            Some(room) => println!("-> entering {room}"),
            None => println!("-> home"),
        }
    }

    fn room_restarted(&mut self, room: PuzzleId) {
        println!("{room} has a fresh puzzle.");
    }

    fn finale(&mut self) {
        println!("Every room is open. You made it out!");
    }
}

/// Working order of the timeline as the player arranges it.
struct Frontend {
    timeline: Vec<String>,
}

/// Reads commands from `input` until it ends or the player quits.
pub fn play<R: Rng>(mut session: Session<TerminalDisplay, R>, input: impl BufRead) {
    let mut frontend = Frontend {
        timeline: first_timeline(&session),
    };

    println!("Welcome to the escape room. Type 'help' for commands.");
    print_rooms(&session);

    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        if command == "quit" {
            break;
        }
        if let Err(message) = run_command(&mut session, &mut frontend, command, &args) {
            println!("{message}");
        }
    }
}

fn first_timeline<R: Rng>(session: &Session<TerminalDisplay, R>) -> Vec<String> {
    session
        .room_ids()
        .find_map(|id| session.starting_order(id).ok())
        .unwrap_or_default()
}

fn run_command<R: Rng>(
    session: &mut Session<TerminalDisplay, R>,
    frontend: &mut Frontend,
    command: &str,
    args: &[&str],
) -> Result<(), String> {
    match command {
        "help" => println!("{HELP}"),
        "rooms" => print_rooms(session),
        "home" => session.go_home(),
        "enter" => {
            let id = parse_room(args.first(), session.room_count())?;
            session.enter(id).map_err(|e| e.to_string())?;
            sync_timeline(session, frontend, id);
            show_room(session, frontend, id);
        }
        "show" => show_room(session, frontend, current_room(session)?),
        "move" => {
            let (from, to) = match args {
                [from, to] => (parse_position(from)?, parse_position(to)?),
                _ => return Err("usage: move <from> <to>".to_string()),
            };
            let len = frontend.timeline.len();
            if from >= len || to >= len {
                return Err(format!("positions run from 1 to {len}"));
            }
            let event = frontend.timeline.remove(from);
            frontend.timeline.insert(to, event);
            print_timeline(&frontend.timeline);
        }
        "check" => {
            let id = current_room(session)?;
            session
                .submit_order(id, &frontend.timeline)
                .map_err(|e| e.to_string())?;
        }
        "reset" => {
            let id = current_room(session)?;
            frontend.timeline = session.starting_order(id).map_err(|e| e.to_string())?;
            print_timeline(&frontend.timeline);
        }
        "select" => {
            let id = current_room(session)?;
            let path = args
                .iter()
                .map(|arg| parse_cell(arg))
                .collect::<Result<Vec<Coord>, String>>()?;
            let outcome = session.select_cells(id, &path).map_err(|e| e.to_string())?;
            print_selection(&outcome);
        }
        "pin" => {
            let id = current_room(session)?;
            let point = match args {
                [x, y] => Point::new(parse_number(x)?, parse_number(y)?),
                _ => return Err("usage: pin <x> <y>".to_string()),
            };
            let outcome = session.drop_pin(id, point).map_err(|e| e.to_string())?;
            print_guess(&outcome);
        }
        "code" => {
            let id = current_room(session)?;
            let value = args.join("");
            let outcome = session.submit_code(id, &value).map_err(|e| e.to_string())?;
            if outcome == ConfirmOutcome::AlreadyConfirmed {
                println!("{id} is already open.");
            }
            if let Some(next) = session.current() {
                sync_timeline(session, frontend, next);
            }
        }
        "restart" => {
            let id = current_room(session)?;
            session.restart(id).map_err(|e| e.to_string())?;
            sync_timeline(session, frontend, id);
            show_room(session, frontend, id);
        }
        other => return Err(format!("unknown command '{other}', try 'help'")),
    }
    Ok(())
}

/// Deals the room's starting order into the working list, for timeline rooms.
fn sync_timeline<R: Rng>(
    session: &Session<TerminalDisplay, R>,
    frontend: &mut Frontend,
    id: PuzzleId,
) {
    if let Ok(order) = session.starting_order(id) {
        frontend.timeline = order;
    }
}

fn current_room<R: Rng>(session: &Session<TerminalDisplay, R>) -> Result<PuzzleId, String> {
    session
        .current()
        .ok_or_else(|| "you're on the home screen; 'enter' a room first".to_string())
}

fn parse_room(arg: Option<&&str>, count: usize) -> Result<PuzzleId, String> {
    let n: usize = arg
        .ok_or("usage: enter <n>")?
        .parse()
        .map_err(|_| "room must be a number".to_string())?;
    if n == 0 || n > count {
        return Err(format!("rooms run from 1 to {count}"));
    }
    Ok(PuzzleId(n - 1))
}

fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{arg}' is not a position")),
    }
}

fn parse_cell(arg: &str) -> Result<Coord, String> {
    let parsed = arg
        .split_once(',')
        .and_then(|(row, col)| Some((row.trim().parse().ok()?, col.trim().parse().ok()?)));
    parsed.ok_or_else(|| format!("'{arg}' is not a row,col cell"))
}

fn parse_number(arg: &str) -> Result<f64, String> {
    match arg.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(format!("'{arg}' is not a number")),
    }
}

fn print_rooms<R: Rng>(session: &Session<TerminalDisplay, R>) {
    for id in session.room_ids() {
        let title = session.title(id).unwrap_or_default();
        let status = match session.state(id) {
            Ok(RoomState::Unsolved) => "locked",
            Ok(RoomState::Solved { .. }) => "solved, enter code",
            Ok(RoomState::Confirmed { .. }) => "open",
            Err(_) => "?",
        };
        println!("  {}. {title} [{status}]", id.0 + 1);
    }
    println!(
        "Progress: {}/{}",
        session.completed_count(),
        session.room_count()
    );
}

fn show_room<R: Rng>(session: &Session<TerminalDisplay, R>, frontend: &Frontend, id: PuzzleId) {
    let title = session.title(id).unwrap_or_default();
    println!("== {id}: {title} ==");

    match session.room(id) {
        Ok(Room::Timeline(_)) => {
            println!("Put these in order, earliest first:");
            print_timeline(&frontend.timeline);
        }
        Ok(Room::WordSearch(puzzle)) => {
            print!("{}", puzzle.grid().format_with_coords());
            let words: Vec<String> = puzzle
                .words()
                .iter()
                .map(|word| {
                    if puzzle.is_found(word) {
                        format!("[{word}]")
                    } else {
                        word.clone()
                    }
                })
                .collect();
            println!("Find: {}", words.join(" "));
        }
        Ok(Room::Map(puzzle)) => match puzzle.current_target() {
            Some(target) => println!(
                "Pin {} of {}: where is {}?",
                puzzle.current_index() + 1,
                puzzle.targets().len(),
                target.label
            ),
            None => println!("All pins placed."),
        },
        Err(e) => println!("{e}"),
    }

    if let Ok(RoomState::Solved { code }) = session.state(id) {
        println!("Code revealed: {code}");
    }
}

fn print_timeline(events: &[String]) {
    for (i, event) in events.iter().enumerate() {
        println!("  {}. {event}", i + 1);
    }
}

fn print_selection(outcome: &SelectionOutcome) {
    match outcome {
        SelectionOutcome::Found { word, .. } => println!("Found {word}!"),
        SelectionOutcome::AlreadyFound(word) => println!("{word} is already found."),
        SelectionOutcome::NoMatch => println!("No word there."),
        SelectionOutcome::NotALine => println!("Select a straight or diagonal line."),
        SelectionOutcome::TooShort => println!("Select at least three letters."),
        SelectionOutcome::OutOfBounds => println!("That runs off the grid."),
    }
}

fn print_guess(outcome: &GuessOutcome) {
    match outcome {
        GuessOutcome::Accepted { label, complete, .. } => {
            println!("{label}, correct!");
            if *complete {
                println!("That's every pin.");
            }
        }
        GuessOutcome::Rejected { distance } => println!("Not there ({distance:.0} away)."),
        GuessOutcome::AlreadyComplete => println!("Every pin is already placed."),
    }
}
