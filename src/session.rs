//! Session progress across rooms.
//!
//! Each room moves through `Unsolved -> Solved -> Confirmed`:
//! - solving the current instance reveals its unlock code (`Solved`)
//! - entering that code confirms the room and bumps the completion meter once
//! - restarting a room discards the instance and its code (`Unsolved`); a
//!   confirmed room that is restarted gives its point back until it is
//!   confirmed again
//! - re-entering a timeline room from elsewhere re-deals it unless confirmed
//!
//! Display concerns are left to a `SessionObserver`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::code::UnlockCode;
use crate::error::EngineError;
use crate::geometry::{Coord, Point};
use crate::pinmatch::{GuessOutcome, Pin, PinMatch};
use crate::rooms;
use crate::sequence::SequencePuzzle;
use crate::wordsearch::{SelectionOutcome, WordSearch, WordSearchConfig};
use crate::PuzzleOps;

/// Index of a room within a session, in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleId(pub usize);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room {}", self.0 + 1)
    }
}

/// Definition of one room, before any instance is generated.
#[derive(Clone, Debug)]
pub enum RoomSpec {
    Timeline {
        title: String,
        events: Vec<String>,
    },
    WordSearch {
        title: String,
        words: Vec<String>,
        config: WordSearchConfig,
    },
    Map {
        title: String,
        pins: Vec<Pin>,
        shuffled: bool,
        tolerance: f64,
    },
}

impl RoomSpec {
    pub fn title(&self) -> &str {
        match self {
            RoomSpec::Timeline { title, .. }
            | RoomSpec::WordSearch { title, .. }
            | RoomSpec::Map { title, .. } => title,
        }
    }
}

/// Rooms making up a session, in play order.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub rooms: Vec<RoomSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rooms: rooms::default_rooms(),
        }
    }
}

/// A live puzzle instance.
#[derive(Clone, Debug)]
pub enum Room {
    Timeline(SequencePuzzle),
    WordSearch(WordSearch),
    Map(PinMatch),
}

impl Room {
    fn build<R: Rng + ?Sized>(spec: &RoomSpec, rng: &mut R) -> Result<Self, EngineError> {
        Ok(match spec {
            RoomSpec::Timeline { events, .. } => {
                Room::Timeline(SequencePuzzle::new(events.clone(), rng)?)
            }
            RoomSpec::WordSearch { words, config, .. } => {
                Room::WordSearch(WordSearch::new(words, config.clone(), rng)?)
            }
            RoomSpec::Map {
                pins,
                shuffled,
                tolerance,
                ..
            } => Room::Map(PinMatch::new(pins.clone(), *shuffled, *tolerance, rng)?),
        })
    }

    pub fn ops(&self) -> &dyn PuzzleOps {
        match self {
            Room::Timeline(puzzle) => puzzle,
            Room::WordSearch(puzzle) => puzzle,
            Room::Map(puzzle) => puzzle,
        }
    }

    fn ops_mut(&mut self) -> &mut dyn PuzzleOps {
        match self {
            Room::Timeline(puzzle) => puzzle,
            Room::WordSearch(puzzle) => puzzle,
            Room::Map(puzzle) => puzzle,
        }
    }
}

/// Progress of one room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomState {
    Unsolved,
    /// Solved; the code is revealed and waiting to be entered.
    Solved { code: UnlockCode },
    /// Code entered; the room counts towards the completion meter.
    Confirmed { code: UnlockCode },
}

/// Result of entering an unlock code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// First confirmation. `next` is the room the session moved on to, or
    /// `None` after the last room.
    Advanced { next: Option<PuzzleId> },
    /// The room was already confirmed; the meter did not change.
    AlreadyConfirmed,
    /// Code did not match, including codes from a replaced instance.
    WrongCode,
    /// Nothing to confirm yet.
    NotSolved,
}

/// Display-side hooks. Every method defaults to doing nothing.
pub trait SessionObserver {
    fn room_solved(&mut self, _room: PuzzleId, _code: &UnlockCode) {}
    fn order_rejected(&mut self, _room: PuzzleId) {}
    fn code_rejected(&mut self, _room: PuzzleId) {}
    fn room_confirmed(&mut self, _room: PuzzleId, _completed: usize, _total: usize) {}
    fn room_transition(&mut self, _from: Option<PuzzleId>, _to: Option<PuzzleId>) {}
    fn room_restarted(&mut self, _room: PuzzleId) {}
    fn finale(&mut self) {}
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {}

#[derive(Debug)]
struct RoomSlot {
    title: String,
    room: Room,
    state: RoomState,
}

/// One player's run through the rooms.
pub struct Session<O = NullObserver, R = StdRng> {
    slots: Vec<RoomSlot>,
    completed_count: usize,
    current: Option<PuzzleId>,
    observer: O,
    rng: R,
}

impl<O: SessionObserver> Session<O, StdRng> {
    /// Starts a reproducible session from `seed`.
    pub fn with_seed(config: &SessionConfig, seed: u64, observer: O) -> Result<Self, EngineError> {
        Self::new(config, StdRng::seed_from_u64(seed), observer)
    }

    /// Starts a session seeded from OS entropy.
    pub fn from_entropy(config: &SessionConfig, observer: O) -> Result<Self, EngineError> {
        Self::new(config, StdRng::from_entropy(), observer)
    }
}

impl<O: SessionObserver, R: Rng> Session<O, R> {
    /// Generates the first instance of every room. The player starts on the
    /// home screen.
    pub fn new(config: &SessionConfig, mut rng: R, observer: O) -> Result<Self, EngineError> {
        let slots = config
            .rooms
            .iter()
            .map(|spec| {
                Ok(RoomSlot {
                    title: spec.title().to_string(),
                    room: Room::build(spec, &mut rng)?,
                    state: RoomState::Unsolved,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        tracing::info!(rooms = slots.len(), "session started");
        Ok(Self {
            slots,
            completed_count: 0,
            current: None,
            observer,
            rng,
        })
    }

    pub fn room_count(&self) -> usize {
        self.slots.len()
    }

    pub fn room_ids(&self) -> impl Iterator<Item = PuzzleId> {
        (0..self.slots.len()).map(PuzzleId)
    }

    /// Number of rooms confirmed so far.
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn is_finished(&self) -> bool {
        self.completed_count == self.slots.len()
    }

    pub fn is_completed(&self, id: PuzzleId) -> Result<bool, EngineError> {
        Ok(matches!(self.slot(id)?.state, RoomState::Confirmed { .. }))
    }

    pub fn title(&self, id: PuzzleId) -> Result<&str, EngineError> {
        Ok(&self.slot(id)?.title)
    }

    pub fn room(&self, id: PuzzleId) -> Result<&Room, EngineError> {
        Ok(&self.slot(id)?.room)
    }

    pub fn state(&self, id: PuzzleId) -> Result<&RoomState, EngineError> {
        Ok(&self.slot(id)?.state)
    }

    /// The room on screen, or `None` for the home screen.
    pub fn current(&self) -> Option<PuzzleId> {
        self.current
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Moves to room `id`.
    ///
    /// Coming in from another screen re-deals a timeline room that is not yet
    /// confirmed, which also drops any code it had revealed.
    pub fn enter(&mut self, id: PuzzleId) -> Result<(), EngineError> {
        let arriving = self.current != Some(id);
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(EngineError::UnknownRoom(id))?;

        if let Room::Timeline(puzzle) = &mut slot.room {
            if arriving && !matches!(slot.state, RoomState::Confirmed { .. }) {
                puzzle.reshuffle(&mut self.rng);
                slot.state = RoomState::Unsolved;
                tracing::debug!(room = %id, "timeline re-dealt on entry");
            }
        }

        self.move_to(Some(id));
        Ok(())
    }

    pub fn go_home(&mut self) {
        self.move_to(None);
    }

    /// Checks a timeline ordering. A correct one solves the room.
    pub fn submit_order(&mut self, id: PuzzleId, candidate: &[String]) -> Result<bool, EngineError> {
        let Room::Timeline(puzzle) = &mut self.slot_mut(id)?.room else {
            return Err(EngineError::WrongRoomKind(id));
        };

        let correct = puzzle.submit(candidate);
        if correct {
            self.mark_solved(id);
        } else {
            self.observer.order_rejected(id);
        }
        Ok(correct)
    }

    /// The timeline as it was dealt, for a "reset" that keeps the same code.
    pub fn starting_order(&self, id: PuzzleId) -> Result<Vec<String>, EngineError> {
        match &self.slot(id)?.room {
            Room::Timeline(puzzle) => Ok(puzzle.starting_order().to_vec()),
            _ => Err(EngineError::WrongRoomKind(id)),
        }
    }

    /// Matches a word-search selection. Finding the last word solves the room.
    pub fn select_cells(
        &mut self,
        id: PuzzleId,
        path: &[Coord],
    ) -> Result<SelectionOutcome, EngineError> {
        let Room::WordSearch(puzzle) = &mut self.slot_mut(id)?.room else {
            return Err(EngineError::WrongRoomKind(id));
        };

        let outcome = puzzle.match_selection(path);
        if matches!(outcome, SelectionOutcome::Found { .. }) && puzzle.is_complete() {
            self.mark_solved(id);
        }
        Ok(outcome)
    }

    /// Drops a map pin. Matching the last target solves the room.
    pub fn drop_pin(&mut self, id: PuzzleId, point: Point) -> Result<GuessOutcome, EngineError> {
        let Room::Map(puzzle) = &mut self.slot_mut(id)?.room else {
            return Err(EngineError::WrongRoomKind(id));
        };

        let outcome = puzzle.submit_guess(point);
        if matches!(outcome, GuessOutcome::Accepted { complete: true, .. }) {
            self.mark_solved(id);
        }
        Ok(outcome)
    }

    /// Compares `input` with the room's revealed code.
    pub fn submit_code(&mut self, id: PuzzleId, input: &str) -> Result<ConfirmOutcome, EngineError> {
        let total = self.slots.len();
        let slot = self.slot_mut(id)?;
        let alphabet = slot.room.ops().code_alphabet();

        let outcome = match &slot.state {
            RoomState::Unsolved => ConfirmOutcome::NotSolved,
            RoomState::Solved { code } | RoomState::Confirmed { code }
                if !code.matches(input, alphabet) =>
            {
                ConfirmOutcome::WrongCode
            }
            RoomState::Confirmed { .. } => ConfirmOutcome::AlreadyConfirmed,
            RoomState::Solved { code } => {
                slot.state = RoomState::Confirmed { code: code.clone() };
                self.completed_count += 1;
                let next = (id.0 + 1 < total).then_some(PuzzleId(id.0 + 1));
                ConfirmOutcome::Advanced { next }
            }
        };

        match &outcome {
            ConfirmOutcome::Advanced { next } => {
                tracing::info!(room = %id, completed = self.completed_count, total, "room confirmed");
                self.observer.room_confirmed(id, self.completed_count, total);
                self.move_to(*next);
                if self.is_finished() {
                    self.observer.finale();
                }
            }
            ConfirmOutcome::WrongCode | ConfirmOutcome::NotSolved => {
                self.observer.code_rejected(id);
            }
            ConfirmOutcome::AlreadyConfirmed => {}
        }

        Ok(outcome)
    }

    /// Replaces the room's instance and clears its code.
    ///
    /// If a new instance cannot be generated, the room keeps its old
    /// instance and state.
    pub fn restart(&mut self, id: PuzzleId) -> Result<(), EngineError> {
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(EngineError::UnknownRoom(id))?;
        slot.room.ops_mut().restart(&mut self.rng)?;

        if matches!(slot.state, RoomState::Confirmed { .. }) {
            self.completed_count -= 1;
        }
        slot.state = RoomState::Unsolved;

        tracing::info!(room = %id, kind = slot.room.ops().kind(), "room restarted");
        self.observer.room_restarted(id);
        Ok(())
    }

    fn mark_solved(&mut self, id: PuzzleId) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return;
        };
        if slot.state != RoomState::Unsolved {
            return;
        }
        let Some(code) = slot.room.ops().unlock_code(&mut self.rng) else {
            return;
        };

        tracing::info!(room = %id, kind = slot.room.ops().kind(), "room solved");
        self.observer.room_solved(id, &code);
        slot.state = RoomState::Solved { code };
    }

    fn move_to(&mut self, to: Option<PuzzleId>) {
        let from = self.current;
        self.current = to;
        self.observer.room_transition(from, to);
    }

    fn slot(&self, id: PuzzleId) -> Result<&RoomSlot, EngineError> {
        self.slots.get(id.0).ok_or(EngineError::UnknownRoom(id))
    }

    fn slot_mut(&mut self, id: PuzzleId) -> Result<&mut RoomSlot, EngineError> {
        self.slots.get_mut(id.0).ok_or(EngineError::UnknownRoom(id))
    }
}
