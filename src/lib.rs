//! Escape Room Puzzle Engine
//!
//! Generates and verifies the puzzles of a single-page escape room: a
//! timeline to put in order, a word search and a map to drop pins on. Each
//! solved room reveals an unlock code; confirming the code advances the
//! session.

pub mod code;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pinmatch;
pub mod rooms;
pub mod sequence;
pub mod session;
pub mod wordsearch;

use rand::RngCore;

use code::{CodeAlphabet, UnlockCode};
use error::EngineError;

pub use session::{ConfirmOutcome, PuzzleId, Room, RoomState, Session, SessionConfig};

/// Operations every room engine supports, independent of its input type.
///
/// The session drives restarts and code reveals through this trait, so it
/// never needs to know which engine sits behind a room.
pub trait PuzzleOps {
    /// Short human-readable name of the puzzle type.
    fn kind(&self) -> &'static str;
    /// Whether the current instance has been fully solved.
    fn is_solved(&self) -> bool;
    /// Replaces the current instance with a fresh one.
    fn restart(&mut self, rng: &mut dyn RngCore) -> Result<(), EngineError>;
    /// The code for the current instance, or `None` while unsolved.
    fn unlock_code(&self, rng: &mut dyn RngCore) -> Option<UnlockCode>;
    /// How player input for this room's code is normalized.
    fn code_alphabet(&self) -> CodeAlphabet;
}
