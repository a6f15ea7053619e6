//! Failures raised while building or driving puzzle instances.
//!
//! Wrong guesses, bad selections and mismatched codes are not errors; they
//! come back as outcome enums from the engines and the session.

use thiserror::Error;

use crate::session::PuzzleId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Word placement kept failing; the caller needs fewer words or a larger grid.
    #[error("could not place every word on a {size}x{size} grid after {passes} passes")]
    GenerationExhausted { passes: usize, size: usize },

    #[error("word list is empty")]
    EmptyWordList,

    #[error("word {0:?} must contain only the letters A-Z")]
    InvalidWord(String),

    #[error("sequence is empty")]
    EmptySequence,

    /// Sequence codes use one decimal digit per item.
    #[error("sequence has {len} items but single-digit codes allow at most {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("duplicate label {0:?} in sequence")]
    DuplicateLabel(String),

    #[error("map puzzle needs at least one target")]
    NoTargets,

    #[error("tolerance radius must be a finite, non-negative distance")]
    InvalidTolerance,

    #[error("target {0:?} does not have a finite position")]
    InvalidTarget(String),

    #[error("{0} does not exist")]
    UnknownRoom(PuzzleId),

    #[error("{0} does not accept that kind of input")]
    WrongRoomKind(PuzzleId),
}
