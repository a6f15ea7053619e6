//! Timeline ordering puzzle.
//!
//! The player drags a shuffled list back into its correct order. The unlock
//! code is derived from the shuffle itself: for each label in the correct
//! order, the digit of the position that label held in the starting
//! permutation. One digit per item caps a sequence at `MAX_SEQUENCE_LEN`
//! items; longer lists would need a wider per-item encoding.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::code::{CodeAlphabet, UnlockCode};
use crate::error::EngineError;
use crate::PuzzleOps;

/// Largest sequence whose code fits in single decimal digits.
pub const MAX_SEQUENCE_LEN: usize = 10;

/// Returns an unbiased shuffle of `items`, leaving the input untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// True iff `candidate` matches `correct` element for element.
pub fn verify<T: PartialEq>(candidate: &[T], correct: &[T]) -> bool {
    candidate == correct
}

/// Derives the digit code for a solved sequence.
///
/// Digit `k` is the index of `correct[k]` within `starting`. Both slices must
/// hold the same unique labels and at most `MAX_SEQUENCE_LEN` of them;
/// returns `None` when a label is missing or an index needs two digits.
pub fn derive_code<T: PartialEq>(correct: &[T], starting: &[T]) -> Option<String> {
    correct
        .iter()
        .map(|label| {
            let index = starting.iter().position(|candidate| candidate == label)?;
            char::from_digit(index as u32, 10)
        })
        .collect()
}

/// One instance of the timeline puzzle.
#[derive(Clone, Debug)]
pub struct SequencePuzzle {
    correct_order: Vec<String>,
    starting: Vec<String>,
    solved: bool,
}

impl SequencePuzzle {
    /// Validates the labels and deals the first shuffle.
    pub fn new<R: Rng + ?Sized>(
        correct_order: Vec<String>,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if correct_order.is_empty() {
            return Err(EngineError::EmptySequence);
        }
        if correct_order.len() > MAX_SEQUENCE_LEN {
            return Err(EngineError::SequenceTooLong {
                len: correct_order.len(),
                max: MAX_SEQUENCE_LEN,
            });
        }
        let mut seen = FxHashSet::default();
        for label in &correct_order {
            if !seen.insert(label.as_str()) {
                return Err(EngineError::DuplicateLabel(label.clone()));
            }
        }

        let starting = shuffle(&correct_order, rng);
        Ok(Self {
            correct_order,
            starting,
            solved: false,
        })
    }

    /// Deals a fresh shuffle; any earlier solve no longer counts.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.starting = shuffle(&self.correct_order, rng);
        self.solved = false;
    }

    pub fn correct_order(&self) -> &[String] {
        &self.correct_order
    }

    /// The order the player was dealt. Also what "reset" shows again.
    pub fn starting_order(&self) -> &[String] {
        &self.starting
    }

    /// Checks a submitted ordering, remembering a correct one.
    pub fn submit(&mut self, candidate: &[String]) -> bool {
        let correct = verify(candidate, &self.correct_order);
        if correct {
            self.solved = true;
        }
        correct
    }

    /// The digit code for this instance.
    pub fn code(&self) -> Option<String> {
        derive_code(&self.correct_order, &self.starting)
    }
}

impl PuzzleOps for SequencePuzzle {
    fn kind(&self) -> &'static str {
        "timeline"
    }

    fn is_solved(&self) -> bool {
        self.solved
    }

    fn restart(&mut self, rng: &mut dyn rand::RngCore) -> Result<(), EngineError> {
        self.reshuffle(rng);
        Ok(())
    }

    fn unlock_code(&self, _rng: &mut dyn rand::RngCore) -> Option<UnlockCode> {
        if !self.solved {
            return None;
        }
        self.code().map(UnlockCode::from_digits)
    }

    fn code_alphabet(&self) -> CodeAlphabet {
        CodeAlphabet::Digits
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<u32> = (0..10).collect();
        for _ in 0..50 {
            let mut shuffled = shuffle(&original, &mut rng);
            assert_eq!(shuffled.len(), original.len());
            shuffled.sort();
            assert_eq!(shuffled, original, "Shuffle lost or duplicated an item");
        }
        assert_eq!(original, (0..10).collect::<Vec<_>>(), "Input was mutated");
    }

    #[test]
    fn test_shuffle_varies_between_calls() {
        let mut rng = StdRng::seed_from_u64(11);
        let original: Vec<u32> = (0..10).collect();
        let first = shuffle(&original, &mut rng);
        let differs = (0..20).any(|_| shuffle(&original, &mut rng) != first);
        assert!(differs, "20 shuffles of 10 items all matched the first");
    }

    #[test]
    fn test_verify_requires_exact_order() {
        let correct = ["A", "B", "C", "D"];
        assert!(verify(&["A", "B", "C", "D"], &correct));
        assert!(!verify(&["B", "A", "C", "D"], &correct), "swap");
        assert!(!verify(&["A", "B", "C"], &correct), "truncation");
        assert!(!verify(&["A", "B", "C", "D", "E"], &correct), "extension");
        assert!(!verify(&[], &correct), "empty");
    }

    #[test]
    fn test_derive_code_example() {
        let code = derive_code(&["A", "B", "C"], &["C", "A", "B"]);
        assert_eq!(code.as_deref(), Some("120"));
    }

    #[test]
    fn test_derive_code_identity_shuffle() {
        let order = ["A", "B", "C", "D"];
        assert_eq!(derive_code(&order, &order).as_deref(), Some("0123"));
    }

    #[test]
    fn test_derive_code_indexes_back_into_starting_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let correct: Vec<u32> = (100..110).collect();
        for _ in 0..20 {
            let starting = shuffle(&correct, &mut rng);
            let code = derive_code(&correct, &starting).unwrap();
            assert_eq!(code.len(), correct.len());
            for (k, digit) in code.chars().enumerate() {
                let i = digit.to_digit(10).unwrap() as usize;
                assert_eq!(starting[i], correct[k], "Digit {k} points at the wrong item");
            }
            assert_eq!(derive_code(&correct, &starting).unwrap(), code, "Not deterministic");
        }
    }

    #[test]
    fn test_derive_code_missing_label_is_none() {
        assert_eq!(derive_code(&["A", "Z"], &["A", "B"]), None);
    }

    #[test]
    fn test_new_validates_labels() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            SequencePuzzle::new(Vec::new(), &mut rng).unwrap_err(),
            EngineError::EmptySequence
        );
        assert_eq!(
            SequencePuzzle::new(labels(&["A", "B", "A"]), &mut rng).unwrap_err(),
            EngineError::DuplicateLabel("A".to_string())
        );
        let eleven: Vec<String> = (0..11).map(|i| format!("event {i}")).collect();
        assert_eq!(
            SequencePuzzle::new(eleven, &mut rng).unwrap_err(),
            EngineError::SequenceTooLong { len: 11, max: 10 }
        );
    }

    #[test]
    fn test_unlock_code_only_after_correct_submission() {
        let mut rng = StdRng::seed_from_u64(5);
        let order = labels(&["A", "B", "C"]);
        let mut puzzle = SequencePuzzle::new(order.clone(), &mut rng).unwrap();

        assert!(puzzle.unlock_code(&mut rng).is_none());
        assert!(!puzzle.submit(&labels(&["C", "B", "A"])));
        assert!(puzzle.unlock_code(&mut rng).is_none());

        assert!(puzzle.submit(&order));
        let code = puzzle.unlock_code(&mut rng).unwrap();
        assert_eq!(code.as_str(), derive_code(&order, puzzle.starting_order()).unwrap());
    }

    #[test]
    fn test_reshuffle_clears_solved_flag() {
        let mut rng = StdRng::seed_from_u64(9);
        let order = labels(&["A", "B", "C"]);
        let mut puzzle = SequencePuzzle::new(order.clone(), &mut rng).unwrap();
        assert!(puzzle.submit(&order));
        puzzle.reshuffle(&mut rng);
        assert!(!puzzle.is_solved());
        assert!(puzzle.unlock_code(&mut rng).is_none());
    }
}
