//! Map pin-drop puzzle.
//!
//! Targets are visited one at a time. A guess is accepted when it lands
//! within the tolerance radius of the current target (boundary included),
//! which moves the pointer on to the next target.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::code::{CodeAlphabet, UnlockCode};
use crate::error::EngineError;
use crate::geometry::Point;
use crate::PuzzleOps;

/// A labelled location on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    pub label: String,
    pub position: Point,
}

impl Pin {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            position: Point::new(x, y),
        }
    }
}

/// Result of dropping a pin.
#[derive(Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// Close enough. `next_index` is the new pointer; `complete` once it
    /// reaches the number of targets.
    Accepted {
        label: String,
        next_index: usize,
        complete: bool,
    },
    /// Too far from the current target; the pointer did not move.
    Rejected { distance: f64 },
    /// Every target is already matched; the guess is ignored.
    AlreadyComplete,
}

/// One instance of the map puzzle.
#[derive(Clone, Debug)]
pub struct PinMatch {
    targets: Vec<Pin>,
    current: usize,
    tolerance: f64,
    shuffled: bool,
}

impl PinMatch {
    /// Builds an instance, shuffling the target order when `shuffled` is set.
    pub fn new<R: Rng + ?Sized>(
        targets: Vec<Pin>,
        shuffled: bool,
        tolerance: f64,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if targets.is_empty() {
            return Err(EngineError::NoTargets);
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(EngineError::InvalidTolerance);
        }
        if let Some(pin) = targets
            .iter()
            .find(|pin| !pin.position.x.is_finite() || !pin.position.y.is_finite())
        {
            return Err(EngineError::InvalidTarget(pin.label.clone()));
        }

        let mut puzzle = Self {
            targets,
            current: 0,
            tolerance,
            shuffled,
        };
        puzzle.reset(rng);
        Ok(puzzle)
    }

    /// Rewinds to the first target, re-shuffling if this instance shuffles.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shuffled {
            self.targets.shuffle(rng);
        }
        self.current = 0;
    }

    pub fn targets(&self) -> &[Pin] {
        &self.targets
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The target to find next, or `None` once complete.
    pub fn current_target(&self) -> Option<&Pin> {
        self.targets.get(self.current)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.targets.len()
    }

    /// Checks a guess, already in puzzle space, against the current target.
    pub fn submit_guess(&mut self, point: Point) -> GuessOutcome {
        let Some(target) = self.targets.get(self.current) else {
            return GuessOutcome::AlreadyComplete;
        };

        let distance = point.distance(target.position);
        if distance.is_nan() || distance > self.tolerance {
            return GuessOutcome::Rejected { distance };
        }

        let label = target.label.clone();
        self.current += 1;
        GuessOutcome::Accepted {
            label,
            next_index: self.current,
            complete: self.is_complete(),
        }
    }
}

impl PuzzleOps for PinMatch {
    fn kind(&self) -> &'static str {
        "map"
    }

    fn is_solved(&self) -> bool {
        self.is_complete()
    }

    fn restart(&mut self, rng: &mut dyn rand::RngCore) -> Result<(), EngineError> {
        self.reset(rng);
        Ok(())
    }

    fn unlock_code(&self, rng: &mut dyn rand::RngCore) -> Option<UnlockCode> {
        self.is_complete().then(|| UnlockCode::generate(rng))
    }

    fn code_alphabet(&self) -> CodeAlphabet {
        CodeAlphabet::UpperAlphanumeric
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn two_targets() -> PinMatch {
        let mut rng = StdRng::seed_from_u64(0);
        let targets = vec![Pin::new("first", 10.0, 10.0), Pin::new("second", 50.0, 50.0)];
        PinMatch::new(targets, false, 5.0, &mut rng).unwrap()
    }

    #[test]
    fn test_guess_sequence() {
        let mut puzzle = two_targets();
        assert_eq!(
            puzzle.submit_guess(Point::new(12.0, 11.0)),
            GuessOutcome::Accepted {
                label: "first".to_string(),
                next_index: 1,
                complete: false,
            }
        );
        let outcome = puzzle.submit_guess(Point::new(54.0, 54.0));
        match outcome {
            GuessOutcome::Rejected { distance } => {
                assert!((distance - 32f64.sqrt()).abs() < 1e-9, "distance was {distance}")
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(puzzle.current_index(), 1, "Rejected guess moved the pointer");
    }

    #[test]
    fn test_exact_target_is_accepted() {
        let mut puzzle = two_targets();
        assert!(matches!(
            puzzle.submit_guess(Point::new(10.0, 10.0)),
            GuessOutcome::Accepted { .. }
        ));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let mut puzzle = two_targets();
        assert!(matches!(
            puzzle.submit_guess(Point::new(15.0 + 1e-6, 10.0)),
            GuessOutcome::Rejected { .. }
        ));
        assert!(matches!(
            puzzle.submit_guess(Point::new(13.0, 14.0)),
            GuessOutcome::Accepted { .. }
        ), "distance exactly 5 must be accepted");
        assert!(matches!(
            puzzle.submit_guess(Point::new(50.0, 45.0)),
            GuessOutcome::Accepted { complete: true, .. }
        ));
    }

    #[test]
    fn test_guesses_after_completion_are_ignored() {
        let mut puzzle = two_targets();
        puzzle.submit_guess(Point::new(10.0, 10.0));
        puzzle.submit_guess(Point::new(50.0, 50.0));
        assert!(puzzle.is_complete());
        assert_eq!(puzzle.current_target(), None);
        assert_eq!(puzzle.submit_guess(Point::new(50.0, 50.0)), GuessOutcome::AlreadyComplete);
        assert_eq!(puzzle.current_index(), 2);
    }

    #[test]
    fn test_shuffled_instance_keeps_every_target() {
        let mut rng = StdRng::seed_from_u64(4);
        let targets: Vec<Pin> = (0..6).map(|i| Pin::new(format!("p{i}"), i as f64, 0.0)).collect();
        let mut puzzle = PinMatch::new(targets.clone(), true, 1.0, &mut rng).unwrap();
        for _ in 0..5 {
            let mut labels: Vec<&str> = puzzle.targets().iter().map(|p| p.label.as_str()).collect();
            labels.sort();
            assert_eq!(labels, vec!["p0", "p1", "p2", "p3", "p4", "p5"]);
            puzzle.reset(&mut rng);
        }
    }

    #[test]
    fn test_restart_rewinds_pointer() {
        let mut puzzle = two_targets();
        let mut rng = StdRng::seed_from_u64(1);
        puzzle.submit_guess(Point::new(10.0, 10.0));
        puzzle.restart(&mut rng).unwrap();
        assert_eq!(puzzle.current_index(), 0);
        assert_eq!(puzzle.current_target().map(|p| p.label.as_str()), Some("first"));
    }

    #[test]
    fn test_new_validates_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            PinMatch::new(Vec::new(), false, 5.0, &mut rng).unwrap_err(),
            EngineError::NoTargets
        );
        assert_eq!(
            PinMatch::new(vec![Pin::new("a", 0.0, 0.0)], false, -1.0, &mut rng).unwrap_err(),
            EngineError::InvalidTolerance
        );
        assert_eq!(
            PinMatch::new(vec![Pin::new("a", 0.0, 0.0)], false, f64::NAN, &mut rng).unwrap_err(),
            EngineError::InvalidTolerance
        );
    }

    #[test]
    fn test_new_rejects_unreachable_targets() {
        let mut rng = StdRng::seed_from_u64(0);
        for (x, y) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 1.0)] {
            let targets = vec![Pin::new("ok", 1.0, 1.0), Pin::new("bad", x, y)];
            assert_eq!(
                PinMatch::new(targets, false, 5.0, &mut rng).unwrap_err(),
                EngineError::InvalidTarget("bad".to_string())
            );
        }
    }

    #[test]
    fn test_non_finite_guesses_are_rejected() {
        let mut puzzle = two_targets();
        for point in [
            Point::new(f64::NAN, f64::NAN),
            Point::new(f64::NAN, 10.0),
            Point::new(f64::INFINITY, 10.0),
            Point::new(10.0, f64::NEG_INFINITY),
        ] {
            assert!(
                matches!(puzzle.submit_guess(point), GuessOutcome::Rejected { .. }),
                "{point:?} was accepted"
            );
        }
        assert_eq!(puzzle.current_index(), 0);
        assert!(!puzzle.is_complete());
    }
}
