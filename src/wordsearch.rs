//! Word-search generation and selection matching.
//!
//! Generation works in whole passes:
//! - Words are placed longest first, each trying a bounded number of random
//!   (direction, origin) trials. Letters may overlap where they agree.
//! - If any word runs out of trials, the pass is thrown away and the next one
//!   starts from an empty grid.
//! - Remaining cells get uniform random letters, then every word is looked
//!   up again by an exhaustive scan before the grid is accepted.
//!
//! The number of passes is capped; exceeding it is a `GenerationExhausted`
//! error rather than a hang.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::code::{CodeAlphabet, UnlockCode};
use crate::error::EngineError;
use crate::geometry::{line_step, walk, Coord, DIRECTIONS};
use crate::grid::{LetterGrid, EMPTY};
use crate::PuzzleOps;

/// Tuning for grid generation and selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSearchConfig {
    /// Smallest grid dimension; grows to fit the longest word.
    pub min_size: usize,
    /// Random placement trials per word within one pass.
    pub trials_per_word: usize,
    /// Full passes before generation gives up.
    pub max_passes: usize,
    /// Shortest selection that is checked against the word list.
    pub min_selection: usize,
}

impl Default for WordSearchConfig {
    fn default() -> Self {
        Self {
            min_size: 10,
            trials_per_word: 100,
            max_passes: 200,
            min_selection: 3,
        }
    }
}

/// Result of matching a player's selected cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A new word was found. `cells` is the selected span, in selection order.
    Found { word: String, cells: Vec<Coord> },
    /// The selection spells a word that was already found.
    AlreadyFound(String),
    /// A valid line that spells no word, either way round.
    NoMatch,
    /// Cells do not form a straight or diagonal line.
    NotALine,
    /// Fewer cells than the minimum selection.
    TooShort,
    /// Some cell lies outside the grid.
    OutOfBounds,
}

/// Upper-cases, validates and deduplicates a word list, longest words first.
pub fn normalize_words<I, S>(words: I) -> Result<Vec<String>, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for word in words {
        let word = word.as_ref().trim().to_ascii_uppercase();
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(EngineError::InvalidWord(word));
        }
        normalized.push(word);
    }
    if normalized.is_empty() {
        return Err(EngineError::EmptyWordList);
    }

    // longest first, ties alphabetical so a seed always yields the same grid
    normalized.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    normalized.dedup();
    Ok(normalized)
}

/// Range of origins along one axis that keep a `len`-letter run inside
/// `size` cells when walking with component `step`.
fn origin_range(size: usize, len: usize, step: i32) -> std::ops::Range<i32> {
    let size = size as i32;
    let span = len as i32 - 1;
    match step {
        1 => 0..size - span,
        -1 => span..size,
        _ => 0..size,
    }
}

/// Attempts one random placement of `word`. Returns `true` if it was written.
fn try_place<R: Rng + ?Sized>(grid: &mut LetterGrid, word: &[u8], rng: &mut R) -> bool {
    let step = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
    let rows = origin_range(grid.size(), word.len(), step.0);
    let cols = origin_range(grid.size(), word.len(), step.1);
    if rows.is_empty() || cols.is_empty() {
        return false;
    }
    let origin = (rng.gen_range(rows), rng.gen_range(cols));

    // every cell must be empty or already hold the same letter
    let fits = walk(origin, step, word.len()).zip(word).all(|(coord, &letter)| {
        matches!(grid.get(coord), Some(cell) if cell == EMPTY || cell == letter)
    });
    if !fits {
        return false;
    }

    for (coord, &letter) in walk(origin, step, word.len()).zip(word) {
        grid.set(coord, letter);
    }
    true
}

/// Runs a single placement pass. Returns `None` if some word could not be placed.
fn placement_pass<R: Rng + ?Sized>(
    words: &[String],
    size: usize,
    trials_per_word: usize,
    rng: &mut R,
) -> Option<LetterGrid> {
    let mut grid = LetterGrid::empty(size);

    for word in words {
        let placed = (0..trials_per_word).any(|_| try_place(&mut grid, word.as_bytes(), rng));
        if !placed {
            tracing::debug!(word = %word, size, "word did not fit, discarding pass");
            return None;
        }
    }

    for cell in grid.cells_mut() {
        if *cell == EMPTY {
            *cell = rng.gen_range(b'A'..=b'Z');
        }
    }

    Some(grid)
}

/// Generates a grid containing every word in `words`.
///
/// `words` must already be normalized (see `normalize_words`). The grid
/// dimension is the larger of `config.min_size` and the longest word.
pub fn generate<R: Rng + ?Sized>(
    words: &[String],
    config: &WordSearchConfig,
    rng: &mut R,
) -> Result<LetterGrid, EngineError> {
    if words.is_empty() {
        return Err(EngineError::EmptyWordList);
    }
    let longest = words.iter().map(String::len).max().unwrap_or(0);
    let size = config.min_size.max(longest);

    for pass in 0..config.max_passes {
        let Some(grid) = placement_pass(words, size, config.trials_per_word, rng) else {
            continue;
        };

        // independent check of the finished grid, not trusting placement
        if let Some(missing) = words.iter().find(|word| !grid.contains_word(word)) {
            tracing::debug!(pass, word = %missing, "filled grid failed verification");
            continue;
        }

        tracing::debug!(pass, size, words = words.len(), "word search generated");
        return Ok(grid);
    }

    tracing::warn!(
        passes = config.max_passes,
        size,
        words = words.len(),
        "word search generation exhausted"
    );
    Err(EngineError::GenerationExhausted {
        passes: config.max_passes,
        size,
    })
}

/// Words shorter than the minimum selection could never be found.
fn check_selectable(words: &[String], config: &WordSearchConfig) -> Result<(), EngineError> {
    match words.iter().find(|word| word.len() < config.min_selection.max(2)) {
        Some(short) => Err(EngineError::InvalidWord(short.clone())),
        None => Ok(()),
    }
}

/// A word-search instance: the grid, its word list and progress.
#[derive(Clone, Debug)]
pub struct WordSearch {
    grid: LetterGrid,
    words: Vec<String>,
    found: FxHashSet<String>,
    config: WordSearchConfig,
}

impl WordSearch {
    /// Normalizes `words` and generates the first grid.
    pub fn new<I, S, R>(
        words: I,
        config: WordSearchConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let words = normalize_words(words)?;
        check_selectable(&words, &config)?;
        let grid = generate(&words, &config, rng)?;
        Ok(Self {
            grid,
            words,
            found: FxHashSet::default(),
            config,
        })
    }

    /// Wraps an existing grid, e.g. a hand-made one. Words must all be present.
    pub fn from_grid<I, S>(
        grid: LetterGrid,
        words: I,
        config: WordSearchConfig,
    ) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = normalize_words(words)?;
        check_selectable(&words, &config)?;
        if let Some(missing) = words.iter().find(|word| !grid.contains_word(word)) {
            return Err(EngineError::InvalidWord(missing.clone()));
        }
        Ok(Self {
            grid,
            words,
            found: FxHashSet::default(),
            config,
        })
    }

    /// Throws the grid and progress away and builds a new instance.
    ///
    /// On failure the current instance is left as it was.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.grid = generate(&self.words, &self.config, rng)?;
        self.found.clear();
        Ok(())
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    /// Target words, longest first.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains(word)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// True once every word has been found.
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.words.len()
    }

    /// Matches a selected path against the unfound words.
    ///
    /// The path must be a straight or diagonal run of at least
    /// `min_selection` cells, and its letters must spell a word exactly,
    /// forwards or backwards.
    pub fn match_selection(&mut self, path: &[Coord]) -> SelectionOutcome {
        if path.len() < self.config.min_selection.max(2) {
            return SelectionOutcome::TooShort;
        }
        if line_step(path).is_none() {
            return SelectionOutcome::NotALine;
        }
        let Some(forward) = self.grid.read_path(path) else {
            return SelectionOutcome::OutOfBounds;
        };
        let reverse: String = forward.chars().rev().collect();

        let mut already = None;
        for reading in [forward, reverse] {
            if !self.words.contains(&reading) {
                continue;
            }
            if self.found.contains(&reading) {
                already = Some(reading);
                continue;
            }
            self.found.insert(reading.clone());
            return SelectionOutcome::Found {
                word: reading,
                cells: path.to_vec(),
            };
        }

        match already {
            Some(word) => SelectionOutcome::AlreadyFound(word),
            None => SelectionOutcome::NoMatch,
        }
    }
}

impl PuzzleOps for WordSearch {
    fn kind(&self) -> &'static str {
        "word search"
    }

    fn is_solved(&self) -> bool {
        self.is_complete()
    }

    fn restart(&mut self, rng: &mut dyn rand::RngCore) -> Result<(), EngineError> {
        self.regenerate(rng)
    }

    fn unlock_code(&self, rng: &mut dyn rand::RngCore) -> Option<UnlockCode> {
        self.is_complete().then(|| UnlockCode::generate(rng))
    }

    fn code_alphabet(&self) -> CodeAlphabet {
        CodeAlphabet::UpperAlphanumeric
    }
}
