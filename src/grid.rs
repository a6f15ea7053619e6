//! Square letter grid for word-search puzzles.
//!
//! The grid is stored as a flat row-major array of ASCII uppercase letters,
//! with `EMPTY` marking cells that have not been filled yet.

use std::fmt;

use crate::geometry::{walk, Coord, DIRECTIONS};

/// Marker for a cell with no letter.
pub const EMPTY: u8 = 0;

/// Converts a `(row, col)` coordinate to a linear cell index.
///
/// Index order is row-major: `idx = row * size + col`. The caller must have
/// checked bounds.
#[inline(always)]
pub const fn coord_to_idx(size: usize, (row, col): Coord) -> usize {
    (row as usize) * size + (col as usize)
}

/// Converts a linear cell index back to `(row, col)`.
#[inline(always)]
pub const fn idx_to_coord(size: usize, cell_index: usize) -> Coord {
    ((cell_index / size) as i32, (cell_index % size) as i32)
}

/// An NxN grid of letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterGrid {
    size: usize,
    cells: Vec<u8>,
}

impl LetterGrid {
    /// Creates a grid with every cell empty.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    /// Builds a grid from equal-length rows of uppercase letters.
    ///
    /// Returns `None` unless the rows form a square of `A-Z`.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size || !row.bytes().all(|b| b.is_ascii_uppercase()) {
                return None;
            }
            cells.extend_from_slice(row.as_bytes());
        }
        Some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        let size = self.size as i32;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    /// Letter at `coord`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<u8> {
        self.in_bounds(coord)
            .then(|| self.cells[coord_to_idx(self.size, coord)])
    }

    #[inline]
    pub(crate) fn set(&mut self, coord: Coord, letter: u8) {
        let idx = coord_to_idx(self.size, coord);
        self.cells[idx] = letter;
    }

    /// Mutable view of every cell, for the fill step.
    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Returns `true` once no cell is `EMPTY`.
    pub fn is_filled(&self) -> bool {
        !self.cells.contains(&EMPTY)
    }

    /// Reads the letters along `path` in order.
    ///
    /// Returns `None` if any cell is outside the grid or still empty.
    pub fn read_path(&self, path: &[Coord]) -> Option<String> {
        path.iter()
            .map(|&coord| match self.get(coord)? {
                EMPTY => None,
                letter => Some(char::from(letter)),
            })
            .collect()
    }

    /// Finds a straight run spelling `word`, scanning every origin in all
    /// eight directions.
    ///
    /// Returns the origin and step of the first run found.
    pub fn find_word(&self, word: &str) -> Option<(Coord, Coord)> {
        let letters = word.as_bytes();
        if letters.is_empty() {
            return None;
        }

        for cell_index in 0..self.cells.len() {
            let origin = idx_to_coord(self.size, cell_index);
            if self.cells[cell_index] != letters[0] {
                continue;
            }
            for &step in &DIRECTIONS {
                let spelled = walk(origin, step, letters.len())
                    .zip(letters)
                    .all(|(coord, &letter)| self.get(coord) == Some(letter));
                if spelled {
                    return Some((origin, step));
                }
            }
        }

        None
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.find_word(word).is_some()
    }

    /// Iterates over rows as byte slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Formats the grid with row and column indices, for text frontends.
    pub fn format_with_coords(&self) -> String {
        let mut output = String::from("   ");
        let header: Vec<String> = (0..self.size).map(|col| format!("{col:>2}")).collect();
        output.push_str(&header.join(" "));
        output.push('\n');

        for (row, letters) in self.rows().enumerate() {
            output.push_str(&format!("{row:>2} "));
            let line: Vec<String> = letters
                .iter()
                .map(|&letter| format!("{:>2}", display_char(letter)))
                .collect();
            output.push_str(&line.join(" "));
            output.push('\n');
        }

        output
    }
}

fn display_char(letter: u8) -> char {
    if letter == EMPTY {
        '.'
    } else {
        char::from(letter)
    }
}

/// One row per line, letters separated by spaces. Empty cells show as '.'.
impl fmt::Display for LetterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letters in self.rows() {
            let mut first = true;
            for &letter in letters {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}", display_char(letter))?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
