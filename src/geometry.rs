//! Line and distance utilities.
//!
//! Grid coordinates are `(row, col)` pairs. A word in the grid runs along one
//! of eight unit steps: the four axis directions and the four diagonals.
//! Map coordinates are continuous points in puzzle space.

/// A grid coordinate `(row, col)`. Signed so steps can walk off the edge.
pub type Coord = (i32, i32);

/// All eight unit steps `(d_row, d_col)` a word may follow.
///
/// Ordered as:
/// - 0-3: axis steps (right, left, down, up)
/// - 4-7: diagonal steps (down-right, up-left, down-left, up-right)
pub const DIRECTIONS: [Coord; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Returns the constant unit step of a path, if it has one.
///
/// A path qualifies when it holds at least two cells and every consecutive
/// pair differs by the same step, with each component in `{-1, 0, 1}` and
/// not both zero. Single cells carry no direction and return `None`.
pub fn line_step(path: &[Coord]) -> Option<Coord> {
    let (first, second) = match path {
        [first, second, ..] => (*first, *second),
        _ => return None,
    };

    let step = delta(first, second)?;
    if !DIRECTIONS.contains(&step) {
        return None;
    }

    let straight = path
        .windows(2)
        .all(|pair| delta(pair[0], pair[1]) == Some(step));

    straight.then_some(step)
}

/// Difference `to - from`, or `None` if a component overflows `i32`.
#[inline]
fn delta(from: Coord, to: Coord) -> Option<Coord> {
    Some((to.0.checked_sub(from.0)?, to.1.checked_sub(from.1)?))
}

/// Cells visited from `origin` taking `len` steps of `step`, origin included.
pub fn walk(origin: Coord, step: Coord, len: usize) -> impl Iterator<Item = Coord> {
    (0..len as i32).map(move |i| (origin.0 + step.0 * i, origin.1 + step.1 * i))
}

/// A point in puzzle space, already mapped from screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
