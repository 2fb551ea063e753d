//! Grid geometry: coordinates, 1-wide ship rectangles and grid dimensions.
//!
//! Everything here is pure arithmetic. Coordinates are signed so that
//! neighbours of edge cells can be formed first and filtered by the grid
//! afterwards.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Add, Sub};

use crate::common::BoardError;

/// A cell position on the grid, ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

/// Offset between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub d_row: i32,
    pub d_col: i32,
}

/// Orientation of a ship footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Number of rows and columns of a board, both at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDimensions")
)]
pub struct GridDimensions {
    rows: i32,
    cols: i32,
}

/// Unchecked wire form of [`GridDimensions`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawDimensions {
    rows: i32,
    cols: i32,
}

#[cfg(feature = "std")]
impl TryFrom<RawDimensions> for GridDimensions {
    type Error = BoardError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        GridDimensions::new(raw.rows, raw.cols)
    }
}

/// Footprint of a ship: two endpoint coordinates, `start <= end`.
///
/// A `Rect` is not validated on construction; the board decides whether a
/// given rect is a legal placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub start: Coord,
    pub end: Coord,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Canonical `"<row>,<col>"` key.
    pub fn key(&self) -> String {
        alloc::format!("{},{}", self.row, self.col)
    }

    /// Parse a key produced by [`Coord::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        let (row, col) = key.split_once(',')?;
        Some(Self::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
    }

    /// Orthogonal neighbours in the order up, right, down, left.
    pub fn neighbours4(&self) -> [Coord; 4] {
        let Coord { row, col } = *self;
        [
            Coord::new(row - 1, col),
            Coord::new(row, col + 1),
            Coord::new(row + 1, col),
            Coord::new(row, col - 1),
        ]
    }

    /// Diagonal neighbours, clockwise from the upper right.
    pub fn diagonals(&self) -> [Coord; 4] {
        let Coord { row, col } = *self;
        [
            Coord::new(row - 1, col + 1),
            Coord::new(row + 1, col + 1),
            Coord::new(row + 1, col - 1),
            Coord::new(row - 1, col - 1),
        ]
    }

    /// All eight neighbours, clockwise from straight up.
    pub fn neighbours8(&self) -> [Coord; 8] {
        let Coord { row, col } = *self;
        [
            Coord::new(row - 1, col),
            Coord::new(row - 1, col + 1),
            Coord::new(row, col + 1),
            Coord::new(row + 1, col + 1),
            Coord::new(row + 1, col),
            Coord::new(row + 1, col - 1),
            Coord::new(row, col - 1),
            Coord::new(row - 1, col - 1),
        ]
    }

    pub fn neighbours4_within(&self, dims: GridDimensions) -> Vec<Coord> {
        self.neighbours4()
            .into_iter()
            .filter(|c| dims.contains(*c))
            .collect()
    }

    pub fn diagonals_within(&self, dims: GridDimensions) -> Vec<Coord> {
        self.diagonals()
            .into_iter()
            .filter(|c| dims.contains(*c))
            .collect()
    }

    /// True if `other` shares an edge with `self`.
    pub fn is_adjacent4(&self, other: Coord) -> bool {
        self.neighbours4().contains(&other)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

impl Add<Step> for Coord {
    type Output = Coord;

    fn add(self, step: Step) -> Coord {
        Coord::new(self.row + step.d_row, self.col + step.d_col)
    }
}

impl Sub for Coord {
    type Output = Step;

    fn sub(self, other: Coord) -> Step {
        Step::new(self.row - other.row, self.col - other.col)
    }
}

impl Step {
    pub const fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }

    /// The same step pointing the other way.
    pub fn neg(self) -> Self {
        Self::new(-self.d_row, -self.d_col)
    }
}

impl GridDimensions {
    pub fn new(rows: i32, cols: i32) -> Result<Self, BoardError> {
        if rows < 1 || cols < 1 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Square grid for compile-time sides, which are always positive.
    pub(crate) const fn square(side: i32) -> Self {
        Self {
            rows: side,
            cols: side,
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Longest side of the grid.
    pub fn max_side(&self) -> i32 {
        self.rows.max(self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Every cell of the grid, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }

    /// Index of `c` in row-major order. `c` must be inside the grid.
    pub(crate) fn index_of(&self, c: Coord) -> usize {
        c.row as usize * self.cols as usize + c.col as usize
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl Rect {
    pub const fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }

    /// Rect spanning `a` and `b` with the endpoints put in order.
    pub fn normalized(a: Coord, b: Coord) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// Rect spanning a set of collinear cells.
    pub fn spanning(cells: &[Coord]) -> Option<Self> {
        let start = *cells.iter().min()?;
        let end = *cells.iter().max()?;
        Some(Self::new(start, end))
    }

    pub fn height(&self) -> i32 {
        self.end.row - self.start.row + 1
    }

    pub fn width(&self) -> i32 {
        self.end.col - self.start.col + 1
    }

    /// Ship length covered by this rect.
    pub fn len(&self) -> usize {
        self.height().max(self.width()).max(0) as usize
    }

    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.start.row == self.end.row || self.start.col == self.end.col
    }

    /// Horizontal when both ends share a row; single cells count as horizontal.
    pub fn orientation(&self) -> Orientation {
        if self.start.row == self.end.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The rect grown by one cell on every side.
    pub fn padded(&self) -> Rect {
        Rect::new(
            Coord::new(self.start.row - 1, self.start.col - 1),
            Coord::new(self.end.row + 1, self.end.col + 1),
        )
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let rows = !(self.end.row < other.start.row || self.start.row > other.end.row);
        let cols = !(self.end.col < other.start.col || self.start.col > other.end.col);
        rows && cols
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.row >= self.start.row
            && c.row <= self.end.row
            && c.col >= self.start.col
            && c.col <= self.end.col
    }

    pub fn within(&self, dims: GridDimensions) -> bool {
        dims.contains(self.start) && dims.contains(self.end)
    }

    /// Every cell inside the rect, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Rect { start, end } = *self;
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| Coord::new(row, col)))
    }

    /// Cell at `pos` along the ship, counting from `start`.
    pub fn cell_at(&self, pos: usize) -> Coord {
        match self.orientation() {
            Orientation::Horizontal => Coord::new(self.start.row, self.start.col + pos as i32),
            Orientation::Vertical => Coord::new(self.start.row + pos as i32, self.start.col),
        }
    }

    /// Position of `c` along the ship. `c` must be inside the rect.
    pub fn position_of(&self, c: Coord) -> usize {
        match self.orientation() {
            Orientation::Horizontal => (c.col - self.start.col) as usize,
            Orientation::Vertical => (c.row - self.start.row) as usize,
        }
    }

    /// Cells bordering the rect (orthogonally or diagonally), clockwise from
    /// the upper-left corner.
    pub fn ring(&self) -> Vec<Coord> {
        let Rect { start, end } = *self;
        let mut ring = Vec::with_capacity(2 * (self.width() + self.height()) as usize + 4);
        for col in start.col - 1..=end.col + 1 {
            ring.push(Coord::new(start.row - 1, col));
        }
        for row in start.row..=end.row + 1 {
            ring.push(Coord::new(row, end.col + 1));
        }
        for col in (start.col - 1..=end.col).rev() {
            ring.push(Coord::new(end.row + 1, col));
        }
        for row in (start.row..=end.row).rev() {
            ring.push(Coord::new(row, start.col - 1));
        }
        ring
    }

    pub fn ring_within(&self, dims: GridDimensions) -> Vec<Coord> {
        self.ring().into_iter().filter(|c| dims.contains(*c)).collect()
    }

    /// Canonical `"<r1>,<c1>_<r2>,<c2>"` key.
    pub fn key(&self) -> String {
        alloc::format!("{}_{}", self.start.key(), self.end.key())
    }

    /// Parse a key produced by [`Rect::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        let (start, end) = key.split_once('_')?;
        Some(Self::new(Coord::from_key(start)?, Coord::from_key(end)?))
    }

    /// Order by start, then by end.
    pub fn cmp_by_coords(&self, other: &Rect) -> core::cmp::Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }
}

impl From<((i32, i32), (i32, i32))> for Rect {
    fn from((start, end): ((i32, i32), (i32, i32))) -> Self {
        Self::new(start.into(), end.into())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Canonical signature of a set of rects: sorted keys joined by `|`.
pub fn placement_signature(rects: &[Rect]) -> String {
    let mut sorted = rects.to_vec();
    sorted.sort_by(Rect::cmp_by_coords);
    let keys: Vec<String> = sorted.iter().map(Rect::key).collect();
    keys.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(a: (i32, i32), b: (i32, i32)) -> Rect {
        Rect::from((a, b))
    }

    #[test]
    fn coords_order_row_major() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(2, 1) < Coord::new(2, 3));
        let mut v = alloc::vec![Coord::new(3, 0), Coord::new(0, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, alloc::vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(3, 0)]);
    }

    #[test]
    fn keys_parse_back() {
        let c = Coord::new(-1, 12);
        assert_eq!(c.key(), "-1,12");
        assert_eq!(Coord::from_key("-1,12"), Some(c));
        assert_eq!(Coord::from_key("nope"), None);

        let r = rect((1, 2), (1, 4));
        assert_eq!(r.key(), "1,2_1,4");
        assert_eq!(Rect::from_key("1,2_1,4"), Some(r));
        assert_eq!(Rect::from_key("1,2"), None);
    }

    #[test]
    fn rect_measures() {
        let h = rect((1, 1), (1, 3));
        assert_eq!(h.len(), 3);
        assert_eq!(h.orientation(), Orientation::Horizontal);
        let v = rect((0, 4), (3, 4));
        assert_eq!(v.len(), 4);
        assert_eq!(v.orientation(), Orientation::Vertical);
        assert_eq!(rect((2, 2), (2, 2)).len(), 1);
        assert!(!rect((0, 0), (1, 1)).is_axis_aligned());
        assert!(!rect((1, 3), (1, 1)).is_well_formed());
    }

    #[test]
    fn ring_surrounds_rect() {
        let r = rect((1, 1), (1, 2));
        let ring = r.ring();
        assert_eq!(ring.len(), 10);
        assert_eq!(ring[0], Coord::new(0, 0));
        for c in &ring {
            assert!(r.padded().contains(*c));
            assert!(!r.contains(*c));
        }

        let dims = GridDimensions::new(3, 3).unwrap();
        let corner = rect((0, 0), (0, 0));
        let mut within = corner.ring_within(dims);
        within.sort();
        assert_eq!(
            within,
            alloc::vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]
        );
    }

    #[test]
    fn padded_overlap_detects_adjacency() {
        let a = rect((0, 0), (0, 2));
        assert!(a.padded().overlaps(&rect((1, 3), (1, 3)).padded()));
        assert!(a.padded().overlaps(&rect((1, 3), (1, 3))));
        assert!(!a.padded().overlaps(&rect((2, 0), (2, 2))));
    }

    #[test]
    fn positions_along_ship() {
        let v = rect((2, 5), (5, 5));
        assert_eq!(v.cell_at(2), Coord::new(4, 5));
        assert_eq!(v.position_of(Coord::new(5, 5)), 3);
        let cells: Vec<Coord> = v.cells().collect();
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn dimensions_reject_empty_grid() {
        assert!(GridDimensions::new(0, 3).is_err());
        let dims = GridDimensions::new(2, 3).unwrap();
        assert_eq!(dims.cells().count(), 6);
        assert!(!dims.contains(Coord::new(2, 0)));
        assert!(!dims.contains(Coord::new(0, -1)));
        assert_eq!(Coord::new(0, 0).neighbours4_within(dims).len(), 2);
    }

    #[cfg(feature = "std")]
    #[test]
    fn dimensions_deserialize_through_validation() {
        let dims: GridDimensions = serde_json::from_str(r#"{"rows":4,"cols":7}"#).unwrap();
        assert_eq!(dims, GridDimensions::new(4, 7).unwrap());
        assert_eq!(
            serde_json::to_string(&dims).unwrap(),
            r#"{"rows":4,"cols":7}"#
        );
        assert!(serde_json::from_str::<GridDimensions>(r#"{"rows":0,"cols":3}"#).is_err());
        assert!(serde_json::from_str::<GridDimensions>(r#"{"rows":2,"cols":-1}"#).is_err());
    }

    #[test]
    fn signature_is_order_independent() {
        let a = rect((0, 0), (0, 1));
        let b = rect((3, 3), (5, 3));
        assert_eq!(placement_signature(&[b, a]), placement_signature(&[a, b]));
        assert_eq!(placement_signature(&[a, b]), "0,0_0,1|3,3_5,3");
    }
}
