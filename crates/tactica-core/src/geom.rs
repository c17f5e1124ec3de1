//! Geometry primitives: [`Pos`] and [`Bounds`].
//!
//! A battle map is a stack of 2D layers. `x` grows right, `y` grows down
//! (screen coordinates) and `z` selects the layer.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell position on a layered grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Pos {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Create a position on layer 0.
    #[inline]
    pub const fn flat(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Manhattan (L1) distance to `other`, layers included.
    #[inline]
    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}

// --- trait impls for Pos ---

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Layer-major, then row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for Pos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a layered grid: `cols × rows × layers` cells anchored at
/// the origin.
///
/// A position is inside when `0 <= x < cols`, `0 <= y < rows` and
/// `0 <= z < layers`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub cols: i32,
    pub rows: i32,
    pub layers: i32,
}

impl Bounds {
    /// Create new bounds. Negative sizes are clamped to zero.
    #[inline]
    pub fn new(cols: i32, rows: i32, layers: i32) -> Self {
        Self {
            cols: cols.max(0),
            rows: rows.max(0),
            layers: layers.max(0),
        }
    }

    /// Single-layer bounds.
    #[inline]
    pub fn flat(cols: i32, rows: i32) -> Self {
        Self::new(cols, rows, 1)
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && p.x < self.cols
            && p.y < self.rows
            && p.z < self.layers
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.cols as usize) * (self.rows as usize) * (self.layers as usize)
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Flat index of `p` (layer-major, then row-major), or `None` when off
    /// the grid.
    #[inline]
    pub fn index(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let plane = (self.cols as usize) * (self.rows as usize);
        Some(p.z as usize * plane + p.y as usize * self.cols as usize + p.x as usize)
    }

    /// Iterator over every position, layer by layer, each layer row-major.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Pos::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Pos;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.cols, self.rows, self.layers)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Pos,
}

impl Iterator for BoundsIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.bounds.is_empty() || self.cur.z >= self.bounds.layers {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.cols {
            self.cur.x = 0;
            self.cur.y += 1;
            if self.cur.y >= self.bounds.rows {
                self.cur.y = 0;
                self.cur.z += 1;
            }
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.z >= self.bounds.layers {
            return (0, Some(0));
        }
        let done = self.bounds.index(self.cur).unwrap_or(self.bounds.len());
        let left = self.bounds.len() - done;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BoundsIter {}
