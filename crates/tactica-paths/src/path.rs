//! Walks through a [`Region`]'s shortest-path tree.
//!
//! A [`Path`] is either reconstructed from the region ([`Path::find`]) or
//! built step by step as a cursor moves ([`Path::append`]). Moving the
//! cursor back over its last step pops that step instead of growing the
//! path, and a path whose weighted length passes its cap is replaced by the
//! region's shortest route to the same end.
//!
//! Failures are reported through [`Path::is_valid`], never as errors: a
//! dragged cursor passes through many unreachable cells on its way.

use std::fmt;

use tactica_core::{Dir, Pos};

use crate::region::Region;

/// One step of a path, copied from the region cell it lands on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub pos: Pos,
    pub dir: Dir,
    /// The region's single-step weight of `pos`.
    pub weight: i32,
    pub stoppable: bool,
}

/// Editing behaviour of a [`Path`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathOptions {
    /// Cap on [`Path::length_weight`]. Exceeding it re-derives the path.
    pub clamp: Option<i32>,
    /// Appending the inverse of the last step pops it.
    pub back_pop: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            clamp: None,
            back_pop: true,
        }
    }
}

/// A directed walk from a start cell to an end cell of a region.
#[derive(Clone, Debug)]
pub struct Path<'a> {
    region: &'a Region,
    options: PathOptions,
    start: Pos,
    end: Pos,
    steps: Vec<PathStep>,
    valid: bool,
    complete: bool,
}

impl<'a> Path<'a> {
    /// The shortest path from the region's origin to `pos`.
    pub fn new(region: &'a Region, pos: Pos) -> Self {
        let mut p = Self::empty(region);
        p.find(pos);
        p
    }

    /// A path with no steps at the region's origin.
    ///
    /// The path is invalid if the region was never expanded.
    pub fn empty(region: &'a Region) -> Self {
        let start = region.origin().unwrap_or_default();
        let mut p = Self {
            region,
            options: PathOptions::default(),
            start,
            end: start,
            steps: Vec::new(),
            valid: region.has(start),
            complete: false,
        };
        p.refresh_complete();
        p
    }

    /// Replace the editing options (builder).
    pub fn with_options(mut self, options: PathOptions) -> Self {
        self.options = options;
        self
    }

    /// Rebuild the path as the region's shortest route to `pos`.
    ///
    /// Walks parent steps back from `pos` to the origin. If the walk leaves
    /// the region the path is marked invalid and left empty.
    pub fn find(&mut self, pos: Pos) {
        self.steps.clear();
        self.end = pos;

        let mut rev = Vec::new();
        let mut cur = pos;
        loop {
            let Some(cell) = self.region.get(cur) else {
                return self.invalidate();
            };
            if cell.parent_dir == Dir::None {
                self.start = cur;
                break;
            }
            // A tree of n cells has no chain longer than n.
            if rev.len() >= self.region.len() {
                return self.invalidate();
            }
            rev.push(PathStep {
                pos: cur,
                dir: cell.parent_dir,
                weight: cell.step_weight,
                stoppable: cell.stoppable,
            });
            cur = cur.translate(cell.parent_dir.invert());
        }

        rev.reverse();
        self.steps = rev;
        self.valid = true;
        self.refresh_complete();
    }

    fn invalidate(&mut self) {
        self.steps.clear();
        self.valid = false;
        self.complete = false;
    }

    /// Re-derive the shortest route to the current end.
    pub fn optimise(&mut self) {
        self.find(self.end);
    }

    /// Move the end of the path one step in `dir`. [`Dir::None`] does
    /// nothing.
    ///
    /// Reversing the last step pops it (with `back_pop`). Stepping onto a
    /// cell outside the region marks the path invalid and changes nothing
    /// else. If the step pushes the weighted length past the cap, the path
    /// is re-derived; if even the shortest route is over the cap, the step
    /// is rejected and the path marked invalid.
    pub fn append(&mut self, dir: Dir) {
        if dir == Dir::None {
            return;
        }
        if self.options.back_pop && self.steps.last().is_some_and(|s| s.dir == dir.invert()) {
            self.steps.pop();
            self.end = self.steps.last().map_or(self.start, |s| s.pos);
            self.refresh_complete();
            return;
        }

        let target = self.end.translate(dir);
        let Some(cell) = self.region.get(target) else {
            self.valid = false;
            return;
        };
        self.steps.push(PathStep {
            pos: target,
            dir,
            weight: cell.step_weight,
            stoppable: cell.stoppable,
        });
        self.end = target;

        if let Some(cap) = self.options.clamp {
            if self.length_weight() > cap {
                self.reoptimise(cap);
            }
        }
        self.refresh_complete();
    }

    fn reoptimise(&mut self, cap: i32) {
        log::trace!("path to {} exceeds cap {cap}, re-deriving", self.end);
        let mut previous = std::mem::take(&mut self.steps);
        previous.pop();
        self.find(self.end);
        if !self.valid || self.length_weight() > cap {
            log::trace!("shortest route to {} is still over cap {cap}", self.end);
            self.end = previous.last().map_or(self.start, |s| s.pos);
            self.steps = previous;
            self.valid = false;
        }
    }

    /// Append every direction of `dirs` in order.
    pub fn follow(&mut self, dirs: &[Dir]) {
        for &d in dirs {
            self.append(d);
        }
    }

    fn refresh_complete(&mut self) {
        self.complete = match self.steps.last() {
            Some(s) => s.stoppable,
            None => self.region.get(self.start).is_some_and(|c| c.stoppable),
        };
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn region(&self) -> &'a Region {
        self.region
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// `false` once a reconstruction or step left the region.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether a unit may stop at the end of the path.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    pub fn options(&self) -> PathOptions {
        self.options
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of the steps' single-step weights.
    pub fn length_weight(&self) -> i32 {
        self.steps.iter().map(|s| s.weight).sum()
    }

    /// Whether the path visits `pos`, start included.
    pub fn has(&self, pos: Pos) -> bool {
        self.start == pos || self.steps.iter().any(|s| s.pos == pos)
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The direction sequence from start to end.
    pub fn dirs(&self) -> Vec<Dir> {
        self.steps.iter().map(|s| s.dir).collect()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Path {} ", self.start)?;
        for s in &self.steps {
            write!(f, "{}", s.dir)?;
        }
        write!(f, " {}]", self.end)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_round_trip() {
        let s = PathStep {
            pos: Pos::new(1, 2, 0),
            dir: Dir::E,
            weight: 2,
            stoppable: true,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: PathStep = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
