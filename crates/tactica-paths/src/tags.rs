//! Sub-region tags: named, weight-agnostic annotations on cells.
//!
//! A region owns one [`SubRegionTags`] list per child region name. Every
//! cell committed by any child of that name is tagged there, so a display
//! layer can paint e.g. the union of all attack ranges of a move region
//! without walking the children.

use std::collections::HashMap;

use tactica_core::Pos;

use crate::region::Cell;

/// Receives every cell a region commits.
///
/// This is the hook for externally owned indexes such as "which regions
/// touch this cell". Sinks are write-only from the region's point of view;
/// nothing they hold feeds back into expansion.
pub trait RegionSink {
    /// `source` is the origin of the committing region.
    fn on_commit(&mut self, source: Pos, cell: &Cell);
}

/// One annotation at a tagged cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubEntry {
    /// Origin of the child region that produced the tag.
    pub source: Pos,
    /// Cumulative weight of the cell in that child region.
    pub weight: i32,
    pub stoppable: bool,
}

/// A tagged cell and every annotation it received.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubTile {
    pub pos: Pos,
    pub entries: Vec<SubEntry>,
}

/// A flat list of tagged cells, merged by coordinate, in first-tag order.
#[derive(Clone, Debug, Default)]
pub struct SubRegionTags {
    tiles: Vec<SubTile>,
    index: HashMap<Pos, usize>,
}

impl SubRegionTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `pos` with `entry`, appending to an existing tag at `pos`.
    pub fn add(&mut self, pos: Pos, entry: SubEntry) {
        match self.index.get(&pos) {
            Some(&i) => self.tiles[i].entries.push(entry),
            None => {
                self.index.insert(pos, self.tiles.len());
                self.tiles.push(SubTile {
                    pos,
                    entries: vec![entry],
                });
            }
        }
    }

    #[inline]
    pub fn has(&self, pos: Pos) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn get(&self, pos: Pos) -> Option<&SubTile> {
        self.index.get(&pos).map(|&i| &self.tiles[i])
    }

    #[inline]
    pub fn all(&self) -> &[SubTile] {
        &self.tiles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl RegionSink for SubRegionTags {
    fn on_commit(&mut self, source: Pos, cell: &Cell) {
        self.add(
            cell.pos,
            SubEntry {
                source,
                weight: cell.weight,
                stoppable: cell.stoppable,
            },
        );
    }
}
