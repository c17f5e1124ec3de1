//! The open set of an expansion.
//!
//! Every position reached so far has exactly one entry, kept in insertion
//! order. Extraction yields the cheapest unprocessed entry; ties go to the
//! entry inserted first. Relaxing an entry keeps its insertion slot, so a
//! cheaper route found later does not change its tie-break rank.

use std::collections::{BinaryHeap, HashMap};

use tactica_core::{Dir, Pos};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CloudEntry {
    pub(crate) pos: Pos,
    pub(crate) weight: i32,
    pub(crate) step_weight: i32,
    pub(crate) parent_dir: Dir,
    pub(crate) processed: bool,
}

/// Reference into the entry list, ordered so that `BinaryHeap` (a max-heap)
/// pops the smallest weight first and, among equal weights, the smallest
/// insertion index.
#[derive(Clone, Copy, Eq, PartialEq)]
struct EntryRef {
    idx: usize,
    weight: i32,
}

impl Ord for EntryRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for EntryRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub(crate) struct Cloud {
    entries: Vec<CloudEntry>,
    index: HashMap<Pos, usize>,
    open: BinaryHeap<EntryRef>,
}

impl Cloud {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `pos` if unseen, or lower its weight if `weight` is strictly
    /// cheaper and the entry is still unprocessed.
    pub(crate) fn offer(&mut self, pos: Pos, weight: i32, step_weight: i32, parent_dir: Dir) {
        if let Some(&i) = self.index.get(&pos) {
            let e = &mut self.entries[i];
            if e.processed || weight >= e.weight {
                return;
            }
            e.weight = weight;
            e.step_weight = step_weight;
            e.parent_dir = parent_dir;
            self.open.push(EntryRef { idx: i, weight });
            return;
        }
        let idx = self.entries.len();
        self.entries.push(CloudEntry {
            pos,
            weight,
            step_weight,
            parent_dir,
            processed: false,
        });
        self.index.insert(pos, idx);
        self.open.push(EntryRef { idx, weight });
    }

    /// Mark the cheapest unprocessed entry processed and return a copy.
    pub(crate) fn take_cheapest(&mut self) -> Option<CloudEntry> {
        while let Some(top) = self.open.pop() {
            let e = &mut self.entries[top.idx];
            // Skip stale references left behind by relaxation.
            if e.processed || e.weight != top.weight {
                continue;
            }
            e.processed = true;
            return Some(*e);
        }
        None
    }

    /// Number of distinct positions ever reached.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cheapest_first() {
        let mut c = Cloud::new();
        c.offer(Pos::flat(0, 0), 3, 3, Dir::None);
        c.offer(Pos::flat(1, 0), 1, 1, Dir::E);
        c.offer(Pos::flat(2, 0), 2, 2, Dir::E);
        let order: Vec<_> = std::iter::from_fn(|| c.take_cheapest())
            .map(|e| e.weight)
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut c = Cloud::new();
        c.offer(Pos::flat(5, 0), 2, 1, Dir::E);
        c.offer(Pos::flat(1, 0), 2, 1, Dir::W);
        c.offer(Pos::flat(3, 0), 2, 1, Dir::N);
        let order: Vec<_> = std::iter::from_fn(|| c.take_cheapest())
            .map(|e| e.pos.x)
            .collect();
        assert_eq!(order, vec![5, 1, 3]);
    }

    #[test]
    fn relaxation_keeps_insertion_rank() {
        let mut c = Cloud::new();
        c.offer(Pos::flat(0, 0), 5, 5, Dir::E);
        c.offer(Pos::flat(1, 0), 2, 2, Dir::E);
        // Lower the first entry to tie with the second: it was inserted
        // first, so it now wins.
        c.offer(Pos::flat(0, 0), 2, 1, Dir::S);
        let first = c.take_cheapest().unwrap();
        assert_eq!(first.pos, Pos::flat(0, 0));
        assert_eq!(first.parent_dir, Dir::S);
        assert_eq!(first.step_weight, 1);
        assert_eq!(c.take_cheapest().unwrap().pos, Pos::flat(1, 0));
        // The stale reference at weight 5 is skipped.
        assert!(c.take_cheapest().is_none());
    }

    #[test]
    fn equal_or_processed_entries_are_not_relaxed() {
        let mut c = Cloud::new();
        c.offer(Pos::flat(0, 0), 0, 0, Dir::None);
        let origin = c.take_cheapest().unwrap();
        assert!(origin.processed);
        c.offer(Pos::flat(0, 0), -1, -1, Dir::E);
        c.offer(Pos::flat(1, 0), 1, 1, Dir::E);
        c.offer(Pos::flat(1, 0), 1, 1, Dir::S);
        let next = c.take_cheapest().unwrap();
        assert_eq!(next.parent_dir, Dir::E);
        assert!(c.take_cheapest().is_none());
        assert_eq!(c.len(), 2);
    }
}
