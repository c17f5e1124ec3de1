//! Weight modifiers: the pluggable pricing of a single step.
//!
//! The modifiers of an expansion are folded left to right: the first one
//! receives 0, each one receives what the previous one returned, and the
//! final value is the cost of the step. A modifier returning [`BLOCKED`]
//! ends the fold and the step is never taken.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tactica_core::{Dir, Pos};

use crate::options::{ExpandOptions, Step};

/// Step costs at or above this value make a terrain impassable.
pub const IMPASSABLE: i32 = 100;

/// Returned by a modifier to forbid a step outright.
pub const BLOCKED: i32 = i32::MAX;

/// Prices one directional step.
pub trait WeightModifier {
    /// Return `running` updated with this modifier's contribution to the
    /// cost of `step`.
    fn modify(&self, running: i32, options: &ExpandOptions, step: &Step) -> i32;
}

impl<F> WeightModifier for F
where
    F: Fn(i32, &ExpandOptions, &Step) -> i32,
{
    #[inline]
    fn modify(&self, running: i32, options: &ExpandOptions, step: &Step) -> i32 {
        self(running, options, step)
    }
}

/// Fold `modifiers` over `step`, starting from 0. `None` if any modifier
/// blocks the step; later modifiers are not called.
pub(crate) fn fold(
    modifiers: &[Rc<dyn WeightModifier>],
    options: &ExpandOptions,
    step: &Step,
) -> Option<i32> {
    modifiers.iter().try_fold(0, |running, m| {
        let next = m.modify(running, options, step);
        (next != BLOCKED).then_some(next)
    })
}

// ---------------------------------------------------------------------------
// Uniform
// ---------------------------------------------------------------------------

/// Every step costs the same.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Uniform(pub i32);

/// A modifier adding `n` to every step.
pub const fn uniform(n: i32) -> Uniform {
    Uniform(n)
}

impl WeightModifier for Uniform {
    fn modify(&self, running: i32, _options: &ExpandOptions, _step: &Step) -> i32 {
        running.saturating_add(self.0)
    }
}

// ---------------------------------------------------------------------------
// Surcharge
// ---------------------------------------------------------------------------

/// Adds a fixed cost to steps entering any of a set of cells, e.g. cells
/// holding hostile units.
#[derive(Clone, Debug, Default)]
pub struct Surcharge {
    cells: HashSet<Pos>,
    cost: i32,
}

impl Surcharge {
    /// Surcharge `cost` on entering any of `cells`.
    pub fn new(cells: impl IntoIterator<Item = Pos>, cost: i32) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            cost,
        }
    }
}

impl WeightModifier for Surcharge {
    fn modify(&self, running: i32, _options: &ExpandOptions, step: &Step) -> i32 {
        if self.cells.contains(&step.to) {
            running.saturating_add(self.cost)
        } else {
            running
        }
    }
}

// ---------------------------------------------------------------------------
// TerrainWeights
// ---------------------------------------------------------------------------

/// Per-terrain enter and exit costs, optionally per direction.
///
/// Terrains are plain integer ids. Entering a cell costs its terrain's
/// enter cost for the step direction (1 when unset); leaving a cell costs
/// its terrain's exit cost (0 when unset). An enter or exit cost of
/// [`IMPASSABLE`] or more blocks the step.
#[derive(Clone, Debug, Default)]
pub struct TerrainWeights {
    enter: HashMap<(i32, Dir), i32>,
    exit: HashMap<(i32, Dir), i32>,
    enter_any: HashMap<i32, i32>,
    exit_any: HashMap<i32, i32>,
}

impl TerrainWeights {
    /// Create an empty table: every terrain costs 1 to enter and 0 to leave.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set direction-independent enter and exit costs for `terrain`.
    pub fn set_simple(&mut self, terrain: i32, enter: i32, exit: i32) -> &mut Self {
        self.enter_any.insert(terrain, enter);
        self.exit_any.insert(terrain, exit);
        self
    }

    /// Override the cost of entering `terrain` with a step in `dir`.
    pub fn set_enter(&mut self, terrain: i32, dir: Dir, cost: i32) -> &mut Self {
        self.enter.insert((terrain, dir), cost);
        self
    }

    /// Override the cost of leaving `terrain` with a step in `dir`.
    pub fn set_exit(&mut self, terrain: i32, dir: Dir, cost: i32) -> &mut Self {
        self.exit.insert((terrain, dir), cost);
        self
    }

    /// Cost of entering `terrain` with a step in `dir`.
    pub fn enter_cost(&self, terrain: i32, dir: Dir) -> i32 {
        self.enter
            .get(&(terrain, dir))
            .or_else(|| self.enter_any.get(&terrain))
            .copied()
            .unwrap_or(1)
    }

    /// Cost of leaving `terrain` with a step in `dir`.
    pub fn exit_cost(&self, terrain: i32, dir: Dir) -> i32 {
        self.exit
            .get(&(terrain, dir))
            .or_else(|| self.exit_any.get(&terrain))
            .copied()
            .unwrap_or(0)
    }

    /// Cost of `step`, or `None` if the step is blocked. `terrain` maps a
    /// position to its terrain id.
    pub fn step_cost(&self, step: &Step, terrain: impl Fn(Pos) -> i32) -> Option<i32> {
        let exit = self.exit_cost(terrain(step.from), step.dir);
        let enter = self.enter_cost(terrain(step.to), step.dir);
        if exit >= IMPASSABLE || enter >= IMPASSABLE {
            return None;
        }
        Some(exit + enter)
    }

    /// Turn the table into a modifier. `terrain` maps a position to its
    /// terrain id; it is typically a lookup into shared map data.
    pub fn modifier<L>(self: Rc<Self>, terrain: L) -> TerrainModifier<L>
    where
        L: Fn(Pos) -> i32,
    {
        TerrainModifier {
            weights: self,
            terrain,
        }
    }
}

/// A [`TerrainWeights`] table bound to a terrain lookup.
pub struct TerrainModifier<L> {
    weights: Rc<TerrainWeights>,
    terrain: L,
}

impl<L> WeightModifier for TerrainModifier<L>
where
    L: Fn(Pos) -> i32,
{
    fn modify(&self, running: i32, _options: &ExpandOptions, step: &Step) -> i32 {
        match self.weights.step_cost(step, &self.terrain) {
            Some(cost) => running.saturating_add(cost),
            None => BLOCKED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(dir: Dir) -> Step {
        let from = Pos::flat(1, 1);
        Step {
            dir,
            from,
            to: from.translate(dir),
        }
    }

    #[test]
    fn fold_runs_left_to_right_from_zero() {
        let opts = ExpandOptions::default();
        let mods: Vec<Rc<dyn WeightModifier>> = vec![
            Rc::new(uniform(2)),
            Rc::new(|w: i32, _: &ExpandOptions, _: &Step| w * 3),
        ];
        assert_eq!(fold(&mods, &opts, &step(Dir::E)), Some(6));

        let reversed: Vec<Rc<dyn WeightModifier>> = vec![
            Rc::new(|w: i32, _: &ExpandOptions, _: &Step| w * 3),
            Rc::new(uniform(2)),
        ];
        assert_eq!(fold(&reversed, &opts, &step(Dir::E)), Some(2));
    }

    #[test]
    fn blocked_step_stops_the_fold() {
        let opts = ExpandOptions::default();
        let mut t = TerrainWeights::new();
        t.set_simple(1, IMPASSABLE, 0);
        let mods: Vec<Rc<dyn WeightModifier>> = vec![
            Rc::new(Rc::new(t).modifier(|p: Pos| if p.x == 2 { 1 } else { 0 })),
            Rc::new(|w: i32, _: &ExpandOptions, _: &Step| w + 1),
        ];
        assert_eq!(fold(&mods, &opts, &step(Dir::E)), None);
        assert_eq!(fold(&mods, &opts, &step(Dir::W)), Some(2));
    }

    #[test]
    fn surcharge_only_on_listed_cells() {
        let opts = ExpandOptions::default();
        let s = Surcharge::new([Pos::flat(2, 1)], 5);
        assert_eq!(s.modify(1, &opts, &step(Dir::E)), 6);
        assert_eq!(s.modify(1, &opts, &step(Dir::W)), 1);
    }

    #[test]
    fn terrain_defaults_and_overrides() {
        let mut t = TerrainWeights::new();
        t.set_simple(3, 2, 0).set_enter(3, Dir::N, 4).set_exit(5, Dir::E, 1);
        assert_eq!(t.enter_cost(0, Dir::E), 1);
        assert_eq!(t.exit_cost(0, Dir::E), 0);
        assert_eq!(t.enter_cost(3, Dir::E), 2);
        assert_eq!(t.enter_cost(3, Dir::N), 4);
        assert_eq!(t.exit_cost(5, Dir::E), 1);
        assert_eq!(t.exit_cost(5, Dir::W), 0);
    }

    #[test]
    fn terrain_modifier_blocks_impassable() {
        let mut t = TerrainWeights::new();
        t.set_simple(1, IMPASSABLE, 0).set_simple(2, 3, 1);
        let lookup = |p: Pos| if p.x == 2 { 1 } else if p.x == 0 { 2 } else { 0 };
        let m = Rc::new(t).modifier(lookup);
        let opts = ExpandOptions::default();
        assert_eq!(m.modify(0, &opts, &step(Dir::E)), BLOCKED);
        assert_eq!(m.modify(0, &opts, &step(Dir::W)), 3);
        assert_eq!(m.modify(0, &opts, &step(Dir::S)), 1);
    }

    #[test]
    fn uniform_saturates() {
        let opts = ExpandOptions::default();
        assert_eq!(uniform(1).modify(i32::MAX, &opts, &step(Dir::N)), i32::MAX);
    }
}
