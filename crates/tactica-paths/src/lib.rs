//! Movement and attack ranges for turn-based tactics grids.
//!
//! A [`Region`] is the set of cells a unit can reach from an origin within
//! a weighted range:
//!
//! - **Expansion** is a bounded uniform-cost search ([`Region::expand`]),
//!   restricted to one or more [`RangeWindow`]s.
//! - **Children** are nested regions expanded from every stoppable cell,
//!   e.g. the attack range around each move destination
//!   ([`ExpandOptions::child_region`]). Their cells are also tagged on the
//!   parent by name ([`Region::all_sub`]).
//! - **Paths** walk the region's shortest-path tree ([`Region::path_to`])
//!   or follow a cursor step by step ([`Path::append`]).
//!
//! Step pricing and stop rules are pluggable:
//!
//! | Trait | Decides |
//! |---|---|
//! | [`WeightModifier`] | the cost of one step, folded over every modifier |
//! | [`Validator`] | whether a unit may stop on a cell |
//! | [`RegionSink`] | where committed cells are reported |
//!
//! Closures with the right signature implement the first two directly.

mod cloud;
mod describe;
mod error;
mod modifier;
mod options;
mod path;
mod region;
mod tags;
mod validator;

#[cfg(test)]
mod properties;

pub use error::RegionError;
pub use modifier::{
    BLOCKED, IMPASSABLE, Surcharge, TerrainModifier, TerrainWeights, Uniform, WeightModifier,
    uniform,
};
pub use options::{ExpandOptions, RangeWindow, Step};
pub use path::{Path, PathOptions, PathStep};
pub use region::{Cell, Region};
pub use tags::{RegionSink, SubEntry, SubRegionTags, SubTile};
pub use validator::{Unoccupied, Validator, Within};
