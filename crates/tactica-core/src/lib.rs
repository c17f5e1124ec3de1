//! **tactica-core** — grid geometry for tactics-style games.
//!
//! This crate provides the foundational types shared by the *tactica*
//! crates: a layered grid position ([`Pos`]), the grid extent ([`Bounds`]),
//! the step vocabulary ([`Dir`]) and the direction sets a search may walk
//! ([`Neighborhood`]).

pub mod dir;
pub mod geom;

pub use dir::{Dir, Neighborhood};
pub use geom::{Bounds, BoundsIter, Pos};
