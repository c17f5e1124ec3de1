//! Validators: predicates deciding whether a unit may stop on a cell.
//!
//! A vetoed cell still belongs to the region and can still be moved
//! through; it is only marked as not stoppable.

use std::collections::HashSet;
use std::rc::Rc;

use tactica_core::Pos;

use crate::options::ExpandOptions;

/// Decides whether a unit may end its action on `pos`.
pub trait Validator {
    fn validate(&self, pos: Pos, options: &ExpandOptions) -> bool;
}

impl<F> Validator for F
where
    F: Fn(Pos, &ExpandOptions) -> bool,
{
    #[inline]
    fn validate(&self, pos: Pos, options: &ExpandOptions) -> bool {
        self(pos, options)
    }
}

/// Run `validators` in order; the first veto wins.
pub(crate) fn all_pass(
    validators: &[Rc<dyn Validator>],
    pos: Pos,
    options: &ExpandOptions,
) -> bool {
    validators.iter().all(|v| v.validate(pos, options))
}

/// Vetoes a fixed set of cells, e.g. those occupied by other units.
///
/// The expansion origin is never vetoed: the acting unit stands there.
#[derive(Clone, Debug, Default)]
pub struct Unoccupied {
    occupied: HashSet<Pos>,
}

impl Unoccupied {
    pub fn new(occupied: impl IntoIterator<Item = Pos>) -> Self {
        Self {
            occupied: occupied.into_iter().collect(),
        }
    }
}

impl Validator for Unoccupied {
    fn validate(&self, pos: Pos, options: &ExpandOptions) -> bool {
        pos == options.origin || !self.occupied.contains(&pos)
    }
}

/// Vetoes every cell outside an inclusive box, e.g. a deployment zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Within {
    min: Pos,
    max: Pos,
}

impl Within {
    /// The box spanned by two opposite corners, in either order.
    pub fn new(a: Pos, b: Pos) -> Self {
        Self {
            min: Pos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Pos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }
}

impl Validator for Within {
    fn validate(&self, pos: Pos, _options: &ExpandOptions) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }
}
