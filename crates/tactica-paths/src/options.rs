use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tactica_core::{Dir, Neighborhood, Pos};

use crate::modifier::WeightModifier;
use crate::validator::Validator;

/// An inclusive `[min, max]` window of cumulative weights.
///
/// A cell is committed to a region only if its weight falls inside at least
/// one of the expansion's windows. Disjoint windows describe ring-shaped
/// ranges such as a bow that cannot hit adjacent tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeWindow {
    pub min: i32,
    pub max: i32,
}

impl RangeWindow {
    /// Create a new window.
    #[inline]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether `weight` lies inside the window.
    #[inline]
    pub const fn contains(self, weight: i32) -> bool {
        weight >= self.min && weight <= self.max
    }
}

impl From<(i32, i32)> for RangeWindow {
    fn from((min, max): (i32, i32)) -> Self {
        Self::new(min, max)
    }
}

/// One directional step being priced by the weight modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub dir: Dir,
    pub from: Pos,
    pub to: Pos,
}

/// Everything one [`Region::expand`] call needs.
///
/// Modifier and validator lists are optional: when absent, the region's own
/// lists (see [`Region::add_weight_modifier`]) are used. When present they
/// replace the region's lists for this and later expansions.
///
/// Child options are keyed by name and run in name order. Their `origin` is
/// ignored; each child is rooted at the parent cell that spawns it.
///
/// [`Region::expand`]: crate::Region::expand
/// [`Region::add_weight_modifier`]: crate::Region::add_weight_modifier
#[derive(Clone, Default)]
pub struct ExpandOptions {
    pub origin: Pos,
    pub ranges: Vec<RangeWindow>,
    pub weight_modifiers: Option<Vec<Rc<dyn WeightModifier>>>,
    pub validators: Option<Vec<Rc<dyn Validator>>>,
    pub children: BTreeMap<String, ExpandOptions>,
    pub neighborhood: Neighborhood,
    /// Also offer the `Dir::None` self-step and the step straight back to
    /// the parent. Neither can improve a committed weight; this exists for
    /// modifiers that observe every generated step.
    pub include_none: bool,
}

impl ExpandOptions {
    /// Options rooted at `origin` with no windows, modifiers or validators.
    pub fn new(origin: Pos) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Options for a child region. The origin is filled in by the parent region.
    pub fn child() -> Self {
        Self::default()
    }

    /// Add a `[min, max]` window (builder).
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.ranges.push(RangeWindow::new(min, max));
        self
    }

    /// Add several windows (builder).
    pub fn ranges<I, W>(mut self, windows: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<RangeWindow>,
    {
        self.ranges.extend(windows.into_iter().map(Into::into));
        self
    }

    /// Append a weight modifier (builder).
    pub fn weight_modifier(mut self, m: impl WeightModifier + 'static) -> Self {
        self.weight_modifiers
            .get_or_insert_with(Vec::new)
            .push(Rc::new(m));
        self
    }

    /// Append a closure weight modifier (builder).
    ///
    /// The closure receives the running step cost and returns it updated.
    pub fn weight_modifier_fn<F>(self, f: F) -> Self
    where
        F: Fn(i32, &ExpandOptions, &Step) -> i32 + 'static,
    {
        self.weight_modifier(f)
    }

    /// Append a validator (builder).
    pub fn validator(mut self, v: impl Validator + 'static) -> Self {
        self.validators.get_or_insert_with(Vec::new).push(Rc::new(v));
        self
    }

    /// Append a closure validator (builder).
    pub fn validator_fn<F>(self, f: F) -> Self
    where
        F: Fn(Pos, &ExpandOptions) -> bool + 'static,
    {
        self.validator(f)
    }

    /// Add a named child region (builder).
    pub fn child_region(mut self, name: impl Into<String>, child: ExpandOptions) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Set the direction set (builder).
    pub fn neighborhood(mut self, n: Neighborhood) -> Self {
        self.neighborhood = n;
        self
    }

    /// Set the `include_none` flag (builder).
    pub fn include_none(mut self, on: bool) -> Self {
        self.include_none = on;
        self
    }

    /// A copy of these options rooted at `origin`.
    pub fn rooted_at(&self, origin: Pos) -> Self {
        Self {
            origin,
            ..self.clone()
        }
    }

    /// The largest upper bound over all windows.
    pub fn max_range(&self) -> Option<i32> {
        self.ranges.iter().map(|w| w.max).max()
    }

    /// Whether `weight` falls inside at least one window.
    pub fn in_window(&self, weight: i32) -> bool {
        self.ranges.iter().any(|w| w.contains(weight))
    }
}

impl fmt::Debug for ExpandOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandOptions")
            .field("origin", &self.origin)
            .field("ranges", &self.ranges)
            .field(
                "weight_modifiers",
                &self.weight_modifiers.as_ref().map(Vec::len),
            )
            .field("validators", &self.validators.as_ref().map(Vec::len))
            .field("children", &self.children)
            .field("neighborhood", &self.neighborhood)
            .field("include_none", &self.include_none)
            .finish()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn window_round_trip() {
        let w = RangeWindow::new(2, 5);
        let json = serde_json::to_string(&w).unwrap();
        let back: RangeWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
