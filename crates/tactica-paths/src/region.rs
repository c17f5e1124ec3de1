use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tactica_core::{Bounds, Dir, Pos};

use crate::cloud::Cloud;
use crate::error::RegionError;
use crate::modifier::{self, WeightModifier};
use crate::options::{ExpandOptions, Step};
use crate::path::{Path, PathOptions};
use crate::tags::{RegionSink, SubEntry, SubRegionTags, SubTile};
use crate::validator::{self, Validator};

/// One committed cell of a [`Region`].
#[derive(Clone, Debug)]
pub struct Cell {
    pub pos: Pos,
    /// Total cost from the origin.
    pub weight: i32,
    /// Cost of the last step only.
    pub step_weight: i32,
    /// The step that arrived here; `parent_dir.invert()` leads back to the
    /// predecessor. [`Dir::None`] for the origin.
    pub parent_dir: Dir,
    /// Whether a unit may end its action here. Non-stoppable cells still
    /// count towards range and can be moved through.
    pub stoppable: bool,
    children: BTreeMap<String, Region>,
}

impl Cell {
    /// The nested region named `name` rooted at this cell.
    pub fn child(&self, name: &str) -> Option<&Region> {
        self.children.get(name)
    }

    /// All nested regions rooted at this cell, in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Position of the predecessor, or `None` for the origin.
    #[inline]
    pub fn parent(&self) -> Option<Pos> {
        (self.parent_dir != Dir::None).then(|| self.pos.translate(self.parent_dir.invert()))
    }
}

/// The set of cells reachable from an origin within a weighted range.
///
/// A region is built empty and filled by [`Region::expand`], a bounded
/// uniform-cost expansion over the grid. Each committed cell records the
/// step that reached it, so the cells form a shortest-path tree rooted at
/// the origin that [`Path`] can walk back.
///
/// Cells live in one vector in commit order, looked up through a
/// coordinate index. Child regions are owned by the cell they are rooted
/// at.
#[derive(Clone)]
pub struct Region {
    bounds: Bounds,
    cells: Vec<Cell>,
    index: HashMap<Pos, usize>,
    origin: Option<Pos>,
    max_range: i32,
    weight_modifiers: Vec<Rc<dyn WeightModifier>>,
    validators: Vec<Rc<dyn Validator>>,
    tags: BTreeMap<String, SubRegionTags>,
}

impl Region {
    /// Create an empty region over a grid of the given extent.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: Vec::new(),
            index: HashMap::new(),
            origin: None,
            max_range: 0,
            weight_modifiers: Vec::new(),
            validators: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Append a default weight modifier, used by expansions whose options
    /// carry none.
    pub fn add_weight_modifier(&mut self, m: impl WeightModifier + 'static) {
        self.weight_modifiers.push(Rc::new(m));
    }

    /// Append a default validator, used by expansions whose options carry
    /// none.
    pub fn add_validator(&mut self, v: impl Validator + 'static) {
        self.validators.push(Rc::new(v));
    }

    /// Drop every cell, child region and tag.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
        self.tags.clear();
        self.origin = None;
        self.max_range = 0;
    }

    // -----------------------------------------------------------------------
    // Expansion
    // -----------------------------------------------------------------------

    /// Fill the region from `options`, discarding previous contents.
    ///
    /// # Errors
    ///
    /// Returns a [`RegionError`] if the options (children included) are
    /// misconfigured. The region is left empty in that case.
    pub fn expand(&mut self, options: &ExpandOptions) -> Result<(), RegionError> {
        self.run(options, None)
    }

    /// Like [`Region::expand`], additionally reporting every committed cell
    /// of this region to `sink`.
    ///
    /// # Errors
    ///
    /// See [`Region::expand`].
    pub fn expand_into(
        &mut self,
        options: &ExpandOptions,
        sink: &mut dyn RegionSink,
    ) -> Result<(), RegionError> {
        self.run(options, Some(sink))
    }

    fn run(
        &mut self,
        options: &ExpandOptions,
        mut sink: Option<&mut dyn RegionSink>,
    ) -> Result<(), RegionError> {
        self.clear();
        check(options, !self.weight_modifiers.is_empty(), Some(self.bounds))?;

        if let Some(m) = &options.weight_modifiers {
            self.weight_modifiers = m.clone();
        }
        if let Some(v) = &options.validators {
            self.validators = v.clone();
        }

        let origin = options.origin;
        let max_range = options.max_range().unwrap_or(0);
        self.origin = Some(origin);
        self.max_range = max_range;

        log::debug!(
            "expanding region from {origin} over {} window(s), max range {max_range}",
            options.ranges.len()
        );

        let mut dirs: Vec<Dir> = Vec::with_capacity(11);
        if options.include_none {
            dirs.push(Dir::None);
        }
        dirs.extend_from_slice(options.neighborhood.dirs());

        let mut cloud = Cloud::new();
        cloud.offer(origin, 0, 0, Dir::None);

        while let Some(e) = cloud.take_cheapest() {
            if options.in_window(e.weight) && !self.index.contains_key(&e.pos) {
                let stoppable = validator::all_pass(&self.validators, e.pos, options);
                let idx = self.commit(Cell {
                    pos: e.pos,
                    weight: e.weight,
                    step_weight: e.step_weight,
                    parent_dir: e.parent_dir,
                    stoppable,
                    children: BTreeMap::new(),
                });
                if let Some(sink) = sink.as_deref_mut() {
                    sink.on_commit(origin, &self.cells[idx]);
                }
                if stoppable && !options.children.is_empty() {
                    self.spawn_children(idx, options)?;
                }
            }

            // Cells outside every window are still expanded through, so
            // that ring-shaped windows can be reached.
            let back = e.parent_dir.invert();
            for &dir in &dirs {
                if !options.include_none && dir == back {
                    continue;
                }
                let to = e.pos.translate(dir);
                if !self.bounds.contains(to) {
                    continue;
                }
                let step = Step {
                    dir,
                    from: e.pos,
                    to,
                };
                let Some(cost) = modifier::fold(&self.weight_modifiers, options, &step) else {
                    continue;
                };
                let candidate = e.weight.saturating_add(cost);
                if candidate > max_range {
                    continue;
                }
                cloud.offer(to, candidate, cost, dir);
            }
        }

        log::debug!(
            "region from {origin} committed {} of {} reached cell(s)",
            self.cells.len(),
            cloud.len()
        );
        Ok(())
    }

    fn commit(&mut self, cell: Cell) -> usize {
        let idx = self.cells.len();
        self.index.insert(cell.pos, idx);
        self.cells.push(cell);
        idx
    }

    fn spawn_children(&mut self, idx: usize, options: &ExpandOptions) -> Result<(), RegionError> {
        let root = self.cells[idx].pos;
        for (name, child_opts) in &options.children {
            log::trace!("expanding child region \"{name}\" at {root}");
            let mut child = Region::new(self.bounds);
            let tags = self.tags.entry(name.clone()).or_default();
            child
                .run(&child_opts.rooted_at(root), Some(tags as &mut dyn RegionSink))
                .map_err(|source| RegionError::Child {
                    name: name.clone(),
                    source: Box::new(source),
                })?;
            self.cells[idx].children.insert(name.clone(), child);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The grid extent.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Origin of the last expansion, if any.
    #[inline]
    pub fn origin(&self) -> Option<Pos> {
        self.origin
    }

    /// Largest window bound of the last expansion.
    #[inline]
    pub fn max_range(&self) -> i32 {
        self.max_range
    }

    /// Whether `pos` lies on the grid, regardless of whether it was reached.
    #[inline]
    pub fn in_range(&self, pos: Pos) -> bool {
        self.bounds.contains(pos)
    }

    #[inline]
    pub fn has(&self, pos: Pos) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.index.get(&pos).map(|&i| &self.cells[i])
    }

    /// Every committed cell, in commit (non-decreasing weight) order.
    #[inline]
    pub fn all(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The child region `name` rooted at `pos`.
    pub fn get_child(&self, pos: Pos, name: &str) -> Option<&Region> {
        self.get(pos).and_then(|c| c.child(name))
    }

    // -----------------------------------------------------------------------
    // Sub-region tags
    // -----------------------------------------------------------------------

    /// Tag `pos` in the channel `name`.
    pub fn add_sub_region_tile(&mut self, name: &str, pos: Pos, entry: SubEntry) {
        self.tags
            .entry(name.to_string())
            .or_default()
            .add(pos, entry);
    }

    pub fn sub_has(&self, name: &str, pos: Pos) -> bool {
        self.tags.get(name).is_some_and(|t| t.has(pos))
    }

    pub fn sub_get_at(&self, name: &str, pos: Pos) -> Option<&SubTile> {
        self.tags.get(name).and_then(|t| t.get(pos))
    }

    /// Every cell tagged in `name`, in first-tag order. Empty for unknown
    /// channels.
    pub fn all_sub(&self, name: &str) -> &[SubTile] {
        self.tags.get(name).map_or(&[][..], SubRegionTags::all)
    }

    /// Names of all tag channels, sorted.
    pub fn sub_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Paths
    // -----------------------------------------------------------------------

    /// The shortest path from the origin to `pos`.
    pub fn path_to(&self, pos: Pos) -> Path<'_> {
        Path::new(self, pos)
    }

    /// A path with no steps sitting at the origin, ready for incremental
    /// editing. With `clamp`, the path's weighted length is capped at the
    /// region's max range.
    pub fn empty_path(&self, clamp: bool) -> Path<'_> {
        Path::empty(self).with_options(PathOptions {
            clamp: clamp.then_some(self.max_range),
            ..PathOptions::default()
        })
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("bounds", &self.bounds)
            .field("origin", &self.origin)
            .field("max_range", &self.max_range)
            .field("cells", &self.cells.len())
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Validate an option tree before any cell is touched.
///
/// `bounds` is `None` for child options, whose origin is inherited from a
/// committed parent cell.
fn check(
    options: &ExpandOptions,
    has_default_modifiers: bool,
    bounds: Option<Bounds>,
) -> Result<(), RegionError> {
    let has_modifiers = match &options.weight_modifiers {
        Some(m) => !m.is_empty(),
        None => has_default_modifiers,
    };
    if !has_modifiers {
        return Err(RegionError::NoWeightModifiers);
    }
    if options.ranges.is_empty() {
        return Err(RegionError::NoRanges);
    }
    if let Some(w) = options.ranges.iter().find(|w| w.min > w.max) {
        return Err(RegionError::InvertedWindow {
            min: w.min,
            max: w.max,
        });
    }
    if bounds.is_some_and(|b| !b.contains(options.origin)) {
        return Err(RegionError::OriginOutOfBounds {
            origin: options.origin,
        });
    }
    for (name, child_opts) in &options.children {
        check(child_opts, false, None).map_err(|source| RegionError::Child {
            name: name.clone(),
            source: Box::new(source),
        })?;
    }
    Ok(())
}
