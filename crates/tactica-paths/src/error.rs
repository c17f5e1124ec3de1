use tactica_core::Pos;

/// Configuration errors reported synchronously by [`Region::expand`].
///
/// The whole option tree, child options included, is checked before any cell
/// is committed.
///
/// [`Region::expand`]: crate::Region::expand
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// No weight modifier would price a step, so expansion cannot be
    /// guaranteed to terminate.
    #[error("region has no weight modifiers, expansion would never terminate")]
    NoWeightModifiers,

    /// No `[min, max]` window was supplied.
    #[error("region has no range windows")]
    NoRanges,

    /// A window whose lower bound exceeds its upper bound.
    #[error("range window [{min}, {max}] is inverted")]
    InvertedWindow { min: i32, max: i32 },

    /// The origin lies outside the grid.
    #[error("origin {origin} is outside the grid")]
    OriginOutOfBounds { origin: Pos },

    /// The options of a named child region are misconfigured.
    #[error("child region \"{name}\": {source}")]
    Child {
        name: String,
        #[source]
        source: Box<RegionError>,
    },
}
