//! The step vocabulary: [`Dir`] and the [`Neighborhood`] sets a search walks.

use std::fmt;

use crate::geom::Pos;

/// A single grid step.
///
/// `N` is towards smaller `y`, `E` towards larger `x`, `U` towards larger `z`.
/// [`Dir::None`] is the empty step; it marks the origin of a search tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    #[default]
    None,
    N,
    S,
    E,
    W,
    U,
    D,
    NE,
    NW,
    SE,
    SW,
}

impl Dir {
    /// Every direction, `None` first.
    pub const ALL: [Dir; 11] = [
        Dir::None,
        Dir::N,
        Dir::S,
        Dir::E,
        Dir::W,
        Dir::U,
        Dir::D,
        Dir::NE,
        Dir::NW,
        Dir::SE,
        Dir::SW,
    ];

    /// Offset of a single step in this direction.
    #[inline]
    pub const fn offset(self) -> Pos {
        match self {
            Dir::None => Pos::new(0, 0, 0),
            Dir::N => Pos::new(0, -1, 0),
            Dir::S => Pos::new(0, 1, 0),
            Dir::E => Pos::new(1, 0, 0),
            Dir::W => Pos::new(-1, 0, 0),
            Dir::U => Pos::new(0, 0, 1),
            Dir::D => Pos::new(0, 0, -1),
            Dir::NE => Pos::new(1, -1, 0),
            Dir::NW => Pos::new(-1, -1, 0),
            Dir::SE => Pos::new(1, 1, 0),
            Dir::SW => Pos::new(-1, 1, 0),
        }
    }

    /// The opposite direction. `None` inverts to itself.
    #[inline]
    pub const fn invert(self) -> Dir {
        match self {
            Dir::None => Dir::None,
            Dir::N => Dir::S,
            Dir::S => Dir::N,
            Dir::E => Dir::W,
            Dir::W => Dir::E,
            Dir::U => Dir::D,
            Dir::D => Dir::U,
            Dir::NE => Dir::SW,
            Dir::NW => Dir::SE,
            Dir::SE => Dir::NW,
            Dir::SW => Dir::NE,
        }
    }

    /// The direction of the single step leading from `from` to `to`, or
    /// `None` if the two positions are not one step apart.
    pub fn between(from: Pos, to: Pos) -> Dir {
        let delta = to - from;
        Dir::ALL
            .into_iter()
            .skip(1)
            .find(|d| d.offset() == delta)
            .unwrap_or(Dir::None)
    }

    /// Whether this is a planar diagonal.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Dir::NE | Dir::NW | Dir::SE | Dir::SW)
    }

    /// A one-character glyph for debug dumps.
    ///
    /// `None` is `.`, up is `o` and down is `x`; planar steps are arrows.
    pub const fn arrow(self) -> char {
        match self {
            Dir::None => '.',
            Dir::N => '\u{2191}',
            Dir::S => '\u{2193}',
            Dir::E => '\u{2192}',
            Dir::W => '\u{2190}',
            Dir::U => 'o',
            Dir::D => 'x',
            Dir::NE => '\u{2197}',
            Dir::NW => '\u{2196}',
            Dir::SE => '\u{2198}',
            Dir::SW => '\u{2199}',
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

impl Pos {
    /// The position one step away in direction `dir`.
    #[inline]
    pub fn translate(self, dir: Dir) -> Pos {
        self + dir.offset()
    }

    /// The position `n` steps away in direction `dir`.
    #[inline]
    pub fn translate_n(self, dir: Dir, n: i32) -> Pos {
        let o = dir.offset();
        self.shift(o.x * n, o.y * n, o.z * n)
    }
}

/// The set of directions a search may step in, in generation order.
///
/// The order is significant: when two routes tie, the neighbor generated
/// first wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Four planar steps.
    Cardinal,
    /// Four planar steps plus up and down.
    #[default]
    Cardinal3D,
    /// Eight planar steps.
    Octile,
    /// Eight planar steps plus up and down.
    Octile3D,
}

impl Neighborhood {
    /// Directions in this neighborhood, never including [`Dir::None`].
    pub const fn dirs(self) -> &'static [Dir] {
        const CARDINAL: [Dir; 4] = [Dir::N, Dir::S, Dir::E, Dir::W];
        const CARDINAL_3D: [Dir; 6] = [Dir::N, Dir::S, Dir::E, Dir::W, Dir::U, Dir::D];
        const OCTILE: [Dir; 8] = [
            Dir::N,
            Dir::S,
            Dir::E,
            Dir::W,
            Dir::NE,
            Dir::NW,
            Dir::SE,
            Dir::SW,
        ];
        const OCTILE_3D: [Dir; 10] = [
            Dir::N,
            Dir::S,
            Dir::E,
            Dir::W,
            Dir::U,
            Dir::D,
            Dir::NE,
            Dir::NW,
            Dir::SE,
            Dir::SW,
        ];
        match self {
            Neighborhood::Cardinal => &CARDINAL,
            Neighborhood::Cardinal3D => &CARDINAL_3D,
            Neighborhood::Octile => &OCTILE,
            Neighborhood::Octile3D => &OCTILE_3D,
        }
    }

    /// Whether `dir` is a step of this neighborhood.
    pub fn contains(self, dir: Dir) -> bool {
        self.dirs().contains(&dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_is_an_involution() {
        for d in Dir::ALL {
            assert_eq!(d.invert().invert(), d);
        }
        assert_eq!(Dir::None.invert(), Dir::None);
    }

    #[test]
    fn translate_then_inverse_returns() {
        let p = Pos::new(4, 4, 1);
        for d in Dir::ALL {
            assert_eq!(p.translate(d).translate(d.invert()), p);
        }
    }

    #[test]
    fn offsets_match_screen_axes() {
        let p = Pos::new(2, 2, 0);
        assert_eq!(p.translate(Dir::N), Pos::new(2, 1, 0));
        assert_eq!(p.translate(Dir::S), Pos::new(2, 3, 0));
        assert_eq!(p.translate(Dir::E), Pos::new(3, 2, 0));
        assert_eq!(p.translate(Dir::W), Pos::new(1, 2, 0));
        assert_eq!(p.translate(Dir::U), Pos::new(2, 2, 1));
        assert_eq!(p.translate(Dir::D), Pos::new(2, 2, -1));
        assert_eq!(p.translate(Dir::NE), Pos::new(3, 1, 0));
        assert_eq!(p.translate_n(Dir::W, 2), Pos::new(0, 2, 0));
    }

    #[test]
    fn between_finds_single_steps() {
        let p = Pos::new(1, 1, 0);
        for d in Dir::ALL.into_iter().skip(1) {
            assert_eq!(Dir::between(p, p.translate(d)), d);
        }
        assert_eq!(Dir::between(p, p), Dir::None);
        assert_eq!(Dir::between(p, Pos::new(3, 1, 0)), Dir::None);
    }

    #[test]
    fn neighborhoods_are_closed_under_inversion() {
        for n in [
            Neighborhood::Cardinal,
            Neighborhood::Cardinal3D,
            Neighborhood::Octile,
            Neighborhood::Octile3D,
        ] {
            assert!(!n.contains(Dir::None));
            for &d in n.dirs() {
                assert!(n.contains(d.invert()), "{n:?} lacks inverse of {d:?}");
            }
        }
        assert_eq!(Neighborhood::Cardinal.dirs().len(), 4);
        assert_eq!(Neighborhood::Octile3D.dirs().len(), 10);
    }

    #[test]
    fn arrows() {
        assert_eq!(Dir::None.arrow(), '.');
        assert_eq!(Dir::N.to_string(), "\u{2191}");
        assert_eq!(Dir::U.arrow(), 'o');
        assert_eq!(Dir::D.arrow(), 'x');
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn dir_round_trip() {
        for d in Dir::ALL {
            let json = serde_json::to_string(&d).unwrap();
            let back: Dir = serde_json::from_str(&json).unwrap();
            assert_eq!(d, back);
        }
    }
}
