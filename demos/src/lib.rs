//! Shared skirmish model for the tactica demos.
//!
//! Demonstrates: terrain-weighted move ranges, enemy tolls and occupied
//! cells, attack ranges as child regions, and cursor-driven path editing.

use std::rc::Rc;

use rand::Rng;
use tactica_core::{Bounds, Dir, Pos};
use tactica_paths::{
    ExpandOptions, IMPASSABLE, Path, Region, RegionError, Surcharge, TerrainWeights, Unoccupied,
    uniform,
};
use thiserror::Error;

pub const PLAIN: i32 = 0;
pub const FOREST: i32 = 1;
pub const WATER: i32 = 2;
pub const WALL: i32 = 3;
pub const ROAD: i32 = 4;
pub const HILL: i32 = 5;

/// Extra cost of walking through a cell held by an enemy.
pub const ENEMY_TOLL: i32 = 2;

/// Name of the attack child region.
pub const ATTACK: &str = "attack";

pub const STANDARD_MAP: &str = "\
############
#..T...~~..#
#.@T..=~~..#
#.....=....#
#..^^.=..g.#
#..^^.=....#
#...g.=..T.#
############";

/// Errors from [`Battlefield::parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map is empty")]
    Empty,
    #[error("row {row} has {len} columns, expected {expected}")]
    Ragged { row: i32, len: i32, expected: i32 },
    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: i32, y: i32 },
    #[error("map has no hero")]
    NoHero,
}

// ---------------------------------------------------------------------------
// Battlefield
// ---------------------------------------------------------------------------

/// A single-layer map with one hero and any number of enemies.
#[derive(Clone, Debug)]
pub struct Battlefield {
    bounds: Bounds,
    terrain: Rc<[i32]>,
    hero: Pos,
    enemies: Vec<Pos>,
}

impl Battlefield {
    /// Parse an ASCII map: `.` plain, `T` forest, `~` water, `#` wall,
    /// `=` road, `^` hill, `@` the hero and `g` an enemy (both on plain).
    pub fn parse(map: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = map.lines().filter(|l| !l.is_empty()).collect();
        let cols = rows.first().ok_or(MapError::Empty)?.chars().count() as i32;
        let mut terrain = Vec::with_capacity(rows.len() * cols as usize);
        let mut hero = None;
        let mut enemies = Vec::new();

        for (y, line) in rows.iter().enumerate() {
            let y = y as i32;
            let len = line.chars().count() as i32;
            if len != cols {
                return Err(MapError::Ragged {
                    row: y,
                    len,
                    expected: cols,
                });
            }
            for (x, glyph) in line.chars().enumerate() {
                let x = x as i32;
                let t = match glyph {
                    '.' => PLAIN,
                    'T' => FOREST,
                    '~' => WATER,
                    '#' => WALL,
                    '=' => ROAD,
                    '^' => HILL,
                    '@' => {
                        hero = Some(Pos::flat(x, y));
                        PLAIN
                    }
                    'g' => {
                        enemies.push(Pos::flat(x, y));
                        PLAIN
                    }
                    _ => return Err(MapError::UnknownGlyph { glyph, x, y }),
                };
                terrain.push(t);
            }
        }

        Ok(Self {
            bounds: Bounds::flat(cols, rows.len() as i32),
            terrain: terrain.into(),
            hero: hero.ok_or(MapError::NoHero)?,
            enemies,
        })
    }

    /// The built-in demo map.
    pub fn standard() -> Result<Self, MapError> {
        Self::parse(STANDARD_MAP)
    }

    /// Drop `count` extra enemies on free plain cells.
    pub fn scatter(&mut self, rng: &mut impl Rng, count: usize) {
        let free: Vec<Pos> = self
            .bounds
            .iter()
            .filter(|&p| {
                self.terrain_at(p) == PLAIN && p != self.hero && !self.enemies.contains(&p)
            })
            .collect();
        for _ in 0..count.min(free.len()) {
            let p = loop {
                let p = free[rng.random_range(0..free.len())];
                if !self.enemies.contains(&p) {
                    break p;
                }
            };
            log::debug!("enemy placed at {p}");
            self.enemies.push(p);
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn hero(&self) -> Pos {
        self.hero
    }

    pub fn enemies(&self) -> &[Pos] {
        &self.enemies
    }

    /// Terrain id at `p`; walls off the map.
    pub fn terrain_at(&self, p: Pos) -> i32 {
        self.bounds
            .index(p)
            .map_or(WALL, |i| self.terrain[i])
    }

    /// Movement costs of every terrain.
    pub fn weights() -> TerrainWeights {
        let mut w = TerrainWeights::new();
        w.set_simple(PLAIN, 1, 0)
            .set_simple(ROAD, 1, 0)
            .set_simple(FOREST, 2, 0)
            .set_simple(WATER, 3, 1)
            .set_simple(WALL, IMPASSABLE, 0)
            .set_simple(HILL, 2, 0)
            .set_enter(HILL, Dir::N, 3);
        w
    }

    /// Expansion options for the hero moving `moves` points and attacking
    /// at range 1 to `reach` from wherever it stops.
    pub fn hero_options(&self, moves: i32, reach: i32) -> ExpandOptions {
        let terrain = Rc::clone(&self.terrain);
        let bounds = self.bounds;
        let lookup = move |p: Pos| bounds.index(p).map_or(WALL, |i| terrain[i]);

        ExpandOptions::new(self.hero)
            .range(0, moves)
            .weight_modifier(Rc::new(Self::weights()).modifier(lookup))
            .weight_modifier(Surcharge::new(self.enemies.iter().copied(), ENEMY_TOLL))
            .validator(Unoccupied::new(self.enemies.iter().copied()))
            .child_region(
                ATTACK,
                ExpandOptions::child().range(1, reach).weight_modifier(uniform(1)),
            )
    }

    /// Expand the hero's move and attack ranges.
    pub fn plan(&self, moves: i32, reach: i32) -> Result<Region, RegionError> {
        let mut region = Region::new(self.bounds);
        region.expand(&self.hero_options(moves, reach))?;
        Ok(region)
    }

    /// Draw the map with the region and an optional path on top.
    ///
    /// `@` hero, `g` enemy, `*` path step, `+` reachable stop, `x` in
    /// attack range only; otherwise the terrain glyph.
    pub fn render(&self, region: &Region, path: Option<&Path<'_>>) -> String {
        let mut out = String::with_capacity(self.bounds.len() + self.bounds.rows as usize);
        for y in 0..self.bounds.rows {
            for x in 0..self.bounds.cols {
                let p = Pos::flat(x, y);
                let on_path = path.is_some_and(|path| path.steps().iter().any(|s| s.pos == p));
                let ch = if p == self.hero {
                    '@'
                } else if self.enemies.contains(&p) {
                    'g'
                } else if on_path {
                    '*'
                } else if region.get(p).is_some_and(|c| c.stoppable) {
                    '+'
                } else if region.sub_has(ATTACK, p) {
                    'x'
                } else {
                    terrain_glyph(self.terrain_at(p))
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

fn terrain_glyph(t: i32) -> char {
    match t {
        FOREST => 'T',
        WATER => '~',
        WALL => '#',
        ROAD => '=',
        HILL => '^',
        _ => '.',
    }
}
