//! Randomised checks over seeded terrain grids.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactica_core::{Bounds, Dir, Neighborhood, Pos};

use crate::modifier::{BLOCKED, IMPASSABLE};
use crate::options::{ExpandOptions, Step};
use crate::path::PathOptions;
use crate::region::Region;

const COLS: i32 = 9;
const ROWS: i32 = 7;
const SEEDS: u64 = 40;

struct Terrain {
    costs: Vec<i32>,
    origin: Pos,
    max: i32,
}

impl Terrain {
    fn random(rng: &mut StdRng) -> Self {
        let costs = (0..COLS * ROWS)
            .map(|_| {
                if rng.random_range(0..6) == 0 {
                    IMPASSABLE
                } else {
                    rng.random_range(1..=3)
                }
            })
            .collect();
        Self {
            costs,
            origin: Pos::flat(rng.random_range(0..COLS), rng.random_range(0..ROWS)),
            max: rng.random_range(0..=8),
        }
    }

    fn cost(&self, p: Pos) -> i32 {
        self.costs[(p.y * COLS + p.x) as usize]
    }

    fn options(&self) -> ExpandOptions {
        let costs = self.costs.clone();
        ExpandOptions::new(self.origin)
            .range(0, self.max)
            .neighborhood(Neighborhood::Cardinal)
            .weight_modifier_fn(move |w, _, s: &Step| {
                let c = costs[(s.to.y * COLS + s.to.x) as usize];
                if c >= IMPASSABLE { BLOCKED } else { w + c }
            })
    }

    fn region(&self) -> Region {
        let mut r = Region::new(Bounds::flat(COLS, ROWS));
        r.expand(&self.options()).unwrap();
        r
    }

    /// Shortest distances by repeated relaxation over the whole grid.
    fn distances(&self) -> HashMap<Pos, i32> {
        let bounds = Bounds::flat(COLS, ROWS);
        let mut dist = HashMap::from([(self.origin, 0)]);
        let mut changed = true;
        while changed {
            changed = false;
            for p in bounds {
                let Some(&d) = dist.get(&p) else { continue };
                for &dir in Neighborhood::Cardinal.dirs() {
                    let to = p.translate(dir);
                    if !bounds.contains(to) || self.cost(to) >= IMPASSABLE {
                        continue;
                    }
                    let nd = d + self.cost(to);
                    if dist.get(&to).is_none_or(|&old| nd < old) {
                        dist.insert(to, nd);
                        changed = true;
                    }
                }
            }
        }
        dist
    }
}

fn each_terrain(mut f: impl FnMut(&Terrain, &mut StdRng)) {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = Terrain::random(&mut rng);
        f(&t, &mut rng);
    }
}

fn random_dir(rng: &mut StdRng) -> Dir {
    Neighborhood::Cardinal.dirs()[rng.random_range(0..4)]
}

#[test]
fn expansion_is_deterministic() {
    each_terrain(|t, _| {
        let key = |r: &Region| -> Vec<(Pos, i32, Dir)> {
            r.all().iter().map(|c| (c.pos, c.weight, c.parent_dir)).collect()
        };
        assert_eq!(key(&t.region()), key(&t.region()));
    });
}

#[test]
fn weights_are_shortest_and_within_range() {
    each_terrain(|t, _| {
        let r = t.region();
        let expected: HashMap<Pos, i32> = t
            .distances()
            .into_iter()
            .filter(|&(_, d)| d <= t.max)
            .collect();
        assert_eq!(r.len(), expected.len());
        for c in r.all() {
            assert_eq!(expected.get(&c.pos), Some(&c.weight), "at {}", c.pos);
        }
        let weights: Vec<i32> = r.all().iter().map(|c| c.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    });
}

#[test]
fn parents_form_a_tree() {
    each_terrain(|t, _| {
        let r = t.region();
        let roots = r.all().iter().filter(|c| c.parent_dir == Dir::None).count();
        assert_eq!(roots, 1);
        for c in r.all() {
            if let Some(parent) = c.parent() {
                let p = r.get(parent).unwrap();
                assert_eq!(p.weight + c.step_weight, c.weight);
            }
            let path = r.path_to(c.pos);
            assert!(path.is_valid());
            assert_eq!(path.start(), t.origin);
            assert_eq!(path.length_weight(), c.weight);
            let end = path.dirs().iter().fold(t.origin, |p, &d| p.translate(d));
            assert_eq!(end, c.pos);
        }
    });
}

#[test]
fn backtracking_restores_the_path() {
    each_terrain(|t, rng| {
        let r = t.region();
        let mut p = r.empty_path(false);
        for _ in 0..12 {
            p.append(random_dir(rng));
        }
        let before = (p.end(), p.dirs());
        let d = random_dir(rng);
        p.append(d);
        if p.end() != before.0 {
            p.append(d.invert());
            assert_eq!((p.end(), p.dirs()), before);
        }
    });
}

#[test]
fn capped_paths_stay_under_cap() {
    each_terrain(|t, rng| {
        let r = t.region();
        let mut p = r.empty_path(false).with_options(PathOptions {
            clamp: Some(t.max),
            back_pop: true,
        });
        for _ in 0..30 {
            p.append(random_dir(rng));
            assert!(p.length_weight() <= t.max);
            if p.is_valid() {
                let end = p.dirs().iter().fold(p.start(), |q, &d| q.translate(d));
                assert_eq!(end, p.end());
                assert!(p.steps().iter().all(|s| r.has(s.pos)));
            }
        }
    });
}

#[test]
fn windows_select_exactly_the_cells_inside_them() {
    each_terrain(|t, rng| {
        let lo = rng.random_range(0..=t.max);
        let windows = [(0, lo / 2), (lo, t.max)];
        let mut r = Region::new(Bounds::flat(COLS, ROWS));
        let mut opts = t.options();
        opts.ranges.clear();
        r.expand(&opts.ranges(windows)).unwrap();

        let inside = |w: i32| windows.iter().any(|&(a, b)| (a..=b).contains(&w));
        let expected: HashMap<Pos, i32> = t
            .distances()
            .into_iter()
            .filter(|&(_, d)| inside(d))
            .collect();
        assert_eq!(r.len(), expected.len());
        for c in r.all() {
            assert!(inside(c.weight));
            assert_eq!(expected.get(&c.pos), Some(&c.weight));
        }
    });
}
