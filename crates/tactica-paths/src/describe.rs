//! Plain-text dumps of a region, for debugging and tests.

use tactica_core::Pos;

use crate::region::Region;

const CELL: &str = "\u{2500}\u{2500}\u{2500}\u{2500}";

impl Region {
    /// Draw every layer as a box grid.
    ///
    /// Each reached cell shows `#` if a unit may not stop there, the arrow
    /// of its arriving step, and its weight. Unreached cells are blank.
    pub fn describe(&self) -> String {
        self.render(None)
    }

    /// Like [`Region::describe`], but marks cells tagged in the channel
    /// `name` with `XXX` in place of the weight.
    pub fn describe_sub(&self, name: &str) -> String {
        self.render(Some(name))
    }

    fn render(&self, sub: Option<&str>) -> String {
        let b = self.bounds();
        let mut out = String::new();
        if b.is_empty() {
            return out;
        }

        for z in 0..b.layers {
            if z > 0 {
                out.push('\n');
            }
            for y in 0..b.rows {
                if y == 0 {
                    rule(&mut out, b.cols, '\u{250c}', '\u{252c}', '\u{2510}');
                } else {
                    rule(&mut out, b.cols, '\u{251c}', '\u{253c}', '\u{2524}');
                }
                for x in 0..b.cols {
                    out.push('\u{2502}');
                    let pos = Pos::new(x, y, z);
                    let cell = self.get(pos);
                    match sub {
                        Some(name) => {
                            out.push(cell.map_or(' ', |c| c.parent_dir.arrow()));
                            out.push_str(if self.sub_has(name, pos) { "XXX" } else { "   " });
                        }
                        None => match cell {
                            Some(c) => {
                                out.push(if c.stoppable { ' ' } else { '#' });
                                out.push(c.parent_dir.arrow());
                                out.push_str(&format!("{:>2}", c.weight));
                            }
                            None => out.push_str("    "),
                        },
                    }
                }
                out.push_str("\u{2502}\n");
            }
            rule(&mut out, b.cols, '\u{2514}', '\u{2534}', '\u{2518}');
        }
        out
    }
}

fn rule(out: &mut String, cols: i32, left: char, mid: char, right: char) {
    out.push(left);
    for x in 0..cols {
        if x > 0 {
            out.push(mid);
        }
        out.push_str(CELL);
    }
    out.push(right);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use tactica_core::Bounds;

    use super::*;
    use crate::modifier::uniform;
    use crate::options::ExpandOptions;

    #[test]
    fn single_row() {
        let mut r = Region::new(Bounds::flat(3, 1));
        r.expand(&ExpandOptions::new(Pos::flat(0, 0)).range(0, 1).weight_modifier(uniform(1)))
            .unwrap();
        let expected = "\
\u{250c}────\u{252c}────\u{252c}────\u{2510}
│ . 0│ \u{2192} 1│    │
\u{2514}────\u{2534}────\u{2534}────\u{2518}
";
        assert_eq!(r.describe(), expected);
    }

    #[test]
    fn marks_non_stoppable_and_rows() {
        let mut r = Region::new(Bounds::flat(2, 2));
        let blocked = Pos::flat(0, 1);
        r.expand(
            &ExpandOptions::new(Pos::flat(0, 0))
                .range(0, 1)
                .weight_modifier(uniform(1))
                .validator_fn(move |p, _| p != blocked),
        )
        .unwrap();
        let s = r.describe();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "│ . 0│ \u{2192} 1│");
        assert_eq!(lines[2], "\u{251c}────\u{253c}────\u{2524}");
        assert_eq!(lines[3], "│#\u{2193} 1│    │");
    }

    #[test]
    fn sub_channel() {
        let mut r = Region::new(Bounds::flat(3, 1));
        r.expand(
            &ExpandOptions::new(Pos::flat(0, 0))
                .range(0, 0)
                .weight_modifier(uniform(1))
                .child_region(
                    "attack",
                    ExpandOptions::child().range(1, 1).weight_modifier(uniform(1)),
                ),
        )
        .unwrap();
        let s = r.describe_sub("attack");
        assert_eq!(s.lines().nth(1), Some("│.   │ XXX│    │"));
        assert_eq!(r.describe_sub("missing").lines().nth(1), Some("│.   │    │    │"));
    }

    #[test]
    fn layers_are_separated() {
        let mut r = Region::new(Bounds::new(1, 1, 2));
        r.expand(&ExpandOptions::new(Pos::new(0, 0, 0)).range(0, 1).weight_modifier(uniform(1)))
            .unwrap();
        let s = r.describe();
        assert_eq!(s.lines().count(), 7);
        assert_eq!(s.lines().nth(5), Some("│ o 1│"));
    }

    #[test]
    fn empty_bounds() {
        assert_eq!(Region::new(Bounds::flat(0, 3)).describe(), "");
    }
}
