//! Terminal skirmish demo: prints the hero's move range, the union of its
//! attack ranges, and a cursor path dragged across the map.
//!
//! Run: cargo run --bin skirmish

use rand::SeedableRng;
use tactica_core::Dir;
use tactica_demos::{ATTACK, Battlefield};

const MOVES: i32 = 5;
const REACH: i32 = 2;
const CURSOR: [Dir; 7] = [Dir::S, Dir::E, Dir::E, Dir::E, Dir::S, Dir::W, Dir::E];

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut field = Battlefield::standard()?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    field.scatter(&mut rng, 2);

    let region = field.plan(MOVES, REACH)?;
    let mut path = region.empty_path(true);
    path.follow(&CURSOR);

    println!("{}", field.render(&region, Some(&path)));
    println!("move range:\n{}", region.describe());
    println!("attack range:\n{}", region.describe_sub(ATTACK));
    println!(
        "{path} weight {} valid {} complete {}",
        path.length_weight(),
        path.is_valid(),
        path.is_complete()
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
