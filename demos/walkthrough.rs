//! Terminal walkthrough of the A* engine.
//!
//! Generates a random 16x16 terrain, then for each heuristic steps a search
//! from the top-left to the bottom-right corner and prints the explored
//! cells and the resulting path.
//!
//! Usage: `walkthrough [seed]`

use std::collections::HashSet;
use std::process::ExitCode;

use pathgrid_core::mapgen::DEFAULT_DENSITY;
use pathgrid_core::{Grid, Occupancy, Point, Scatter};
use pathgrid_search::{
    FnObserver, HeuristicKind, Outcome, Pathfinder, PathfinderConfig, Snapshot, manhattan,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const SIZE: i32 = 16;

fn main() -> ExitCode {
    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("invalid seed {arg:?}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => rand::rng().random(),
    };

    let start = Point::new(0, 0);
    let target = Point::new(SIZE - 1, SIZE - 1);
    let mut grid = Grid::new(SIZE, SIZE);
    let blocked = Scatter::new(StdRng::seed_from_u64(seed), DEFAULT_DENSITY)
        .apply(&mut grid, &[start, target]);

    println!("seed {seed}: {blocked} blocked cells");
    println!("start {start}, target {target}, distance {}", manhattan(start, target));

    for heuristic in HeuristicKind::ALL {
        let pathfinder = Pathfinder::new(PathfinderConfig {
            heuristic,
            seed: Some(seed),
        });
        let mut search = match pathfinder.search(&grid, start, target) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{heuristic}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let mut peak_open = 0;
        let mut observer = FnObserver::new(|snap: &Snapshot<'_>| {
            peak_open = peak_open.max(snap.open_len());
        });
        let outcome = match search.run_observed(&mut observer) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("{heuristic}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let snap = search.snapshot();
        let open: HashSet<Point> = snap.open().collect();
        let closed: HashSet<Point> = snap.closed().collect();

        println!();
        println!("== {heuristic} ==");
        print!("{}", render(&grid, &outcome, &open, &closed));
        let stats = outcome.stats();
        match &outcome {
            Outcome::Found(r) => println!("path: {} steps", r.steps()),
            Outcome::NoPath(_) => println!("no path"),
        }
        println!(
            "open {}, closed {}, expansions {}, peak open {peak_open}, {:.3} ms",
            stats.open,
            stats.closed,
            stats.expansions,
            stats.elapsed.as_secs_f64() * 1000.0
        );
    }
    ExitCode::SUCCESS
}

fn render(grid: &Grid, outcome: &Outcome, open: &HashSet<Point>, closed: &HashSet<Point>) -> String {
    let path: HashSet<Point> = outcome.path().unwrap_or_default().iter().copied().collect();
    let mut out = String::new();
    let mut row = 0;
    for (p, occ) in grid.iter() {
        if p.y != row {
            out.push('\n');
            row = p.y;
        }
        let ch = if occ == Occupancy::Blocked {
            '#'
        } else if path.contains(&p) {
            '*'
        } else if open.contains(&p) {
            'o'
        } else if closed.contains(&p) {
            'x'
        } else {
            '.'
        };
        out.push(ch);
    }
    out.push('\n');
    out
}
