//! Random terrain generation for fixtures and demos.
//!
//! The search never depends on how a grid was produced; this module only
//! offers a quick way to get a populated one.

use crate::geom::Point;
use crate::grid::{Grid, Occupancy};
use rand::{Rng, RngExt};

/// Default obstacle density: roughly one cell in ten.
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Scatters blocked cells over a grid with a fixed probability per cell.
pub struct Scatter<R: Rng> {
    pub rng: R,
    /// Probability (0.0–1.0) that a cell becomes blocked.
    pub density: f64,
}

impl<R: Rng> Scatter<R> {
    pub fn new(rng: R, density: f64) -> Self {
        Self {
            rng,
            density: density.clamp(0.0, 1.0),
        }
    }

    /// Create a fresh `width`×`height` grid with scattered obstacles.
    pub fn generate(&mut self, width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height);
        self.apply(&mut grid, &[]);
        grid
    }

    /// Re-roll every cell of `grid`. Cells listed in `keep_free` are always
    /// left free (typically the start and target of a demo search).
    ///
    /// Returns the number of blocked cells.
    pub fn apply(&mut self, grid: &mut Grid, keep_free: &[Point]) -> usize {
        let density = self.density;
        let rng = &mut self.rng;
        *grid = Grid::from_fn(grid.width(), grid.height(), |p| {
            if keep_free.contains(&p) || !rng.random_bool(density) {
                Occupancy::Free
            } else {
                Occupancy::Blocked
            }
        });
        grid.count(Occupancy::Blocked)
    }
}
