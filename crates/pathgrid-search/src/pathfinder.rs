use pathgrid_core::{Grid, Point};

use crate::error::PathError;
use crate::heuristic::{Estimator, HeuristicKind};
use crate::search::{Observer, Outcome, Search};

/// Configuration shared by every search a [`Pathfinder`] starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfinderConfig {
    pub heuristic: HeuristicKind,
    /// Seed for [`HeuristicKind::ManhattanRandom`]. With `None` every search
    /// draws a fresh seed.
    pub seed: Option<u64>,
}

/// Entry point for grid searches.
///
/// Holds only configuration; every call builds and drops its own
/// [`Search`], so nothing carries over between calls.
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    config: PathfinderConfig,
}

impl Pathfinder {
    pub fn new(config: PathfinderConfig) -> Self {
        Self { config }
    }

    pub fn with_heuristic(heuristic: HeuristicKind) -> Self {
        Self::new(PathfinderConfig {
            heuristic,
            ..Default::default()
        })
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.config.heuristic
    }

    /// Change the heuristic used by searches started from now on.
    pub fn set_heuristic(&mut self, heuristic: HeuristicKind) {
        self.config.heuristic = heuristic;
    }

    /// Start a stepped search.
    pub fn search<'g>(
        &self,
        grid: &'g Grid,
        start: Point,
        target: Point,
    ) -> Result<Search<'g>, PathError> {
        let estimator = Estimator::new(self.config.heuristic, self.config.seed);
        Search::new(grid, start, target, estimator)
    }

    /// Search from `start` to `target` and return the final outcome.
    pub fn find_path(&self, grid: &Grid, start: Point, target: Point) -> Result<Outcome, PathError> {
        self.search(grid, start, target)?.run()
    }

    /// Like [`find_path`](Self::find_path), reporting every expansion to
    /// `observer`.
    pub fn find_path_observed(
        &self,
        grid: &Grid,
        start: Point,
        target: Point,
        observer: &mut impl Observer,
    ) -> Result<Outcome, PathError> {
        self.search(grid, start, target)?.run_observed(observer)
    }
}

/// Search once with the given heuristic.
pub fn find_path(
    grid: &Grid,
    start: Point,
    target: Point,
    heuristic: HeuristicKind,
) -> Result<Outcome, PathError> {
    Pathfinder::with_heuristic(heuristic).find_path(grid, start, target)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = PathfinderConfig {
            heuristic: HeuristicKind::ManhattanRandom,
            seed: Some(5),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PathfinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn outcome_round_trip() {
        let grid = Grid::new(3, 3);
        let outcome = find_path(&grid, Point::new(0, 0), Point::new(2, 1), HeuristicKind::Manhattan)
            .unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
