//! Remaining-cost estimators.

use std::fmt;

use pathgrid_core::Point;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::distance::{euclidean, manhattan};

/// Upper bound (exclusive) of the noise added by
/// [`HeuristicKind::ManhattanRandom`].
pub const RANDOM_NOISE: f64 = 2.0;

/// Which estimate a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    /// `|dx| + |dy|`. Consistent for 4-way unit-cost moves.
    #[default]
    Manhattan,
    /// Straight-line distance. Admissible but looser than Manhattan, so
    /// searches expand more cells.
    Euclidean,
    /// Manhattan plus uniform noise in `[0, 2)`. Overestimates, so paths are
    /// not guaranteed shortest and runs differ unless seeded.
    ManhattanRandom,
}

impl HeuristicKind {
    pub const ALL: [Self; 3] = [Self::Manhattan, Self::Euclidean, Self::ManhattanRandom];

    /// Whether searches with this heuristic always return shortest paths.
    pub const fn is_admissible(self) -> bool {
        !matches!(self, Self::ManhattanRandom)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "Manhattan",
            Self::Euclidean => "Euclidean",
            Self::ManhattanRandom => "Manhattan Random",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A heuristic bound to one search.
///
/// Created when the search is created, so the estimate cannot change while
/// the search runs. Only the random variant carries a generator; build a
/// second estimator from the same seed rather than copying one.
#[derive(Debug)]
pub struct Estimator {
    kind: HeuristicKind,
    rng: Option<StdRng>,
}

impl Estimator {
    /// Build an estimator. `seed` fixes the noise sequence of
    /// [`HeuristicKind::ManhattanRandom`]; it is ignored by the other kinds.
    pub fn new(kind: HeuristicKind, seed: Option<u64>) -> Self {
        let rng = match kind {
            HeuristicKind::ManhattanRandom => Some(match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::seed_from_u64(rand::rng().random()),
            }),
            _ => None,
        };
        Self { kind, rng }
    }

    #[inline]
    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    /// Estimated cost from `from` to `to`. Never negative.
    pub fn estimate(&mut self, from: Point, to: Point) -> f64 {
        match (self.kind, self.rng.as_mut()) {
            (HeuristicKind::Euclidean, _) => euclidean(from, to),
            (HeuristicKind::ManhattanRandom, Some(rng)) => {
                f64::from(manhattan(from, to)) + rng.random_range(0.0..RANDOM_NOISE)
            }
            _ => f64::from(manhattan(from, to)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Point = Point::new(1, 2);
    const B: Point = Point::new(4, 6);

    #[test]
    fn manhattan_estimate() {
        let mut e = Estimator::new(HeuristicKind::Manhattan, None);
        assert_eq!(e.estimate(A, B), 7.0);
        assert_eq!(e.estimate(B, A), 7.0);
        assert_eq!(e.estimate(A, A), 0.0);
    }

    #[test]
    fn euclidean_estimate() {
        let mut e = Estimator::new(HeuristicKind::Euclidean, None);
        assert!((e.estimate(A, B) - 5.0).abs() < 1e-12);
        // Never above the Manhattan distance.
        assert!(e.estimate(Point::new(0, 0), Point::new(3, 3)) <= 6.0);
    }

    #[test]
    fn random_estimate_stays_in_band() {
        let mut e = Estimator::new(HeuristicKind::ManhattanRandom, None);
        for _ in 0..200 {
            let h = e.estimate(A, B);
            assert!((7.0..7.0 + RANDOM_NOISE).contains(&h), "h = {h}");
        }
    }

    #[test]
    fn seeded_random_estimate_is_reproducible() {
        let mut a = Estimator::new(HeuristicKind::ManhattanRandom, Some(9));
        let mut b = Estimator::new(HeuristicKind::ManhattanRandom, Some(9));
        let xs: Vec<f64> = (0..16).map(|_| a.estimate(A, B)).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.estimate(A, B)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn rebuilt_estimator_replays_from_seed() {
        let mut first = Estimator::new(HeuristicKind::ManhattanRandom, Some(3));
        let head: Vec<f64> = (0..4).map(|_| first.estimate(A, B)).collect();
        // Advancing `first` further does not disturb a rebuilt one.
        first.estimate(A, B);
        let mut again = Estimator::new(HeuristicKind::ManhattanRandom, Some(3));
        let replay: Vec<f64> = (0..4).map(|_| again.estimate(A, B)).collect();
        assert_eq!(head, replay);
        assert!(format!("{again:?}").contains("ManhattanRandom"));
    }

    #[test]
    fn admissibility_flags() {
        assert!(HeuristicKind::Manhattan.is_admissible());
        assert!(HeuristicKind::Euclidean.is_admissible());
        assert!(!HeuristicKind::ManhattanRandom.is_admissible());
        assert_eq!(HeuristicKind::default(), HeuristicKind::Manhattan);
        assert_eq!(HeuristicKind::ManhattanRandom.to_string(), "Manhattan Random");
    }
}
