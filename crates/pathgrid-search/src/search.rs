//! Resumable A* search over an occupancy [`Grid`].
//!
//! A [`Search`] performs one pop-and-expand cycle per [`step`](Search::step),
//! so a driver can pace it and inspect the open and closed sets in between.
//! Running it to completion is just stepping until it finishes.

use std::time::{Duration, Instant};

use log::{debug, trace};
use pathgrid_core::{Grid, Point};

use crate::error::{Endpoint, InputReason, PathError};
use crate::frontier::{Frontier, Node, NodeId};
use crate::heuristic::{Estimator, HeuristicKind};

/// Cost of one orthogonal move.
pub const STEP_COST: i32 = 1;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Created and seeded, no step taken yet.
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Counters describing the work a search did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Size of the open list when the search ended.
    pub open: usize,
    /// Size of the closed set when the search ended.
    pub closed: usize,
    /// Number of nodes popped from the open list.
    pub expansions: usize,
    /// Wall time spent inside steps. Informational only.
    pub elapsed: Duration,
}

/// A path found by a search, with the search's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Cells from start to target, both included.
    pub points: Vec<Point>,
    pub stats: SearchStats,
}

impl PathResult {
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total movement cost of the path.
    pub fn cost(&self) -> i32 {
        self.steps() as i32 * STEP_COST
    }
}

/// How a completed search ended. Both variants are normal results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(PathResult),
    /// The open list ran out before the target was reached.
    NoPath(SearchStats),
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found(r) => Some(&r.points),
            Self::NoPath(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Found(r) => &r.stats,
            Self::NoPath(s) => s,
        }
    }
}

/// What one call to [`Search::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The given cell was closed and its neighbours pushed.
    Expanded(Point),
    /// The search is over. Further steps return the same outcome.
    Finished(Outcome),
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Read-only view of the open and closed sets between iterations.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    iteration: usize,
    current: Option<Point>,
    frontier: &'a Frontier,
}

impl<'a> Snapshot<'a> {
    /// Number of cells expanded so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The cell most recently popped and closed.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    pub fn open(&self) -> impl Iterator<Item = Point> + 'a {
        self.frontier.open_points()
    }

    pub fn closed(&self) -> impl Iterator<Item = Point> + 'a {
        self.frontier.closed_points()
    }

    pub fn open_len(&self) -> usize {
        self.frontier.open_len()
    }

    pub fn closed_len(&self) -> usize {
        self.frontier.closed_len()
    }

    pub fn is_open(&self, p: Point) -> bool {
        self.frontier.is_open(p)
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.frontier.is_closed(p)
    }

    /// Copy the snapshot into an owned [`Frame`].
    pub fn to_frame(&self) -> Frame {
        Frame {
            iteration: self.iteration,
            current: self.current,
            open: self.open().collect(),
            closed: self.closed().collect(),
        }
    }
}

/// An owned copy of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub iteration: usize,
    pub current: Option<Point>,
    pub open: Vec<Point>,
    pub closed: Vec<Point>,
}

/// Receives a snapshot after every expansion.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot<'_>);
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(F);

impl<F: FnMut(&Snapshot<'_>)> FnObserver<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(&Snapshot<'_>)> Observer for FnObserver<F> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        (self.0)(snapshot)
    }
}

/// Observer that keeps a [`Frame`] of every iteration.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub frames: Vec<Frame>,
}

impl Observer for Recorder {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self.frames.push(snapshot.to_frame());
    }
}

struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _: &Snapshot<'_>) {}
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

enum Advance {
    Trivial,
    Expanded(Point),
    Found(NodeId),
    Exhausted,
}

/// One A* search from `start` to `target`.
///
/// The grid is borrowed for the lifetime of the search and the heuristic is
/// fixed at construction. Dropping the search, finished or not, releases all
/// of its state.
pub struct Search<'g> {
    grid: &'g Grid,
    start: Point,
    target: Point,
    estimator: Estimator,
    frontier: Frontier,
    state: SearchState,
    expansions: usize,
    last: Option<Point>,
    busy: Duration,
    outcome: Option<Outcome>,
}

impl<'g> Search<'g> {
    /// Validate the endpoints and seed the open list with the start cell.
    pub fn new(
        grid: &'g Grid,
        start: Point,
        target: Point,
        mut estimator: Estimator,
    ) -> Result<Self, PathError> {
        check_endpoint(grid, Endpoint::Start, start)?;
        check_endpoint(grid, Endpoint::Target, target)?;

        let mut frontier = Frontier::new();
        if start != target {
            let h = estimator.estimate(start, target);
            frontier.push_or_update(Node::new(start, 0, h, None));
        }
        debug!(
            "search {start} -> {target} on {}x{} grid, {} heuristic",
            grid.width(),
            grid.height(),
            estimator.kind()
        );

        Ok(Self {
            grid,
            start,
            target,
            estimator,
            frontier,
            state: SearchState::Idle,
            expansions: 0,
            last: None,
            busy: Duration::ZERO,
            outcome: None,
        })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.estimator.kind()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The outcome, once the search has finished.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The open and closed sets as they are now.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            iteration: self.expansions,
            current: self.last,
            frontier: &self.frontier,
        }
    }

    /// Counters as they are now.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            open: self.frontier.open_len(),
            closed: self.frontier.closed_len(),
            expansions: self.expansions,
            elapsed: self.busy,
        }
    }

    /// Run one iteration.
    pub fn step(&mut self) -> Result<Step, PathError> {
        self.step_observed(&mut Silent)
    }

    /// Run one iteration, reporting the expansion to `observer`.
    pub fn step_observed(&mut self, observer: &mut impl Observer) -> Result<Step, PathError> {
        if let Some(outcome) = &self.outcome {
            return Ok(Step::Finished(outcome.clone()));
        }
        self.state = SearchState::Running;

        let began = Instant::now();
        let advance = self.advance(observer);
        self.busy += began.elapsed();

        let outcome = match advance? {
            Advance::Expanded(p) => return Ok(Step::Expanded(p)),
            Advance::Trivial => Outcome::Found(PathResult {
                points: vec![self.start],
                stats: self.stats(),
            }),
            Advance::Found(id) => Outcome::Found(PathResult {
                points: self.frontier.path_to(id),
                stats: self.stats(),
            }),
            Advance::Exhausted => Outcome::NoPath(self.stats()),
        };
        Ok(Step::Finished(self.finish(outcome)))
    }

    /// Step until the search finishes.
    pub fn run(&mut self) -> Result<Outcome, PathError> {
        self.run_observed(&mut Silent)
    }

    /// Step until the search finishes, reporting every expansion.
    pub fn run_observed(&mut self, observer: &mut impl Observer) -> Result<Outcome, PathError> {
        loop {
            if let Step::Finished(outcome) = self.step_observed(observer)? {
                return Ok(outcome);
            }
        }
    }

    /// Take at most `max_steps` steps. Returns the outcome if the search
    /// finished within the budget; otherwise it can be resumed later.
    pub fn run_for(&mut self, max_steps: usize) -> Result<Option<Outcome>, PathError> {
        for _ in 0..max_steps {
            if let Step::Finished(outcome) = self.step()? {
                return Ok(Some(outcome));
            }
        }
        Ok(self.outcome.clone())
    }

    /// Abandon the search, returning the work done so far.
    pub fn cancel(self) -> SearchStats {
        let stats = self.stats();
        if self.outcome.is_none() {
            debug!(
                "search {} -> {} cancelled after {} expansions",
                self.start, self.target, stats.expansions
            );
        }
        stats
    }

    fn advance(&mut self, observer: &mut impl Observer) -> Result<Advance, PathError> {
        if self.start == self.target {
            return Ok(Advance::Trivial);
        }
        let Some(id) = self.frontier.pop_best() else {
            return Ok(Advance::Exhausted);
        };
        let current = *self.frontier.node(id);
        self.frontier.mark_closed(current.pos);
        self.expansions += 1;
        self.last = Some(current.pos);

        observer.observe(&self.snapshot());

        if current.pos == self.target {
            return Ok(Advance::Found(id));
        }

        for np in current.pos.neighbors_4() {
            if !self.grid.in_bounds(np) || self.frontier.is_closed(np) {
                continue;
            }
            if self.grid.is_blocked(np)? {
                continue;
            }
            let h = self.estimator.estimate(np, self.target);
            self.frontier
                .push_or_update(Node::new(np, current.g + STEP_COST, h, Some(id)));
        }
        trace!(
            "expanded {} (g={}, f={:.2}), open={}, closed={}",
            current.pos,
            current.g,
            current.f,
            self.frontier.open_len(),
            self.frontier.closed_len()
        );
        Ok(Advance::Expanded(current.pos))
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        let stats = outcome.stats();
        match &outcome {
            Outcome::Found(r) => {
                self.state = SearchState::Succeeded;
                debug!(
                    "path {} -> {} found: {} steps, {} expansions, open={}, closed={}, {:?}",
                    self.start,
                    self.target,
                    r.steps(),
                    stats.expansions,
                    stats.open,
                    stats.closed,
                    stats.elapsed
                );
            }
            Outcome::NoPath(_) => {
                self.state = SearchState::Failed;
                debug!(
                    "no path {} -> {} after {} expansions, {:?}",
                    self.start, self.target, stats.expansions, stats.elapsed
                );
            }
        }
        self.outcome = Some(outcome.clone());
        outcome
    }
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, pos: Point) -> Result<(), PathError> {
    let reason = if !grid.in_bounds(pos) {
        InputReason::OutOfBounds
    } else if grid.is_blocked(pos)? {
        InputReason::Blocked
    } else {
        return Ok(());
    };
    debug!("rejecting search: {endpoint} {pos} ({reason:?})");
    Err(PathError::invalid(endpoint, pos, reason))
}
