//! Re-run a search only when its request actually changes.
//!
//! An interactive driver asks for a path every frame; [`Replanner`] compares
//! the requested start and target by value and searches again only when one
//! of them moved, or when the heuristic or terrain was changed.

use log::debug;
use pathgrid_core::{Grid, Point};

use crate::error::PathError;
use crate::heuristic::HeuristicKind;
use crate::pathfinder::Pathfinder;
use crate::search::Outcome;

/// What [`Replanner::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replan {
    /// Same request as last time; the previous outcome stands.
    Unchanged,
    /// A new search ran and its outcome replaced the previous one.
    Searched,
    /// The new request had an invalid endpoint; the previous outcome stands.
    Rejected,
}

/// Caches the outcome of the last search for a (start, target) request.
#[derive(Debug, Clone, Default)]
pub struct Replanner {
    pathfinder: Pathfinder,
    request: Option<(Point, Point)>,
    outcome: Option<Outcome>,
}

impl Replanner {
    pub fn new(pathfinder: Pathfinder) -> Self {
        Self {
            pathfinder,
            request: None,
            outcome: None,
        }
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Switch heuristic. The next [`update`](Self::update) searches again.
    pub fn set_heuristic(&mut self, heuristic: HeuristicKind) {
        if self.pathfinder.heuristic() != heuristic {
            self.pathfinder.set_heuristic(heuristic);
            self.invalidate();
        }
    }

    /// Forget the last request, e.g. after the terrain was edited.
    pub fn invalidate(&mut self) {
        self.request = None;
    }

    /// The most recent successful search outcome.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The most recently found path.
    pub fn path(&self) -> Option<&[Point]> {
        self.outcome.as_ref().and_then(Outcome::path)
    }

    /// Search from `start` to `target` unless that exact request was already
    /// handled.
    pub fn update(&mut self, grid: &Grid, start: Point, target: Point) -> Result<Replan, PathError> {
        if self.request == Some((start, target)) {
            return Ok(Replan::Unchanged);
        }
        let result = self.pathfinder.find_path(grid, start, target);
        self.settle((start, target), result)
    }

    /// Record `request` as handled unless the search failed internally, so a
    /// failed request is retried on the next update.
    fn settle(
        &mut self,
        request: (Point, Point),
        result: Result<Outcome, PathError>,
    ) -> Result<Replan, PathError> {
        let replan = match result {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                Replan::Searched
            }
            Err(e) if e.is_invalid_input() => {
                debug!("keeping previous path: {e}");
                Replan::Rejected
            }
            Err(e) => return Err(e),
        };
        self.request = Some(request);
        Ok(replan)
    }
}
