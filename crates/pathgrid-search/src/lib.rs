//! A* shortest-path search on occupancy grids.
//!
//! Searches move in the four orthogonal directions at unit cost over the free
//! cells of a [`Grid`](pathgrid_core::Grid). The engine draws nothing and does
//! no I/O; progress is exposed through [`Snapshot`]s so a presentation layer
//! can visualise the open and closed sets.
//!
//! - [`find_path`] / [`Pathfinder::find_path`] run a whole search.
//! - [`Pathfinder::search`] returns a [`Search`] that advances one expansion
//!   per [`Search::step`], for drivers that pace or abandon the search.
//! - [`Replanner`] re-runs a search only when the request changes.
//!
//! ```
//! use pathgrid_core::{Grid, Point};
//! use pathgrid_search::{HeuristicKind, find_path};
//!
//! let grid: Grid = "\
//!     ...\n\
//!     .#.\n\
//!     ...\n"
//!     .parse()
//!     .unwrap();
//! let outcome = find_path(&grid, Point::new(0, 1), Point::new(2, 1), HeuristicKind::Manhattan).unwrap();
//! assert_eq!(outcome.path().map(|p| p.len()), Some(5));
//! ```
//!
//! # Heuristics
//!
//! | [`HeuristicKind`] | Shortest paths |
//! |---|---|
//! | `Manhattan` | yes |
//! | `Euclidean` | yes, with more expansions |
//! | `ManhattanRandom` | no |

mod bfs;
mod distance;
mod error;
mod frontier;
mod heuristic;
mod pathfinder;
mod replan;
mod search;

pub use bfs::{UNREACHABLE, bfs_distance, bfs_map};
pub use distance::{euclidean, manhattan};
pub use error::{Endpoint, InputReason, PathError};
pub use frontier::{Frontier, Node, NodeId, Push};
pub use heuristic::{Estimator, HeuristicKind, RANDOM_NOISE};
pub use pathfinder::{Pathfinder, PathfinderConfig, find_path};
pub use replan::{Replan, Replanner};
pub use search::{
    FnObserver, Frame, Observer, Outcome, PathResult, Recorder, STEP_COST, Search, SearchState,
    SearchStats, Snapshot, Step,
};
