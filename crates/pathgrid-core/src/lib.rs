//! **pathgrid-core** — geometry and occupancy terrain for grid path search.
//!
//! This crate provides the types shared across the *pathgrid* workspace:
//! [`Point`] and [`Range`] geometry, the [`Grid`] of [`Occupancy`] values
//! that searches run on, and a random obstacle generator for fixtures.

pub mod geom;
pub mod grid;
pub mod mapgen;

pub use geom::{Point, Range};
pub use grid::{Grid, Occupancy, OutOfRange, ParseGridError};
pub use mapgen::Scatter;
