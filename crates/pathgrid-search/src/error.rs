use std::fmt;

use pathgrid_core::{OutOfRange, Point};

/// Which end of a search request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputReason {
    OutOfBounds,
    Blocked,
}

/// Errors returned when a search cannot be performed.
///
/// Not finding a path is not an error; see
/// [`Outcome::NoPath`](crate::Outcome::NoPath).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start or target is outside the grid or on a blocked cell. No
    /// search work was done.
    InvalidInput {
        endpoint: Endpoint,
        pos: Point,
        reason: InputReason,
    },
    /// A grid query escaped the neighbour bounds filter. This is a bug in the
    /// search, not a property of the input.
    Internal(OutOfRange),
}

impl PathError {
    pub(crate) fn invalid(endpoint: Endpoint, pos: Point, reason: InputReason) -> Self {
        Self::InvalidInput {
            endpoint,
            pos,
            reason,
        }
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                endpoint,
                pos,
                reason: InputReason::OutOfBounds,
            } => write!(f, "{endpoint} {pos} is outside the grid"),
            Self::InvalidInput {
                endpoint,
                pos,
                reason: InputReason::Blocked,
            } => write!(f, "{endpoint} {pos} is on a blocked cell"),
            Self::Internal(e) => write!(f, "internal search error: {e}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Internal(e) => Some(e),
            Self::InvalidInput { .. } => None,
        }
    }
}

impl From<OutOfRange> for PathError {
    fn from(e: OutOfRange) -> Self {
        Self::Internal(e)
    }
}
