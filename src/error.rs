//! Error types for the simulation.

use std::fmt;

/// Contract violations inside the simulation core.
///
/// None of these occur during normal play; they indicate a caller that
/// skipped wrap handling or built an inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A cell query addressed a coordinate outside the grid.
    OutOfBounds {
        /// Requested column.
        col: i32,
        /// Requested row.
        row: i32,
    },
    /// The state cannot satisfy the request (unknown ghost, missing chaser, ...).
    InvalidState(String),
    /// A layout table failed validation.
    Layout(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { col, row } => {
                write!(f, "cell ({col}, {row}) is outside the grid")
            }
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::Layout(msg) => write!(f, "malformed layout: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
