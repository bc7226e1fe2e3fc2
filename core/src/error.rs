//! Failure vocabulary shared by the validator and the simulation systems.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Direction, Position};

/// Distinguished cells whose placement is validated structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// The single start cell.
    Start,
    /// The single goal cell.
    Goal,
}

impl Marker {
    /// Cell code that represents the marker.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Start => "S",
            Self::Goal => "G",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Malformed puzzle description. Never attributable to a move sequence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralGridError {
    /// A required top-level field was absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
    /// Declared dimensions were not both positive.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions {
        /// Declared row count.
        rows: i32,
        /// Declared column count.
        cols: i32,
    },
    /// The cell table holds a different number of rows than declared.
    #[error("expected {expected} rows, got {actual}")]
    RowCountMismatch {
        /// Declared row count.
        expected: u32,
        /// Rows present in the cell table.
        actual: usize,
    },
    /// A row of the cell table holds a different number of cells than declared.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Declared column count.
        expected: u32,
        /// Cells present in the row.
        actual: usize,
    },
    /// A cell code was neither a known literal nor a portal code.
    #[error("unknown cell code '{code}' at ({row}, {col})")]
    UnknownCellCode {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// Unrecognised code.
        code: String,
    },
    /// The declared start or goal lies outside the grid.
    #[error("{marker} position {position} is out of bounds")]
    MarkerOutOfBounds {
        /// Marker whose coordinates are invalid.
        marker: Marker,
        /// Declared coordinates.
        position: Position,
    },
    /// The declared start or goal does not hold its marker cell.
    #[error("{marker} position {position} does not contain '{}'", .marker.code())]
    StartGoalMismatch {
        /// Marker whose cell is wrong.
        marker: Marker,
        /// Declared coordinates.
        position: Position,
    },
    /// The grid holds a number of start or goal cells other than one.
    #[error("expected exactly one '{}' in grid, found {count}", .kind.code())]
    CardinalityError {
        /// Marker that was miscounted.
        kind: Marker,
        /// Number of cells holding the marker.
        count: usize,
    },
}

/// Failure while resolving a portal chain.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PortalError {
    /// The chain needed more jumps than allowed.
    #[error("portal chain exceeded maximum jumps ({limit})")]
    TooManyJumps {
        /// Jump cap that was hit.
        limit: u32,
    },
    /// The chain re-entered a portal it already used.
    #[error("portal loop detected involving {label}")]
    PortalLoop {
        /// Label entered twice.
        label: String,
    },
    /// A portal cell has no entry in the portal mapping.
    #[error("portal {label} not found in portal mapping")]
    UnknownPortal {
        /// Label without a mapping.
        label: String,
    },
    /// A portal maps outside the grid.
    #[error("portal {label} targets out-of-bounds position {target}")]
    TargetOutOfBounds {
        /// Label whose target is invalid.
        label: String,
        /// Target read from the mapping.
        target: Position,
    },
    /// The chain ended on a wall.
    #[error("portal teleported into a wall at {position}")]
    TeleportIntoWall {
        /// Wall cell the chain ended on.
        position: Position,
    },
}

/// Failure while applying a single move.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// The move leaves the grid.
    #[error("goes out of bounds")]
    OutOfBounds {
        /// Position outside the grid.
        position: Position,
    },
    /// The move runs into a wall.
    #[error("hits a wall at {position}")]
    WallCollision {
        /// Wall cell that blocked the move.
        position: Position,
    },
    /// The move landed on a portal that could not be resolved.
    #[error("portal error: {0}")]
    Portal(#[from] PortalError),
    /// The move landed on a door without any key collected.
    #[error("door at {position} requires a key")]
    LockedDoor {
        /// Door cell.
        position: Position,
    },
}

/// Expected, non-exceptional reason an attempt failed.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameplayFailure {
    /// More moves were submitted than the puzzle allows.
    #[error("Step limit exceeded ({max_steps})")]
    StepLimitExceeded {
        /// Step limit of the puzzle.
        max_steps: u32,
    },
    /// A move token is not a direction.
    #[error("Move {index} ({token}) is not a valid move")]
    UnknownMove {
        /// One-based index of the token.
        index: usize,
        /// Normalised token.
        token: String,
    },
    /// A move could not be applied.
    #[error("Move {index} ({direction}) {error}")]
    Move {
        /// One-based index of the move.
        index: usize,
        /// Direction of the move.
        direction: Direction,
        /// Reason the move failed.
        error: MoveError,
    },
    /// The goal was reached before every key was collected.
    #[error("Must collect all keys ({total}) before reaching goal. Collected: {collected}")]
    MissingKeys {
        /// Keys collected when the goal was reached.
        collected: usize,
        /// Key cells in the grid.
        total: usize,
    },
    /// Every move was consumed without reaching the goal.
    #[error("Moves exhausted without reaching goal")]
    MovesExhausted,
}
