#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze puzzle engine.
//!
//! This crate defines the vocabulary that connects the validated puzzle grid,
//! the pure simulation systems and the adapters that drive them. Adapters hand
//! a raw grid description and a list of move tokens to the attempt engine,
//! which folds the moves over an ephemeral attempt state and answers with a
//! single [`AttemptResult`]. Along the way the systems push [`Event`] values
//! into a caller-provided sink so adapters can observe the attempt without the
//! engine owning any logging state.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

mod error;

pub use error::{GameplayFailure, Marker, MoveError, PortalError, StructuralGridError};

/// Step limit applied when a puzzle does not declare one.
pub const DEFAULT_MAX_STEPS: u32 = 1000;

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Components are signed so that positions read from untrusted descriptions
/// (or computed one step past an edge) can be represented and then rejected
/// by bounds checks instead of wrapping.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    #[serde(rename = "r")]
    row: i32,
    #[serde(rename = "c")]
    column: i32,
}

impl Position {
    /// Creates a new position from a row and a column.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Returns the neighbouring position one step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (row_delta, column_delta) = direction.delta();
        Self {
            row: self.row.saturating_add(row_delta),
            column: self.column.saturating_add(column_delta),
        }
    }

    /// Identifier of a key lying on this position.
    ///
    /// Keys are identified by the coordinates of their cell, so collecting the
    /// same key twice yields the same identifier.
    #[must_use]
    pub fn key_id(&self) -> String {
        format!("key_{}_{}", self.row, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in token order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row and column offsets applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Canonical upper-case token for the direction.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    /// Parses an already normalised token such as `"UP"`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.token() == token)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Trims and upper-cases a raw move token.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Interpretation of a single grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor.
    Empty,
    /// Impassable obstacle.
    Wall,
    /// Cell the attempt starts from.
    Start,
    /// Cell the attempt must reach.
    Goal,
    /// Collectible key.
    Key,
    /// Door that may require a key to pass.
    Door,
    /// Teleport entrance identified by its full cell code.
    Portal(String),
}

impl CellKind {
    /// Parses a raw cell code, returning `None` for unrecognised codes.
    ///
    /// Any code beginning with `P` is a portal whose label is the full,
    /// case-sensitive code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let kind = match code {
            " " => Self::Empty,
            "S" => Self::Start,
            "G" => Self::Goal,
            "W" => Self::Wall,
            "K" => Self::Key,
            "D" => Self::Door,
            portal if portal.starts_with('P') => Self::Portal(portal.to_owned()),
            _ => return None,
        };
        Some(kind)
    }

    /// Raw cell code that parses back into this kind.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Empty => " ",
            Self::Wall => "W",
            Self::Start => "S",
            Self::Goal => "G",
            Self::Key => "K",
            Self::Door => "D",
            Self::Portal(label) => label,
        }
    }

    /// Returns the portal label when the cell is a portal.
    #[must_use]
    pub fn portal_label(&self) -> Option<&str> {
        match self {
            Self::Portal(label) => Some(label),
            _ => None,
        }
    }
}

/// Rule parameters attached to a puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    /// Maximum number of moves an attempt may consume.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Whether stepping onto a door requires at least one collected key.
    #[serde(default = "default_doors_require_keys")]
    pub doors_require_keys: bool,
    /// Whether every key must be collected before the goal counts.
    #[serde(default)]
    pub collect_all_keys: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            doors_require_keys: true,
            collect_all_keys: false,
        }
    }
}

const fn default_max_steps() -> u32 {
    DEFAULT_MAX_STEPS
}

const fn default_doors_require_keys() -> bool {
    true
}

/// Notifications pushed by the engine while an attempt runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that an attempt began.
    AttemptStarted {
        /// Position the attempt starts from.
        start: Position,
        /// Number of raw move tokens submitted.
        moves: usize,
    },
    /// Reports that a move landed on a portal and was teleported.
    Teleported {
        /// Portal cell the move landed on.
        from: Position,
        /// Final position after resolving the portal chain.
        to: Position,
        /// Number of portal jumps taken.
        jumps: u32,
    },
    /// Reports that a key was collected for the first time.
    KeyCollected {
        /// Identifier of the collected key.
        key: String,
        /// Cell the key was collected from.
        position: Position,
    },
    /// Reports that a door was passed.
    DoorPassed {
        /// Cell occupied by the door.
        position: Position,
    },
    /// Announces the terminal verdict of an attempt.
    AttemptFinished {
        /// Whether the attempt succeeded.
        success: bool,
        /// Steps consumed by the attempt.
        steps: u32,
        /// Position occupied when the attempt ended.
        final_position: Position,
    },
}

/// Verdict produced by simulating one move sequence against one grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// Whether the goal was reached under the puzzle rules.
    pub success: bool,
    /// Human-readable description of the verdict.
    pub message: String,
    /// Moves consumed up to and including the terminating move.
    pub steps: u32,
    /// Identifiers of every key collected during the attempt.
    pub keys_collected: BTreeSet<String>,
    /// Every position occupied during the attempt, teleport hops included.
    pub trace: Vec<Position>,
    /// Position occupied when the attempt ended.
    pub final_position: Position,
    /// Typed reason for a failed attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<GameplayFailure>,
}

/// Declared extent of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

/// Read-only summary of a grid's composition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    /// Extent of the grid.
    pub dimensions: Dimensions,
    /// Number of cells in the grid.
    pub total_cells: u64,
    /// Number of wall cells.
    pub walls: u32,
    /// Number of key cells.
    pub keys: u32,
    /// Number of door cells.
    pub doors: u32,
    /// Number of portal cells.
    pub portals: u32,
    /// Number of empty cells.
    pub empty_cells: u32,
    /// Start position of the puzzle.
    pub start: Position,
    /// Goal position of the puzzle.
    pub goal: Position,
    /// Step limit of the puzzle.
    pub max_steps: u32,
}

#[cfg(test)]
mod tests {
    use super::{normalize_token, CellKind, Direction, Position, Rules, DEFAULT_MAX_STEPS};

    #[test]
    fn step_applies_direction_deltas() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.step(Direction::Up), Position::new(1, 2));
        assert_eq!(origin.step(Direction::Down), Position::new(3, 2));
        assert_eq!(origin.step(Direction::Left), Position::new(2, 1));
        assert_eq!(origin.step(Direction::Right), Position::new(2, 3));
    }

    #[test]
    fn stepping_off_the_top_edge_goes_negative() {
        assert_eq!(Position::new(0, 0).step(Direction::Up), Position::new(-1, 0));
    }

    #[test]
    fn key_id_is_derived_from_coordinates() {
        assert_eq!(Position::new(3, 7).key_id(), "key_3_7");
    }

    #[test]
    fn tokens_are_normalised_before_parsing() {
        assert_eq!(normalize_token("  right\t"), "RIGHT");
        assert_eq!(
            Direction::from_token(&normalize_token(" down ")),
            Some(Direction::Down)
        );
        assert_eq!(Direction::from_token("NORTH"), None);
        assert_eq!(Direction::from_token("up"), None);
    }

    #[test]
    fn cell_codes_parse_into_kinds() {
        assert_eq!(CellKind::from_code(" "), Some(CellKind::Empty));
        assert_eq!(CellKind::from_code("S"), Some(CellKind::Start));
        assert_eq!(CellKind::from_code("G"), Some(CellKind::Goal));
        assert_eq!(CellKind::from_code("W"), Some(CellKind::Wall));
        assert_eq!(CellKind::from_code("K"), Some(CellKind::Key));
        assert_eq!(CellKind::from_code("D"), Some(CellKind::Door));
        assert_eq!(
            CellKind::from_code("P1"),
            Some(CellKind::Portal("P1".to_owned()))
        );
    }

    #[test]
    fn unknown_and_lowercase_codes_are_rejected() {
        assert_eq!(CellKind::from_code("X"), None);
        assert_eq!(CellKind::from_code(""), None);
        assert_eq!(CellKind::from_code("w"), None);
        assert_eq!(CellKind::from_code("p1"), None);
    }

    #[test]
    fn codes_round_trip_through_kinds() {
        for code in [" ", "S", "G", "W", "K", "D", "Pexit"] {
            let kind = CellKind::from_code(code).expect("known code");
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn rules_fill_missing_fields_with_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"collect_all_keys": true}"#).expect("rules");
        assert_eq!(rules.max_steps, DEFAULT_MAX_STEPS);
        assert!(rules.doors_require_keys);
        assert!(rules.collect_all_keys);
    }

    #[test]
    fn position_serialises_with_short_field_names() {
        let json = serde_json::to_string(&Position::new(1, 2)).expect("serialise");
        assert_eq!(json, r#"{"r":1,"c":2}"#);
    }
}
