#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative puzzle grid for the maze puzzle engine.
//!
//! Raw puzzles arrive as a [`GridDescription`], the JSON-shaped form supplied
//! by the request layer. A [`Grid`] can only be obtained by validating a
//! description, after which every cell has been parsed into a [`CellKind`] and
//! the start/goal invariants are known to hold. Systems read the grid through
//! its query methods and never mutate it, so a validated grid can be shared
//! freely between concurrent attempts.

use std::collections::BTreeMap;

use maze_puzzle_core::{CellKind, Position, Rules, StructuralGridError};
use serde::{Deserialize, Serialize};

pub mod catalog;
mod validation;

pub use validation::validate;

/// Unvalidated puzzle description as supplied by the request layer.
///
/// The structural fields are optional so that an absent field is reported by
/// [`validate`] rather than by the deserialiser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDescription {
    /// Declared number of rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<i32>,
    /// Declared number of columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<i32>,
    /// Declared start position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Position>,
    /// Declared goal position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Position>,
    /// Raw cell codes, one inner vector per row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<Vec<String>>>,
    /// Portal label to target position mapping.
    #[serde(default)]
    pub portals: BTreeMap<String, Position>,
    /// Rule parameters; absent fields take their defaults.
    #[serde(default)]
    pub rules: Rules,
}

/// Validated, immutable puzzle grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<CellKind>,
    start: Position,
    goal: Position,
    portals: BTreeMap<String, Position>,
    rules: Rules,
    key_count: usize,
}

impl Grid {
    /// Validates the description and parses it into a grid.
    pub fn from_description(description: &GridDescription) -> Result<Self, StructuralGridError> {
        validation::parse(description)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Position every attempt starts from.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Position every attempt must reach.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Rule parameters of the puzzle.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Portal label to target mapping.
    #[must_use]
    pub fn portals(&self) -> &BTreeMap<String, Position> {
        &self.portals
    }

    /// Target of the portal with the provided label, if mapped.
    #[must_use]
    pub fn portal_target(&self, label: &str) -> Option<Position> {
        self.portals.get(label).copied()
    }

    /// Number of key cells in the grid.
    #[must_use]
    pub const fn key_count(&self) -> usize {
        self.key_count
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the cell at the provided position, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&CellKind> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Iterates every cell in row-major order together with its position.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CellKind)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let row = i32::try_from(index / cols).unwrap_or(i32::MAX);
            let column = i32::try_from(index % cols).unwrap_or(i32::MAX);
            (Position::new(row, column), kind)
        })
    }

    /// Returns a copy of the grid governed by different rules.
    #[must_use]
    pub fn with_rules(&self, rules: Rules) -> Self {
        Self {
            rules,
            ..self.clone()
        }
    }

    /// Converts the grid back into its raw description.
    #[must_use]
    pub fn to_description(&self) -> GridDescription {
        let cols = self.cols as usize;
        let cells = self
            .cells
            .chunks(cols)
            .map(|row| row.iter().map(|kind| kind.code().to_owned()).collect())
            .collect();
        GridDescription {
            rows: i32::try_from(self.rows).ok(),
            cols: i32::try_from(self.cols).ok(),
            start: Some(self.start),
            goal: Some(self.goal),
            cells: Some(cells),
            portals: self.portals.clone(),
            rules: self.rules,
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let row = u32::try_from(position.row()).ok()?;
        let column = u32::try_from(position.column()).ok()?;
        if row < self.rows && column < self.cols {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.cols).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl TryFrom<&GridDescription> for Grid {
    type Error = StructuralGridError;

    fn try_from(description: &GridDescription) -> Result<Self, Self::Error> {
        Self::from_description(description)
    }
}
