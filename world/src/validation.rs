//! Structural validation of raw puzzle descriptions.

use maze_puzzle_core::{CellKind, Marker, StructuralGridError};

use crate::{Grid, GridDescription};

/// Checks the structural invariants of a puzzle description.
///
/// Checks run fail-fast and the first violation is returned: required
/// fields, positive dimensions, table shape, cell codes, start/goal bounds,
/// start/goal markers and finally start/goal cardinality.
pub fn validate(description: &GridDescription) -> Result<(), StructuralGridError> {
    parse(description).map(|_| ())
}

pub(crate) fn parse(description: &GridDescription) -> Result<Grid, StructuralGridError> {
    let declared_rows = required(description.rows, "rows")?;
    let declared_cols = required(description.cols, "cols")?;
    let start = required(description.start, "start")?;
    let goal = required(description.goal, "goal")?;
    let table = required(description.cells.as_ref(), "cells")?;

    if declared_rows <= 0 || declared_cols <= 0 {
        return Err(StructuralGridError::InvalidDimensions {
            rows: declared_rows,
            cols: declared_cols,
        });
    }
    let rows = declared_rows.unsigned_abs();
    let cols = declared_cols.unsigned_abs();

    if table.len() != rows as usize {
        return Err(StructuralGridError::RowCountMismatch {
            expected: rows,
            actual: table.len(),
        });
    }
    for (row, entries) in table.iter().enumerate() {
        if entries.len() != cols as usize {
            return Err(StructuralGridError::RowLengthMismatch {
                row,
                expected: cols,
                actual: entries.len(),
            });
        }
    }

    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    let mut start_count = 0;
    let mut goal_count = 0;
    let mut key_count = 0;
    for (row, entries) in table.iter().enumerate() {
        for (col, code) in entries.iter().enumerate() {
            let Some(kind) = CellKind::from_code(code) else {
                return Err(StructuralGridError::UnknownCellCode {
                    row,
                    col,
                    code: code.clone(),
                });
            };
            match kind {
                CellKind::Start => start_count += 1,
                CellKind::Goal => goal_count += 1,
                CellKind::Key => key_count += 1,
                _ => {}
            }
            cells.push(kind);
        }
    }

    let grid = Grid {
        rows,
        cols,
        cells,
        start,
        goal,
        portals: description.portals.clone(),
        rules: description.rules,
        key_count,
    };

    for (marker, position) in [(Marker::Start, start), (Marker::Goal, goal)] {
        if !grid.contains(position) {
            return Err(StructuralGridError::MarkerOutOfBounds { marker, position });
        }
    }

    if grid.cell(start) != Some(&CellKind::Start) {
        return Err(StructuralGridError::StartGoalMismatch {
            marker: Marker::Start,
            position: start,
        });
    }
    if grid.cell(goal) != Some(&CellKind::Goal) {
        return Err(StructuralGridError::StartGoalMismatch {
            marker: Marker::Goal,
            position: goal,
        });
    }

    for (kind, count) in [(Marker::Start, start_count), (Marker::Goal, goal_count)] {
        if count != 1 {
            return Err(StructuralGridError::CardinalityError { kind, count });
        }
    }

    Ok(grid)
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, StructuralGridError> {
    value.ok_or(StructuralGridError::MissingField { field })
}

