#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only analytics over a validated puzzle grid.

use maze_puzzle_core::{CellKind, Dimensions, GridStats};
use maze_puzzle_world::Grid;

/// Summarises the composition of the grid.
///
/// Start and goal cells are not counted in any of the per-kind totals.
#[must_use]
pub fn stats(grid: &Grid) -> GridStats {
    let mut stats = GridStats {
        dimensions: Dimensions {
            rows: grid.rows(),
            cols: grid.cols(),
        },
        total_cells: u64::from(grid.rows()) * u64::from(grid.cols()),
        walls: 0,
        keys: 0,
        doors: 0,
        portals: 0,
        empty_cells: 0,
        start: grid.start(),
        goal: grid.goal(),
        max_steps: grid.rules().max_steps,
    };

    for (_, kind) in grid.cells() {
        let counter = match kind {
            CellKind::Wall => &mut stats.walls,
            CellKind::Key => &mut stats.keys,
            CellKind::Door => &mut stats.doors,
            CellKind::Portal(_) => &mut stats.portals,
            CellKind::Empty => &mut stats.empty_cells,
            CellKind::Start | CellKind::Goal => continue,
        };
        *counter += 1;
    }

    stats
}
