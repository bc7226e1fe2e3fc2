#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure portal system that resolves teleport chains for a landing position.
//!
//! A move that lands on a portal cell is carried to the portal's target. When
//! the target is itself a portal the chain continues until it reaches an
//! ordinary cell. Chains that revisit a label, exceed [`MAX_PORTAL_JUMPS`],
//! reference an unmapped label, leave the grid or end on a wall are rejected,
//! so resolution always terminates.

use std::collections::BTreeSet;

use maze_puzzle_core::{CellKind, PortalError, Position};
use maze_puzzle_world::Grid;

/// Hard cap on the number of jumps a single chain may take.
pub const MAX_PORTAL_JUMPS: u32 = 10;

/// Successful resolution of a portal chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Teleport {
    /// Ordinary cell the chain ends on.
    pub destination: Position,
    /// Every target visited by the chain, in order, ending with the destination.
    pub trace: Vec<Position>,
    /// Number of jumps taken.
    pub jumps: u32,
}

/// Resolves the portal chain starting at `position`.
///
/// A position that does not hold a portal resolves to itself with zero jumps.
pub fn resolve(position: Position, grid: &Grid) -> Result<Teleport, PortalError> {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut trace = Vec::new();
    let mut jumps = 0;
    let mut current = position;

    while let Some(label) = grid.cell(current).and_then(CellKind::portal_label) {
        if jumps >= MAX_PORTAL_JUMPS {
            return Err(PortalError::TooManyJumps {
                limit: MAX_PORTAL_JUMPS,
            });
        }
        if visited.contains(label) {
            return Err(PortalError::PortalLoop {
                label: label.to_owned(),
            });
        }
        let Some(target) = grid.portal_target(label) else {
            return Err(PortalError::UnknownPortal {
                label: label.to_owned(),
            });
        };
        if !grid.contains(target) {
            return Err(PortalError::TargetOutOfBounds {
                label: label.to_owned(),
                target,
            });
        }

        let _ = visited.insert(label);
        trace.push(target);
        current = target;
        jumps += 1;
    }

    if grid.cell(current) == Some(&CellKind::Wall) {
        return Err(PortalError::TeleportIntoWall { position: current });
    }

    Ok(Teleport {
        destination: current,
        trace,
        jumps,
    })
}

#[cfg(test)]
mod tests {
    use super::{resolve, MAX_PORTAL_JUMPS};
    use maze_puzzle_core::Position;
    use maze_puzzle_world::{Grid, GridDescription};

    fn grid(cells: serde_json::Value, portals: serde_json::Value) -> Grid {
        let description: GridDescription = serde_json::from_value(serde_json::json!({
            "rows": 1,
            "cols": 13,
            "start": {"r": 0, "c": 0},
            "goal": {"r": 0, "c": 12},
            "cells": cells,
            "portals": portals,
        }))
        .expect("description");
        Grid::from_description(&description).expect("valid grid")
    }

    #[test]
    fn non_portal_cells_resolve_to_themselves() {
        let grid = grid(
            serde_json::json!([["S", " ", " ", " ", " ", " ", " ", " ", " ", " ", " ", " ", "G"]]),
            serde_json::json!({}),
        );
        let teleport = resolve(Position::new(0, 3), &grid).expect("resolves");
        assert_eq!(teleport.destination, Position::new(0, 3));
        assert!(teleport.trace.is_empty());
        assert_eq!(teleport.jumps, 0);
    }

    #[test]
    fn chain_of_exactly_the_cap_succeeds() {
        let cells: Vec<String> = std::iter::once("S".to_owned())
            .chain((1..=10).map(|index| format!("P{index}")))
            .chain([" ".to_owned(), "G".to_owned()])
            .collect();
        let portals: serde_json::Map<_, _> = (1..=10)
            .map(|index| {
                (
                    format!("P{index}"),
                    serde_json::json!({"r": 0, "c": index + 1}),
                )
            })
            .collect();
        let grid = grid(serde_json::json!([cells]), serde_json::Value::Object(portals));

        let teleport = resolve(Position::new(0, 1), &grid).expect("resolves");
        assert_eq!(teleport.jumps, MAX_PORTAL_JUMPS);
        assert_eq!(teleport.destination, Position::new(0, 11));
        assert_eq!(teleport.trace.len(), 10);
    }
}
