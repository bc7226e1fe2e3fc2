use maze_puzzle_core::{PortalError, Position};
use maze_puzzle_system_portals::{resolve, MAX_PORTAL_JUMPS};
use maze_puzzle_world::{Grid, GridDescription};

fn grid_from(value: serde_json::Value) -> Grid {
    let description: GridDescription = serde_json::from_value(value).expect("description");
    Grid::from_description(&description).expect("valid grid")
}

fn corridor(length: usize) -> Grid {
    let mut cells = vec!["S".to_owned()];
    cells.extend((1..=length).map(|index| format!("P{index}")));
    cells.push(" ".to_owned());
    cells.push("G".to_owned());
    let portals: serde_json::Map<_, _> = (1..=length)
        .map(|index| {
            (
                format!("P{index}"),
                serde_json::json!({"r": 0, "c": index + 1}),
            )
        })
        .collect();
    grid_from(serde_json::json!({
        "rows": 1,
        "cols": cells.len(),
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": cells.len() - 1},
        "cells": [cells],
        "portals": portals,
    }))
}

#[test]
fn single_hop_lands_on_target() {
    let grid = grid_from(serde_json::json!({
        "rows": 3,
        "cols": 4,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 2, "c": 0},
        "cells": [
            ["S", "P1", " ", " "],
            [" ", "W", " ", " "],
            ["G", " ", " ", " "]
        ],
        "portals": {"P1": {"r": 2, "c": 3}}
    }));

    let teleport = resolve(Position::new(0, 1), &grid).expect("portal resolves");
    assert_eq!(teleport.destination, Position::new(2, 3));
    assert_eq!(teleport.trace, vec![Position::new(2, 3)]);
    assert_eq!(teleport.jumps, 1);
}

#[test]
fn multi_hop_chain_records_every_hop() {
    let grid = corridor(3);
    let teleport = resolve(Position::new(0, 1), &grid).expect("chain resolves");
    assert_eq!(
        teleport.trace,
        vec![Position::new(0, 2), Position::new(0, 3), Position::new(0, 4)]
    );
    assert_eq!(teleport.destination, Position::new(0, 4));
    assert_eq!(teleport.jumps, 3);
}

#[test]
fn chain_longer_than_cap_is_rejected() {
    let grid = corridor(MAX_PORTAL_JUMPS as usize + 1);
    let error = resolve(Position::new(0, 1), &grid).expect_err("chain too long");
    assert_eq!(
        error,
        PortalError::TooManyJumps {
            limit: MAX_PORTAL_JUMPS
        }
    );
}

#[test]
fn revisiting_a_label_is_a_loop() {
    let grid = grid_from(serde_json::json!({
        "rows": 1,
        "cols": 4,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 3},
        "cells": [["S", "PA", "PB", "G"]],
        "portals": {"PA": {"r": 0, "c": 2}, "PB": {"r": 0, "c": 1}}
    }));

    let error = resolve(Position::new(0, 1), &grid).expect_err("loop detected");
    assert_eq!(
        error,
        PortalError::PortalLoop {
            label: "PA".to_owned()
        }
    );
}

#[test]
fn portal_targeting_itself_is_a_loop() {
    let grid = grid_from(serde_json::json!({
        "rows": 1,
        "cols": 3,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 2},
        "cells": [["S", "P1", "G"]],
        "portals": {"P1": {"r": 0, "c": 1}}
    }));

    let error = resolve(Position::new(0, 1), &grid).expect_err("loop detected");
    assert!(matches!(error, PortalError::PortalLoop { label } if label == "P1"));
}

#[test]
fn unmapped_label_is_unknown() {
    let grid = grid_from(serde_json::json!({
        "rows": 1,
        "cols": 3,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 2},
        "cells": [["S", "Px", "G"]],
        "portals": {"PX": {"r": 0, "c": 2}}
    }));

    let error = resolve(Position::new(0, 1), &grid).expect_err("label is case-sensitive");
    assert_eq!(
        error,
        PortalError::UnknownPortal {
            label: "Px".to_owned()
        }
    );
}

#[test]
fn target_outside_grid_is_rejected() {
    let grid = grid_from(serde_json::json!({
        "rows": 1,
        "cols": 3,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 2},
        "cells": [["S", "P1", "G"]],
        "portals": {"P1": {"r": 5, "c": 0}}
    }));

    let error = resolve(Position::new(0, 1), &grid).expect_err("target out of bounds");
    assert_eq!(
        error,
        PortalError::TargetOutOfBounds {
            label: "P1".to_owned(),
            target: Position::new(5, 0),
        }
    );
}

#[test]
fn chain_ending_on_wall_is_rejected() {
    let grid = grid_from(serde_json::json!({
        "rows": 2,
        "cols": 3,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 2},
        "cells": [["S", "P1", "G"], [" ", " ", "W"]],
        "portals": {"P1": {"r": 1, "c": 2}}
    }));

    let error = resolve(Position::new(0, 1), &grid).expect_err("wall landing");
    assert_eq!(
        error,
        PortalError::TeleportIntoWall {
            position: Position::new(1, 2)
        }
    );
}

#[test]
fn unreferenced_portal_entries_are_harmless() {
    let grid = grid_from(serde_json::json!({
        "rows": 1,
        "cols": 3,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 2},
        "cells": [["S", "P1", "G"]],
        "portals": {"P1": {"r": 0, "c": 2}, "P9": {"r": 40, "c": 40}}
    }));

    let teleport = resolve(Position::new(0, 1), &grid).expect("portal resolves");
    assert_eq!(teleport.destination, Position::new(0, 2));
}
