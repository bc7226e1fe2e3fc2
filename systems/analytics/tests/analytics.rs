use maze_puzzle_core::{Dimensions, Position};
use maze_puzzle_system_analytics::stats;
use maze_puzzle_world::{catalog, Grid, GridDescription};

fn builtin(slug: &str) -> Grid {
    let puzzle = catalog::find(slug).expect("builtin puzzle");
    Grid::from_description(&puzzle.grid).expect("valid grid")
}

#[test]
fn counts_every_cell_kind() {
    let stats = stats(&builtin("portal-maze"));

    assert_eq!(stats.dimensions, Dimensions { rows: 6, cols: 8 });
    assert_eq!(stats.total_cells, 48);
    assert_eq!(stats.walls, 5);
    assert_eq!(stats.keys, 2);
    assert_eq!(stats.doors, 2);
    assert_eq!(stats.portals, 2);
    assert_eq!(stats.empty_cells, 35);
    assert_eq!(stats.start, Position::new(0, 0));
    assert_eq!(stats.goal, Position::new(5, 7));
    assert_eq!(stats.max_steps, 200);
}

#[test]
fn per_kind_counts_exclude_start_and_goal() {
    let stats = stats(&builtin("collect-all-keys"));
    let counted = stats.walls + stats.keys + stats.doors + stats.portals + stats.empty_cells;

    assert_eq!(u64::from(counted) + 2, stats.total_cells);
    assert_eq!(stats.keys, 3);
}

#[test]
fn default_step_limit_is_echoed() {
    let description: GridDescription = serde_json::from_value(serde_json::json!({
        "rows": 1,
        "cols": 2,
        "start": {"r": 0, "c": 0},
        "goal": {"r": 0, "c": 1},
        "cells": [["S", "G"]]
    }))
    .expect("description");
    let grid = Grid::from_description(&description).expect("valid grid");

    let stats = stats(&grid);

    assert_eq!(stats.max_steps, 1000);
    assert_eq!(stats.total_cells, 2);
    assert_eq!(stats.empty_cells, 0);
}

#[test]
fn stats_serialise_with_nested_dimensions() {
    let json = serde_json::to_value(stats(&builtin("easy-start"))).expect("serialise");
    assert_eq!(json["dimensions"], serde_json::json!({"rows": 4, "cols": 4}));
    assert_eq!(json["walls"], serde_json::json!(2));
    assert_eq!(json["empty_cells"], serde_json::json!(12));
}
