//! Built-in sample puzzles.

use std::collections::BTreeMap;

use maze_puzzle_core::{Position, Rules};
use serde::{Deserialize, Serialize};

use crate::GridDescription;

/// Difficulty rating attached to a puzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Introductory puzzle.
    Easy,
    /// Puzzle with one mechanic to learn.
    #[default]
    Medium,
    /// Puzzle combining several mechanics.
    Hard,
    /// Puzzle with strict rules.
    Expert,
}

/// Puzzle metadata bundled with its grid description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Short identifier used to look the puzzle up.
    #[serde(default)]
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Optional blurb shown to players.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Difficulty rating.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Raw grid description.
    pub grid: GridDescription,
}

/// Returns every built-in puzzle in catalogue order.
#[must_use]
pub fn puzzles() -> Vec<Puzzle> {
    vec![easy_start(), key_and_door(), portal_maze(), collect_all_keys()]
}

/// Looks up a built-in puzzle by slug.
#[must_use]
pub fn find(slug: &str) -> Option<Puzzle> {
    puzzles().into_iter().find(|puzzle| puzzle.slug == slug)
}

fn easy_start() -> Puzzle {
    Puzzle {
        slug: "easy-start".to_owned(),
        title: "Easy Start".to_owned(),
        description: Some("A simple maze to get you started. Just reach the goal!".to_owned()),
        difficulty: Difficulty::Easy,
        grid: layout(
            &[
                &["S", " ", " ", " "],
                &[" ", "W", " ", " "],
                &[" ", "W", " ", " "],
                &[" ", " ", " ", "G"],
            ],
            Position::new(0, 0),
            Position::new(3, 3),
            &[],
            rules(50, false),
        ),
    }
}

fn key_and_door() -> Puzzle {
    Puzzle {
        slug: "key-and-door".to_owned(),
        title: "Key and Door Challenge".to_owned(),
        description: Some("Collect the key to unlock the door blocking your path!".to_owned()),
        difficulty: Difficulty::Medium,
        grid: layout(
            &[
                &["S", " ", " ", "K", " ", " "],
                &[" ", "W", "W", "W", "W", " "],
                &[" ", " ", " ", " ", "D", " "],
                &["W", "W", "W", " ", " ", " "],
                &[" ", " ", " ", " ", " ", "G"],
            ],
            Position::new(0, 0),
            Position::new(4, 5),
            &[],
            rules(100, false),
        ),
    }
}

fn portal_maze() -> Puzzle {
    Puzzle {
        slug: "portal-maze".to_owned(),
        title: "Portal Maze".to_owned(),
        description: Some("Master the portals to reach the goal efficiently!".to_owned()),
        difficulty: Difficulty::Hard,
        grid: layout(
            &[
                &["S", " ", "W", "K", " ", "P1", " ", " "],
                &[" ", "W", " ", " ", "D", " ", " ", " "],
                &[" ", " ", " ", "P2", " ", "W", " ", " "],
                &[" ", "K", "W", " ", " ", " ", "D", " "],
                &[" ", " ", " ", " ", "W", " ", " ", " "],
                &[" ", " ", " ", " ", " ", " ", " ", "G"],
            ],
            Position::new(0, 0),
            Position::new(5, 7),
            &[("P1", Position::new(2, 3)), ("P2", Position::new(0, 7))],
            rules(200, false),
        ),
    }
}

fn collect_all_keys() -> Puzzle {
    Puzzle {
        slug: "collect-all-keys".to_owned(),
        title: "Collect All Keys".to_owned(),
        description: Some(
            "Advanced challenge: collect ALL keys before reaching the goal!".to_owned(),
        ),
        difficulty: Difficulty::Expert,
        grid: layout(
            &[
                &["S", " ", "W", " ", "K", " "],
                &[" ", "W", " ", " ", "W", " "],
                &["K", " ", " ", "W", " ", "K"],
                &[" ", "W", " ", " ", " ", " "],
                &[" ", " ", "W", " ", "W", " "],
                &[" ", " ", " ", " ", " ", "G"],
            ],
            Position::new(0, 0),
            Position::new(5, 5),
            &[],
            rules(150, true),
        ),
    }
}

const fn rules(max_steps: u32, collect_all_keys: bool) -> Rules {
    Rules {
        max_steps,
        doors_require_keys: true,
        collect_all_keys,
    }
}

fn layout(
    rows: &[&[&str]],
    start: Position,
    goal: Position,
    portals: &[(&str, Position)],
    rules: Rules,
) -> GridDescription {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|code| (*code).to_owned()).collect())
        .collect();
    let portals: BTreeMap<String, Position> = portals
        .iter()
        .map(|(label, target)| ((*label).to_owned(), *target))
        .collect();
    GridDescription {
        rows: i32::try_from(cells.len()).ok(),
        cols: cells
            .first()
            .and_then(|row| i32::try_from(row.len()).ok()),
        start: Some(start),
        goal: Some(goal),
        cells: Some(cells),
        portals,
        rules,
    }
}
