#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that applies one move to an attempt.

use std::collections::BTreeSet;

use maze_puzzle_core::{CellKind, Direction, Event, MoveError, Position};
use maze_puzzle_system_portals::resolve;
use maze_puzzle_world::Grid;

/// Ephemeral state of a single attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptState {
    position: Position,
    keys: BTreeSet<String>,
    steps: u32,
    trace: Vec<Position>,
}

impl AttemptState {
    /// Creates a state positioned at `start` with the trace seeded by it.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            keys: BTreeSet::new(),
            steps: 0,
            trace: vec![start],
        }
    }

    /// Position currently occupied.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Identifiers of every key collected so far.
    #[must_use]
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    /// Moves consumed so far.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Every position occupied so far.
    #[must_use]
    pub fn trace(&self) -> &[Position] {
        &self.trace
    }

    /// Counts one more consumed move and returns the new total.
    pub fn count_step(&mut self) -> u32 {
        self.steps = self.steps.saturating_add(1);
        self.steps
    }

    /// Consumes the state, yielding its keys, trace, steps and position.
    #[must_use]
    pub fn into_parts(self) -> (BTreeSet<String>, Vec<Position>, u32, Position) {
        (self.keys, self.trace, self.steps, self.position)
    }
}

/// Effects of a successfully applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Position occupied after the move and any teleport.
    pub position: Position,
    /// Portal jumps taken by the move.
    pub portal_jumps: u32,
    /// Key collected for the first time by the move.
    pub collected_key: Option<String>,
    /// Whether the move ended on a door.
    pub passed_door: bool,
}

/// Applies a single move to the attempt state.
///
/// Out-of-bounds moves, wall collisions and portal failures leave the state
/// untouched. A locked door is reported after the state has moved onto it.
/// Reaching the goal is not judged here.
pub fn apply(
    grid: &Grid,
    state: &mut AttemptState,
    direction: Direction,
    out: &mut Vec<Event>,
) -> Result<MoveOutcome, MoveError> {
    let entered = state.position.step(direction);
    let mut landing = match grid.cell(entered) {
        None => return Err(MoveError::OutOfBounds { position: entered }),
        Some(CellKind::Wall) => return Err(MoveError::WallCollision { position: entered }),
        Some(kind) => kind,
    };

    let mut position = entered;
    let mut portal_jumps = 0;
    if matches!(landing, CellKind::Portal(_)) {
        let teleport = resolve(entered, grid)?;
        state.trace.extend_from_slice(&teleport.trace);
        position = teleport.destination;
        portal_jumps = teleport.jumps;
        landing = grid
            .cell(position)
            .ok_or(MoveError::OutOfBounds { position })?;
        out.push(Event::Teleported {
            from: entered,
            to: position,
            jumps: portal_jumps,
        });
    }

    // The landing is traced even after a teleport, so a resolved chain's final
    // hop appears twice.
    state.trace.push(position);
    state.position = position;

    let mut collected_key = None;
    let mut passed_door = false;
    match landing {
        CellKind::Key => {
            let key = position.key_id();
            if state.keys.insert(key.clone()) {
                out.push(Event::KeyCollected {
                    key: key.clone(),
                    position,
                });
                collected_key = Some(key);
            }
        }
        CellKind::Door => {
            if grid.rules().doors_require_keys && state.keys.is_empty() {
                return Err(MoveError::LockedDoor { position });
            }
            out.push(Event::DoorPassed { position });
            passed_door = true;
        }
        _ => {}
    }

    Ok(MoveOutcome {
        position,
        portal_jumps,
        collected_key,
        passed_door,
    })
}
