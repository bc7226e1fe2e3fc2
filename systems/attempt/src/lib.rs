#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Attempt engine that folds a move sequence over a validated grid.
//!
//! Every call produces exactly one [`AttemptResult`]. Expected gameplay
//! outcomes (walls, locked doors, step limits, broken portals, missing keys,
//! unknown tokens and running out of moves) are ordinary failed results.
//! Only a malformed grid is reported as an error, and only by
//! [`simulate_description`], because a [`Grid`] is valid by construction.

use maze_puzzle_core::{
    normalize_token, AttemptResult, Direction, Event, GameplayFailure, StructuralGridError,
};
use maze_puzzle_system_movement::{apply, AttemptState};
use maze_puzzle_world::{Grid, GridDescription};

/// Simulates the moves against the grid, discarding engine events.
pub fn simulate<I, S>(grid: &Grid, moves: I) -> AttemptResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    simulate_with_events(grid, moves, &mut Vec::new())
}

/// Validates the description, then simulates the moves against it.
pub fn simulate_description<I, S>(
    description: &GridDescription,
    moves: I,
) -> Result<AttemptResult, StructuralGridError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let grid = Grid::from_description(description)?;
    Ok(simulate(&grid, moves))
}

/// Simulates the moves against the grid, pushing engine events into `out`.
pub fn simulate_with_events<I, S>(grid: &Grid, moves: I, out: &mut Vec<Event>) -> AttemptResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let moves: Vec<S> = moves.into_iter().collect();
    let rules = grid.rules();
    let mut state = AttemptState::new(grid.start());
    out.push(Event::AttemptStarted {
        start: grid.start(),
        moves: moves.len(),
    });

    if grid.start() == grid.goal() && (!rules.collect_all_keys || grid.key_count() == 0) {
        return finish(state, Verdict::AlreadyAtGoal, out);
    }

    for (offset, raw) in moves.iter().enumerate() {
        let index = offset + 1;
        let token = normalize_token(raw.as_ref());

        if state.count_step() > rules.max_steps {
            let failure = GameplayFailure::StepLimitExceeded {
                max_steps: rules.max_steps,
            };
            return finish(state, Verdict::Failed(failure), out);
        }

        let Some(direction) = Direction::from_token(&token) else {
            let failure = GameplayFailure::UnknownMove { index, token };
            return finish(state, Verdict::Failed(failure), out);
        };

        if let Err(error) = apply(grid, &mut state, direction, out) {
            let failure = GameplayFailure::Move {
                index,
                direction,
                error,
            };
            return finish(state, Verdict::Failed(failure), out);
        }

        if state.position() == grid.goal() {
            let collected = state.keys().len();
            let total = grid.key_count();
            if rules.collect_all_keys && collected < total {
                let failure = GameplayFailure::MissingKeys { collected, total };
                return finish(state, Verdict::Failed(failure), out);
            }
            return finish(state, Verdict::GoalReached, out);
        }
    }

    finish(state, Verdict::Failed(GameplayFailure::MovesExhausted), out)
}

#[derive(Debug)]
enum Verdict {
    AlreadyAtGoal,
    GoalReached,
    Failed(GameplayFailure),
}

fn finish(state: AttemptState, verdict: Verdict, out: &mut Vec<Event>) -> AttemptResult {
    let (keys_collected, trace, steps, final_position) = state.into_parts();
    let (success, message, failure) = match verdict {
        Verdict::AlreadyAtGoal => (true, "Already at goal!".to_owned(), None),
        Verdict::GoalReached => (true, format!("Goal reached in {steps} steps!"), None),
        Verdict::Failed(failure) => (false, failure.to_string(), Some(failure)),
    };
    out.push(Event::AttemptFinished {
        success,
        steps,
        final_position,
    });

    AttemptResult {
        success,
        message,
        steps,
        keys_collected,
        trace,
        final_position,
        failure,
    }
}
