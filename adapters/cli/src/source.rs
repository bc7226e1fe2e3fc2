use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_puzzle_world::{
    catalog::{self, Puzzle},
    GridDescription,
};

/// Prefix selecting a catalogue puzzle instead of a file path.
pub(crate) const BUILTIN_PREFIX: &str = "builtin:";

/// Resolves a puzzle argument into its raw grid description.
///
/// The argument is either `builtin:<slug>` or a path to a JSON file holding a
/// bare grid description or a catalogue-shaped puzzle with a `grid` field.
pub(crate) fn load_description(argument: &str) -> Result<GridDescription> {
    if let Some(slug) = argument.strip_prefix(BUILTIN_PREFIX) {
        let puzzle = catalog::find(slug)
            .with_context(|| format!("no built-in puzzle named `{slug}`"))?;
        return Ok(puzzle.grid);
    }

    let path = Path::new(argument);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read puzzle file at {}", path.display()))?;
    parse_description(&contents)
        .with_context(|| format!("failed to parse puzzle file at {}", path.display()))
}

fn parse_description(contents: &str) -> Result<GridDescription> {
    let value: serde_json::Value =
        serde_json::from_str(contents).context("puzzle file is not valid JSON")?;
    if value.get("grid").is_some() {
        let puzzle: Puzzle =
            serde_json::from_value(value).context("puzzle record has an invalid shape")?;
        Ok(puzzle.grid)
    } else {
        serde_json::from_value(value).context("grid description has an invalid shape")
    }
}

/// Reads the move list from a file.
pub(crate) fn load_moves(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read moves file at {}", path.display()))?;
    Ok(split_moves(&contents))
}

/// Splits a move list on commas and whitespace, dropping empty tokens.
pub(crate) fn split_moves(raw: &str) -> Vec<String> {
    raw.split(|character: char| character == ',' || character.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
