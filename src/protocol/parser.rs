//! Human input parser.
//!
//! A human player types either a move, `<row> <col> <angle>`, or a save
//! command, `save<path>`. The parser turns one input line into a structured
//! [`HumanCommand`]; it does not check whether the move is legal.

use std::path::PathBuf;

/// Keyword that turns an input line into a save request.
pub const SAVE_KEYWORD: &str = "save";

/// Shortest well-formed move, e.g. `1 2 0`.
const MIN_MOVE_LEN: usize = 5;

/// A parsed line of human input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanCommand {
    /// Place the current tile anchored at (row, col), rotated by `angle`
    /// degrees. The angle is not yet validated.
    Place { row: i32, col: i32, angle: i32 },

    /// Save the game to the given path and prompt again.
    Save(PathBuf),
}

/// Reasons a line of human input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("move is too short")]
    TooShort,

    #[error("move has a trailing space")]
    TrailingSpace,

    #[error("expected 3 numbers, got {0}")]
    WrongFieldCount(usize),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("input is not valid UTF-8")]
    NotUtf8,
}

/// Parses one line of human input (without its line terminator).
pub fn parse_human_input(line: &str) -> Result<HumanCommand, InputError> {
    if let Some(path) = line.strip_prefix(SAVE_KEYWORD) {
        return Ok(HumanCommand::Save(PathBuf::from(path)));
    }
    parse_move(line)
}

/// Parses `<row> <col> <angle>`: exactly three integers separated by single
/// spaces.
pub fn parse_move(line: &str) -> Result<HumanCommand, InputError> {
    if line.len() < MIN_MOVE_LEN {
        return Err(InputError::TooShort);
    }
    if line.ends_with(' ') {
        return Err(InputError::TrailingSpace);
    }

    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != 3 {
        return Err(InputError::WrongFieldCount(fields.len()));
    }

    let mut numbers = [0i32; 3];
    for (slot, field) in numbers.iter_mut().zip(&fields) {
        *slot = parse_number(field)?;
    }
    let [row, col, angle] = numbers;
    Ok(HumanCommand::Place { row, col, angle })
}

fn parse_number(field: &str) -> Result<i32, InputError> {
    let invalid = || InputError::InvalidNumber(field.to_string());
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(invalid());
    }
    field.parse::<i32>().map_err(|_| invalid())
}
