//! Coordinate conversions and tile rotation.
//!
//! The text formats lay a grid out as a flat buffer of `rows * (cols + 1)`
//! bytes, each row followed by a line break. The helpers here translate
//! between that layout and (row, col) pairs. Everything else in the crate
//! works on genuine 2D coordinates.

use super::tile::{Tile, TILE_SIZE};

/// Errors raised by geometry helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid rotation angle: {0} (expected 0, 90, 180 or 270)")]
    InvalidAngle(i32),
}

/// A clockwise rotation applied to a tile before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// All rotations in ascending order. Search order depends on this.
pub const ALL_ANGLES: [Angle; 4] = [Angle::Deg0, Angle::Deg90, Angle::Deg180, Angle::Deg270];

impl Angle {
    /// Returns the rotation in degrees.
    pub const fn degrees(self) -> i32 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }

    /// Maps a source cell of the 5x5 tile frame to its rotated location.
    pub const fn map(self, row: usize, col: usize) -> (usize, usize) {
        let last = TILE_SIZE - 1;
        match self {
            Angle::Deg0 => (row, col),
            Angle::Deg90 => (col, last - row),
            Angle::Deg180 => (last - row, last - col),
            Angle::Deg270 => (last - col, row),
        }
    }
}

impl TryFrom<i32> for Angle {
    type Error = GeometryError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Angle::Deg0),
            90 => Ok(Angle::Deg90),
            180 => Ok(Angle::Deg180),
            270 => Ok(Angle::Deg270),
            other => Err(GeometryError::InvalidAngle(other)),
        }
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Converts a flat index of a `rows x (cols + 1)` buffer into (row, col).
///
/// Returns `None` when the index falls on a row separator or past the last
/// row.
pub fn index_to_coordinate(rows: usize, cols: usize, index: usize) -> Option<(usize, usize)> {
    let stride = cols + 1;
    let row = index / stride;
    let col = index % stride;
    if col == cols || row >= rows {
        return None;
    }
    Some((row, col))
}

/// Converts (row, col) into a flat index of a `rows x (cols + 1)` buffer.
pub const fn coordinate_to_index(cols: usize, row: usize, col: usize) -> usize {
    row * (cols + 1) + col
}

/// Rotates a tile by a raw angle in degrees.
pub fn rotate_degrees(tile: &Tile, degrees: i32) -> Result<Tile, GeometryError> {
    let angle = Angle::try_from(degrees)?;
    Ok(tile.rotate(angle))
}
