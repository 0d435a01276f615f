//! The playing grid and tile placement rules.
//!
//! The board is a row-major grid of cells. A placement anchors the centre of
//! a rotated tile at a (possibly off-board) coordinate; it is legal only if
//! every marker of the tile lands on an empty on-board cell. Placement is
//! all-or-nothing: a rejected placement never changes the board.

use super::geometry::Angle;
use super::state::{Placement, Player};
use super::tile::{Tile, TILE_CENTER};

/// Smallest allowed board dimension.
pub const MIN_DIMENSION: usize = 1;

/// Largest allowed board dimension.
pub const MAX_DIMENSION: usize = 999;

/// Character for an empty board cell in the text formats.
pub const EMPTY_CHAR: char = '.';

/// Errors raised when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be within 1..=999, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("expected {expected} cells for the board, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

/// Reasons a placement is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("tile marker would fall off the board at ({row}, {col})")]
    OffBoard { row: i64, col: i64 },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    /// Returns the save-file character for this cell.
    pub const fn to_char(self) -> char {
        match self {
            Cell::Empty => EMPTY_CHAR,
            Cell::Occupied(player) => player.marker(),
        }
    }

    /// Parses a save-file character.
    pub fn from_char(c: char) -> Option<Cell> {
        if c == EMPTY_CHAR {
            return Some(Cell::Empty);
        }
        Player::from_marker(c).map(Cell::Occupied)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board. Both dimensions must be within 1..=999.
    pub fn empty(rows: usize, cols: usize) -> Result<Board, BoardError> {
        check_dimensions(rows, cols)?;
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// Creates a board from row-major cells.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Board, BoardError> {
        check_dimensions(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(BoardError::CellCountMismatch {
                expected: rows * cols,
                actual: cells.len(),
            });
        }
        Ok(Board { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at (row, col). Panics if out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Returns one row of cells.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Number of cells holding `player`'s marker.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(player))
            .count()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Places a tile and returns the resulting board, leaving `self` untouched.
    pub fn place(
        &self,
        tile: &Tile,
        player: Player,
        row: i32,
        col: i32,
        angle: Angle,
    ) -> Result<Board, PlacementError> {
        let mut next = self.clone();
        next.apply(tile, &Placement::new(player, row, col, angle))?;
        Ok(next)
    }

    /// Applies a placement in place. On success returns the number of cells
    /// marked; on failure the board is unchanged.
    pub fn apply(&mut self, tile: &Tile, placement: &Placement) -> Result<usize, PlacementError> {
        let rotated = tile.rotate(placement.angle);
        let (row, col) = (placement.position.row, placement.position.col);
        self.check(&rotated, row, col)?;

        let marker = Cell::Occupied(placement.player);
        let mut placed = 0;
        for (r, c) in rotated.markers() {
            let (tr, tc) = target(row, col, r, c);
            // check() guarantees every target is on-board.
            if let Some(idx) = self.offset(tr, tc) {
                self.cells[idx] = marker;
                placed += 1;
            }
        }
        Ok(placed)
    }

    /// Returns whether the placement would be accepted by [`Board::place`].
    pub fn is_placement_legal(
        &self,
        tile: &Tile,
        _player: Player,
        row: i32,
        col: i32,
        angle: Angle,
    ) -> bool {
        self.check(&tile.rotate(angle), row, col).is_ok()
    }

    /// Validates an already-rotated tile anchored at (row, col).
    fn check(&self, rotated: &Tile, row: i32, col: i32) -> Result<(), PlacementError> {
        for (r, c) in rotated.markers() {
            let (tr, tc) = target(row, col, r, c);
            match self.offset(tr, tc) {
                None => return Err(PlacementError::OffBoard { row: tr, col: tc }),
                Some(idx) if !self.cells[idx].is_empty() => {
                    return Err(PlacementError::Occupied {
                        row: tr as usize,
                        col: tc as usize,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Flat index of an on-board signed coordinate.
    fn offset(&self, row: i64, col: i64) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for cell in self.row(r) {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), BoardError> {
    let valid = MIN_DIMENSION..=MAX_DIMENSION;
    if valid.contains(&rows) && valid.contains(&cols) {
        Ok(())
    } else {
        Err(BoardError::InvalidDimensions { rows, cols })
    }
}

/// Board coordinate covered by tile frame cell (r, c) when anchored at
/// (row, col). Widened so that any `i32` anchor stays in range.
fn target(row: i32, col: i32, r: usize, c: usize) -> (i64, i64) {
    let center = i64::from(TILE_CENTER);
    (
        i64::from(row) + r as i64 - center,
        i64::from(col) + c as i64 - center,
    )
}
