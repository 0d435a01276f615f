//! Legal placement generation.
//!
//! A 5x5 tile anchored at its centre can still land markers on the board
//! when the anchor is up to two cells beyond any edge, so every search runs
//! over the window `[-2, rows + 1] x [-2, cols + 1]`.

use crate::board::{Board, Placement, Player, Position, Tile, ALL_ANGLES, TILE_CENTER};

/// The rectangle of anchor positions worth trying on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl SearchWindow {
    /// Window for `board`.
    pub fn for_board(board: &Board) -> Self {
        SearchWindow {
            min_row: -TILE_CENTER,
            max_row: board.rows() as i32 - 1 + TILE_CENTER,
            min_col: -TILE_CENTER,
            max_col: board.cols() as i32 - 1 + TILE_CENTER,
        }
    }

    /// Top-left corner.
    pub fn first(&self) -> Position {
        Position::new(self.min_row, self.min_col)
    }

    /// Bottom-right corner.
    pub fn last(&self) -> Position {
        Position::new(self.max_row, self.max_col)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.min_row..=self.max_row).contains(&pos.row)
            && (self.min_col..=self.max_col).contains(&pos.col)
    }

    /// Number of anchor positions in the window.
    pub fn len(&self) -> usize {
        ((self.max_row - self.min_row + 1) * (self.max_col - self.min_col + 1)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next position in row-major order, wrapping from the bottom-right
    /// corner back to the top-left.
    pub fn step_forward(&self, pos: Position) -> Position {
        let mut next = Position::new(pos.row, pos.col + 1);
        if next.col > self.max_col {
            next.col = self.min_col;
            next.row += 1;
        }
        if next.row > self.max_row {
            next.row = self.min_row;
        }
        next
    }

    /// Previous position in row-major order, wrapping from the top-left
    /// corner back to the bottom-right.
    pub fn step_backward(&self, pos: Position) -> Position {
        let mut next = Position::new(pos.row, pos.col - 1);
        if next.col < self.min_col {
            next.col = self.max_col;
            next.row -= 1;
        }
        if next.row < self.min_row {
            next.row = self.max_row;
        }
        next
    }

    /// First position inside the window reached by stepping forwards from
    /// `pos`, or `pos` itself if it already lies inside.
    pub fn enter_forward(&self, pos: Position) -> Position {
        if !(self.min_row..=self.max_row).contains(&pos.row) {
            return self.first();
        }
        if pos.col < self.min_col {
            Position::new(pos.row, self.min_col)
        } else if pos.col > self.max_col {
            self.step_forward(Position::new(pos.row, self.max_col))
        } else {
            pos
        }
    }

    /// First position inside the window reached by stepping backwards from
    /// `pos`, or `pos` itself if it already lies inside.
    pub fn enter_backward(&self, pos: Position) -> Position {
        if !(self.min_row..=self.max_row).contains(&pos.row) {
            return self.last();
        }
        if pos.col > self.max_col {
            Position::new(pos.row, self.max_col)
        } else if pos.col < self.min_col {
            self.step_backward(Position::new(pos.row, self.min_col))
        } else {
            pos
        }
    }
}

/// Returns whether `player` can place `tile` anywhere on `board`.
///
/// Tries rows, then columns, then angles in ascending order and stops at the
/// first legal placement.
pub fn has_legal_move(board: &Board, tile: &Tile, player: Player) -> bool {
    first_legal_placement(board, tile, player).is_some()
}

/// Returns the first legal placement in row, column, angle order.
pub fn first_legal_placement(board: &Board, tile: &Tile, player: Player) -> Option<Placement> {
    legal_placements(board, tile, player).next()
}

/// Enumerates every legal placement in row, column, angle order.
pub fn legal_placements<'a>(
    board: &'a Board,
    tile: &'a Tile,
    player: Player,
) -> impl Iterator<Item = Placement> + 'a {
    let window = SearchWindow::for_board(board);
    (window.min_row..=window.max_row)
        .flat_map(move |row| (window.min_col..=window.max_col).map(move |col| (row, col)))
        .flat_map(move |(row, col)| {
            ALL_ANGLES
                .into_iter()
                .map(move |angle| Placement::new(player, row, col, angle))
        })
        .filter(move |p| {
            board.is_placement_legal(tile, player, p.position.row, p.position.col, p.angle)
        })
}
