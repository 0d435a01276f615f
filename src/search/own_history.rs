//! Automated player 2: sweep from this player's own last play.
//!
//! Every anchor is tried at all four angles before moving on. Player A
//! walks the window forwards from the top-left corner; player B walks it
//! backwards from the bottom-right corner, so the two sides fill the board
//! from opposite ends.

use tracing::debug;

use crate::board::{Board, Placement, Player, Position, RecentPlays, Tile, ALL_ANGLES};
use crate::movegen::SearchWindow;

/// Where the sweep begins for `player`. A remembered anchor outside the
/// window (left by a tile without markers) is walked into it in the
/// player's own direction.
pub fn start_position(window: &SearchWindow, player: Player, recent: &RecentPlays) -> Position {
    match (player, recent.of(player)) {
        (Player::A, Some(pos)) => window.enter_forward(pos),
        (Player::B, Some(pos)) => window.enter_backward(pos),
        (Player::A, None) => window.first(),
        (Player::B, None) => window.last(),
    }
}

/// Returns the first legal placement in this strategy's order, or `None`
/// if the tile fits nowhere.
pub fn search(board: &Board, tile: &Tile, player: Player, recent: &RecentPlays) -> Option<Placement> {
    let window = SearchWindow::for_board(board);
    let start = start_position(&window, player, recent);

    let mut pos = start;
    loop {
        for angle in ALL_ANGLES {
            if board.is_placement_legal(tile, player, pos.row, pos.col, angle) {
                debug!(%player, row = pos.row, col = pos.col, %angle, "own-history search found placement");
                return Some(Placement::new(player, pos.row, pos.col, angle));
            }
        }
        pos = match player {
            Player::A => window.step_forward(pos),
            Player::B => window.step_backward(pos),
        };
        if pos == start {
            break;
        }
    }

    debug!(%player, "own-history search found no placement");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Angle, Cell};

    fn dot() -> Tile {
        Tile::from_rows([",,,,,", ",,,,,", ",,!,,", ",,,,,", ",,,,,"]).unwrap()
    }

    fn corner() -> Tile {
        Tile::from_rows([",,,,,", ",,,,,", ",,!!,", ",,!,,", ",,,,,"]).unwrap()
    }

    #[test]
    fn player_a_starts_top_left() {
        let board = Board::empty(4, 4).unwrap();
        let found = search(&board, &dot(), Player::A, &RecentPlays::default()).unwrap();
        assert_eq!(found, Placement::new(Player::A, 0, 0, Angle::Deg0));
    }

    #[test]
    fn player_b_starts_bottom_right() {
        let board = Board::empty(4, 4).unwrap();
        let found = search(&board, &dot(), Player::B, &RecentPlays::default()).unwrap();
        assert_eq!(found, Placement::new(Player::B, 3, 3, Angle::Deg0));
    }

    #[test]
    fn tries_every_angle_before_moving() {
        // The corner piece extends right and down from its anchor. At the
        // bottom-right cell only the 180 degree rotation stays on the board.
        let board = Board::empty(3, 3).unwrap();
        let found = search(&board, &corner(), Player::B, &RecentPlays::default()).unwrap();
        assert_eq!(found, Placement::new(Player::B, 2, 2, Angle::Deg180));
    }

    #[test]
    fn ignores_the_opponents_history() {
        let board = Board::empty(4, 4).unwrap();
        let mut recent = RecentPlays::default();
        recent.record(&Placement::new(Player::A, 1, 1, Angle::Deg0));
        let found = search(&board, &dot(), Player::B, &recent).unwrap();
        assert_eq!(found.position, Position::new(3, 3));
    }

    #[test]
    fn resumes_from_own_last_play() {
        let board = Board::empty(4, 4).unwrap();
        let mut recent = RecentPlays::default();
        recent.record(&Placement::new(Player::B, 1, 2, Angle::Deg0));
        recent.record(&Placement::new(Player::A, 3, 3, Angle::Deg0));
        let found = search(&board, &dot(), Player::B, &recent).unwrap();
        assert_eq!(found.position, Position::new(1, 2));
    }

    #[test]
    fn backward_walk_wraps_to_bottom_right() {
        // Only the bottom-right cell is free and B last played at the top.
        let mut cells = vec![Cell::Occupied(Player::A); 9];
        cells[8] = Cell::Empty;
        let board = Board::from_cells(3, 3, cells).unwrap();
        let mut recent = RecentPlays::default();
        recent.record(&Placement::new(Player::B, 0, 0, Angle::Deg0));
        let found = search(&board, &dot(), Player::B, &recent).unwrap();
        assert_eq!(found, Placement::new(Player::B, 2, 2, Angle::Deg0));
    }

    #[test]
    fn out_of_window_history_is_walked_into_the_window() {
        let board = Board::empty(3, 3).unwrap();
        let window = SearchWindow::for_board(&board);
        let mut recent = RecentPlays::default();
        recent.record(&Placement::new(Player::B, 1, -30, Angle::Deg0));
        recent.record(&Placement::new(Player::A, 1, 30, Angle::Deg0));
        assert_eq!(start_position(&window, Player::B, &recent), Position::new(0, 4));
        assert_eq!(start_position(&window, Player::A, &recent), Position::new(2, -2));

        // B walks back from (0, 4) and takes the first free cell of row 0.
        let found = search(&board, &dot(), Player::B, &recent).unwrap();
        assert_eq!(found, Placement::new(Player::B, 0, 2, Angle::Deg0));

        recent.record(&Placement::new(Player::B, -50, 0, Angle::Deg0));
        assert_eq!(start_position(&window, Player::B, &recent), window.last());
        let found = search(&board, &dot(), Player::B, &recent).unwrap();
        assert_eq!(found.position, Position::new(2, 2));
    }

    #[test]
    fn reports_no_placement_on_full_board() {
        let board = Board::from_cells(2, 2, vec![Cell::Occupied(Player::B); 4]).unwrap();
        assert_eq!(search(&board, &dot(), Player::A, &RecentPlays::default()), None);
        assert_eq!(search(&board, &dot(), Player::B, &RecentPlays::default()), None);
    }
}
