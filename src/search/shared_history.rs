//! Automated player 1: sweep from the most recent play by either player.
//!
//! For each angle in ascending order the whole anchor window is swept
//! row-major, starting at the last anchor placed by anyone and wrapping
//! around until the start is reached again.

use tracing::debug;

use crate::board::{Board, Placement, Player, Position, RecentPlays, Tile, ALL_ANGLES};
use crate::movegen::SearchWindow;

/// Where the sweep begins for this strategy. A remembered anchor outside
/// the window (left by a tile without markers) is walked forwards into it.
pub fn start_position(window: &SearchWindow, recent: &RecentPlays) -> Position {
    recent
        .latest()
        .map(|pos| window.enter_forward(pos))
        .unwrap_or_else(|| window.first())
}

/// Returns the first legal placement in this strategy's order, or `None`
/// if the tile fits nowhere.
pub fn search(board: &Board, tile: &Tile, player: Player, recent: &RecentPlays) -> Option<Placement> {
    let window = SearchWindow::for_board(board);
    let start = start_position(&window, recent);

    for angle in ALL_ANGLES {
        let mut pos = start;
        loop {
            if board.is_placement_legal(tile, player, pos.row, pos.col, angle) {
                debug!(%player, row = pos.row, col = pos.col, %angle, "shared-history search found placement");
                return Some(Placement::new(player, pos.row, pos.col, angle));
            }
            pos = window.step_forward(pos);
            if pos == start {
                break;
            }
        }
    }

    debug!(%player, "shared-history search found no placement");
    None
}
