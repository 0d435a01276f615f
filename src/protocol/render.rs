//! Text rendering for the game transcript.

use crate::board::{Board, Placement, Player, Tile, TileSet, ALL_ANGLES, TILE_SIZE};

/// Renders the board as `rows` lines of `cols` characters.
pub fn render_board(board: &Board) -> String {
    board.to_string()
}

/// Renders a tile as five lines, as shown to a human before their move.
pub fn render_tile(tile: &Tile) -> String {
    tile.to_text()
}

/// Renders every tile in all four rotations side by side, tiles separated
/// by a blank line.
pub fn render_rotations(tiles: &TileSet) -> String {
    let blocks: Vec<String> = tiles.iter().map(render_tile_rotations).collect();
    blocks.join("\n")
}

fn render_tile_rotations(tile: &Tile) -> String {
    let rotated = ALL_ANGLES.map(|angle| tile.rotate(angle));
    let mut out = String::new();
    for r in 0..TILE_SIZE {
        let row: Vec<String> = rotated.iter().map(|t| t.row_string(r)).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Prompt shown before reading a human move.
pub fn prompt(player: Player) -> String {
    format!("Player {}] ", player.marker())
}

/// Line announcing an automated player's move.
pub fn automated_move(placement: &Placement) -> String {
    format!(
        "Player {} => {} {} rotated {}",
        placement.player.marker(),
        placement.position.row,
        placement.position.col,
        placement.angle.degrees()
    )
}

/// Line announcing the winner.
pub fn winner(player: Player) -> String {
    format!("Player {} wins", player.marker())
}
