//! Board representation and game-state types.
//!
//! Contains tile geometry, the tile set, the playing grid with its placement
//! rules, and the overall game state.

pub mod geometry;
pub mod grid;
pub mod state;
pub mod tile;

pub use geometry::{
    coordinate_to_index, index_to_coordinate, rotate_degrees, Angle, GeometryError, ALL_ANGLES,
};
pub use grid::{Board, BoardError, Cell, PlacementError, MAX_DIMENSION, MIN_DIMENSION};
pub use state::{GameState, Placement, Player, Position, RecentPlays, ALL_PLAYERS};
pub use tile::{Tile, TileSet, TILE_CENTER, TILE_SIZE};
