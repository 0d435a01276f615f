//! Text formats at the edge of the game.
//!
//! Parsing of tile files and human input, encoding and decoding of save
//! files, and rendering of the game transcript.

pub mod parser;
pub mod render;
pub mod save;
pub mod tiles;

pub use parser::{parse_human_input, HumanCommand, InputError};
pub use save::SaveError;
pub use tiles::{load_tiles, parse_tiles, TileSetError};
