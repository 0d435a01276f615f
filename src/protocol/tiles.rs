//! Tile file parsing.
//!
//! A tile file holds one or more tiles. Each tile is five lines of exactly
//! five `,`/`!` characters. Consecutive tiles are separated by a single
//! blank line and the file ends with the last tile's final line break.
//!
//! ```text
//! ,,,,,
//! ,,!,,
//! ,,!,,
//! ,,!!,
//! ,,,,,
//!
//! ,,,,,
//! ,,,,,
//! ,,!,,
//! ,,,,,
//! ,,,,,
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{Tile, TileSet, TILE_SIZE};

/// Lines taken by one tile plus its separator.
const LINES_PER_TILE: usize = TILE_SIZE + 1;

/// Errors that can occur while reading a tile file.
#[derive(Debug, thiserror::Error)]
pub enum TileSetError {
    #[error("can't access tile file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tile file is empty")]
    Empty,

    #[error("tile file must end with a line break")]
    MissingFinalNewline,

    #[error("tile file has {0} lines, which is not a whole number of tiles")]
    WrongLineCount(usize),

    #[error("line {line}: expected five ',' or '!' characters, got '{content}'")]
    InvalidRow { line: usize, content: String },

    #[error("line {line}: expected a blank line between tiles")]
    MissingSeparator { line: usize },
}

impl TileSetError {
    /// Whether the file could not be read at all, as opposed to holding
    /// malformed contents.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, TileSetError::Unreadable { .. })
    }
}

/// Reads and parses a tile file.
pub fn load_tiles(path: &Path) -> Result<TileSet, TileSetError> {
    let text = fs::read_to_string(path).map_err(|source| TileSetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tiles(&text)
}

/// Parses the contents of a tile file.
pub fn parse_tiles(text: &str) -> Result<TileSet, TileSetError> {
    if text.is_empty() {
        return Err(TileSetError::Empty);
    }
    let body = text
        .strip_suffix('\n')
        .ok_or(TileSetError::MissingFinalNewline)?;
    let lines: Vec<&str> = body.split('\n').collect();

    // n tiles use 5n lines plus n - 1 separators.
    if (lines.len() + 1) % LINES_PER_TILE != 0 {
        return Err(TileSetError::WrongLineCount(lines.len()));
    }

    let mut tiles = Vec::with_capacity((lines.len() + 1) / LINES_PER_TILE);
    for (block, chunk) in lines.chunks(LINES_PER_TILE).enumerate() {
        let first_line = block * LINES_PER_TILE + 1;
        let rows = &chunk[..TILE_SIZE];
        for (i, row) in rows.iter().enumerate() {
            if !is_tile_row(row) {
                return Err(TileSetError::InvalidRow {
                    line: first_line + i,
                    content: row.to_string(),
                });
            }
        }
        if let Some(sep) = chunk.get(TILE_SIZE) {
            if !sep.is_empty() {
                return Err(TileSetError::MissingSeparator {
                    line: first_line + TILE_SIZE,
                });
            }
        }
        let tile = Tile::from_rows([rows[0], rows[1], rows[2], rows[3], rows[4]]).ok_or_else(
            || TileSetError::InvalidRow {
                line: first_line,
                content: rows[0].to_string(),
            },
        )?;
        tiles.push(tile);
    }

    TileSet::new(tiles).ok_or(TileSetError::Empty)
}

/// Renders a tile set back into the tile file format.
pub fn encode_tiles(tiles: &TileSet) -> String {
    tiles
        .iter()
        .map(Tile::to_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_tile_row(row: &str) -> bool {
    row.len() == TILE_SIZE && row.chars().all(|c| c == ',' || c == '!')
}
