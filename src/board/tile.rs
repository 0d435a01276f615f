//! Tiles and tile sets.
//!
//! A tile is a fixed 5x5 mask of marker cells. The tile set is the ordered,
//! non-empty list of tiles handed out to players in turn, wrapping around
//! once the last tile has been used.

use super::geometry::Angle;

/// Side length of the square tile frame.
pub const TILE_SIZE: usize = 5;

/// Offset of the tile's anchor cell within its frame.
pub const TILE_CENTER: i32 = 2;

/// Character marking an occupied tile cell in the text format.
pub const MARKER_CHAR: char = '!';

/// Character marking an empty tile cell in the text format.
pub const BLANK_CHAR: char = ',';

/// A 5x5 marker mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    cells: [[bool; TILE_SIZE]; TILE_SIZE],
}

impl Tile {
    /// Creates a tile directly from its cell mask.
    pub const fn new(cells: [[bool; TILE_SIZE]; TILE_SIZE]) -> Self {
        Tile { cells }
    }

    /// Builds a tile from five rows of `,`/`!` characters.
    ///
    /// Returns `None` if a row is not exactly five valid characters.
    pub fn from_rows(rows: [&str; TILE_SIZE]) -> Option<Tile> {
        let mut cells = [[false; TILE_SIZE]; TILE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.chars().count() != TILE_SIZE {
                return None;
            }
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = match ch {
                    MARKER_CHAR => true,
                    BLANK_CHAR => false,
                    _ => return None,
                };
            }
        }
        Some(Tile { cells })
    }

    /// Returns whether the cell at (row, col) of the frame holds a marker.
    pub fn is_marker(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    /// Number of marker cells in the tile.
    pub fn marker_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&m| m).count()
    }

    /// Iterates over the (row, col) frame coordinates of every marker cell,
    /// in row-major order.
    pub fn markers(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..TILE_SIZE)
            .flat_map(|r| (0..TILE_SIZE).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.cells[r][c])
    }

    /// Returns a copy of the tile rotated clockwise by `angle`.
    pub fn rotate(&self, angle: Angle) -> Tile {
        let mut cells = [[false; TILE_SIZE]; TILE_SIZE];
        for r in 0..TILE_SIZE {
            for c in 0..TILE_SIZE {
                let (dr, dc) = angle.map(r, c);
                cells[dr][dc] = self.cells[r][c];
            }
        }
        Tile { cells }
    }

    /// Renders one row of the tile as five `,`/`!` characters.
    pub fn row_string(&self, row: usize) -> String {
        self.cells[row]
            .iter()
            .map(|&m| if m { MARKER_CHAR } else { BLANK_CHAR })
            .collect()
    }

    /// Renders the tile as five newline-terminated rows.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(TILE_SIZE * (TILE_SIZE + 1));
        for r in 0..TILE_SIZE {
            out.push_str(&self.row_string(r));
            out.push('\n');
        }
        out
    }
}

/// The ordered collection of tiles used by a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Creates a tile set. Returns `None` if `tiles` is empty.
    pub fn new(tiles: Vec<Tile>) -> Option<TileSet> {
        if tiles.is_empty() {
            None
        } else {
            Some(TileSet { tiles })
        }
    }

    /// Number of tiles in the set (always at least one).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; a tile set holds at least one tile.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the tile at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Returns the tile at `index` modulo the set size.
    pub fn cyclic(&self, index: usize) -> &Tile {
        &self.tiles[index % self.tiles.len()]
    }

    /// Returns the index that follows `index`, wrapping to zero.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tiles.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
}
