//! Save file encoding and decoding.
//!
//! A save file captures a single [`GameState`] snapshot:
//!
//! ```text
//! <next tile> <next player> <rows> <cols>
//! <rows lines of cols characters from '.', '*' and '#'>
//! ```
//!
//! The board body is the flat `rows x (cols + 1)` text buffer, each row
//! terminated by a line break. Recent-play history is not saved.

use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{
    coordinate_to_index, index_to_coordinate, Board, Cell, GameState, Player, MAX_DIMENSION,
    MIN_DIMENSION,
};

/// Errors that can occur while loading or writing a save file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("can't access save file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't write save file '{path}': {source}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save file has no header line")]
    MissingHeader,

    #[error("malformed header line: '{0}'")]
    BadHeader(String),

    #[error("invalid next player: {0}")]
    InvalidPlayer(i64),

    #[error("invalid board dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        actual: usize,
        expected: usize,
    },

    #[error("invalid board character '{0}'")]
    InvalidCell(char),

    #[error("board has {actual} rows, expected {expected}")]
    RowCount { actual: usize, expected: usize },

    #[error("next tile {next} is out of range for {count} tiles")]
    TileOutOfRange { next: i64, count: usize },
}

impl SaveError {
    /// Whether the file could not be read at all, as opposed to holding
    /// malformed contents.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, SaveError::Unreadable { .. })
    }
}

/// Encodes a game state in the save file format.
pub fn encode(state: &GameState) -> String {
    let (rows, cols) = (state.rows(), state.cols());
    let mut out = format!(
        "{} {} {} {}\n",
        state.next_tile,
        state.next_player.index(),
        rows,
        cols
    );

    let mut buffer = vec!['\n'; rows * (cols + 1)];
    for r in 0..rows {
        for (c, cell) in state.board.row(r).iter().enumerate() {
            buffer[coordinate_to_index(cols, r, c)] = cell.to_char();
        }
    }
    out.extend(buffer);
    out
}

/// Decodes a save file, validating it against a tile set of `tile_count`
/// tiles. Any inconsistency rejects the whole file.
pub fn decode(text: &str, tile_count: usize) -> Result<GameState, SaveError> {
    let (header, body) = text.split_once('\n').ok_or(SaveError::MissingHeader)?;
    let [next_tile, next_player, rows, cols] = parse_header(header)?;

    let next_player = usize::try_from(next_player)
        .ok()
        .and_then(Player::from_index)
        .ok_or(SaveError::InvalidPlayer(next_player))?;

    let dims = (MIN_DIMENSION as i64)..=(MAX_DIMENSION as i64);
    if !dims.contains(&rows) || !dims.contains(&cols) {
        return Err(SaveError::InvalidDimensions { rows, cols });
    }
    let (rows, cols) = (rows as usize, cols as usize);

    check_grid(body, rows, cols)?;

    if next_tile < 0 || next_tile as usize >= tile_count {
        return Err(SaveError::TileOutOfRange {
            next: next_tile,
            count: tile_count,
        });
    }

    let mut cells = vec![Cell::Empty; rows * cols];
    for (index, ch) in body.chars().enumerate() {
        if let Some((r, c)) = index_to_coordinate(rows, cols, index) {
            cells[r * cols + c] = Cell::from_char(ch).ok_or(SaveError::InvalidCell(ch))?;
        }
    }
    let board = Board::from_cells(rows, cols, cells).map_err(|_| SaveError::InvalidDimensions {
        rows: rows as i64,
        cols: cols as i64,
    })?;

    Ok(GameState {
        board,
        next_tile: next_tile as usize,
        next_player,
    })
}

/// Reads and decodes a save file.
pub fn load(path: &Path, tile_count: usize) -> Result<GameState, SaveError> {
    let text = fs::read_to_string(path).map_err(|source| SaveError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&text, tile_count)
}

/// Writes a game state to `path`, replacing any existing file.
pub fn save(path: &Path, state: &GameState) -> Result<(), SaveError> {
    fs::write(path, encode(state)).map_err(|source| SaveError::Unwritable {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_header(header: &str) -> Result<[i64; 4], SaveError> {
    let bad = || SaveError::BadHeader(header.to_string());
    let fields: Vec<i64> = header
        .split_whitespace()
        .map(|f| f.parse::<i64>().map_err(|_| bad()))
        .collect::<Result<_, _>>()?;
    fields.try_into().map_err(|_| bad())
}

/// Checks that the body is exactly `rows` newline-terminated rows of `cols`
/// board characters.
fn check_grid(body: &str, rows: usize, cols: usize) -> Result<(), SaveError> {
    let mut row_count = 0;
    let mut col_count = 0;
    for ch in body.chars() {
        match ch {
            '\n' => {
                if col_count != cols {
                    return Err(SaveError::RowLength {
                        row: row_count,
                        actual: col_count,
                        expected: cols,
                    });
                }
                col_count = 0;
                row_count += 1;
            }
            c if Cell::from_char(c).is_some() => col_count += 1,
            c => return Err(SaveError::InvalidCell(c)),
        }
    }
    if col_count != 0 || row_count != rows {
        // An unterminated final row counts as missing.
        return Err(SaveError::RowCount {
            actual: row_count,
            expected: rows,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Angle, Tile};

    #[test]
    fn decodes_empty_three_by_three() {
        let state = decode("1 0 3 3\n...\n...\n...\n", 2).unwrap();
        assert_eq!(state.next_tile, 1);
        assert_eq!(state.next_player, Player::A);
        assert_eq!(state.rows(), 3);
        assert_eq!(state.cols(), 3);
        assert_eq!(state.board.occupied(), 0);
    }

    #[test]
    fn rejects_header_claiming_wrong_width() {
        let err = decode("1 0 3 4\n...\n...\n...\n", 2).unwrap_err();
        assert!(matches!(
            err,
            SaveError::RowLength {
                row: 0,
                actual: 3,
                expected: 4
            }
        ));
    }

    #[test]
    fn decodes_markers() {
        let state = decode("0 1 2 3\n*.#\n..*\n", 1).unwrap();
        assert_eq!(state.next_player, Player::B);
        assert_eq!(state.board.get(0, 0), Cell::Occupied(Player::A));
        assert_eq!(state.board.get(0, 2), Cell::Occupied(Player::B));
        assert_eq!(state.board.get(1, 2), Cell::Occupied(Player::A));
        assert_eq!(state.board.count(Player::A), 2);
    }

    #[test]
    fn rejects_bad_player() {
        assert!(matches!(
            decode("0 2 1 1\n.\n", 1),
            Err(SaveError::InvalidPlayer(2))
        ));
        assert!(matches!(
            decode("0 -1 1 1\n.\n", 1),
            Err(SaveError::InvalidPlayer(-1))
        ));
    }

    #[test]
    fn rejects_row_count_mismatch() {
        assert!(matches!(
            decode("0 0 3 2\n..\n..\n", 1),
            Err(SaveError::RowCount {
                actual: 2,
                expected: 3
            })
        ));
        assert!(matches!(
            decode("0 0 2 2\n..\n..\n..\n", 1),
            Err(SaveError::RowCount { actual: 3, .. })
        ));
    }

    #[test]
    fn rejects_unterminated_last_row() {
        assert!(matches!(
            decode("0 0 2 2\n..\n..", 1),
            Err(SaveError::RowCount { .. })
        ));
    }

    #[test]
    fn rejects_tile_index_out_of_range() {
        assert!(matches!(
            decode("3 0 1 1\n.\n", 3),
            Err(SaveError::TileOutOfRange { next: 3, count: 3 })
        ));
        assert!(matches!(
            decode("-1 0 1 1\n.\n", 3),
            Err(SaveError::TileOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(matches!(decode("", 1), Err(SaveError::MissingHeader)));
        assert!(matches!(decode("0 0 1\n.\n", 1), Err(SaveError::BadHeader(_))));
        assert!(matches!(decode("0 0 1 x\n.\n", 1), Err(SaveError::BadHeader(_))));
        assert!(matches!(
            decode("0 0 1 1 1\n.\n", 1),
            Err(SaveError::BadHeader(_))
        ));
    }

    #[test]
    fn rejects_bad_dimensions_and_cells() {
        assert!(matches!(
            decode("0 0 0 0\n", 1),
            Err(SaveError::InvalidDimensions { rows: 0, cols: 0 })
        ));
        assert!(matches!(
            decode("0 0 1 2\n.x\n", 1),
            Err(SaveError::InvalidCell('x'))
        ));
    }

    #[test]
    fn encode_then_decode_preserves_state() {
        let tile = Tile::from_rows([",,,,,", ",!!,,", ",,!,,", ",,,,,", ",,,,,"]).unwrap();
        let mut state = GameState::new(4, 6).unwrap();
        state.board = state
            .board
            .place(&tile, Player::A, 1, 1, Angle::Deg0)
            .unwrap()
            .place(&tile, Player::B, 2, 4, Angle::Deg90)
            .unwrap();
        state.next_tile = 2;
        state.next_player = Player::B;

        let text = encode(&state);
        assert!(text.starts_with("2 1 4 6\n"));
        assert_eq!(text.lines().count(), 5);
        assert_eq!(decode(&text, 3).unwrap(), state);
    }

    #[test]
    fn save_and_load_through_file() {
        let path = std::env::temp_dir().join(format!("fitz-save-test-{}", std::process::id()));
        let state = GameState::new(2, 2).unwrap();
        save(&path, &state).unwrap();
        let loaded = load(&path, 1).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, state);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/nonexistent/fitz/save"), 1).unwrap_err();
        assert!(err.is_unreadable());
    }
}
