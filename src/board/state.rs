//! Game state representation.
//!
//! Holds the snapshot of a game between turns: the board, the index of the
//! next tile to be placed and the player to move. Also defines the player,
//! position and placement value types shared by the rest of the crate.

use serde::Serialize;

use super::geometry::Angle;
use super::grid::{Board, BoardError};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Player {
    /// Moves first; marks cells with `*`.
    A,
    /// Moves second; marks cells with `#`.
    B,
}

pub const ALL_PLAYERS: [Player; 2] = [Player::A, Player::B];

impl Player {
    /// Returns the board marker for this player.
    pub const fn marker(self) -> char {
        match self {
            Player::A => '*',
            Player::B => '#',
        }
    }

    /// Parses a board marker.
    pub fn from_marker(c: char) -> Option<Player> {
        match c {
            '*' => Some(Player::A),
            '#' => Some(Player::B),
            _ => None,
        }
    }

    /// Returns the save-file index (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// Parses a save-file index.
    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::A),
            1 => Some(Player::B),
            _ => None,
        }
    }

    /// Returns the opponent.
    pub const fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// A signed anchor coordinate. Anchors may lie up to two cells off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }
}

/// A candidate move: which player anchors a tile where, at what rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub player: Player,
    pub position: Position,
    pub angle: Angle,
}

impl Placement {
    pub const fn new(player: Player, row: i32, col: i32, angle: Angle) -> Self {
        Placement {
            player,
            position: Position { row, col },
            angle,
        }
    }
}

/// The most recent anchors, used to seed the automated searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecentPlays {
    by_player: [Option<Position>; 2],
    latest: Option<Position>,
}

impl RecentPlays {
    /// Last anchor placed by `player`.
    pub fn of(&self, player: Player) -> Option<Position> {
        self.by_player[player.index()]
    }

    /// Last anchor placed by either player.
    pub fn latest(&self) -> Option<Position> {
        self.latest
    }

    /// Records a successful placement.
    pub fn record(&mut self, placement: &Placement) {
        self.by_player[placement.player.index()] = Some(placement.position);
        self.latest = Some(placement.position);
    }
}

/// Complete game snapshot between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// Index into the tile set of the tile to be placed next.
    pub next_tile: usize,
    pub next_player: Player,
}

impl GameState {
    /// Creates a fresh game on an empty `rows x cols` board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Ok(GameState {
            board: Board::empty(rows, cols)?,
            next_tile: 0,
            next_player: Player::A,
        })
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }
}
