//! Automated move selection.
//!
//! Two deterministic strategies pick a placement for the automated players.
//! Both return the first legal placement in their own sweep order; the
//! orders differ so automated-vs-automated games are not mirror images.

pub mod own_history;
pub mod shared_history;

use serde::Serialize;

use crate::board::{Board, Placement, Player, RecentPlays, Tile};

/// Errors raised when parsing a player type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerKindError {
    #[error("invalid player type '{0}' (expected h, 1 or 2)")]
    Unknown(String),
}

/// Who chooses the moves for one side of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerKind {
    /// Moves are read from the input stream.
    Human,
    /// Automated strategy 1, see [`shared_history`].
    SharedHistory,
    /// Automated strategy 2, see [`own_history`].
    OwnHistory,
}

impl PlayerKind {
    /// Returns the command-line code for this kind.
    pub const fn code(self) -> &'static str {
        match self {
            PlayerKind::Human => "h",
            PlayerKind::SharedHistory => "1",
            PlayerKind::OwnHistory => "2",
        }
    }

    pub const fn is_human(self) -> bool {
        matches!(self, PlayerKind::Human)
    }

    /// Runs the automated strategy for this kind. Humans never search and
    /// always get `None`.
    pub fn search(
        self,
        board: &Board,
        tile: &Tile,
        player: Player,
        recent: &RecentPlays,
    ) -> Option<Placement> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::SharedHistory => shared_history::search(board, tile, player, recent),
            PlayerKind::OwnHistory => own_history::search(board, tile, player, recent),
        }
    }
}

impl std::str::FromStr for PlayerKind {
    type Err = PlayerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(PlayerKind::Human),
            "1" => Ok(PlayerKind::SharedHistory),
            "2" => Ok(PlayerKind::OwnHistory),
            other => Err(PlayerKindError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
