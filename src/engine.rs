//! Game engine and turn loop.
//!
//! Holds the live game state, the tile set, the recent-play history and the
//! player configuration. Before every move the engine checks whether the
//! player to move can place the next tile at all; if not, the game is over
//! and the other player wins.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::board::{
    Angle, GameState, GeometryError, Placement, PlacementError, Player, RecentPlays, Tile, TileSet,
};
use crate::movegen::has_legal_move;
use crate::protocol::parser::{parse_human_input, parse_move, HumanCommand, InputError};
use crate::protocol::{render, save};
use crate::search::PlayerKind;

/// Who plays each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub players: [PlayerKind; 2],
}

impl SessionConfig {
    pub fn new(first: PlayerKind, second: PlayerKind) -> Self {
        SessionConfig {
            players: [first, second],
        }
    }

    /// The kind of player controlling `player`.
    pub fn kind(&self, player: Player) -> PlayerKind {
        self.players[player.index()]
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig::new(PlayerKind::SharedHistory, PlayerKind::OwnHistory)
    }
}

/// Whether the game can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    GameOver { winner: Player },
}

/// Why a human move was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Angle(#[from] GeometryError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Result of asking one player for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The placement was applied and the turn passed on.
    Placed(Placement),
    /// The move was invalid; nothing changed and the player must try again.
    Rejected(MoveError),
    /// The player asked to save the game to this path.
    SaveRequested(PathBuf),
    /// Input ran out before a move was made.
    EndOfInput,
    /// The player to move has no legal placement.
    GameOver { winner: Player },
}

/// Errors that end an interactive session abnormally.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("end of input")]
    EndOfInput,

    #[error("next tile {next} is out of range for {count} tiles")]
    TileOutOfRange { next: usize, count: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Holds the mutable state of one game session.
pub struct Engine {
    state: GameState,
    tiles: TileSet,
    recent: RecentPlays,
    config: SessionConfig,
}

impl Engine {
    /// Creates an engine for `state`. The state's next tile must index into
    /// `tiles`.
    pub fn new(tiles: TileSet, state: GameState, config: SessionConfig) -> Result<Self, SessionError> {
        if state.next_tile >= tiles.len() {
            return Err(SessionError::TileOutOfRange {
                next: state.next_tile,
                count: tiles.len(),
            });
        }
        Ok(Engine {
            state,
            tiles,
            recent: RecentPlays::default(),
            config,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn recent(&self) -> &RecentPlays {
        &self.recent
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The tile the next player must place.
    pub fn current_tile(&self) -> &Tile {
        self.tiles.cyclic(self.state.next_tile)
    }

    /// Checks whether the player to move can place the current tile.
    pub fn status(&self) -> Status {
        let player = self.state.next_player;
        if has_legal_move(&self.state.board, self.current_tile(), player) {
            Status::InProgress
        } else {
            Status::GameOver {
                winner: player.other(),
            }
        }
    }

    /// Applies a placement for the player to move and passes the turn on.
    /// The board is unchanged if the placement is rejected.
    pub fn apply(&mut self, placement: Placement) -> Result<(), PlacementError> {
        let tile = *self.current_tile();
        self.state.board.apply(&tile, &placement)?;
        self.recent.record(&placement);
        self.state.next_player = self.state.next_player.other();
        self.state.next_tile = self.tiles.next_index(self.state.next_tile);
        debug!(
            player = %placement.player,
            row = placement.position.row,
            col = placement.position.col,
            angle = %placement.angle,
            next_tile = self.state.next_tile,
            "placement applied"
        );
        Ok(())
    }

    /// Handles one line of human input, or `None` at end of input.
    pub fn human_move(&mut self, line: Option<&str>) -> MoveOutcome {
        let Some(line) = line else {
            return MoveOutcome::EndOfInput;
        };
        match parse_human_input(line) {
            Ok(HumanCommand::Save(path)) => MoveOutcome::SaveRequested(path),
            Ok(HumanCommand::Place { row, col, angle }) => match self.try_place(row, col, angle) {
                Ok(placement) => MoveOutcome::Placed(placement),
                Err(err) => MoveOutcome::Rejected(err),
            },
            Err(err) => MoveOutcome::Rejected(err.into()),
        }
    }

    fn try_place(&mut self, row: i32, col: i32, degrees: i32) -> Result<Placement, MoveError> {
        let angle = Angle::try_from(degrees)?;
        let placement = Placement::new(self.state.next_player, row, col, angle);
        self.apply(placement)?;
        Ok(placement)
    }

    /// Lets the automated strategy configured for the player to move choose
    /// and apply a placement. A human side has no strategy and always
    /// reports game over here.
    pub fn automated_move(&mut self) -> MoveOutcome {
        let player = self.state.next_player;
        let kind = self.config.kind(player);
        let found = kind.search(&self.state.board, self.current_tile(), player, &self.recent);
        match found {
            Some(placement) => match self.apply(placement) {
                Ok(()) => MoveOutcome::Placed(placement),
                Err(err) => MoveOutcome::Rejected(err.into()),
            },
            None => MoveOutcome::GameOver {
                winner: player.other(),
            },
        }
    }

    /// Plays the game to completion, reading human moves from `input` and
    /// writing the transcript to `out`. Returns the winner.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Player, SessionError> {
        info!(
            rows = self.state.rows(),
            cols = self.state.cols(),
            tiles = self.tiles.len(),
            "session started"
        );
        self.write_position(out)?;
        loop {
            if let Status::GameOver { winner } = self.status() {
                info!(%winner, "game over");
                writeln!(out, "{}", render::winner(winner))?;
                out.flush()?;
                return Ok(winner);
            }
            self.play_turn(input, out)?;
            self.write_position(out)?;
        }
    }

    /// Plays a single turn for the player to move.
    fn play_turn<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<(), SessionError> {
        let player = self.state.next_player;
        if !self.config.kind(player).is_human() {
            match self.automated_move() {
                MoveOutcome::Placed(placement) => {
                    writeln!(out, "{}", render::automated_move(&placement))?;
                }
                other => debug!(%player, ?other, "automated player made no move"),
            }
            return Ok(());
        }

        loop {
            write!(out, "{}", render::prompt(player))?;
            out.flush()?;
            let outcome = match read_human_line(input)? {
                HumanLine::Text(line) => self.human_move(Some(&line)),
                HumanLine::Malformed => MoveOutcome::Rejected(InputError::NotUtf8.into()),
                HumanLine::End => self.human_move(None),
            };
            match outcome {
                MoveOutcome::Placed(_) | MoveOutcome::GameOver { .. } => return Ok(()),
                MoveOutcome::EndOfInput => return Err(SessionError::EndOfInput),
                MoveOutcome::SaveRequested(path) => {
                    if let Err(err) = save::save(&path, &self.state) {
                        debug!(%err, "save failed");
                        eprintln!("Unable to save game");
                    } else {
                        info!(path = %path.display(), "game saved");
                    }
                }
                MoveOutcome::Rejected(err) => debug!(%err, "move rejected"),
            }
        }
    }

    /// Writes the board and, for a human about to move, the next tile.
    fn write_position<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", render::render_board(&self.state.board))?;
        if self.config.kind(self.state.next_player).is_human() {
            write!(out, "{}", render::render_tile(self.current_tile()))?;
        }
        out.flush()
    }
}

/// One line of human input.
enum HumanLine {
    /// A line without its terminator.
    Text(String),
    /// A complete line that is not valid UTF-8.
    Malformed,
    /// Input is exhausted.
    End,
}

/// Reads one line of human input.
///
/// A final line cut off by end of input is only kept if it is a well-formed
/// move; anything else there counts as end of input.
fn read_human_line<R: BufRead>(input: &mut R) -> io::Result<HumanLine> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(HumanLine::End);
    }
    let terminated = bytes.last() == Some(&b'\n');
    if terminated {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) if terminated => Ok(HumanLine::Text(line)),
        Ok(line) if parse_move(&line).is_ok() => Ok(HumanLine::Text(line)),
        Err(_) if terminated => Ok(HumanLine::Malformed),
        _ => Ok(HumanLine::End),
    }
}
