//! Fitz -- a two-player tile placement game.
//!
//! Loads a tile file and either displays every tile in its four rotations or
//! plays a game on stdin/stdout, starting from an empty board or a save file.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use fitz::board::{GameState, TileSet};
use fitz::engine::{Engine, SessionConfig, SessionError};
use fitz::protocol::render::render_rotations;
use fitz::protocol::{load_tiles, save};
use fitz::search::PlayerKind;

/// Command line: `fitz tilefile [p1type p2type [height width | filename]]`.
#[derive(Parser, Debug)]
#[command(name = "fitz", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Tile file
    tilefile: PathBuf,

    /// Player * type: h, 1 or 2
    #[arg(allow_hyphen_values = true)]
    p1: Option<String>,

    /// Player # type: h, 1 or 2
    #[arg(allow_hyphen_values = true)]
    p2: Option<String>,

    /// Either `height width` for a new game or the path of a save file
    #[arg(num_args = 0..=2, allow_hyphen_values = true)]
    game: Vec<String>,
}

/// Ways the program can stop before or instead of a normal game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Usage,
    TileFileAccess,
    TileFileContents,
    PlayerType,
    Dimensions,
    SaveFileAccess,
    SaveFileContents,
    EndOfInput,
    Io,
}

impl Failure {
    fn code(self) -> u8 {
        match self {
            Failure::Usage => 1,
            Failure::TileFileAccess => 2,
            Failure::TileFileContents => 3,
            Failure::PlayerType => 4,
            Failure::Dimensions => 5,
            Failure::SaveFileAccess => 6,
            Failure::SaveFileContents => 7,
            Failure::EndOfInput => 10,
            Failure::Io => 11,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Failure::Usage => "Usage: fitz tilefile [p1type p2type [height width | filename]]",
            Failure::TileFileAccess => "Can't access tile file",
            Failure::TileFileContents => "Invalid tile file contents",
            Failure::PlayerType => "Invalid player type",
            Failure::Dimensions => "Invalid dimensions",
            Failure::SaveFileAccess => "Can't access save file",
            Failure::SaveFileContents => "Invalid save file contents",
            Failure::EndOfInput => "End of input",
            Failure::Io => "Unable to read or write the game",
        }
    }
}

/// Where the game starts from.
enum Start {
    New { rows: String, cols: String },
    Saved(PathBuf),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{}", failure.message());
            ExitCode::from(failure.code())
        }
    }
}

fn run() -> Result<(), Failure> {
    let args = Args::try_parse().map_err(|e| {
        debug!(error = %e, "argument parsing failed");
        Failure::Usage
    })?;

    let players = match (args.p1, args.p2) {
        (None, None) => None,
        (Some(p1), Some(p2)) => Some((p1, p2)),
        _ => return Err(Failure::Usage),
    };
    let start = match (&players, args.game.as_slice()) {
        (None, []) => None,
        (Some(_), [path]) => Some(Start::Saved(PathBuf::from(path))),
        (Some(_), [rows, cols]) => Some(Start::New {
            rows: rows.clone(),
            cols: cols.clone(),
        }),
        _ => return Err(Failure::Usage),
    };

    let tiles = load_tiles(&args.tilefile).map_err(|e| {
        debug!(error = %e, "tile file rejected");
        if e.is_unreadable() {
            Failure::TileFileAccess
        } else {
            Failure::TileFileContents
        }
    })?;

    let (Some((p1, p2)), Some(start)) = (players, start) else {
        print!("{}", render_rotations(&tiles));
        return Ok(());
    };

    let config = SessionConfig::new(parse_kind(&p1)?, parse_kind(&p2)?);
    let state = match start {
        Start::New { rows, cols } => new_game(&rows, &cols)?,
        Start::Saved(path) => saved_game(&path, &tiles)?,
    };

    play(tiles, state, config)
}

fn parse_kind(code: &str) -> Result<PlayerKind, Failure> {
    code.parse().map_err(|_| Failure::PlayerType)
}

fn new_game(rows: &str, cols: &str) -> Result<GameState, Failure> {
    let rows: usize = rows.parse().map_err(|_| Failure::Dimensions)?;
    let cols: usize = cols.parse().map_err(|_| Failure::Dimensions)?;
    GameState::new(rows, cols).map_err(|_| Failure::Dimensions)
}

fn saved_game(path: &Path, tiles: &TileSet) -> Result<GameState, Failure> {
    save::load(path, tiles.len()).map_err(|e| {
        debug!(error = %e, "save file rejected");
        if e.is_unreadable() {
            Failure::SaveFileAccess
        } else {
            Failure::SaveFileContents
        }
    })
}

fn play(tiles: TileSet, state: GameState, config: SessionConfig) -> Result<(), Failure> {
    let mut engine =
        Engine::new(tiles, state, config).map_err(|_| Failure::SaveFileContents)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = BufWriter::new(stdout.lock());

    match engine.run(&mut input, &mut out) {
        Ok(_) => Ok(()),
        Err(SessionError::EndOfInput) => Err(Failure::EndOfInput),
        Err(SessionError::TileOutOfRange { .. }) => Err(Failure::SaveFileContents),
        Err(SessionError::Io(e)) => {
            error!(error = %e, "session aborted");
            Err(Failure::Io)
        }
    }
}
