//! Automated self-play.
//!
//! Plays batches of automated-vs-automated games, optionally in parallel,
//! and records every move, the winner and the final position of each game.
//! Tile sets come either from a tile file or from a seeded random generator.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::board::{BoardError, GameState, Player, Tile, TileSet, ALL_PLAYERS, TILE_SIZE};
use crate::engine::{Engine, MoveOutcome, SessionConfig, SessionError, Status};
use crate::protocol::save;
use crate::search::PlayerKind;

/// Errors raised by the self-play runner.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("self-play needs automated players, got '{0}'")]
    HumanPlayer(PlayerKind),

    #[error("tile count must be at least 1")]
    NoTiles,

    #[error("marker density must be a number within 0..=1, got {0}")]
    InvalidDensity(f64),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub cols: usize,
    /// Strategies for player A and player B.
    pub players: [PlayerKind; 2],
    /// Tile set shared by every game. When `None`, each game draws its own
    /// random tiles.
    pub tiles: Option<TileSet>,
    /// Number of random tiles per game.
    pub tile_count: usize,
    /// Probability that a cell of a random tile holds a marker.
    pub marker_density: f64,
    /// Turn limit after which a game is abandoned without a winner.
    pub max_turns: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            rows: 10,
            cols: 10,
            players: [PlayerKind::SharedHistory, PlayerKind::OwnHistory],
            tiles: None,
            tile_count: 6,
            marker_density: 0.3,
            max_turns: 10_000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn validate(&self) -> Result<(), SelfPlayError> {
        if let Some(kind) = self.players.iter().find(|k| k.is_human()) {
            return Err(SelfPlayError::HumanPlayer(*kind));
        }
        if self.tiles.is_none() && self.tile_count == 0 {
            return Err(SelfPlayError::NoTiles);
        }
        if !(0.0..=1.0).contains(&self.marker_density) {
            return Err(SelfPlayError::InvalidDensity(self.marker_density));
        }
        GameState::new(self.rows, self.cols)?;
        Ok(())
    }
}

/// One applied move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    /// Index of the tile that was placed.
    pub tile: usize,
    pub row: i32,
    pub col: i32,
    pub angle: i32,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub rows: usize,
    pub cols: usize,
    pub players: [PlayerKind; 2],
    /// The tiles used, one rendered tile per entry.
    pub tiles: Vec<String>,
    pub moves: Vec<MoveRecord>,
    /// `None` if the game hit the turn limit.
    pub winner: Option<Player>,
    /// Cells held by player A and player B at the end.
    pub final_counts: [usize; 2],
    /// Final position in save file format.
    pub final_position: String,
}

/// Draws a random tile with at least one marker. A density that is not a
/// number counts as zero.
pub fn random_tile(rng: &mut impl Rng, density: f64) -> Tile {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    let mut cells = [[false; TILE_SIZE]; TILE_SIZE];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            *cell = rng.gen_bool(density);
        }
    }
    let tile = Tile::new(cells);
    if tile.marker_count() == 0 {
        cells[TILE_SIZE / 2][TILE_SIZE / 2] = true;
        return Tile::new(cells);
    }
    tile
}

/// Draws a random tile set of `count` tiles.
pub fn random_tile_set(rng: &mut impl Rng, count: usize, density: f64) -> Option<TileSet> {
    TileSet::new((0..count).map(|_| random_tile(rng, density)).collect())
}

/// Plays a single self-play game and returns the game record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let tiles = match &config.tiles {
        Some(tiles) => tiles.clone(),
        None => random_tile_set(rng, config.tile_count, config.marker_density)
            .ok_or(SelfPlayError::NoTiles)?,
    };
    let tile_texts = tiles.iter().map(Tile::to_text).collect();
    let state = GameState::new(config.rows, config.cols)?;
    let session = SessionConfig::new(config.players[0], config.players[1]);
    let mut engine = Engine::new(tiles, state, session)?;

    let mut moves = Vec::new();
    let mut winner = None;
    while moves.len() < config.max_turns {
        if let Status::GameOver { winner: w } = engine.status() {
            winner = Some(w);
            break;
        }
        let tile = engine.state().next_tile;
        match engine.automated_move() {
            MoveOutcome::Placed(p) => moves.push(MoveRecord {
                player: p.player,
                tile,
                row: p.position.row,
                col: p.position.col,
                angle: p.angle.degrees(),
            }),
            MoveOutcome::GameOver { winner: w } => {
                winner = Some(w);
                break;
            }
            other => {
                debug!(game_id, ?other, "unexpected automated outcome");
                break;
            }
        }
    }

    let board = &engine.state().board;
    Ok(GameRecord {
        game_id,
        rows: config.rows,
        cols: config.cols,
        players: config.players,
        tiles: tile_texts,
        moves,
        winner,
        final_counts: ALL_PLAYERS.map(|p| board.count(p)),
        final_position: save::encode(engine.state()),
    })
}

/// Runs self-play generation, producing one record per game in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    config.validate()?;
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        run_self_play_sequential(config)
    }
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        games.push(play_and_report(config, i)?);
    }
    Ok(games)
}

/// Parallel self-play: plays games concurrently on a dedicated rayon pool.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_and_report(config, i))
            .collect()
    })
}

fn play_and_report(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, SelfPlayError> {
    let mut rng = game_rng(config, game_id);
    let start = Instant::now();
    let game = play_game(config, game_id, &mut rng)?;
    if !config.quiet {
        let outcome = match game.winner {
            Some(w) => format!("player {} wins", w),
            None => "abandoned".to_string(),
        };
        eprintln!(
            "Game {}/{}: {} after {} moves ({:.1}ms)",
            game_id + 1,
            config.num_games,
            outcome,
            game.moves.len(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
    }
    Ok(game)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut wins = [0usize; 2];
    let mut abandoned = 0usize;
    let mut total_moves = 0usize;

    for game in games {
        total_moves += game.moves.len();
        match game.winner {
            Some(w) => wins[w.index()] += 1,
            None => abandoned += 1,
        }
    }

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg moves/game: {:.1}",
        total_moves as f64 / total.max(1) as f64
    );
    eprintln!("Abandoned: {}", abandoned);
    for player in ALL_PLAYERS {
        let pct = 100.0 * wins[player.index()] as f64 / total.max(1) as f64;
        eprintln!("  Player {}: {} ({:.1}%)", player, wins[player.index()], pct);
    }
}
