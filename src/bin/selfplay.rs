//! Self-play game generation CLI.
//!
//! Plays automated Fitz games and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fitz::protocol::load_tiles;
use fitz::search::PlayerKind;
use fitz::selfplay::{self, SelfPlayConfig};

/// Play automated Fitz games and emit JSONL game records
#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Generate Fitz self-play games", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Board height
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Board width
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Strategy for player * (1 or 2)
    #[arg(long, default_value = "1")]
    p1: PlayerKind,

    /// Strategy for player # (1 or 2)
    #[arg(long, default_value = "2")]
    p2: PlayerKind,

    /// Tile file shared by every game (random tiles per game if omitted)
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Number of random tiles per game
    #[arg(long, default_value_t = 6)]
    tile_count: usize,

    /// Probability that a random tile cell holds a marker
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Turn limit per game
    #[arg(long, default_value_t = 10_000)]
    max_turns: usize,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let tiles = match &args.tiles {
        Some(path) => match load_tiles(path) {
            Ok(tiles) => Some(tiles),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let config = SelfPlayConfig {
        num_games: args.games,
        rows: args.rows,
        cols: args.cols,
        players: [args.p1, args.p2],
        tiles,
        tile_count: args.tile_count,
        marker_density: args.density,
        max_turns: args.max_turns,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
    };

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, {}x{} board, {} vs {}, {} threads",
            config.num_games,
            config.rows,
            config.cols,
            config.players[0],
            config.players[1],
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&args.output, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path.display());
    }
}
