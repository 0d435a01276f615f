//! Integration tests for the fitz binary.
//!
//! Spawns the game process with fixture files written to a scratch
//! directory, feeds stdin, and checks stdout, stderr and the exit status.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const DOT_TILE: &str = ",,,,,\n,,,,,\n,,!,,\n,,,,,\n,,,,,\n";
const CORNER_TILE: &str = "!,,,,\n,,,,,\n,,,,,\n,,,,,\n,,,,,\n";

/// Creates a fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fitz-it-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

/// Runs fitz with `args`, writing `input` to stdin.
fn run_fitz(args: &[&str], input: &str) -> Output {
    run_fitz_bytes(args, input.as_bytes())
}

fn run_fitz_bytes(args: &[&str], input: &[u8]) -> Output {
    let exe = env!("CARGO_BIN_EXE_fitz");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start fitz");

    let mut stdin = child.stdin.take().unwrap();
    // The process may exit before reading its input.
    let _ = stdin.write_all(input);
    drop(stdin);

    child.wait_with_output().expect("failed to wait on child")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn shape_display_prints_rotations() {
    let dir = scratch("shape");
    let tiles = write_file(&dir, "tiles", &format!("{}\n{}", CORNER_TILE, DOT_TILE));
    let output = run_fitz(&[&tiles], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "!,,,, ,,,,! ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,! !,,,,\n\
         \n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,!,, ,,!,, ,,!,, ,,!,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n\
         ,,,,, ,,,,, ,,,,, ,,,,,\n"
    );
}

#[test]
fn wrong_argument_count_is_usage_error() {
    let dir = scratch("usage");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    for args in [vec![], vec![tiles.as_str(), "1"], vec![tiles.as_str(), "1", "2"]] {
        let output = run_fitz(&args, "");
        assert_eq!(output.status.code(), Some(1), "args {:?}", args);
        assert_eq!(
            stderr(&output),
            "Usage: fitz tilefile [p1type p2type [height width | filename]]\n"
        );
    }
    let output = run_fitz(&[&tiles, "1", "2", "3", "3", "3"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_tile_file() {
    let dir = scratch("notiles");
    let missing = dir.join("absent").to_string_lossy().into_owned();
    let output = run_fitz(&[&missing], "");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Can't access tile file\n");
}

#[test]
fn invalid_tile_file() {
    let dir = scratch("badtiles");
    let tiles = write_file(&dir, "tiles", ",,,,,\n,,x,,\n,,,,,\n,,,,,\n,,,,,\n");
    let output = run_fitz(&[&tiles, "1", "2", "5", "5"], "");
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stderr(&output), "Invalid tile file contents\n");

    let trailing = write_file(&dir, "trailing", &format!("{}\n", DOT_TILE));
    assert_eq!(run_fitz(&[&trailing], "").status.code(), Some(3));
}

#[test]
fn invalid_player_type() {
    let dir = scratch("player");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let output = run_fitz(&[&tiles, "3", "h", "5", "5"], "");
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(stderr(&output), "Invalid player type\n");
}

#[test]
fn invalid_dimensions() {
    let dir = scratch("dims");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    for (rows, cols) in [("0", "5"), ("5", "1000"), ("abc", "5"), ("-3", "5")] {
        let output = run_fitz(&[&tiles, "1", "2", rows, cols], "");
        assert_eq!(output.status.code(), Some(5), "dims {} {}", rows, cols);
        assert_eq!(stderr(&output), "Invalid dimensions\n");
    }
}

#[test]
fn save_file_errors() {
    let dir = scratch("savefile");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let missing = dir.join("absent").to_string_lossy().into_owned();
    let output = run_fitz(&[&tiles, "1", "2", &missing], "");
    assert_eq!(output.status.code(), Some(6));
    assert_eq!(stderr(&output), "Can't access save file\n");

    // Row of width 4 on a board declared 3 columns wide.
    let bad = write_file(&dir, "bad", "0 0 3 3\n....\n...\n...\n");
    let output = run_fitz(&[&tiles, "1", "2", &bad], "");
    assert_eq!(output.status.code(), Some(7));
    assert_eq!(stderr(&output), "Invalid save file contents\n");

    // Tile index past the end of a one-tile set.
    let bad = write_file(&dir, "tile", "1 0 3 3\n...\n...\n...\n");
    assert_eq!(run_fitz(&[&tiles, "1", "2", &bad], "").status.code(), Some(7));
}

#[test]
fn automated_game_on_single_cell() {
    let dir = scratch("single");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let output = run_fitz(&[&tiles, "1", "1", "1", "1"], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        ".\nPlayer * => 0 0 rotated 0\n*\nPlayer * wins\n"
    );
}

#[test]
fn automated_game_runs_to_completion() {
    let dir = scratch("auto");
    let tiles = write_file(&dir, "tiles", &format!("{}\n{}", CORNER_TILE, DOT_TILE));
    let output = run_fitz(&[&tiles, "1", "2", "6", "7"], "");

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[..6].iter().all(|l| *l == "......."));
    let last = lines.last().unwrap();
    assert!(*last == "Player * wins" || *last == "Player # wins");
    assert!(lines.iter().any(|l| l.starts_with("Player * => ")));
    assert!(stderr(&output).is_empty());
}

#[test]
fn human_end_of_input() {
    let dir = scratch("eof");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let output = run_fitz(&[&tiles, "h", "h", "3", "3"], "1 1 0\n");

    assert_eq!(output.status.code(), Some(10));
    assert_eq!(stderr(&output), "End of input\n");
    assert_eq!(
        stdout(&output),
        format!("...\n...\n...\n{}Player *] ...\n.*.\n...\n{}Player #] ", DOT_TILE, DOT_TILE)
    );
}

#[test]
fn human_invalid_move_reprompts() {
    let dir = scratch("reprompt");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let output = run_fitz(&[&tiles, "h", "2", "3", "3"], "9 9 0\n1 1 45\nabc\n1 1 0\n");

    assert_eq!(output.status.code(), Some(10));
    let text = stdout(&output);
    assert!(text.contains("Player *] Player *] Player *] Player *] ...\n.*.\n...\n"));
    assert!(text.contains("...\n.*.\n...\nPlayer # => 2 2 rotated 0\n"));
}

#[test]
fn human_save_and_resume() {
    let dir = scratch("save");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let save_path = dir.join("game.sav");
    let command = format!("1 1 0\nsave{}\n", save_path.display());
    let output = run_fitz(&[&tiles, "h", "h", "3", "3"], &command);

    assert_eq!(output.status.code(), Some(10));
    assert!(stdout(&output).ends_with("Player #] Player #] "));
    assert_eq!(fs::read_to_string(&save_path).unwrap(), "0 1 3 3\n...\n.*.\n...\n");

    let saved = save_path.to_string_lossy().into_owned();
    let output = run_fitz(&[&tiles, "h", "h", &saved], "0 0 0\n");
    assert_eq!(output.status.code(), Some(10));
    assert!(stdout(&output).starts_with(&format!("...\n.*.\n...\n{}Player #] #..\n.*.\n", DOT_TILE)));
}

#[test]
fn unwritable_save_reports_failure() {
    let dir = scratch("nosave");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let target = dir.join("missing-dir").join("game.sav");
    let command = format!("save{}\n", target.display());
    let output = run_fitz(&[&tiles, "h", "h", "3", "3"], &command);

    assert_eq!(output.status.code(), Some(10));
    assert_eq!(stderr(&output), "Unable to save game\nEnd of input\n");
    assert!(!target.exists());
}

#[test]
fn non_utf8_move_reprompts() {
    let dir = scratch("utf8");
    let tiles = write_file(&dir, "tiles", DOT_TILE);
    let output = run_fitz_bytes(&[&tiles, "h", "h", "1", "1"], b"\xff\n0 0 0\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        format!(".\n{0}Player *] Player *] *\n{0}Player * wins\n", DOT_TILE)
    );
    assert!(stderr(&output).is_empty());
}
