//! Fitz game engine library.
//!
//! Exposes the board representation, placement search, automated players,
//! text protocols and self-play runner for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;
