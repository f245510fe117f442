//! # Connect Four rules
//!
//! A pure rules engine for Connect-Four-style games on grids of any size:
//! gravity moves that return fresh grid snapshots, and win detection through
//! the last-move cell for any win length.
//!
//! ## Modules
//!
//! - [`game`] — Grid, players, move application, win detection, game state
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;

pub use error::InvalidMove;
pub use game::{check_last_move_on, empty_grid, play_token, Cell, Grid, Player};
