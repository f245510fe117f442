//! Core Connect Four rules: grid, players, last-move win detection, and a game
//! state machine with immutable transitions.

mod grid;
mod player;
mod state;

pub use grid::{check_last_move_on, empty_grid, play_token, Grid};
pub use player::{Cell, Player};
pub use state::{GameOutcome, GameState};
