use serde::Serialize;

use super::{Grid, Player};
use crate::config::GameConfig;
use crate::error::{MoveError, ReplayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Snapshot of a game in progress. Every move produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    win_length: usize,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Start a game with the given dimensions, win length and first player
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            grid: Grid::empty(config.width, config.height),
            win_length: config.win_length,
            current_player: config.first_player,
            outcome: None,
        }
    }

    /// Create initial game state on a standard 7x6 grid
    pub fn initial() -> Self {
        Self::new(&GameConfig::default())
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.grid.playable_columns()
    }

    /// Apply a move for the current player and return the new state
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let grid = self.grid.play_token(column, self.current_player)?;
        tracing::trace!(
            player = self.current_player.name(),
            column,
            "token played"
        );

        let outcome = if grid.check_last_move_on(column, self.win_length) {
            Some(GameOutcome::Winner(self.current_player))
        } else if grid.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            tracing::debug!(?outcome, "game over");
        }

        Ok(GameState {
            grid,
            win_length: self.win_length,
            current_player: self.current_player.other(),
            outcome,
        })
    }

    /// Play `columns` in order, alternating players. Fails on the first move
    /// that is invalid or comes after the game has ended.
    pub fn replay(&self, columns: &[usize]) -> Result<GameState, ReplayError> {
        columns
            .iter()
            .enumerate()
            .try_fold(self.clone(), |state, (turn, &column)| {
                state.apply_move(column).map_err(|source| ReplayError {
                    turn: turn + 1,
                    column,
                    source,
                })
            })
    }

    /// One-line description of where the game stands
    pub fn summary(&self) -> String {
        match self.outcome {
            Some(GameOutcome::Winner(player)) => format!("{} wins", player.name()),
            Some(GameOutcome::Draw) => "Draw".to_string(),
            None => format!("In progress, {} to move", self.current_player.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMove;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::A);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
        assert_eq!(state.win_length(), 4);
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::B);
        assert_eq!(new_state.grid().get(0, 3), Some(Cell::PlayerA));
        // The previous snapshot is untouched
        assert_eq!(state.grid().get(0, 3), Some(Cell::Empty));
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // A wins with a horizontal line, B stacks on top
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // A
            if col < 3 {
                state = state.apply_move(col).unwrap(); // B
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::A)));
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let config = GameConfig {
            width: 2,
            height: 1,
            ..GameConfig::default()
        };
        let state = GameState::new(&config).apply_move(0).unwrap();
        assert_eq!(
            state.apply_move(0),
            Err(MoveError::Invalid(InvalidMove::ColumnFull { column: 0 }))
        );
        assert_eq!(
            state.apply_move(2),
            Err(MoveError::Invalid(InvalidMove::ColumnOutOfRange {
                column: 2,
                width: 2
            }))
        );
        assert_eq!(state.current_player(), Player::B);
    }

    #[test]
    fn test_draw() {
        let config = GameConfig {
            width: 2,
            height: 2,
            win_length: 3,
            first_player: Player::B,
        };
        let mut state = GameState::new(&config);
        for col in [0, 1, 1, 0] {
            state = state.apply_move(col).unwrap();
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_replay_reaches_same_state_as_moves() {
        let replayed = GameState::initial().replay(&[3, 3, 2]).unwrap();
        let stepped = GameState::initial()
            .apply_move(3)
            .and_then(|s| s.apply_move(3))
            .and_then(|s| s.apply_move(2))
            .unwrap();
        assert_eq!(replayed, stepped);
        assert_eq!(replayed.summary(), "In progress, Player B to move");
    }

    #[test]
    fn test_replay_reports_failing_move() {
        let config = GameConfig {
            width: 3,
            height: 1,
            ..GameConfig::default()
        };
        let err = GameState::new(&config).replay(&[0, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            ReplayError {
                turn: 3,
                column: 1,
                source: MoveError::Invalid(InvalidMove::ColumnFull { column: 1 }),
            }
        );
        assert_eq!(err.to_string(), "move 3 (column 1): invalid move: column 1 is full");
    }

    #[test]
    fn test_replay_rejects_moves_after_game_end() {
        let columns = [0, 1, 0, 1, 0, 1, 0, 2];
        let err = GameState::initial().replay(&columns).unwrap_err();
        assert_eq!(err.turn, 8);
        assert_eq!(err.source, MoveError::GameOver);

        let finished = GameState::initial().replay(&columns[..7]).unwrap();
        assert_eq!(finished.summary(), "Player A wins");
    }

    #[test]
    fn test_summary_for_draw() {
        let config = GameConfig {
            width: 1,
            height: 1,
            win_length: 2,
            first_player: Player::A,
        };
        let state = GameState::new(&config).replay(&[0]).unwrap();
        assert_eq!(state.summary(), "Draw");
    }
}
