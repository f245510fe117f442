use std::path::PathBuf;

/// A move the rules do not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (grid width is {width})")]
    ColumnOutOfRange { column: usize, width: usize },
}

/// Errors raised when building a grid from raw rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("token at row {row}, column {column} has an empty cell below it")]
    FloatingToken { row: usize, column: usize },
}

/// Errors raised when advancing a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move: {0}")]
    Invalid(#[from] InvalidMove),

    #[error("the game is already over")]
    GameOver,
}

/// A move in a replayed sequence that could not be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("move {turn} (column {column}): {source}")]
pub struct ReplayError {
    /// 1-based position of the move in the sequence
    pub turn: usize,
    pub column: usize,
    pub source: MoveError,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
