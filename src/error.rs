use std::path::PathBuf;

/// Contract violations raised by the board and the turn engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell {0} is outside the board (1-100)")]
    InvalidCell(u8),

    #[error("grid position ({row}, {col}) is off the 10x10 board")]
    InvalidPosition { row: u8, col: u8 },

    #[error("roll {0} is outside the die range (1-6)")]
    InvalidRoll(u8),

    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    #[error("invalid link {from} -> {to}: {reason}")]
    Configuration {
        from: u8,
        to: u8,
        reason: &'static str,
    },

    #[error("a game needs 2 to 4 seats, got {0}")]
    InvalidPlayerCount(usize),
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

    #[error("board table rejected: {0}")]
    Board(#[from] GameError),
}
