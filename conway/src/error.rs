// error.rs - Error types for the Life engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: isize, col: isize, size: usize },

    #[error("invalid grid size {0}")]
    InvalidSize(usize),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("pattern {name} does not fit in a {size}x{size} grid at the requested origin")]
    PatternTooLarge { name: String, size: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row task {row} failed")]
    RowTask {
        row: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}

pub type LifeResult<T> = Result<T, LifeError>;
