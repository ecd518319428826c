use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeLoadError {
    #[error("could not read maze file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("maze file {path} has no rows")]
    Empty { path: PathBuf },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeFormatError {
    #[error("maze has no rows")]
    NoRows,
    #[error("maze row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze has {available} free cells but {required} entities must be placed")]
    InsufficientCapacity { required: usize, available: usize },
    #[error("player start ({x},{y}) is outside the {width}x{height} maze")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("player start ({x},{y}) is a wall or locked gate")]
    StartBlocked { x: i32, y: i32 },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Load(#[from] MazeLoadError),
    #[error(transparent)]
    Format(#[from] MazeFormatError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
