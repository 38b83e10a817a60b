//! Error types for relaxsim

use thiserror::Error;

/// Result type for relaxation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for grid loading and the parallel solve
#[derive(Error, Debug)]
pub enum Error {
    /// Grid file could not be read
    #[error("failed to read grid: {0}")]
    Io(#[from] std::io::Error),

    /// A token in the grid file did not parse as a float
    #[error("invalid grid value {token:?} at position {position}")]
    MalformedValue { token: String, position: usize },

    /// The input held the wrong number of values
    #[error("expected {expected} grid values, found {found}")]
    ValueCount { expected: usize, found: usize },

    /// The grid is too small to have boundary rows and columns
    #[error("grid must be at least 2x2, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    /// A solve needs at least one worker
    #[error("at least one worker is required")]
    NoWorkers,

    /// The convergence threshold must be positive
    #[error("convergence threshold must be positive, got {0}")]
    InvalidThreshold(f64),

    /// A worker thread could not be started
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(std::io::Error),
}
