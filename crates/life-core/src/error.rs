//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit status used when a grid buffer cannot be allocated.
pub const ALLOCATION_FAILURE_EXIT_CODE: i32 = 12;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    #[error("Cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Process exit status for this error when it reaches the command line.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::AllocationFailure(_) => ALLOCATION_FAILURE_EXIT_CODE,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
