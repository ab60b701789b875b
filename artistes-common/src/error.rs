//! Common error types for the artistes service

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for artistes operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by storage, service and configuration
#[derive(Error, Debug)]
pub enum Error {
    /// No artist record with this id
    #[error("Artist with id {0} was not found")]
    NotFound(String),

    /// An artist with this name is already stored
    #[error("An artist named {0} already exists")]
    AlreadyExists(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backing data file does not exist
    #[error("Data file not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// Backing data file exists but could not be read or parsed
    #[error("Failed to read data file {}: {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    /// Collection could not be serialized or written back
    #[error("Failed to write data file {}: {reason}", path.display())]
    FileWrite { path: PathBuf, reason: String },

    /// No numeric id above the stored ones is representable
    #[error("No artist id left to assign")]
    IdsExhausted,

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the failures of the backing file itself
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::FileMissing(_) | Error::FileRead { .. } | Error::FileWrite { .. }
        )
    }
}
