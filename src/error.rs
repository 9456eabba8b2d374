//! Error types for vfstore.

use thiserror::Error;

/// Common error type for store operations and the command adapter.
#[derive(Error, Debug)]
pub enum VfsError {
    /// The acting user is not registered.
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// The referenced folder id does not exist.
    #[error("folder {0} does not exist")]
    UnknownFolder(i64),

    /// A folder with a case-insensitively equal name already exists.
    #[error("folder name already exists: {0}")]
    NameConflict(String),

    /// The record being created already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The acting user does not own the folder.
    #[error("{user} is not the owner of folder {folder_id}")]
    OwnerMismatch {
        /// User who attempted the operation.
        user: String,
        /// Folder the operation targeted.
        folder_id: i64,
    },

    /// Malformed argument handed over by the command adapter.
    #[error("{0}")]
    InvalidArgument(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for vfstore operations.
pub type Result<T> = std::result::Result<T, VfsError>;
