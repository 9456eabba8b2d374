//! vfstore - in-memory virtual file system record store
//!
//! Users own folders, folders hold file metadata records. Everything lives
//! in memory and is driven by line commands read from stdin.

pub mod app;
pub mod config;
pub mod datetime;
pub mod error;
pub mod file;
pub mod logging;
pub mod user;

pub use app::{Application, Command, Outcome};
pub use config::{Config, FolderIdStrategy};
pub use datetime::{Clock, ManualClock, SystemClock};
pub use error::{Result, VfsError};
pub use file::{
    FileMetadata, FileOrder, FileService, FileStore, Folder, FolderOrder, FolderService,
    FolderStore,
};
pub use user::{User, UserService, UserStore};
