//! File service for vfstore.
//!
//! This module provides the file metadata operations:
//! - Upload with user and folder existence checks
//! - Deletion by any registered user
//! - Per-folder listing with name, time and extension ordering

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::folder::FolderService;
use super::metadata::{extension_of, FileMetadata};
use super::sort::FileOrder;
use super::{in_insertion_order, Slot};
use crate::datetime::Clock;
use crate::user::UserService;
use crate::{Result, VfsError};

/// File operations.
pub trait FileService: Send + Sync {
    /// Record a new file in a folder.
    ///
    /// Fails with `UnknownUser`, then `UnknownFolder`, then `AlreadyExists`
    /// when the filename is already taken anywhere in the store.
    fn upload(
        &self,
        created_by: &str,
        folder_id: i64,
        filename: &str,
        description: &str,
    ) -> Result<FileMetadata>;

    /// Remove a file. Any registered user naming an existing folder may
    /// delete any file.
    fn delete(&self, deleted_by: &str, folder_id: i64, filename: &str) -> Result<()>;

    /// List the files of one folder in the requested order.
    fn get_all(&self, username: &str, folder_id: i64, order: FileOrder)
        -> Result<Vec<FileMetadata>>;
}

#[derive(Debug, Default)]
struct FileTable {
    files: HashMap<String, Slot<FileMetadata>>,
    next_seq: u64,
}

/// `FileService` backed by a filename-keyed map.
pub struct FileStore {
    users: Arc<dyn UserService>,
    folders: Arc<dyn FolderService>,
    clock: Arc<dyn Clock>,
    table: RwLock<FileTable>,
}

impl FileStore {
    /// Create an empty store.
    pub fn new(
        users: Arc<dyn UserService>,
        folders: Arc<dyn FolderService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            folders,
            clock,
            table: RwLock::new(FileTable::default()),
        }
    }

    /// Number of stored files across all folders.
    pub fn len(&self) -> usize {
        self.table.read().files.len()
    }

    /// Whether no file is stored.
    pub fn is_empty(&self) -> bool {
        self.table.read().files.is_empty()
    }

    /// Check the acting user and the target folder, in that order.
    fn check_access(&self, username: &str, folder_id: i64) -> Result<()> {
        if !self.users.exists(username) {
            return Err(VfsError::UnknownUser(username.to_string()));
        }
        if !self.folders.exists(folder_id) {
            return Err(VfsError::UnknownFolder(folder_id));
        }
        Ok(())
    }
}

impl FileService for FileStore {
    fn upload(
        &self,
        created_by: &str,
        folder_id: i64,
        filename: &str,
        description: &str,
    ) -> Result<FileMetadata> {
        self.check_access(created_by, folder_id)?;

        let mut table = self.table.write();
        if table.files.contains_key(filename) {
            return Err(VfsError::AlreadyExists(format!("file {filename}")));
        }

        let file = FileMetadata {
            name: filename.to_string(),
            extension: extension_of(filename).to_string(),
            folder_id,
            description: description.to_string(),
            created_at: self.clock.now(),
            created_by: created_by.to_string(),
        };

        let seq = table.next_seq;
        table.next_seq += 1;
        table.files.insert(
            filename.to_string(),
            Slot {
                seq,
                record: file.clone(),
            },
        );

        info!(folder_id, file = %filename, by = %created_by, "file uploaded");
        Ok(file)
    }

    fn delete(&self, deleted_by: &str, folder_id: i64, filename: &str) -> Result<()> {
        self.check_access(deleted_by, folder_id)?;

        if self.table.write().files.remove(filename).is_none() {
            return Err(VfsError::NotFound(format!("file {filename}")));
        }

        info!(folder_id, file = %filename, by = %deleted_by, "file deleted");
        Ok(())
    }

    fn get_all(
        &self,
        username: &str,
        folder_id: i64,
        order: FileOrder,
    ) -> Result<Vec<FileMetadata>> {
        self.check_access(username, folder_id)?;

        let table = self.table.read();
        let mut files = in_insertion_order(
            table
                .files
                .values()
                .filter(|slot| slot.record.folder_id == folder_id),
        );
        drop(table);

        files.sort_by(|a, b| order.compare(a, b));
        Ok(files)
    }
}
