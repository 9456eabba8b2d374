//! File metadata types for vfstore.

use chrono::{DateTime, Utc};

/// Metadata for a file in a folder. No content is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Filename including its extension; unique across the whole store.
    pub name: String,
    /// Part of the name after the last `.` (empty if there is none).
    pub extension: String,
    /// Folder ID this file belongs to.
    pub folder_id: i64,
    /// File description (may be empty).
    pub description: String,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// Name of the uploading user.
    pub created_by: String,
}

/// Extension of `filename`: everything after the last `.`, or `""`.
pub fn extension_of(filename: &str) -> &str {
    filename
        .rfind('.')
        .map(|pos| &filename[pos + 1..])
        .unwrap_or("")
}
