//! Pipe-delimited rows for listings.

use crate::config::DisplayConfig;
use crate::datetime::format_utc_datetime;
use crate::file::{FileMetadata, Folder};

/// `id|name|description|created_at|created_by`
pub fn folder_row(folder: &Folder, display: &DisplayConfig) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        folder.id,
        folder.name,
        folder.description,
        format_utc_datetime(
            &folder.created_at,
            &display.timezone,
            &display.datetime_format
        ),
        folder.created_by
    )
}

/// `name|extension|description|created_at|created_by`
pub fn file_row(file: &FileMetadata, display: &DisplayConfig) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        file.name,
        file.extension,
        file.description,
        format_utc_datetime(&file.created_at, &display.timezone, &display.datetime_format),
        file.created_by
    )
}
