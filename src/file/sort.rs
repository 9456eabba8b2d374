//! Listing order selection.
//!
//! The command adapter passes the raw `sort_by` / `sort_order` words; any
//! combination that is not recognized falls back to name ascending.

use std::cmp::Ordering;

use super::folder::Folder;
use super::metadata::FileMetadata;

/// Sort direction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `asc`
    Asc,
    /// `dsc`
    Dsc,
}

impl SortOrder {
    /// Parse `asc` / `dsc`. Anything else is unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "dsc" => Some(SortOrder::Dsc),
            _ => None,
        }
    }
}

/// Ordering of a folder listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderOrder {
    /// By name, ascending.
    #[default]
    NameAsc,
    /// By name, descending.
    NameDesc,
    /// By creation time, oldest first.
    TimeAsc,
    /// By creation time, newest first.
    TimeDesc,
}

impl FolderOrder {
    /// Resolve the `sort_by` / `sort_order` words of `get_folders`.
    pub fn from_args(sort_by: &str, sort_order: &str) -> Self {
        match (sort_by, SortOrder::parse(sort_order)) {
            ("sort_name", Some(SortOrder::Dsc)) => FolderOrder::NameDesc,
            ("sort_time", Some(SortOrder::Asc)) => FolderOrder::TimeAsc,
            ("sort_time", Some(SortOrder::Dsc)) => FolderOrder::TimeDesc,
            _ => FolderOrder::NameAsc,
        }
    }

    pub(crate) fn compare(self, a: &Folder, b: &Folder) -> Ordering {
        match self {
            FolderOrder::NameAsc => a.name.cmp(&b.name),
            FolderOrder::NameDesc => b.name.cmp(&a.name),
            FolderOrder::TimeAsc => a.created_at.cmp(&b.created_at),
            FolderOrder::TimeDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Ordering of a file listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileOrder {
    /// By name, ascending.
    #[default]
    NameAsc,
    /// By name, descending.
    NameDesc,
    /// By creation time, oldest first.
    TimeAsc,
    /// By creation time, newest first.
    TimeDesc,
    /// By extension ascending, then name ascending.
    ExtensionAsc,
    /// By extension descending, then name ascending.
    ExtensionDesc,
}

impl FileOrder {
    /// Resolve the `sort_by` / `sort_order` words of `get_files`.
    pub fn from_args(sort_by: &str, sort_order: &str) -> Self {
        match (sort_by, SortOrder::parse(sort_order)) {
            ("sort_name", Some(SortOrder::Dsc)) => FileOrder::NameDesc,
            ("sort_time", Some(SortOrder::Asc)) => FileOrder::TimeAsc,
            ("sort_time", Some(SortOrder::Dsc)) => FileOrder::TimeDesc,
            ("sort_extension", Some(SortOrder::Asc)) => FileOrder::ExtensionAsc,
            ("sort_extension", Some(SortOrder::Dsc)) => FileOrder::ExtensionDesc,
            _ => FileOrder::NameAsc,
        }
    }

    pub(crate) fn compare(self, a: &FileMetadata, b: &FileMetadata) -> Ordering {
        match self {
            FileOrder::NameAsc => a.name.cmp(&b.name),
            FileOrder::NameDesc => b.name.cmp(&a.name),
            FileOrder::TimeAsc => a.created_at.cmp(&b.created_at),
            FileOrder::TimeDesc => b.created_at.cmp(&a.created_at),
            // Equal extensions fall back to name ascending in both directions.
            FileOrder::ExtensionAsc => a
                .extension
                .cmp(&b.extension)
                .then_with(|| a.name.cmp(&b.name)),
            FileOrder::ExtensionDesc => b
                .extension
                .cmp(&a.extension)
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}
