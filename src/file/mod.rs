//! Folder and file management for vfstore.
//!
//! This module provides:
//! - Folders keyed by an assigned integer id, owned by the creating user
//! - File metadata records scoped to a folder (no content is stored)
//! - Case-insensitive folder name uniqueness and owner checks
//! - Stable, multi-key ordering of listings

mod folder;
mod metadata;
mod service;
mod sort;

pub use folder::{Folder, FolderService, FolderStore};
pub use metadata::{extension_of, FileMetadata};
pub use service::{FileService, FileStore};
pub use sort::{FileOrder, FolderOrder, SortOrder};

/// A stored record tagged with its insertion sequence.
///
/// Listings start from insertion order so that stable sorts keep ties in
/// the order the records were created.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    record: T,
}

/// Clone the records of `slots` in insertion order.
fn in_insertion_order<'a, T, I>(slots: I) -> Vec<T>
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a Slot<T>>,
{
    let mut slots: Vec<&Slot<T>> = slots.into_iter().collect();
    slots.sort_by_key(|slot| slot.seq);
    slots.into_iter().map(|slot| slot.record.clone()).collect()
}
