//! Folder types and in-memory folder store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{info, warn};

use super::sort::FolderOrder;
use super::{in_insertion_order, Slot};
use crate::config::{FolderIdStrategy, StoreConfig};
use crate::datetime::Clock;
use crate::user::{same_name, UserService};
use crate::{Result, VfsError};

/// A folder in the virtual file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    /// Folder ID.
    pub id: i64,
    /// Folder name, unique case-insensitively.
    pub name: String,
    /// Folder description (may be empty).
    pub description: String,
    /// Name of the user that created (and owns) the folder.
    pub created_by: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

/// Folder operations.
pub trait FolderService: Send + Sync {
    /// Add a folder owned by `created_by`.
    ///
    /// Fails with `UnknownUser` if `created_by` is not registered and with
    /// `NameConflict` if a live folder already has the name (ignoring case).
    fn create(&self, name: &str, created_by: &str, description: &str) -> Result<Folder>;

    /// Remove a folder. Only its owner may delete it.
    fn delete(&self, id: i64, deleted_by: &str) -> Result<()>;

    /// Give a folder a new name. Only its owner may rename it.
    fn rename(&self, id: i64, new_name: &str, renamed_by: &str) -> Result<()>;

    /// List every folder (regardless of owner) in the requested order.
    fn get_all(&self, username: &str, order: FolderOrder) -> Result<Vec<Folder>>;

    /// Whether a folder with `id` exists.
    fn exists(&self, id: i64) -> bool;

    /// Get a folder by id.
    fn get(&self, id: i64) -> Result<Folder>;
}

/// Folder id assignment.
#[derive(Debug, Clone)]
enum IdAllocator {
    /// `base` while empty, otherwise the value at index `len - 1` of the
    /// ascending live ids, i.e. the largest live id.
    LastLive { base: i64 },
    /// Counter that never hands out the same id twice.
    Monotonic { next: i64 },
}

impl IdAllocator {
    fn new(base: i64, strategy: FolderIdStrategy) -> Self {
        match strategy {
            FolderIdStrategy::LastLive => IdAllocator::LastLive { base },
            FolderIdStrategy::Monotonic => IdAllocator::Monotonic { next: base },
        }
    }

    fn next_id(&mut self, live: impl Iterator<Item = i64>) -> i64 {
        match self {
            IdAllocator::LastLive { base } => {
                let mut keys: Vec<i64> = live.collect();
                keys.sort_unstable();
                keys.last().copied().unwrap_or(*base)
            }
            IdAllocator::Monotonic { next } => {
                let id = *next;
                *next += 1;
                id
            }
        }
    }
}

#[derive(Debug)]
struct FolderTable {
    folders: HashMap<i64, Slot<Folder>>,
    ids: IdAllocator,
    next_seq: u64,
}

/// `FolderService` backed by an id-keyed map.
///
/// User checks go through the `UserService` before the folder table is
/// locked; the two locks are never held together.
pub struct FolderStore {
    users: Arc<dyn UserService>,
    clock: Arc<dyn Clock>,
    table: RwLock<FolderTable>,
}

impl FolderStore {
    /// Create an empty store using the default id settings.
    pub fn new(users: Arc<dyn UserService>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(users, clock, &StoreConfig::default())
    }

    /// Create an empty store with explicit id settings.
    pub fn with_config(
        users: Arc<dyn UserService>,
        clock: Arc<dyn Clock>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            users,
            clock,
            table: RwLock::new(FolderTable {
                folders: HashMap::new(),
                ids: IdAllocator::new(config.folder_id_base, config.folder_id_strategy),
                next_seq: 0,
            }),
        }
    }

    /// Number of live folders.
    pub fn len(&self) -> usize {
        self.table.read().folders.len()
    }

    /// Whether there are no live folders.
    pub fn is_empty(&self) -> bool {
        self.table.read().folders.is_empty()
    }

    fn require_user(&self, name: &str) -> Result<()> {
        if self.users.exists(name) {
            Ok(())
        } else {
            Err(VfsError::UnknownUser(name.to_string()))
        }
    }
}

/// Look up a folder and check that `user` owns it.
fn owned_folder<'a>(table: &'a mut FolderTable, id: i64, user: &str) -> Result<&'a mut Folder> {
    let slot = table
        .folders
        .get_mut(&id)
        .ok_or_else(|| VfsError::NotFound(format!("folder {id}")))?;

    if !same_name(&slot.record.created_by, user) {
        return Err(VfsError::OwnerMismatch {
            user: user.to_string(),
            folder_id: id,
        });
    }

    Ok(&mut slot.record)
}

impl FolderService for FolderStore {
    fn create(&self, name: &str, created_by: &str, description: &str) -> Result<Folder> {
        self.require_user(created_by)?;

        let mut table = self.table.write();
        if table
            .folders
            .values()
            .any(|slot| same_name(&slot.record.name, name))
        {
            return Err(VfsError::NameConflict(name.to_string()));
        }

        let FolderTable {
            folders,
            ids,
            next_seq,
        } = &mut *table;

        let id = ids.next_id(folders.keys().copied());
        let folder = Folder {
            id,
            name: name.to_string(),
            description: description.to_string(),
            created_by: created_by.to_string(),
            created_at: self.clock.now(),
        };

        let slot = Slot {
            seq: *next_seq,
            record: folder.clone(),
        };
        *next_seq += 1;

        if let Some(replaced) = folders.insert(id, slot) {
            warn!(
                folder_id = id,
                replaced = %replaced.record.name,
                "folder id reused; previous folder replaced"
            );
        }

        info!(folder_id = id, name = %name, owner = %created_by, "folder created");
        Ok(folder)
    }

    fn delete(&self, id: i64, deleted_by: &str) -> Result<()> {
        self.require_user(deleted_by)?;

        let mut table = self.table.write();
        owned_folder(&mut table, id, deleted_by)?;
        table.folders.remove(&id);

        info!(folder_id = id, by = %deleted_by, "folder deleted");
        Ok(())
    }

    fn rename(&self, id: i64, new_name: &str, renamed_by: &str) -> Result<()> {
        self.require_user(renamed_by)?;

        let mut table = self.table.write();
        owned_folder(&mut table, id, renamed_by)?;

        if table
            .folders
            .iter()
            .any(|(other, slot)| *other != id && same_name(&slot.record.name, new_name))
        {
            return Err(VfsError::NameConflict(new_name.to_string()));
        }

        let folder = owned_folder(&mut table, id, renamed_by)?;
        let old_name = std::mem::replace(&mut folder.name, new_name.to_string());

        info!(folder_id = id, from = %old_name, to = %new_name, "folder renamed");
        Ok(())
    }

    fn get_all(&self, username: &str, order: FolderOrder) -> Result<Vec<Folder>> {
        self.require_user(username)?;

        let mut folders = in_insertion_order(self.table.read().folders.values());
        folders.sort_by(|a, b| order.compare(a, b));
        Ok(folders)
    }

    fn exists(&self, id: i64) -> bool {
        self.table.read().folders.contains_key(&id)
    }

    fn get(&self, id: i64) -> Result<Folder> {
        self.table
            .read()
            .folders
            .get(&id)
            .map(|slot| slot.record.clone())
            .ok_or_else(|| VfsError::NotFound(format!("folder {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::ManualClock;
    use crate::user::UserStore;
    use chrono::{Duration, TimeZone};

    fn setup_with(strategy: FolderIdStrategy) -> (FolderStore, ManualClock) {
        let users = UserStore::new();
        users.register("Luke").unwrap();
        users.register("Mark").unwrap();

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2021, 2, 23, 0, 0, 0).unwrap());
        let config = StoreConfig {
            folder_id_base: 1001,
            folder_id_strategy: strategy,
        };
        let store = FolderStore::with_config(Arc::new(users), Arc::new(clock.clone()), &config);
        (store, clock)
    }

    fn setup() -> (FolderStore, ManualClock) {
        setup_with(FolderIdStrategy::Monotonic)
    }

    fn names(folders: &[Folder]) -> Vec<&str> {
        folders.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_create_folder() {
        let (store, clock) = setup();

        let folder = store.create("Work", "Luke", "desc").unwrap();

        assert_eq!(folder.id, 1001);
        assert_eq!(folder.name, "Work");
        assert_eq!(folder.description, "desc");
        assert_eq!(folder.created_by, "Luke");
        assert_eq!(folder.created_at, clock.now());
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let (store, _clock) = setup();

        let created = store.create("Work", "Luke", "desc").unwrap();
        let found = store.get(created.id).unwrap();

        assert_eq!(found, created);
    }

    #[test]
    fn test_create_unknown_user() {
        let (store, _clock) = setup();

        let result = store.create("Work", "Ghost", "");

        assert!(matches!(result, Err(VfsError::UnknownUser(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_name_conflict_ignores_case() {
        let (store, _clock) = setup();
        store.create("Work", "Luke", "").unwrap();

        let result = store.create("wORK", "Mark", "");

        assert!(matches!(result, Err(VfsError::NameConflict(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_accepts_owner_in_any_case() {
        let (store, _clock) = setup();

        let folder = store.create("Work", "luke", "").unwrap();

        assert_eq!(folder.created_by, "luke");
    }

    #[test]
    fn test_last_live_ids_start_at_base() {
        let (store, _clock) = setup_with(FolderIdStrategy::LastLive);

        let first = store.create("Work", "Luke", "").unwrap();

        assert_eq!(first.id, 1001);
    }

    #[test]
    fn test_last_live_ids_repeat_largest_live_id() {
        let (store, _clock) = setup_with(FolderIdStrategy::LastLive);
        store.create("Work", "Luke", "").unwrap();

        let second = store.create("Testing", "Mark", "").unwrap();

        // The largest live id is handed out again and replaces its holder.
        assert_eq!(second.id, 1001);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1001).unwrap().name, "Testing");
    }

    #[test]
    fn test_last_live_after_delete_restarts_at_base() {
        let (store, _clock) = setup_with(FolderIdStrategy::LastLive);
        let folder = store.create("Work", "Luke", "").unwrap();
        store.delete(folder.id, "Luke").unwrap();

        let next = store.create("Play", "Luke", "").unwrap();

        assert_eq!(next.id, 1001);
    }

    #[test]
    fn test_new_uses_default_id_settings() {
        let users = UserStore::new();
        users.register("Luke").unwrap();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2021, 2, 23, 0, 0, 0).unwrap());
        let store = FolderStore::new(Arc::new(users), Arc::new(clock));

        assert_eq!(store.create("Work", "Luke", "").unwrap().id, 1001);
        assert_eq!(store.create("Play", "Luke", "").unwrap().id, 1002);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_id_allocator_last_live_picks_max() {
        let mut ids = IdAllocator::new(1001, FolderIdStrategy::LastLive);

        assert_eq!(ids.next_id([1005, 1002, 1003].into_iter()), 1005);
        assert_eq!(ids.next_id(std::iter::empty()), 1001);
    }

    #[test]
    fn test_monotonic_ids_never_reused() {
        let (store, _clock) = setup();
        let a = store.create("A", "Luke", "").unwrap();
        let b = store.create("B", "Luke", "").unwrap();
        store.delete(b.id, "Luke").unwrap();

        let c = store.create("C", "Luke", "").unwrap();

        assert_eq!(a.id, 1001);
        assert_eq!(b.id, 1002);
        assert_eq!(c.id, 1003);
    }

    #[test]
    fn test_delete_folder() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "").unwrap();

        store.delete(folder.id, "LUKE").unwrap();

        assert!(!store.exists(folder.id));
        assert!(matches!(store.get(folder.id), Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_delete_not_owner() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "").unwrap();

        let result = store.delete(folder.id, "Mark");

        assert!(matches!(result, Err(VfsError::OwnerMismatch { .. })));
        assert!(store.get(folder.id).is_ok());
    }

    #[test]
    fn test_delete_not_found() {
        let (store, _clock) = setup();

        let result = store.delete(9999, "Luke");

        assert!(matches!(result, Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_delete_unknown_user_checked_first() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "").unwrap();

        assert!(matches!(
            store.delete(folder.id, "Ghost"),
            Err(VfsError::UnknownUser(_))
        ));
        assert!(matches!(
            store.delete(9999, "Ghost"),
            Err(VfsError::UnknownUser(_))
        ));
        assert!(store.exists(folder.id));
    }

    #[test]
    fn test_rename_folder() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "desc").unwrap();

        store.rename(folder.id, "Office", "Luke").unwrap();

        let renamed = store.get(folder.id).unwrap();
        assert_eq!(renamed.name, "Office");
        assert_eq!(renamed.description, "desc");
        assert_eq!(renamed.created_at, folder.created_at);
    }

    #[test]
    fn test_rename_to_case_variant_of_own_name() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "").unwrap();

        store.rename(folder.id, "WORK", "Luke").unwrap();

        assert_eq!(store.get(folder.id).unwrap().name, "WORK");
    }

    #[test]
    fn test_rename_conflict() {
        let (store, _clock) = setup();
        let work = store.create("Work", "Luke", "").unwrap();
        store.create("Testing", "Luke", "").unwrap();

        let result = store.rename(work.id, "testing", "Luke");

        assert!(matches!(result, Err(VfsError::NameConflict(_))));
        assert_eq!(store.get(work.id).unwrap().name, "Work");
    }

    #[test]
    fn test_rename_not_owner() {
        let (store, _clock) = setup();
        let folder = store.create("Work", "Luke", "").unwrap();

        let result = store.rename(folder.id, "Mine", "Mark");

        assert!(matches!(result, Err(VfsError::OwnerMismatch { .. })));
        assert_eq!(store.get(folder.id).unwrap().name, "Work");
    }

    #[test]
    fn test_rename_not_found_and_unknown_user() {
        let (store, _clock) = setup();

        assert!(matches!(
            store.rename(9999, "X", "Luke"),
            Err(VfsError::NotFound(_))
        ));
        assert!(matches!(
            store.rename(9999, "X", "Ghost"),
            Err(VfsError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_get_all_sort_by_name() {
        let (store, _clock) = setup();
        store.create("Work", "Luke", "").unwrap();
        store.create("Testing", "Mark", "").unwrap();

        let asc = store.get_all("Luke", FolderOrder::NameAsc).unwrap();
        let dsc = store.get_all("Luke", FolderOrder::NameDesc).unwrap();

        assert_eq!(names(&asc), ["Testing", "Work"]);
        assert_eq!(names(&dsc), ["Work", "Testing"]);
    }

    #[test]
    fn test_get_all_lists_every_owner() {
        let (store, _clock) = setup();
        store.create("Work", "Luke", "").unwrap();
        store.create("Testing", "Mark", "").unwrap();

        let folders = store.get_all("Mark", FolderOrder::default()).unwrap();

        assert_eq!(folders.len(), 2);
    }

    #[test]
    fn test_get_all_sort_by_time() {
        let (store, clock) = setup();
        store.create("B", "Luke", "").unwrap();
        clock.advance(Duration::seconds(10));
        store.create("A", "Luke", "").unwrap();
        clock.advance(Duration::seconds(10));
        store.create("C", "Luke", "").unwrap();

        let asc = store.get_all("Luke", FolderOrder::TimeAsc).unwrap();
        let dsc = store.get_all("Luke", FolderOrder::TimeDesc).unwrap();

        assert_eq!(names(&asc), ["B", "A", "C"]);
        assert_eq!(names(&dsc), ["C", "A", "B"]);
    }

    #[test]
    fn test_get_all_time_ties_keep_insertion_order() {
        let (store, _clock) = setup();
        for name in ["Zeta", "Alpha", "Mid"] {
            store.create(name, "Luke", "").unwrap();
        }

        let asc = store.get_all("Luke", FolderOrder::TimeAsc).unwrap();
        let dsc = store.get_all("Luke", FolderOrder::TimeDesc).unwrap();

        assert_eq!(names(&asc), ["Zeta", "Alpha", "Mid"]);
        assert_eq!(names(&dsc), ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_get_all_unknown_user() {
        let (store, _clock) = setup();
        store.create("Work", "Luke", "").unwrap();

        let result = store.get_all("Ghost", FolderOrder::default());

        assert!(matches!(result, Err(VfsError::UnknownUser(_))));
    }

    #[test]
    fn test_get_all_empty() {
        let (store, _clock) = setup();

        let folders = store.get_all("Luke", FolderOrder::default()).unwrap();

        assert!(folders.is_empty());
    }
}
