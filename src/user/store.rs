//! In-memory user store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

use super::{name_key, User, UserService};
use crate::{Result, VfsError};

/// `UserService` backed by a lowercased-name map.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether no user is registered.
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserService for UserStore {
    fn register(&self, name: &str) -> Result<User> {
        let mut users = self.users.write();
        let key = name_key(name);
        if users.contains_key(&key) {
            return Err(VfsError::AlreadyExists(format!("user {name}")));
        }

        let user = User::new(name);
        users.insert(key, user.clone());
        info!(user = %name, "user registered");
        Ok(user)
    }

    fn exists(&self, name: &str) -> bool {
        self.users.read().contains_key(&name_key(name))
    }
}
