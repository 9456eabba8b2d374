//! User registry for vfstore.
//!
//! Users carry nothing but a name. Names are unique and compared
//! case-insensitively everywhere.

mod store;

pub use store::UserStore;

use crate::Result;

/// Anyone who acts on folders and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Name as first registered.
    pub name: String,
}

impl User {
    /// Create a user record.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Registry of known users.
pub trait UserService: Send + Sync {
    /// Add a user. Fails with `AlreadyExists` on a case-insensitive match.
    fn register(&self, name: &str) -> Result<User>;

    /// Case-insensitive membership test.
    fn exists(&self, name: &str) -> bool;
}

/// Normalized key used for case-insensitive name comparison.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive name equality.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}
