//! External identity → internal user id mapping.
//!
//! Collaborators (bridges, alternate signers) present an [`AccountKey`];
//! the registry assigns a dense [`UserId`] lazily on first use and keeps
//! the mapping stable forever after.

use std::collections::HashMap;

use tickbook_types::{AccountKey, Result, TickbookError, UserId};

/// Lazy, stable account-to-user mapping.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<AccountKey, UserId>,
    next: u64,
}

impl UserRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The user id for an account, assigning one on first use.
    pub fn resolve(&mut self, account: AccountKey) -> UserId {
        if let Some(&id) = self.users.get(&account) {
            return id;
        }
        let id = UserId(self.next);
        self.next += 1;
        self.users.insert(account, id);
        id
    }

    /// The user id for an account that must already exist.
    pub fn lookup(&self, account: AccountKey) -> Result<UserId> {
        self.users
            .get(&account)
            .copied()
            .ok_or(TickbookError::UnknownUser(account))
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
