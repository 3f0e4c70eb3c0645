//! Credential store
//!
//! User records are keyed by the opaque identity the chat transport assigns
//! to each user. The store is a plain key-value surface so the service
//! layer stays independent of where records live; the in-memory
//! implementation serialises all writes behind a single lock.

use crate::error::{AccountError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque stable identifier from the chat transport
    pub identity: String,
    /// Unique display name chosen at registration
    pub username: String,
    /// Contact address for OTP and confirmation mail
    pub email: String,
    /// One-way password digest
    pub password_digest: String,
    /// Whether the email address has been verified
    pub is_verified: bool,
    /// Whether the user currently holds a session
    pub is_logged_in: bool,
}

impl UserRecord {
    /// Create a fresh, unverified, logged-out record
    pub fn new(
        identity: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password_digest: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            username: username.into(),
            email: email.into(),
            password_digest: password_digest.into(),
            is_verified: false,
            is_logged_in: false,
        }
    }
}

/// Storage surface for user records
pub trait UserStore: Send + Sync {
    /// Fetch the record for an identity
    fn get(&self, identity: &str) -> Option<UserRecord>;

    /// Fetch a record by email. Email is not a unique key; if several
    /// records share one address an arbitrary match is returned.
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Insert a new record. Fails with [`AccountError::AlreadyExists`] if
    /// the identity or username is already taken; never overwrites.
    fn insert(&self, record: UserRecord) -> Result<()>;

    /// Replace the record for an existing identity
    fn update(&self, record: UserRecord) -> Result<()>;

    /// Remove the record for an identity, reporting whether one existed
    fn delete(&self, identity: &str) -> bool;
}

/// Process-local store backed by a hash map
pub struct InMemoryUserStore {
    records: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn get(&self, identity: &str) -> Option<UserRecord> {
        self.records.read().ok()?.get(identity).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.records
            .read()
            .ok()?
            .values()
            .find(|r| r.email == email)
            .cloned()
    }

    fn insert(&self, record: UserRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AccountError::StorageError(format!("Lock error: {e}")))?;

        if records.contains_key(&record.identity)
            || records.values().any(|r| r.username == record.username)
        {
            return Err(AccountError::AlreadyExists);
        }

        records.insert(record.identity.clone(), record);
        Ok(())
    }

    fn update(&self, record: UserRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AccountError::StorageError(format!("Lock error: {e}")))?;

        if !records.contains_key(&record.identity) {
            return Err(AccountError::NotFound);
        }

        records.insert(record.identity.clone(), record);
        Ok(())
    }

    fn delete(&self, identity: &str) -> bool {
        self.records
            .write()
            .ok()
            .and_then(|mut records| records.remove(identity))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord::new("1001", "alice", "a@x.com", "digest-a")
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryUserStore::new();
        store.insert(alice()).unwrap();

        let rec = store.get("1001").unwrap();
        assert_eq!(rec.username, "alice");
        assert!(!rec.is_verified);
        assert!(!rec.is_logged_in);
    }

    #[test]
    fn test_duplicate_identity_fails_without_overwrite() {
        let store = InMemoryUserStore::new();
        store.insert(alice()).unwrap();

        let mut dup = UserRecord::new("1001", "someone-else", "b@x.com", "digest-b");
        dup.is_verified = true;
        assert!(matches!(
            store.insert(dup),
            Err(AccountError::AlreadyExists)
        ));

        // Original record untouched.
        assert_eq!(store.get("1001").unwrap().username, "alice");
    }

    #[test]
    fn test_duplicate_username_fails() {
        let store = InMemoryUserStore::new();
        store.insert(alice()).unwrap();

        let dup = UserRecord::new("1002", "alice", "other@x.com", "digest-b");
        assert!(matches!(
            store.insert(dup),
            Err(AccountError::AlreadyExists)
        ));
    }

    #[test]
    fn test_find_by_email() {
        let store = InMemoryUserStore::new();
        store.insert(alice()).unwrap();

        assert_eq!(store.find_by_email("a@x.com").unwrap().identity, "1001");
        assert!(store.find_by_email("missing@x.com").is_none());
    }

    #[test]
    fn test_update_requires_existing() {
        let store = InMemoryUserStore::new();
        let rec = alice();
        assert!(matches!(
            store.update(rec.clone()),
            Err(AccountError::NotFound)
        ));

        store.insert(rec.clone()).unwrap();
        let mut rec = rec;
        rec.is_logged_in = true;
        store.update(rec).unwrap();
        assert!(store.get("1001").unwrap().is_logged_in);
    }

    #[test]
    fn test_delete() {
        let store = InMemoryUserStore::new();
        store.insert(alice()).unwrap();
        assert!(store.delete("1001"));
        assert!(!store.delete("1001"));
        assert!(store.get("1001").is_none());
    }
}
