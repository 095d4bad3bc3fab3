//! Session credentials kept in a local key-value store.
//!
//! # Design
//! `KeyValueStore` is the seam between the session logic and wherever the
//! host keeps its strings: `MemoryStore` lives only as long as the process,
//! `FileStore` writes every change through to a JSON file.
//!
//! Logging out clears the whole store, not only the keys listed here. Other
//! values a host keeps in the same store are lost on logout.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::route::Route;

pub const TOKEN_KEY: &str = "token";
pub const USER_NAME_KEY: &str = "userName";
pub const ADMIN_KEY: &str = "admin";
pub const ADMIN_NAME_KEY: &str = "adminName";
pub const ROLE_KEY: &str = "role";

/// A string-to-string store with browser-local-storage semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every key.
    fn clear(&mut self) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

/// Store persisted as a flat JSON object. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened session file");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.flush()
    }
}

/// Customer and admin credentials on top of a `KeyValueStore`.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // --- customer ---

    pub fn store_user_authorization(&mut self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn user_authorization(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    pub fn store_user_name(&mut self, name: &str) -> Result<(), StorageError> {
        self.store.set(USER_NAME_KEY, name)
    }

    pub fn user_name(&self) -> Option<String> {
        self.store.get(USER_NAME_KEY)
    }

    pub fn store_user_role(&mut self, role: &str) -> Result<(), StorageError> {
        self.store.set(ROLE_KEY, role)
    }

    pub fn user_role(&self) -> Option<String> {
        self.store.get(ROLE_KEY)
    }

    /// Wipe the store and send the customer home.
    pub fn user_logout(&mut self) -> Result<Route, StorageError> {
        self.store.clear()?;
        tracing::info!("customer logged out");
        Ok(Route::Home)
    }

    /// Redirect to the customer login when no token is stored.
    pub fn is_user_login_present(&self) -> Option<Route> {
        match self.user_authorization() {
            Some(_) => None,
            None => Some(Route::UserLogin),
        }
    }

    // --- admin ---

    pub fn store_admin_authorization(&mut self, token: &str) -> Result<(), StorageError> {
        self.store.set(ADMIN_KEY, token)
    }

    pub fn admin_authorization(&self) -> Option<String> {
        self.store.get(ADMIN_KEY)
    }

    pub fn store_admin_name(&mut self, name: &str) -> Result<(), StorageError> {
        self.store.set(ADMIN_NAME_KEY, name)
    }

    pub fn admin_name(&self) -> Option<String> {
        self.store.get(ADMIN_NAME_KEY)
    }

    /// Wipe the store and send the admin home.
    pub fn admin_logout(&mut self) -> Result<Route, StorageError> {
        self.store.clear()?;
        tracing::info!("admin logged out");
        Ok(Route::Home)
    }

    /// Redirect to the admin login when no admin token is stored.
    pub fn is_admin_login_present(&self) -> Option<Route> {
        match self.admin_authorization() {
            Some(_) => None,
            None => Some(Route::AdminLogin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_user_and_admin_under_separate_keys() {
        let mut session = Session::new(MemoryStore::new());
        session.store_user_authorization("1001").unwrap();
        session.store_user_name("Ana").unwrap();
        session.store_admin_authorization("7").unwrap();
        session.store_admin_name("Root").unwrap();
        session.store_user_role("ADMIN").unwrap();

        assert_eq!(session.user_authorization().as_deref(), Some("1001"));
        assert_eq!(session.user_name().as_deref(), Some("Ana"));
        assert_eq!(session.admin_authorization().as_deref(), Some("7"));
        assert_eq!(session.admin_name().as_deref(), Some("Root"));
        assert_eq!(session.user_role().as_deref(), Some("ADMIN"));

        let store = session.into_store();
        assert_eq!(store.get("token").as_deref(), Some("1001"));
        assert_eq!(store.get("adminName").as_deref(), Some("Root"));
    }

    #[test]
    fn missing_token_redirects_to_login() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(session.is_user_login_present(), Some(Route::UserLogin));
        assert_eq!(session.is_admin_login_present(), Some(Route::AdminLogin));
    }

    #[test]
    fn present_token_does_not_redirect() {
        let mut session = Session::new(MemoryStore::new());
        session.store_user_authorization("1001").unwrap();
        assert_eq!(session.is_user_login_present(), None);
        // The admin check only looks at the admin key.
        assert_eq!(session.is_admin_login_present(), Some(Route::AdminLogin));
    }

    #[test]
    fn logout_clears_token_and_forces_login() {
        let mut session = Session::new(MemoryStore::new());
        session.store_user_authorization("1001").unwrap();
        assert_eq!(session.user_logout().unwrap(), Route::Home);
        assert_eq!(session.user_authorization(), None);
        assert_eq!(session.is_user_login_present(), Some(Route::UserLogin));
    }

    #[test]
    fn logout_wipes_unrelated_keys_too() {
        let mut store = MemoryStore::new();
        store.set("theme", "dark").unwrap();
        let mut session = Session::new(store);
        session.store_admin_authorization("7").unwrap();

        session.admin_logout().unwrap();

        assert!(session.store().is_empty());
        assert_eq!(session.store().get("theme"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::new(FileStore::open(&path).unwrap());
        session.store_admin_authorization("7").unwrap();
        session.store_admin_name("Root").unwrap();
        drop(session);

        let session = Session::new(FileStore::open(&path).unwrap());
        assert_eq!(session.admin_authorization().as_deref(), Some("7"));
        assert_eq!(session.admin_name().as_deref(), Some("Root"));
    }

    #[test]
    fn file_store_clear_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::new(FileStore::open(&path).unwrap());
        session.store_user_authorization("1001").unwrap();
        session.user_logout().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY), None);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
