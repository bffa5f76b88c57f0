//! Session Store
//!
//! Typed access to the locally cached credential and user identity.
//! The backing store is a plain string key-value map (browser
//! `localStorage` in the UI, [`MemoryStore`] elsewhere).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::models::{UserId, UserIdentity};

/// Key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the JSON-encoded user identity
pub const USER_INFO_KEY: &str = "userInfo";

/// String key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Opaque access token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Credential and identity cache
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Session over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    pub fn get_credential(&self) -> Option<Credential> {
        self.backend
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(Credential)
    }

    /// Cached identity; a corrupt entry reads as absent
    pub fn get_identity(&self) -> Option<UserIdentity> {
        let raw = self.backend.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("ignoring malformed {} entry: {}", USER_INFO_KEY, e);
                None
            }
        }
    }

    pub fn set_session(&self, credential: &Credential, identity: &UserIdentity) {
        self.backend.set(ACCESS_TOKEN_KEY, credential.as_str());
        self.store_identity(identity);
        debug!(user_id = identity.id, "session stored");
    }

    /// Apply a change to the cached identity, returning the new copy
    ///
    /// No-op when nothing is cached.
    pub fn update_identity(&self, update: impl FnOnce(&mut UserIdentity)) -> Option<UserIdentity> {
        let mut identity = self.get_identity()?;
        update(&mut identity);
        self.store_identity(&identity);
        Some(identity)
    }

    pub fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(USER_INFO_KEY);
        debug!("session cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_credential().is_some()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.get_identity().map(|identity| identity.id)
    }

    fn store_identity(&self, identity: &UserIdentity) {
        match serde_json::to_string(identity) {
            Ok(json) => self.backend.set(USER_INFO_KEY, &json),
            Err(e) => warn!("failed to encode identity: {}", e),
        }
    }
}
