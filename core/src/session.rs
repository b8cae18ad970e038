//! Session state shared between auth and authenticated operations.
//!
//! # Design
//! The client never reaches for ambient storage. It holds a
//! `SessionStore` handed to it at construction, so tests and embedders
//! choose where the token and user id live.
//!
//! `MemorySessionStore` mirrors browser session storage: two string keys,
//! each holding an independently JSON-encoded value. A missing or corrupt
//! entry reads back as `None` rather than failing; the backend decides what
//! an unauthenticated request gets.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::UserId;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the logged-in user's id.
pub const USER_ID_KEY: &str = "cbid";

/// Snapshot of the persisted session fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<UserId>,
}

/// Injectable session persistence.
///
/// Implementations must tolerate concurrent callers; there is no ordering
/// between overlapping `set` calls, the last one wins. A `get` never mixes
/// the token of one `set` with the user id of another.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Session;
    fn set(&self, token: &str, user_id: &UserId);
    /// Remove both fields. Calling it on an empty store is a no-op.
    fn clear(&self);
}

/// In-process session storage keyed like browser `sessionStorage`.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw encoded entry, as it would appear in session storage.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Overwrite a raw entry without encoding it.
    pub fn set_raw(&self, key: &'static str, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.into());
    }

    fn decode<T: DeserializeOwned>(entries: &HashMap<&'static str, String>, key: &str) -> Option<T> {
        let raw = entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring undecodable session entry");
                None
            }
        }
    }

    fn encode<T: Serialize + ?Sized>(value: &T) -> Option<String> {
        serde_json::to_string(value).ok()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Session {
            token: Self::decode(&entries, TOKEN_KEY),
            user_id: Self::decode::<UserId>(&entries, USER_ID_KEY).filter(|id| !id.is_null()),
        }
    }

    fn set(&self, token: &str, user_id: &UserId) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(encoded) = Self::encode(token) {
            entries.insert(TOKEN_KEY, encoded);
        }
        if let Some(encoded) = Self::encode(user_id) {
            entries.insert(USER_ID_KEY, encoded);
        }
        tracing::debug!(%user_id, "session stored");
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(TOKEN_KEY);
        entries.remove(USER_ID_KEY);
        tracing::debug!("session cleared");
    }
}
