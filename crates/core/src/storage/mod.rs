//! Durable key-value substrate backing the session store.
//!
//! The session store only needs three primitives: read a key, write a
//! key, delete a key. Two implementations are provided:
//!
//! - [`SqliteStorage`]: file-backed, survives process restarts
//! - [`MemoryStorage`]: ephemeral, used by tests and one-shot tools

pub mod connection;
pub mod migrations;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;

pub use connection::SqliteStorage;

/// Key-value persistence used by [`crate::SessionStore`].
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), Error>;
}

/// In-memory storage. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
