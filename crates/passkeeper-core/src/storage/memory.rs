//! In-memory storage backend
//!
//! Records live in a `HashMap` and are gone when the backend is dropped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::UserStorage;
use crate::error::Result;
use crate::user::{Password, UserRecord};

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryUserStorage {
    users: Mutex<HashMap<String, Password>>,
}

impl MemoryUserStorage {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn init_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_user(&self, record: &UserRecord) -> Result<bool> {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());

        if users.contains_key(&record.username) {
            return Ok(false);
        }

        users.insert(record.username.clone(), record.password.clone());
        Ok(true)
    }

    async fn credentials_match(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());

        Ok(users
            .get(username)
            .is_some_and(|stored| stored.matches(password)))
    }

    async fn contains(&self, username: &str) -> Result<bool> {
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        Ok(users.contains_key(username))
    }

    async fn count(&self) -> Result<u64> {
        let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        Ok(users.len() as u64)
    }

    async fn close(&self) {}

    fn backend_name(&self) -> &'static str {
        "In-Memory"
    }
}
