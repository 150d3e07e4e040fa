//! Storage trait definitions

use crate::error::Result;
use crate::user::UserRecord;
use async_trait::async_trait;

/// Trait for user storage backends
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Create the users table if it does not exist yet
    async fn init_schema(&self) -> Result<()>;

    /// Insert a record unless its username is already taken.
    ///
    /// Returns `false` when the username exists; the stored record is left untouched.
    async fn insert_user(&self, record: &UserRecord) -> Result<bool>;

    /// Check for a record with exactly this username and password
    async fn credentials_match(&self, username: &str, password: &str) -> Result<bool>;

    /// Check if a username is registered
    async fn contains(&self, username: &str) -> Result<bool>;

    /// Number of registered users
    async fn count(&self) -> Result<u64>;

    /// Release the underlying handle
    async fn close(&self);

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
