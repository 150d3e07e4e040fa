//! Credential store: registration and authentication over a user storage backend

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::SettingsManager;
use crate::storage::{MemoryUserStorage, SqliteUserStorage, UserStorage};
use crate::user::UserRecord;

/// Result of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new record was persisted
    Created,
    /// The username is already taken; nothing was changed
    DuplicateUsername,
}

impl RegisterOutcome {
    /// `true` if a new record was created
    pub fn is_created(self) -> bool {
        self == Self::Created
    }
}

impl From<RegisterOutcome> for bool {
    fn from(outcome: RegisterOutcome) -> Self {
        outcome.is_created()
    }
}

/// Unique-keyed store of username/password pairs
pub struct CredentialStore {
    /// Storage backend
    storage: Arc<dyn UserStorage>,
    /// Database file, if the backend is file-backed
    location: Option<PathBuf>,
}

impl CredentialStore {
    /// Open the store at the given database file, creating the file and table if needed
    pub async fn open(path: &Path) -> Result<Self> {
        let storage = SqliteUserStorage::open(path).await?;
        let mut store = Self::with_storage(Arc::new(storage)).await?;
        store.location = Some(path.to_path_buf());

        info!("Credential store opened at {:?}", path);
        Ok(store)
    }

    /// Open the store at the location configured in the default settings
    pub async fn open_default() -> Result<Self> {
        let settings = SettingsManager::open_default()?;
        Self::open(&settings.database_path()).await
    }

    /// Open a store that keeps everything in memory
    pub async fn in_memory() -> Result<Self> {
        let storage = SqliteUserStorage::in_memory().await?;
        Self::with_storage(Arc::new(storage)).await
    }

    /// Open a store without any database behind it
    pub async fn ephemeral() -> Result<Self> {
        Self::with_storage(Arc::new(MemoryUserStorage::new())).await
    }

    /// Create a store over an existing backend and make sure its schema exists
    pub async fn with_storage(storage: Arc<dyn UserStorage>) -> Result<Self> {
        storage.init_schema().await?;
        debug!("Schema initialized for {} backend", storage.backend_name());

        Ok(Self {
            storage,
            location: None,
        })
    }

    /// Register a new user.
    ///
    /// Username and password are taken as-is: no trimming, and empty strings
    /// are ordinary values. A taken username yields
    /// [`RegisterOutcome::DuplicateUsername`] and leaves every record untouched.
    pub async fn register(&self, username: &str, password: &str) -> Result<RegisterOutcome> {
        let record = UserRecord::new(username, password);

        if self.storage.insert_user(&record).await? {
            info!("Registered user: {}", username);
            Ok(RegisterOutcome::Created)
        } else {
            info!("Registration rejected, username already exists: {}", username);
            Ok(RegisterOutcome::DuplicateUsername)
        }
    }

    /// Check a username/password pair against the stored records.
    ///
    /// Both values must match exactly (case-sensitive, byte for byte).
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let matched = self.storage.credentials_match(username, password).await?;

        if matched {
            info!("Authenticated user: {}", username);
        } else {
            debug!("Authentication failed for user: {}", username);
        }

        Ok(matched)
    }

    /// Check if a username is registered
    pub async fn is_registered(&self, username: &str) -> Result<bool> {
        self.storage.contains(username).await
    }

    /// Number of registered users
    pub async fn user_count(&self) -> Result<u64> {
        self.storage.count().await
    }

    /// Database file, if the store is file-backed
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Name of the storage backend in use
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    /// Close the store and release the database handle
    pub async fn close(self) {
        self.storage.close().await;
        debug!("Credential store closed");
    }
}
