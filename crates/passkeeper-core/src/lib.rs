//! # passkeeper-core
//!
//! Local credential store for PassKeeper including:
//! - User registration with unique usernames
//! - Exact-match authentication of username/password pairs
//! - SQLite persistence with create-on-first-use schema
//! - JSON settings for the database location

pub mod storage;
pub mod user;
pub mod error;
pub mod settings;
mod store;

pub use error::{StoreError, Result};
pub use store::{CredentialStore, RegisterOutcome};
pub use storage::{UserStorage, SqliteUserStorage, MemoryUserStorage};
pub use user::{Password, UserRecord};
pub use settings::{Settings, SettingsManager, DEFAULT_DATABASE_FILE};
