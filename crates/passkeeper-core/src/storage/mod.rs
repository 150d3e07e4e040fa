//! Storage backends for user records
//!
//! This module provides two storage backends:
//! 1. SQLite database file (the persistent default)
//! 2. In-memory map (no persistence)

mod traits;
mod sqlite;
mod memory;

pub use traits::UserStorage;
pub use sqlite::SqliteUserStorage;
pub use memory::MemoryUserStorage;
