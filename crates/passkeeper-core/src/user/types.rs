//! User record type definitions

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Password as supplied by the caller - automatically zeroed when dropped
///
/// The value is kept verbatim. Comparison is exact, byte for byte.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password {
    value: String,
}

impl Password {
    /// Wrap a password value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the password value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Check a candidate against this password
    pub fn matches(&self, candidate: &str) -> bool {
        self.value.as_bytes() == candidate.as_bytes()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.expose())
    }
}

impl Eq for Password {}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique key, compared exactly as stored
    pub username: String,

    /// Stored as given (no hashing)
    pub password: Password,
}

impl UserRecord {
    /// Create a new user record
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: Password::new(password),
        }
    }
}
