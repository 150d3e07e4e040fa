//! Front-end flow around the credential store
//!
//! Collects the two form fields, screens out empty input, calls the store and
//! turns the outcome into a message for the user.

use passkeeper_core::{CredentialStore, RegisterOutcome, Result};
use tracing::debug;

/// Username and password as entered, trimmed and known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: String,
}

impl LoginForm {
    /// Trim both fields; `None` if either ends up empty
    pub fn new(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return None;
        }

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Trimmed username
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// What the user is told after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    MissingFields,
    Registered,
    UsernameTaken,
    LoggedIn,
    InvalidCredentials,
}

impl Feedback {
    /// Message shown to the user
    pub fn message(self) -> &'static str {
        match self {
            Feedback::MissingFields => "Please fill in all fields.",
            Feedback::Registered => "User registered successfully.",
            Feedback::UsernameTaken => "Username already exists.",
            Feedback::LoggedIn => "Login successful.",
            Feedback::InvalidCredentials => "Invalid credentials.",
        }
    }

    /// Whether the action went through
    pub fn is_success(self) -> bool {
        matches!(self, Feedback::Registered | Feedback::LoggedIn)
    }
}

/// Register the raw field values
pub async fn register(store: &CredentialStore, username: &str, password: &str) -> Result<Feedback> {
    let Some(form) = LoginForm::new(username, password) else {
        debug!("Registration skipped: empty field");
        return Ok(Feedback::MissingFields);
    };

    let feedback = match store.register(&form.username, &form.password).await? {
        RegisterOutcome::Created => Feedback::Registered,
        RegisterOutcome::DuplicateUsername => Feedback::UsernameTaken,
    };

    Ok(feedback)
}

/// Log in with the raw field values
pub async fn login(store: &CredentialStore, username: &str, password: &str) -> Result<Feedback> {
    let Some(form) = LoginForm::new(username, password) else {
        debug!("Login skipped: empty field");
        return Ok(Feedback::MissingFields);
    };

    if store.authenticate(&form.username, &form.password).await? {
        Ok(Feedback::LoggedIn)
    } else {
        Ok(Feedback::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> CredentialStore {
        CredentialStore::in_memory().await.unwrap()
    }

    #[test]
    fn test_form_trims_fields() {
        let form = LoginForm::new("  bob ", "\thunter2\n").unwrap();
        assert_eq!(form.username(), "bob");
        assert_eq!(form, LoginForm::new("bob", "hunter2").unwrap());
    }

    #[test]
    fn test_form_rejects_blank_fields() {
        assert!(LoginForm::new("", "x").is_none());
        assert!(LoginForm::new("bob", "").is_none());
        assert!(LoginForm::new("   ", "x").is_none());
        assert!(LoginForm::new("bob", " \t ").is_none());
    }

    #[tokio::test]
    async fn test_register_and_login_flow() {
        let store = test_store().await;

        assert_eq!(register(&store, "bob", "hunter2").await.unwrap(), Feedback::Registered);
        assert_eq!(register(&store, "bob", "other").await.unwrap(), Feedback::UsernameTaken);

        assert_eq!(login(&store, "bob", "hunter2").await.unwrap(), Feedback::LoggedIn);
        assert_eq!(
            login(&store, "bob", "other").await.unwrap(),
            Feedback::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_trimmed_values_reach_the_store() {
        let store = test_store().await;

        register(&store, "  bob  ", " hunter2 ").await.unwrap();

        assert!(store.authenticate("bob", "hunter2").await.unwrap());
        assert_eq!(login(&store, "bob", "hunter2 ").await.unwrap(), Feedback::LoggedIn);
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_the_store() {
        let store = test_store().await;

        assert_eq!(register(&store, "", "").await.unwrap(), Feedback::MissingFields);
        assert_eq!(login(&store, "bob", " ").await.unwrap(), Feedback::MissingFields);

        assert_eq!(store.user_count().await.unwrap(), 0);
    }

    #[test]
    fn test_feedback_messages() {
        assert!(Feedback::Registered.is_success());
        assert!(Feedback::LoggedIn.is_success());
        assert!(!Feedback::UsernameTaken.is_success());
        assert!(!Feedback::MissingFields.is_success());
        assert_eq!(Feedback::InvalidCredentials.message(), "Invalid credentials.");
    }
}
