//! Application settings management
//!
//! Stores non-sensitive configuration in a plain JSON file next to the
//! user database.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Database file name used when no override is configured
pub const DEFAULT_DATABASE_FILE: &str = "passkeeper.db";

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Explicit database location (defaults to `<data dir>/passkeeper.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self {
            version: 1,
            database_path: None,
        }
    }

    /// Resolve the database location for the given data directory
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DEFAULT_DATABASE_FILE),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the default per-user data directory
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "passkeeper", "passkeeper")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StoreError::Storage("Could not determine data directory".to_string()))
}

/// Settings manager
pub struct SettingsManager {
    data_dir: PathBuf,
    settings_file: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Create a new settings manager
    pub fn new(data_dir: &Path) -> Self {
        let settings_file = data_dir.join("settings.json");
        let settings = Self::load_from_file(&settings_file).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings file {:?}: {}", settings_file, e);
            Settings::new()
        });

        Self {
            data_dir: data_dir.to_path_buf(),
            settings_file,
            settings,
        }
    }

    /// Create a settings manager for the default data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(&default_data_dir()?))
    }

    /// Load settings from file
    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub async fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.settings)?;

        tokio::fs::create_dir_all(&self.data_dir).await?;

        // Write atomically using temp file
        let temp_path = self.settings_file.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &self.settings_file).await?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Location of the settings file
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    /// Resolved database location
    pub fn database_path(&self) -> PathBuf {
        self.settings.database_path(&self.data_dir)
    }

    /// Set the database location and save
    pub async fn set_database_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        self.settings.database_path = path;
        self.save().await
    }

    /// Reset settings to defaults and delete settings file
    pub async fn reset(&mut self) -> Result<()> {
        self.settings = Settings::new();

        if self.settings_file.exists() {
            tokio::fs::remove_file(&self.settings_file).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(temp_dir.path());

        assert_eq!(manager.get(), &Settings::new());
        assert_eq!(
            manager.database_path(),
            temp_dir.path().join(DEFAULT_DATABASE_FILE)
        );
    }

    #[tokio::test]
    async fn test_settings_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("elsewhere").join("users.db");

        {
            let mut manager = SettingsManager::new(temp_dir.path());
            manager.set_database_path(Some(custom.clone())).await.unwrap();
        }

        {
            let manager = SettingsManager::new(temp_dir.path());
            assert_eq!(manager.get().database_path, Some(custom.clone()));
            assert_eq!(manager.database_path(), custom);
        }
    }

    #[tokio::test]
    async fn test_relative_database_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        manager
            .set_database_path(Some(PathBuf::from("db/users.db")))
            .await
            .unwrap();

        assert_eq!(
            manager.database_path(),
            temp_dir.path().join("db").join("users.db")
        );
        assert_eq!(manager.settings_file(), temp_dir.path().join("settings.json"));
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), "{ not json").unwrap();

        let manager = SettingsManager::new(temp_dir.path());
        assert_eq!(manager.get(), &Settings::new());
    }

    #[tokio::test]
    async fn test_reset() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(temp_dir.path());

        manager
            .set_database_path(Some(PathBuf::from("other.db")))
            .await
            .unwrap();
        assert!(temp_dir.path().join("settings.json").exists());

        manager.reset().await.unwrap();

        assert_eq!(manager.get(), &Settings::new());
        assert!(!temp_dir.path().join("settings.json").exists());
    }
}
