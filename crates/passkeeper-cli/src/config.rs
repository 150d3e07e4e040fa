//! `passkeeper config` actions over the settings file

use passkeeper_core::{Result, SettingsManager};
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of where settings and users live
pub fn describe(manager: &SettingsManager) -> String {
    let origin = if manager.get().database_path.is_some() {
        "configured"
    } else {
        "default"
    };

    format!(
        "Settings: {}\nDatabase: {} ({})",
        manager.settings_file().display(),
        manager.database_path().display(),
        origin
    )
}

/// Point the settings at a database file, or back at the default with `None`.
///
/// A relative `path` is taken relative to `cwd`, the way the user typed it.
pub async fn set_database(
    manager: &mut SettingsManager,
    path: Option<PathBuf>,
    cwd: &Path,
) -> Result<PathBuf> {
    let path = path.map(|p| if p.is_absolute() { p } else { cwd.join(p) });
    manager.set_database_path(path).await?;

    let resolved = manager.database_path();
    info!("Database location set to {:?}", resolved);
    Ok(resolved)
}

/// Drop the settings file and return to defaults
pub async fn reset(manager: &mut SettingsManager) -> Result<PathBuf> {
    manager.reset().await?;
    info!("Settings reset");
    Ok(manager.database_path())
}
