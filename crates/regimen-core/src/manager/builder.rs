//! Builder for creating and configuring Manager instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::Manager;
use crate::{
    cache::{CalendarCache, MemoryCache},
    db::Database,
    error::{ManagerError, Result},
};

/// Builder for creating and configuring Manager instances.
#[derive(Clone)]
pub struct ManagerBuilder {
    database_path: Option<PathBuf>,
    cache: Option<Arc<dyn CalendarCache>>,
}

impl ManagerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            cache: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/regimen/regimen.db` or
    /// `~/.local/share/regimen/regimen.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the calendar cache. Defaults to a fresh [`MemoryCache`].
    pub fn with_cache(mut self, cache: Arc<dyn CalendarCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the configured manager instance, creating the database file
    /// and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `ManagerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Manager> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ManagerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ManagerError>(())
        })
        .await
        .map_err(|e| ManagerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!("using database {}", db_path.display());

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryCache::new()) as Arc<dyn CalendarCache>);

        Ok(Manager::new(db_path, cache))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("regimen")
            .place_data_file("regimen.db")
            .map_err(|e| ManagerError::XdgDirectory(e.to_string()))
    }
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
