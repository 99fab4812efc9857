//! Single owner of the persisted settings record.
//!
//! Every component that needs settings receives an `Arc<SettingsStore>` and
//! either reads a snapshot or goes through `update`. Writers are serialized by
//! the lock and each one persists the whole record, so the last write wins.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::operations::{load_cfg_from, save_cfg_to};
use super::types::{Settings, SettingsPatch};
use crate::error::SettingsError;

#[derive(Debug)]
pub struct SettingsStore {
    /// `None` keeps settings in memory only
    path: Option<PathBuf>,
    current: RwLock<Settings>,
}

impl SettingsStore {
    /// Load once from `path`; later writes go back to the same file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_cfg_from(&path);
        Self {
            path: Some(path),
            current: RwLock::new(current),
        }
    }

    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            current: RwLock::new(settings),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Clone of the current settings.
    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    /// Mutate and persist. Returns the settings as written.
    pub fn update<F>(&self, f: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.write();
        f(&mut guard);
        if let Some(path) = &self.path {
            save_cfg_to(path, &guard)?;
        }
        Ok(guard.clone())
    }

    pub fn apply(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        self.update(|s| s.apply(patch))
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn update_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::open(&path);

        store
            .update(|s| s.content_client_path = "/opt/steam".to_string())
            .unwrap();

        let reopened = SettingsStore::open(&path);
        assert_eq!(reopened.snapshot().content_client_path, "/opt/steam");
    }

    #[test]
    fn in_memory_store_never_touches_disk() {
        let store = SettingsStore::in_memory(Settings::default());
        let written = store
            .apply(SettingsPatch {
                game_path: Some("/g".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(written.game_path, "/g");
        assert!(store.path().is_none());
    }
}
