//! Platform path resolution - WHERE Steam and the game live
//!
//! Resolution order for both roots:
//! 1. the persisted override from settings, if it still exists on disk
//! 2. a fixed, OS-specific list of candidate directories
//! 3. steamlocate (registry / libraryfolders.vdf aware)
//!
//! A successful search is written back as the new override so later calls
//! skip it. Absence is a normal outcome and is reported as `None`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::SettingsStore;
use crate::paths::PATH_HOME;

mod candidates;
mod steam;

pub use candidates::{HostOs, client_root_candidates, game_root_candidates};

pub struct PathResolver {
    settings: Arc<SettingsStore>,
    client_candidates: Vec<PathBuf>,
    system_locate: bool,
}

impl PathResolver {
    /// Resolver for the running host, with steamlocate as last resort.
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        let client_candidates =
            client_root_candidates(HostOs::current(), &PATH_HOME, |key| std::env::var_os(key));
        Self {
            settings,
            client_candidates,
            system_locate: true,
        }
    }

    /// Resolver restricted to the given candidates (no system lookup).
    pub fn with_candidates(settings: Arc<SettingsStore>, client_candidates: Vec<PathBuf>) -> Self {
        Self {
            settings,
            client_candidates,
            system_locate: false,
        }
    }

    pub fn resolve_content_client_root(&self) -> Option<PathBuf> {
        let settings = self.settings.snapshot();
        if let Some(path) = valid_override(&settings.content_client_path) {
            return Some(path);
        }

        let found = first_existing(&self.client_candidates).or_else(|| {
            if self.system_locate {
                steam::locate_client_root()
            } else {
                None
            }
        })?;

        tracing::info!(path = %found.display(), "located Steam");
        self.persist(|s| s.content_client_path = found.to_string_lossy().into_owned());
        Some(found)
    }

    pub fn resolve_game_root(&self, content_client_root: &Path) -> Option<PathBuf> {
        let settings = self.settings.snapshot();
        if let Some(path) = valid_override(&settings.game_path) {
            return Some(path);
        }

        let candidates = game_root_candidates(content_client_root, &settings.game_dir_name);
        let found = first_existing(&candidates).or_else(|| {
            if self.system_locate {
                steam::locate_game_root(content_client_root, settings.app_id)
            } else {
                None
            }
        })?;

        tracing::info!(path = %found.display(), "located game");
        self.persist(|s| s.game_path = found.to_string_lossy().into_owned());
        Some(found)
    }

    fn persist(&self, f: impl FnOnce(&mut crate::config::Settings)) {
        if let Err(e) = self.settings.update(f) {
            tracing::warn!(error = %e, "could not persist discovered path");
        }
    }
}

fn valid_override(raw: &str) -> Option<PathBuf> {
    if raw.trim().is_empty() {
        return None;
    }
    let path = PathBuf::from(raw);
    if path.is_dir() {
        Some(path)
    } else {
        tracing::debug!(path = raw, "ignoring stale path override");
        None
    }
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_dir()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    fn store_with(settings: Settings) -> Arc<SettingsStore> {
        Arc::new(SettingsStore::in_memory(settings))
    }

    #[test]
    fn override_wins_over_candidates() {
        let dir = TempDir::new().unwrap();
        let over = dir.path().join("override");
        let cand = dir.path().join("candidate");
        std::fs::create_dir_all(&over).unwrap();
        std::fs::create_dir_all(&cand).unwrap();

        let store = store_with(Settings {
            content_client_path: over.to_string_lossy().into_owned(),
            ..Settings::default()
        });
        let resolver = PathResolver::with_candidates(store, vec![cand]);
        assert_eq!(resolver.resolve_content_client_root(), Some(over));
    }

    #[test]
    fn stale_override_falls_back_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let second = dir.path().join("second");
        std::fs::create_dir_all(&second).unwrap();

        let store = store_with(Settings {
            content_client_path: missing.to_string_lossy().into_owned(),
            ..Settings::default()
        });
        let resolver = PathResolver::with_candidates(
            store.clone(),
            vec![dir.path().join("first"), second.clone()],
        );

        assert_eq!(resolver.resolve_content_client_root(), Some(second.clone()));
        assert_eq!(
            store.snapshot().content_client_path,
            second.to_string_lossy()
        );
    }

    #[test]
    fn nothing_found_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_with(Settings::default());
        let resolver = PathResolver::with_candidates(store.clone(), vec![dir.path().join("x")]);
        assert_eq!(resolver.resolve_content_client_root(), None);
        assert!(store.snapshot().content_client_path.is_empty());
    }

    #[test]
    fn game_root_under_steamapps_common() {
        let dir = TempDir::new().unwrap();
        let game = dir.path().join("steamapps/common/DayZ");
        std::fs::create_dir_all(&game).unwrap();

        let store = store_with(Settings::default());
        let resolver = PathResolver::with_candidates(store.clone(), vec![]);
        assert_eq!(resolver.resolve_game_root(dir.path()), Some(game.clone()));
        assert_eq!(store.snapshot().game_path, game.to_string_lossy());
    }

    #[test]
    fn game_root_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let resolver = PathResolver::with_candidates(store_with(Settings::default()), vec![]);
        assert_eq!(resolver.resolve_game_root(dir.path()), None);
    }
}
