//! Collaborators shared by every orchestrator of a process.
//!
//! Nothing in here holds per-request state; settings are the only shared
//! mutable resource and they live behind `SettingsStore`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::{SteamClient, SubscriptionBridge};
use crate::config::SettingsStore;
use crate::error::{InstallKind, LaunchError};
use crate::launch::ProcessLauncher;
use crate::mods::ScanGate;
use crate::platform::PathResolver;

pub struct LaunchContext {
    pub settings: Arc<SettingsStore>,
    pub resolver: PathResolver,
    pub scans: ScanGate,
    pub bridge: SubscriptionBridge,
    pub launcher: ProcessLauncher,
}

impl LaunchContext {
    /// Real Steam, real shell, real filesystem search.
    pub fn system(settings: Arc<SettingsStore>) -> Self {
        Self {
            resolver: PathResolver::new(settings.clone()),
            scans: ScanGate::new(),
            bridge: SubscriptionBridge::new(Arc::new(SteamClient::system())),
            launcher: ProcessLauncher::system(),
            settings,
        }
    }

    /// Current bound on one bridge call.
    pub fn bridge_timeout(&self) -> Duration {
        self.settings.snapshot().bridge_timeout()
    }

    /// Steam root, resolved on the blocking pool.
    pub async fn content_client_root(self: &Arc<Self>) -> Result<PathBuf, LaunchError> {
        let ctx = Arc::clone(self);
        tokio::task::spawn_blocking(move || ctx.require_client_root()).await?
    }

    /// Steam root and game root, resolved on the blocking pool.
    pub async fn resolve_roots(self: &Arc<Self>) -> Result<(PathBuf, PathBuf), LaunchError> {
        let ctx = Arc::clone(self);
        tokio::task::spawn_blocking(move || -> Result<(PathBuf, PathBuf), LaunchError> {
            let client_root = ctx.require_client_root()?;
            let game_root = ctx
                .resolver
                .resolve_game_root(&client_root)
                .ok_or(LaunchError::PathNotFound {
                    what: InstallKind::Game,
                })?;
            Ok((client_root, game_root))
        })
        .await?
    }

    fn require_client_root(&self) -> Result<PathBuf, LaunchError> {
        self.resolver
            .resolve_content_client_root()
            .ok_or(LaunchError::PathNotFound {
                what: InstallKind::ContentClient,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::FakeClient;
    use crate::config::Settings;
    use crate::launch::testing::RecordingSpawner;
    use crate::platform::HostOs;
    use tempfile::TempDir;

    fn context(steam: &TempDir) -> Arc<LaunchContext> {
        let settings = Arc::new(SettingsStore::in_memory(Settings::default()));
        Arc::new(LaunchContext {
            resolver: PathResolver::with_candidates(settings.clone(), vec![steam.path().to_path_buf()]),
            scans: ScanGate::new(),
            bridge: SubscriptionBridge::new(Arc::new(FakeClient::default())),
            launcher: ProcessLauncher::new(Arc::new(RecordingSpawner::default()), HostOs::Linux),
            settings,
        })
    }

    #[tokio::test(flavor = "current_thread")]
    async fn roots_resolve_and_persist_from_blocking_pool() {
        let steam = TempDir::new().unwrap();
        let game = steam.path().join("steamapps/common/DayZ");
        std::fs::create_dir_all(&game).unwrap();
        let ctx = context(&steam);

        let (client_root, game_root) = ctx.resolve_roots().await.unwrap();
        assert_eq!(client_root, steam.path());
        assert_eq!(game_root, game);

        let saved = ctx.settings.snapshot();
        assert_eq!(saved.content_client_path, steam.path().to_string_lossy());
        assert_eq!(saved.game_path, game.to_string_lossy());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_game_is_reported_by_kind() {
        let steam = TempDir::new().unwrap();
        let ctx = context(&steam);

        assert_eq!(ctx.content_client_root().await.unwrap(), steam.path());
        assert!(matches!(
            ctx.resolve_roots().await,
            Err(LaunchError::PathNotFound { what: InstallKind::Game })
        ));
    }

    #[test]
    fn bridge_timeout_follows_saved_settings() {
        let steam = TempDir::new().unwrap();
        let ctx = context(&steam);
        assert_eq!(ctx.bridge_timeout(), Duration::from_millis(5000));

        ctx.settings.update(|s| s.bridge_timeout_ms = 750).unwrap();
        assert_eq!(ctx.bridge_timeout(), Duration::from_millis(750));
    }
}
