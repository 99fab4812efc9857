//! Game execution pipeline

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::LaunchError;
use crate::launch::operations::{ProcessSpawner, ShellSpawner};
use crate::launch::pure::{build_command_line, validate_target};
use crate::launch::types::{LaunchReceipt, LaunchTarget};
use crate::platform::HostOs;

const MACOS_STEAM: &str = "/Applications/Steam.app/Contents/MacOS/steam_osx";

/// Builds the launch command and starts it detached.
#[derive(Clone)]
pub struct ProcessLauncher {
    spawner: Arc<dyn ProcessSpawner>,
    os: HostOs,
}

impl ProcessLauncher {
    pub fn new(spawner: Arc<dyn ProcessSpawner>, os: HostOs) -> Self {
        Self { spawner, os }
    }

    /// Launcher for the running host using the system shell.
    pub fn system() -> Self {
        Self::new(Arc::new(ShellSpawner), HostOs::current())
    }

    pub fn os(&self) -> HostOs {
        self.os
    }

    /// Direct executable on Windows; everywhere else the client starts the game.
    pub fn target_for(&self, settings: &Settings, game_root: &Path) -> LaunchTarget {
        match self.os {
            HostOs::Windows => LaunchTarget::Direct {
                executable: game_root.join(&settings.game_executable),
            },
            HostOs::Linux => LaunchTarget::ViaClient {
                client: "steam".to_string(),
                app_id: settings.app_id,
            },
            HostOs::MacOs => LaunchTarget::ViaClient {
                client: MACOS_STEAM.to_string(),
                app_id: settings.app_id,
            },
        }
    }

    /// Start the game connected to `server_address` with `ordered_paths`
    /// loaded in that order. Returns once the spawn itself succeeded.
    pub fn launch(
        &self,
        target: &LaunchTarget,
        ordered_paths: &[PathBuf],
        server_address: &str,
        extra_parameters: &str,
        compat_path_format: bool,
    ) -> Result<LaunchReceipt, LaunchError> {
        let compat = compat_path_format
            && !self.os.is_windows()
            && matches!(target, LaunchTarget::ViaClient { .. });
        let command_line = build_command_line(
            target,
            ordered_paths,
            server_address,
            extra_parameters,
            self.os,
            compat,
        );

        validate_target(target).map_err(|source| LaunchError::LaunchSpawnFailed {
            command: command_line.clone(),
            source,
        })?;

        tracing::info!(server = server_address, mods = ordered_paths.len(), "launching game");
        tracing::debug!(command = %command_line, "launch command");

        self.spawner
            .spawn(&command_line)
            .map_err(|source| LaunchError::LaunchSpawnFailed {
                command: command_line.clone(),
                source,
            })?;

        Ok(LaunchReceipt {
            server_address: server_address.to_string(),
            command_line,
        })
    }
}

impl std::fmt::Debug for ProcessLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessLauncher").field("os", &self.os).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::testing::RecordingSpawner;

    #[test]
    fn linux_launch_goes_through_steam() {
        let rec = Arc::new(RecordingSpawner::default());
        let launcher = ProcessLauncher::new(rec.clone(), HostOs::Linux);
        let settings = Settings::default();
        let target = launcher.target_for(&settings, Path::new("/games/DayZ"));

        let receipt = launcher
            .launch(&target, &[PathBuf::from("/w/1")], "1.2.3.4:2302", "-nosplash", true)
            .unwrap();

        assert_eq!(
            receipt.command_line,
            r"steam -applaunch 221100 '-mod=Z:\w\1' -connect=1.2.3.4 -port=2302 -nosplash"
        );
        assert_eq!(rec.spawned(), vec![receipt.command_line.clone()]);
    }

    #[test]
    fn spawn_failure_is_reported() {
        let rec = Arc::new(RecordingSpawner {
            fail: true,
            ..Default::default()
        });
        let launcher = ProcessLauncher::new(rec, HostOs::Linux);
        let target = launcher.target_for(&Settings::default(), Path::new("/g"));
        let err = launcher.launch(&target, &[], "h", "", true).unwrap_err();
        assert!(matches!(err, LaunchError::LaunchSpawnFailed { .. }));
    }

    #[test]
    fn missing_windows_executable_never_spawns() {
        let rec = Arc::new(RecordingSpawner::default());
        let launcher = ProcessLauncher::new(rec.clone(), HostOs::Windows);
        let target = launcher.target_for(&Settings::default(), Path::new("/no/such/game"));

        let err = launcher.launch(&target, &[], "h", "", true).unwrap_err();
        assert!(matches!(err, LaunchError::LaunchSpawnFailed { .. }));
        assert!(rec.spawned().is_empty());
    }

    #[test]
    fn windows_target_is_the_game_executable() {
        let launcher = ProcessLauncher::new(Arc::new(RecordingSpawner::default()), HostOs::Windows);
        let target = launcher.target_for(&Settings::default(), Path::new("C:/Games/DayZ"));
        assert_eq!(
            target,
            LaunchTarget::Direct {
                executable: Path::new("C:/Games/DayZ").join("DayZ_x64.exe")
            }
        );
    }
}
