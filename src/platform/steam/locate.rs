//! Steam path resolution through steamlocate.
//!
//! steamlocate knows about the registry on Windows and about secondary
//! library folders (libraryfolders.vdf), which the fixed candidate list does not.

use std::path::{Path, PathBuf};

/// Steam root as reported by steamlocate.
pub fn locate_client_root() -> Option<PathBuf> {
    match steamlocate::SteamDir::locate() {
        Ok(steam_dir) => Some(steam_dir.path().to_path_buf()),
        Err(e) => {
            tracing::debug!(error = %e, "steamlocate could not find Steam");
            None
        }
    }
}

/// Install directory of `app_id` in any library known to the Steam root.
pub fn locate_game_root(client_root: &Path, app_id: u32) -> Option<PathBuf> {
    let steam_dir = steamlocate::SteamDir::from_dir(client_root).ok()?;

    if let Some((app, library)) = steam_dir.find_app(app_id).ok().flatten() {
        let path = library.resolve_app_dir(&app);
        if path.is_dir() {
            return Some(path);
        }
    }

    tracing::debug!(app_id, "Steam app not found in any library");
    None
}
