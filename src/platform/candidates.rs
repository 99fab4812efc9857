// Candidate install directories per host OS (pure, no I/O)

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else {
            HostOs::Linux
        }
    }

    pub fn is_windows(self) -> bool {
        self == HostOs::Windows
    }
}

/// Ordered Steam root candidates. Earlier entries win.
pub fn client_root_candidates<F>(os: HostOs, home: &Path, env: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    match os {
        HostOs::Linux => vec![
            home.join(".local/share/Steam"),
            // Follows the ~/.steam/steam symlink on most distros
            home.join(".steam/steam"),
            home.join(".steam/root"),
            // Flatpak Steam
            home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"),
            // Snap Steam
            home.join("snap/steam/common/.local/share/Steam"),
        ],
        HostOs::MacOs => vec![home.join("Library/Application Support/Steam")],
        HostOs::Windows => {
            let mut out = Vec::new();
            for key in ["ProgramFiles(x86)", "ProgramFiles"] {
                if let Some(base) = env(key) {
                    out.push(PathBuf::from(base).join("Steam"));
                }
            }
            out.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
            out.dedup();
            out
        }
    }
}

pub fn game_root_candidates(client_root: &Path, game_dir_name: &str) -> Vec<PathBuf> {
    if game_dir_name.is_empty() {
        return Vec::new();
    }
    vec![client_root.join("steamapps").join("common").join(game_dir_name)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_prefers_local_share() {
        let c = client_root_candidates(HostOs::Linux, Path::new("/home/u"), |_| None);
        assert_eq!(c[0], PathBuf::from("/home/u/.local/share/Steam"));
        assert!(c.contains(&PathBuf::from(
            "/home/u/.var/app/com.valvesoftware.Steam/.local/share/Steam"
        )));
    }

    #[test]
    fn windows_uses_program_files_env() {
        let c = client_root_candidates(HostOs::Windows, Path::new("C:/Users/u"), |key| {
            (key == "ProgramFiles(x86)").then(|| OsString::from("D:/PF86"))
        });
        assert_eq!(c[0], PathBuf::from("D:/PF86").join("Steam"));
        assert_eq!(c.last(), Some(&PathBuf::from(r"C:\Program Files (x86)\Steam")));
    }

    #[test]
    fn empty_game_dir_has_no_candidates() {
        assert!(game_root_candidates(Path::new("/s"), "").is_empty());
    }
}
