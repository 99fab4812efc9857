use crate::config::types::Settings;
use crate::error::SettingsError;
use crate::paths::settings_file;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_cfg() -> Settings {
    load_cfg_from(&settings_file())
}

/// Load settings from `path`.
///
/// A missing file yields defaults; a corrupt one yields defaults and a warning
/// (the next save overwrites it).
pub fn load_cfg_from(path: &Path) -> Settings {
    let Ok(file) = File::open(path) else {
        return Settings::default();
    };

    match serde_json::from_reader::<_, Settings>(BufReader::new(file)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Settings::default()
        }
    }
}

pub fn save_cfg(config: &Settings) -> Result<(), SettingsError> {
    save_cfg_to(&settings_file(), config)
}

pub fn save_cfg_to(path: &Path, config: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_cfg_from(&dir.path().join("settings.json")), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_cfg_from(&path), Settings::default());
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/settings.json");
        let settings = Settings {
            game_path: "/srv/dayz".to_string(),
            ..Settings::default()
        };
        save_cfg_to(&path, &settings).unwrap();
        assert_eq!(load_cfg_from(&path), settings);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"gamePath\""));
    }
}
