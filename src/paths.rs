use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
});

pub static PATH_LOCAL_SHARE: LazyLock<PathBuf> = LazyLock::new(|| PATH_HOME.join(".local/share"));

/// Where modlauncher keeps `settings.json`.
pub static PATH_APP: LazyLock<PathBuf> = LazyLock::new(|| {
    if cfg!(windows)
        && let Some(appdata) = env::var_os("APPDATA")
    {
        return PathBuf::from(appdata).join("modlauncher");
    }
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("modlauncher");
    }
    PATH_LOCAL_SHARE.join("modlauncher")
});

pub fn settings_file() -> PathBuf {
    PATH_APP.join("settings.json")
}
