use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of entries kept in `Settings::recent_launches`.
pub const RECENT_LAUNCH_CAP: usize = 20;

/// One entry of the recent-launch history (server address + when).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLaunch {
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted launcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Steam root override; empty means "search"
    pub content_client_path: String,
    /// Game install override; empty means "search"
    pub game_path: String,
    /// Appended verbatim to every launch command
    pub extra_parameters: String,
    pub app_id: u32,
    /// Directory name under `steamapps/common`
    pub game_dir_name: String,
    /// Executable started directly on Windows hosts
    pub game_executable: String,
    /// Format content paths as `Z:\...` when the game runs under a
    /// compatibility layer (non-Windows hosts only)
    pub compat_path_format: bool,
    pub settle_delay_ms: u64,
    pub bridge_timeout_ms: u64,
    /// Newest first, at most `RECENT_LAUNCH_CAP` entries
    pub recent_launches: Vec<RecentLaunch>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            content_client_path: String::new(),
            game_path: String::new(),
            extra_parameters: String::new(),
            app_id: 221100,
            game_dir_name: "DayZ".to_string(),
            game_executable: "DayZ_x64.exe".to_string(),
            compat_path_format: true,
            settle_delay_ms: 3000,
            bridge_timeout_ms: 5000,
            recent_launches: Vec::new(),
        }
    }
}

impl Settings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_millis(self.bridge_timeout_ms)
    }

    /// Record a launch, newest first. An existing entry for the same id is
    /// moved to the front instead of duplicated.
    pub fn push_recent_launch(&mut self, id: &str, timestamp: DateTime<Utc>) {
        self.recent_launches.retain(|entry| entry.id != id);
        self.recent_launches.insert(
            0,
            RecentLaunch {
                id: id.to_string(),
                timestamp,
            },
        );
        self.recent_launches.truncate(RECENT_LAUNCH_CAP);
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.content_client_path {
            self.content_client_path = v;
        }
        if let Some(v) = patch.game_path {
            self.game_path = v;
        }
        if let Some(v) = patch.extra_parameters {
            self.extra_parameters = v;
        }
        if let Some(v) = patch.app_id {
            self.app_id = v;
        }
        if let Some(v) = patch.game_dir_name {
            self.game_dir_name = v;
        }
        if let Some(v) = patch.game_executable {
            self.game_executable = v;
        }
        if let Some(v) = patch.compat_path_format {
            self.compat_path_format = v;
        }
        if let Some(v) = patch.settle_delay_ms {
            self.settle_delay_ms = v;
        }
        if let Some(v) = patch.bridge_timeout_ms {
            self.bridge_timeout_ms = v;
        }
    }
}

/// Partial settings update; `None` leaves a field untouched.
///
/// History is not patchable; it only grows through launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub content_client_path: Option<String>,
    pub game_path: Option<String>,
    pub extra_parameters: Option<String>,
    pub app_id: Option<u32>,
    pub game_dir_name: Option<String>,
    pub game_executable: Option<String>,
    pub compat_path_format: Option<bool>,
    pub settle_delay_ms: Option<u64>,
    pub bridge_timeout_ms: Option<u64>,
}

impl SettingsPatch {
    /// Parse one `key=value` pair as accepted by the CLI.
    ///
    /// Keys are the persisted camelCase names.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.to_string();
        match key {
            "contentClientPath" => self.content_client_path = Some(value),
            "gamePath" => self.game_path = Some(value),
            "extraParameters" => self.extra_parameters = Some(value),
            "appId" => self.app_id = Some(value.parse().map_err(|e| format!("appId: {e}"))?),
            "gameDirName" => self.game_dir_name = Some(value),
            "gameExecutable" => self.game_executable = Some(value),
            "compatPathFormat" => {
                self.compat_path_format =
                    Some(value.parse().map_err(|e| format!("compatPathFormat: {e}"))?)
            }
            "settleDelayMs" => {
                self.settle_delay_ms =
                    Some(value.parse().map_err(|e| format!("settleDelayMs: {e}"))?)
            }
            "bridgeTimeoutMs" => {
                self.bridge_timeout_ms =
                    Some(value.parse().map_err(|e| format!("bridgeTimeoutMs: {e}"))?)
            }
            other => return Err(format!("unknown setting '{other}'")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn partial_file_fills_defaults() {
        let json = r#"{ "gamePath": "/games/dayz", "extraParameters": "-nosplash" }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.game_path, "/games/dayz");
        assert_eq!(s.extra_parameters, "-nosplash");
        assert_eq!(s.app_id, 221100);
        assert!(s.recent_launches.is_empty());
    }

    #[test]
    fn recent_launches_newest_first_and_capped() {
        let mut s = Settings::default();
        for i in 0..(RECENT_LAUNCH_CAP as i64 + 5) {
            s.push_recent_launch(&format!("10.0.0.{i}:2302"), at(i));
        }
        assert_eq!(s.recent_launches.len(), RECENT_LAUNCH_CAP);
        assert_eq!(s.recent_launches[0].id, "10.0.0.24:2302");
    }

    #[test]
    fn relaunch_moves_entry_to_front() {
        let mut s = Settings::default();
        s.push_recent_launch("a:1", at(1));
        s.push_recent_launch("b:1", at(2));
        s.push_recent_launch("a:1", at(3));
        let ids: Vec<_> = s.recent_launches.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a:1", "b:1"]);
        assert_eq!(s.recent_launches[0].timestamp, at(3));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut s = Settings::default();
        let mut patch = SettingsPatch::default();
        patch.set("extraParameters", "-world=empty").unwrap();
        patch.set("settleDelayMs", "10").unwrap();
        s.apply(patch);
        assert_eq!(s.extra_parameters, "-world=empty");
        assert_eq!(s.settle_delay_ms, 10);
        assert_eq!(s.game_dir_name, "DayZ");
    }

    #[test]
    fn patch_rejects_unknown_and_malformed() {
        let mut patch = SettingsPatch::default();
        assert!(patch.set("nope", "1").is_err());
        assert!(patch.set("appId", "dayz").is_err());
    }
}
