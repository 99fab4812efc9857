pub mod operations;
pub mod store;
pub mod types;

// Re-export types
pub use types::{RecentLaunch, Settings, SettingsPatch, RECENT_LAUNCH_CAP};

// Re-export operations
pub use operations::{load_cfg, load_cfg_from, save_cfg, save_cfg_to};
pub use store::SettingsStore;
