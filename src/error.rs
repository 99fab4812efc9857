//! Error taxonomy for the launch core.
//!
//! Per-item problems (one unreadable package) never surface here; they are
//! logged and skipped by the scanner. Everything in this module is per-call
//! and moves an orchestrator into its `Error` state.

use std::path::PathBuf;
use std::time::Duration;

use crate::orchestrator::StateKind;

/// Which install could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallKind {
    ContentClient,
    Game,
}

impl std::fmt::Display for InstallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallKind::ContentClient => f.write_str("Steam installation"),
            InstallKind::Game => f.write_str("game installation"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("{what} not found; set its path in settings")]
    PathNotFound { what: InstallKind },

    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Steam is not reachable: {0}. Start Steam and try again")]
    ContentClientUnreachable(String),

    #[error("Steam refused the download request: {0}")]
    SubscriptionRejected(String),

    #[error("failed to start the game ({command}): {source}")]
    LaunchSpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot {command} while {from}")]
    InvalidTransition { from: StateKind, command: &'static str },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings format: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{0}")]
    Unreachable(String),

    #[error("{0}")]
    Rejected(String),

    #[error("no answer from Steam within {0:?}")]
    Timeout(Duration),
}

impl From<BridgeError> for LaunchError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unreachable(cause) => LaunchError::ContentClientUnreachable(cause),
            BridgeError::Timeout(_) => LaunchError::ContentClientUnreachable(err.to_string()),
            BridgeError::Rejected(cause) => LaunchError::SubscriptionRejected(cause),
        }
    }
}
