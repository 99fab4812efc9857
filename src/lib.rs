//! Join a modded DayZ server: find Steam and the game, check the Workshop
//! content a server needs, ask Steam for what is missing and start the game
//! with the right `-mod=` list.

pub mod bridge;
pub mod config;
pub mod error;
pub mod launch;
pub mod logging;
pub mod mods;
pub mod orchestrator;
pub mod paths;
pub mod platform;

pub use error::{BridgeError, InstallKind, LaunchError, SettingsError};
pub use orchestrator::{JoinOutcome, JoinRequest, LaunchOrchestrator, LaunchService, StateKind};
