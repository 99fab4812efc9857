use serde::Serialize;
use std::path::PathBuf;

use crate::mods::RequiredPackage;

/// Separator between content paths inside the `-mod=` argument.
pub const MOD_PATH_DELIMITER: &str = ";";

/// What a join request needs before the game can start.
///
/// Only `build_plan` constructs this, so `can_launch` always agrees with
/// `missing` and `ordered_paths` is present exactly when nothing is missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPlan {
    pub(super) missing: Vec<RequiredPackage>,
    pub(super) ordered_paths: Option<Vec<PathBuf>>,
    pub(super) can_launch: bool,
}

impl LaunchPlan {
    /// Required packages not found locally, in request order.
    pub fn missing(&self) -> &[RequiredPackage] {
        &self.missing
    }

    pub fn missing_ids(&self) -> Vec<String> {
        self.missing.iter().map(|m| m.id.clone()).collect()
    }

    /// Content paths in request order; `None` while anything is missing.
    pub fn ordered_paths(&self) -> Option<&[PathBuf]> {
        self.ordered_paths.as_deref()
    }

    pub fn can_launch(&self) -> bool {
        self.can_launch
    }
}

/// How the game process is started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Run the game executable itself (Windows hosts)
    Direct { executable: PathBuf },
    /// Ask the client to start the app (`steam -applaunch <appid> ...`)
    ViaClient { client: String, app_id: u32 },
}

/// A successfully spawned launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReceipt {
    pub server_address: String,
    pub command_line: String,
}
