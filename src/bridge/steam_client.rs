//! Steam as the content client.
//!
//! Reachability: Steam's pid file names a live process, or the process list
//! has a Steam process. Fetch requests are `steam://` URLs handed to the OS URL
//! opener, which Steam registers for. That opens the item's Workshop page in
//! the Steam client; the download only starts once the user subscribes there,
//! so every accepted request is reported as awaiting confirmation.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{ContentClient, Enqueued};
use crate::error::BridgeError;
use crate::paths::PATH_HOME;
use crate::platform::HostOs;

#[derive(Debug, Clone)]
pub struct SteamClient {
    os: HostOs,
    pid_file: Option<PathBuf>,
}

impl SteamClient {
    pub fn new(os: HostOs) -> Self {
        let pid_file = match os {
            HostOs::Windows => None,
            HostOs::Linux | HostOs::MacOs => Some(PATH_HOME.join(".steam/steam.pid")),
        };
        Self { os, pid_file }
    }

    pub fn system() -> Self {
        Self::new(HostOs::current())
    }
}

pub fn workshop_url(id: &str) -> String {
    format!("steam://url/CommunityFilePage/{id}")
}

fn is_workshop_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl ContentClient for SteamClient {
    async fn check_reachable(&self) -> Result<(), BridgeError> {
        let os = self.os;
        let pid_file = self.pid_file.clone();
        tokio::task::spawn_blocking(move || {
            if let Some(path) = pid_file
                && let Ok(raw) = std::fs::read_to_string(&path)
                && let Ok(pid) = raw.trim().parse::<i32>()
                && pid_alive(pid)
            {
                return Ok(());
            }
            if process_listed(os) {
                return Ok(());
            }
            Err(BridgeError::Unreachable("Steam is not running".to_string()))
        })
        .await
        .map_err(|e| BridgeError::Unreachable(format!("reachability check failed: {e}")))?
    }

    async fn enqueue(&self, id: &str) -> Result<Enqueued, BridgeError> {
        if !is_workshop_id(id) {
            return Err(BridgeError::Rejected(format!("'{id}' is not a Workshop item id")));
        }

        let url = workshop_url(id);
        let os = self.os;
        tokio::task::spawn_blocking(move || {
            let status = url_opener(os, &url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(|e| BridgeError::Unreachable(format!("could not hand {url} to Steam: {e}")))?;
            if status.success() {
                tracing::debug!(url = %url, "Workshop page opened in Steam");
                Ok(Enqueued::AwaitingConfirmation)
            } else {
                Err(BridgeError::Rejected(format!("{url} was refused ({status})")))
            }
        })
        .await
        .map_err(|e| BridgeError::Unreachable(format!("fetch request failed: {e}")))?
    }
}

fn url_opener(os: HostOs, url: &str) -> Command {
    match os {
        HostOs::Linux => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
        HostOs::MacOs => {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        HostOs::Windows => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        }
    }
}

#[cfg(unix)]
fn pid_alive(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    // Signal 0 only performs the permission and existence checks
    let rc = unsafe { libc::kill(pid, 0) };
    rc == 0 || std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn pid_alive(_pid: i32) -> bool {
    false
}

fn process_listed(os: HostOs) -> bool {
    match os {
        HostOs::Windows => Command::new("tasklist")
            .args(["/FI", "IMAGENAME eq steam.exe", "/NH"])
            .output()
            .map(|out| {
                String::from_utf8_lossy(&out.stdout)
                    .to_ascii_lowercase()
                    .contains("steam.exe")
            })
            .unwrap_or(false),
        HostOs::Linux | HostOs::MacOs => {
            let name = if os == HostOs::MacOs { "steam_osx" } else { "steam" };
            Command::new("pgrep")
                .args(["-x", name])
                .stdout(Stdio::null())
                .status()
                .map(|status| status.success())
                .unwrap_or(false)
        }
    }
}
