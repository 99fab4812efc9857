//! Serializes scans of the same content cache.
//!
//! Two join requests that check at the same time would otherwise walk the same
//! tree twice in parallel. Scans of different roots still run concurrently.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::scan::{content_cache_dir, scan_cache_dir};
use super::types::InventorySnapshot;
use crate::error::LaunchError;

#[derive(Debug, Default)]
pub struct ScanGate {
    locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan on the blocking pool, one scan per cache directory at a time.
    pub async fn scan(
        &self,
        content_client_root: &Path,
        app_id: u32,
    ) -> Result<InventorySnapshot, LaunchError> {
        let cache_dir = content_cache_dir(content_client_root, app_id);
        let lock = self.lock_for(&cache_dir);
        let _guard = lock.lock().await;

        let dir = cache_dir.clone();
        tokio::task::spawn_blocking(move || scan_cache_dir(&dir))
            .await
            .map_err(|e| LaunchError::Scan {
                path: cache_dir,
                source: std::io::Error::other(e),
            })?
    }

    fn lock_for(&self, cache_dir: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(cache_dir.to_path_buf())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
