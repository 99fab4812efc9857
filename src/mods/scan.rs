//! Workshop content-cache scanning
//!
//! Layout: `<steam>/steamapps/workshop/content/<appid>/<package id>/...`
//!
//! Only the package level is enumerated; below that the walk only sums file
//! sizes. Anything that cannot be read below the cache directory itself is
//! logged and skipped.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::metadata::read_display_name;
use super::types::{InventorySnapshot, PackageDescriptor};
use crate::error::LaunchError;

pub fn content_cache_dir(content_client_root: &Path, app_id: u32) -> PathBuf {
    content_client_root
        .join("steamapps")
        .join("workshop")
        .join("content")
        .join(app_id.to_string())
}

/// Scan the content cache of `app_id` under a Steam root.
pub fn scan(content_client_root: &Path, app_id: u32) -> Result<InventorySnapshot, LaunchError> {
    scan_cache_dir(&content_cache_dir(content_client_root, app_id))
}

/// Scan one content-cache directory. Blocking; walks every package tree.
///
/// A cache directory that does not exist yet (nothing downloaded) is an empty
/// snapshot. Only failing to list an existing cache directory is an error.
pub fn scan_cache_dir(cache_dir: &Path) -> Result<InventorySnapshot, LaunchError> {
    let mut snapshot = InventorySnapshot::new();

    if !cache_dir.exists() {
        tracing::debug!(path = %cache_dir.display(), "no workshop content directory");
        return Ok(snapshot);
    }

    let entries = std::fs::read_dir(cache_dir).map_err(|source| LaunchError::Scan {
        path: cache_dir.to_path_buf(),
        source,
    })?;

    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable cache entry");
                continue;
            }
        };
        let path = entry.path();

        // fs::metadata follows symlinked package directories
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping package directory");
                continue;
            }
        }

        let Some(id) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %path.display(), "skipping package with non UTF-8 name");
            continue;
        };

        let display_name = read_display_name(&path, &id);
        let size_bytes = package_size(&path);
        let path = std::path::absolute(&path).unwrap_or(path);

        snapshot.insert(PackageDescriptor {
            id,
            display_name,
            path,
            size_bytes,
        });
    }

    tracing::debug!(
        path = %cache_dir.display(),
        packages = snapshot.len(),
        bytes = snapshot.total_size(),
        "scan finished"
    );
    Ok(snapshot)
}

/// Sum of regular file sizes below `dir`; unreadable entries count as zero.
pub fn package_size(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "size walk skipped an entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}
