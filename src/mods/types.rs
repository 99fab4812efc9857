//! Package data model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A package found on disk by one scan. Never mutated after the scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    /// Workshop item id (the directory name)
    pub id: String,
    pub display_name: String,
    /// Absolute path of the package directory
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A package a server requires. Matching is by `id` only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPackage {
    pub id: String,
    /// Advisory, shown to the user
    #[serde(default, alias = "name")]
    pub display_name: String,
}

impl RequiredPackage {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Parse the CLI form `id` or `id=Display Name`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((id, name)) => Self::new(id.trim(), name.trim()),
            None => Self::new(raw.trim(), ""),
        }
    }
}

/// Result of one scan, keyed and ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    packages: BTreeMap<String, PackageDescriptor>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from descriptors; on a duplicate id the first one is kept.
    pub fn from_packages(packages: impl IntoIterator<Item = PackageDescriptor>) -> Self {
        let mut snapshot = Self::new();
        for package in packages {
            snapshot.insert(package);
        }
        snapshot
    }

    /// Insert unless the id is already present. Returns whether it was added.
    pub fn insert(&mut self, package: PackageDescriptor) -> bool {
        if let Some(existing) = self.packages.get(&package.id) {
            tracing::warn!(
                id = %package.id,
                kept = %existing.path.display(),
                skipped = %package.path.display(),
                "duplicate package id in scan"
            );
            return false;
        }
        self.packages.insert(package.id.clone(), package);
        true
    }

    pub fn get(&self, id: &str) -> Option<&PackageDescriptor> {
        self.packages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.packages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in id order
    pub fn iter(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.packages.values()
    }

    pub fn total_size(&self) -> u64 {
        self.iter().map(|p| p.size_bytes).sum()
    }

    pub fn into_vec(self) -> Vec<PackageDescriptor> {
        self.packages.into_values().collect()
    }
}
