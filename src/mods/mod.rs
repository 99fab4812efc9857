//! Mod inventory
//!
//! Finds the Workshop packages Steam has already downloaded for the game and
//! describes them as an immutable `InventorySnapshot`. Snapshots are produced
//! fresh per scan and never cached across join requests.

mod gate;
mod metadata;
mod scan;
mod types;

pub use gate::ScanGate;
pub use metadata::{METADATA_FILES, fallback_display_name, parse_display_name};
pub use scan::{content_cache_dir, package_size, scan, scan_cache_dir};
pub use types::{InventorySnapshot, PackageDescriptor, RequiredPackage};
