// Launch plan building (pure, no I/O)

use std::collections::HashSet;

use crate::launch::types::LaunchPlan;
use crate::mods::{InventorySnapshot, RequiredPackage};

/// Match `required` against a snapshot by exact, case-sensitive id.
///
/// Repeated ids in `required` count once, at their first position.
pub fn build_plan(snapshot: &InventorySnapshot, required: &[RequiredPackage]) -> LaunchPlan {
    let mut seen = HashSet::new();
    let unique: Vec<&RequiredPackage> = required
        .iter()
        .filter(|r| seen.insert(r.id.as_str()))
        .collect();

    let missing: Vec<RequiredPackage> = unique
        .iter()
        .filter(|r| !snapshot.contains(&r.id))
        .map(|r| (*r).clone())
        .collect();

    if !missing.is_empty() {
        return LaunchPlan {
            missing,
            ordered_paths: None,
            can_launch: false,
        };
    }

    let ordered_paths = unique
        .iter()
        .filter_map(|r| snapshot.get(&r.id))
        .map(|p| p.path.clone())
        .collect();

    LaunchPlan {
        missing,
        ordered_paths: Some(ordered_paths),
        can_launch: true,
    }
}
