// Display-name extraction from package metadata files

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Checked in this order; the first one yielding a name wins.
pub const METADATA_FILES: [&str; 2] = ["meta.cpp", "mod.cpp"];

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mi)^\s*name\s*=\s*"([^"]*)""#).expect("name pattern is a valid regex")
});

/// Pull `name = "..."` out of a metadata file body.
pub fn parse_display_name(contents: &str) -> Option<String> {
    let caps = NAME_PATTERN.captures(contents)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn fallback_display_name(id: &str) -> String {
    format!("Mod {id}")
}

/// Best display name for the package at `dir`.
pub fn read_display_name(dir: &Path, id: &str) -> String {
    for file in METADATA_FILES {
        let path = dir.join(file);
        // Metadata is often Latin-1 or has a BOM; lossy decoding is enough for a name
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        if let Some(name) = parse_display_name(&String::from_utf8_lossy(&bytes)) {
            return name;
        }
        tracing::debug!(path = %path.display(), "metadata file has no name entry");
    }
    fallback_display_name(id)
}
