//! package.json parser
//!
//! Reads the runtime and development dependency groups into a single
//! name -> constraint map. Entries pointing at workspace, file, or VCS
//! references are not publishable packages and never reach the registry.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

/// Version values with these prefixes denote local or VCS references
const UNPUBLISHED_PREFIXES: [&str; 4] = ["workspace:", "file:", "git:", "github:"];

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PackageJson {
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<String, String>,
}

/// Reads `<dir>/package.json` into a name -> version-constraint map.
///
/// Development dependencies overwrite runtime entries on duplicate names.
/// A missing or malformed file yields an empty map, never an error.
pub fn read(dir: &Path) -> IndexMap<String, String> {
    let path = dir.join("package.json");

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return IndexMap::new(),
    };

    let parsed: PackageJson = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Ignoring malformed {}: {}", path.display(), e);
            return IndexMap::new();
        }
    };

    parsed
        .dependencies
        .into_iter()
        .chain(parsed.dev_dependencies)
        .filter(|(_, version)| {
            !UNPUBLISHED_PREFIXES
                .iter()
                .any(|prefix| version.starts_with(prefix))
        })
        .collect()
}
