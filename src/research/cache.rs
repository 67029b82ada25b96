//! Persistent research cache
//!
//! A single JSON document mapping `"<pkg>:<old>-><new>"` keys to research
//! text. Keyed at major-version-transition granularity: two diffs with the
//! same transition share one entry regardless of exact version strings.
//! Entries never expire.
//!
//! Load and save are both best-effort. A run must never fail because the
//! cache is unavailable, so any I/O or decode failure degrades to an empty
//! cache on load and is swallowed on save.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Builds the cache key for a major-version transition
pub fn cache_key(package: &str, old_major: u64, new_major: u64) -> String {
    format!("{package}:{old_major}->{new_major}")
}

/// Deletes the cache file.
///
/// Returns whether a file was actually removed; a missing file is not an
/// error.
pub fn clear(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Disk-persisted mapping from version transitions to research briefs
pub struct ResearchCache {
    path: PathBuf,
    entries: HashMap<String, String>,
    /// Set when new entries were added; save is a no-op otherwise
    dirty: bool,
}

impl ResearchCache {
    /// Loads the cache from disk; any failure yields an empty cache.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("Ignoring undecodable research cache {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries,
            dirty: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: String, research: String) {
        self.entries.insert(key, research);
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the cache back to disk if new entries were added.
    ///
    /// Failures are logged and swallowed.
    pub fn save(&self) {
        if !self.dirty {
            return;
        }

        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create cache directory {}: {}", parent.display(), e);
            return;
        }

        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("Failed to save research cache {}: {}", self.path.display(), e);
                }
            }
            Err(e) => warn!("Failed to encode research cache: {}", e),
        }
    }
}
