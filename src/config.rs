use std::path::PathBuf;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for registry lookups in seconds
pub const REGISTRY_TIMEOUT_SECS: u64 = 5;

/// Timeout for a single research invocation in seconds (5 minutes)
pub const RESEARCH_TIMEOUT_SECS: u64 = 300;

/// Maximum number of research invocations in flight at once
pub const MAX_CONCURRENT_RESEARCH: usize = 10;

/// Returns the path to the research cache file.
/// Uses $XDG_CACHE_HOME/version-hook if XDG_CACHE_HOME is set,
/// otherwise falls back to ~/.cache/version-hook,
/// or ./version-hook if neither is available.
pub fn cache_file() -> PathBuf {
    cache_dir_with_env(std::env::var("XDG_CACHE_HOME").ok(), dirs::home_dir())
        .join("version-research.json")
}

fn cache_dir_with_env(xdg_cache_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let cache_dir = xdg_cache_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."));

    cache_dir.join("version-hook")
}
