//! End-to-end hook pipeline
//!
//! Command interpretation, manifest reading, diff resolution, cache split,
//! research dispatch, and result composition. Every stage narrates progress
//! to stderr via tracing; only the final composed document reaches stdout.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::command::parser::{CommandInterpreter, ParsedCommand};
use crate::config;
use crate::hook::input::HookInput;
use crate::hook::output::HookOutput;
use crate::hook::report::compose;
use crate::manifest::package_json;
use crate::manifest::requirements::RequirementsParser;
use crate::registry::{NpmRegistry, PypiRegistry, Registry, RegistryKind};
use crate::research::agent::{ClaudeAgent, ResearchAgent};
use crate::research::cache::{ResearchCache, cache_key};
use crate::research::dispatcher::{ResearchResult, dispatch};
use crate::version::diff::resolve_diff;
use crate::version::filter::filter_redundant_types;

/// The wired-up pipeline; collaborators are injectable for tests.
pub struct Pipeline {
    pub cwd: PathBuf,
    pub npm: Box<dyn Registry>,
    pub pypi: Box<dyn Registry>,
    pub agent: Arc<dyn ResearchAgent>,
    pub cache_path: PathBuf,
}

impl Pipeline {
    /// Production wiring: live registries, the claude CLI, the user cache file.
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            npm: Box::new(NpmRegistry::default()),
            pypi: Box::new(PypiRegistry::default()),
            agent: Arc::new(ClaudeAgent::default()),
            cache_path: config::cache_file(),
        }
    }

    /// Runs the full pipeline for one hook event.
    ///
    /// Returns `None` for every silent no-op condition: unrecognized tool,
    /// no manager detected, no packages to check, no major-version diffs.
    pub async fn run(&self, input: &HookInput) -> Option<HookOutput> {
        if !input.is_shell_command() {
            return None;
        }

        let interpreter = CommandInterpreter::new();
        let parsed = interpreter.interpret(&input.tool_input.command, &self.cwd)?;

        info!("Detected {} install command", parsed.manager.as_str());

        let packages = self.collect_packages(&parsed);
        if packages.is_empty() {
            info!("No packages to check");
            return None;
        }

        info!("Checking {} packages for version diffs...", packages.len());

        let registry: &dyn Registry = match parsed.manager.registry_kind() {
            RegistryKind::Npm => self.npm.as_ref(),
            RegistryKind::Pypi => self.pypi.as_ref(),
        };

        // Registry lookups run sequentially; only research fans out.
        let mut diffs = Vec::new();
        for (package, version) in &packages {
            if let Some(diff) = resolve_diff(registry, package, version).await {
                diffs.push(diff);
            }
        }

        if diffs.is_empty() {
            info!("All packages up to date");
            return None;
        }

        let diffs = filter_redundant_types(diffs);

        info!("Found {} packages with major version diffs", diffs.len());

        let mut cache = ResearchCache::load(self.cache_path.clone());

        let mut results: Vec<ResearchResult> = Vec::new();
        let mut uncached = Vec::new();
        for diff in diffs {
            let key = cache_key(&diff.package, diff.installed_major, diff.latest_major);
            match cache.get(&key) {
                Some(research) => {
                    info!("Cache hit: {}", diff.package);
                    results.push(ResearchResult {
                        research: research.to_string(),
                        from_cache: true,
                        diff,
                    });
                }
                None => uncached.push(diff),
            }
        }

        if !uncached.is_empty() {
            let research_list: Vec<String> = uncached
                .iter()
                .map(|d| format!("{} ({}\u{2192}{})", d.package, d.installed_major, d.latest_major))
                .collect();
            info!("Researching: {}", research_list.join(", "));

            let fresh = dispatch(Arc::clone(&self.agent), uncached).await;

            for result in &fresh {
                if result.is_failure() {
                    warn!("Failed: {} (not cached)", result.diff.package);
                } else {
                    let key = cache_key(
                        &result.diff.package,
                        result.diff.installed_major,
                        result.diff.latest_major,
                    );
                    cache.insert(key, result.research.clone());
                    info!("Completed: {}", result.diff.package);
                }
            }

            cache.save();
            info!("Research cached for future use");

            results.extend(fresh);
        }

        Some(compose(&results, packages.len()))
    }

    /// Produces the package/version set to check.
    ///
    /// Explicit packages are intersected with the local manifest to find
    /// their installed versions; without explicit packages the whole
    /// manifest is checked. A pip `-r` file replaces the manifest entirely.
    fn collect_packages(&self, parsed: &ParsedCommand) -> IndexMap<String, String> {
        let requirements = RequirementsParser::new();

        if let Some(path) = &parsed.requirements_file {
            info!("Parsing {}", path.display());
            return requirements.read(path);
        }

        if !parsed.explicit_packages.is_empty() {
            info!("Checking: {}", parsed.explicit_packages.join(", "));

            let installed = match parsed.manager.registry_kind() {
                RegistryKind::Npm => package_json::read(&parsed.cwd),
                RegistryKind::Pypi => requirements.read(&parsed.cwd.join("requirements.txt")),
            };

            return parsed
                .explicit_packages
                .iter()
                .filter_map(|package| {
                    installed
                        .get(package)
                        .map(|version| (package.clone(), version.clone()))
                })
                .collect();
        }

        match parsed.manager.registry_kind() {
            RegistryKind::Npm => {
                info!("Parsing package file in {}", parsed.cwd.display());
                package_json::read(&parsed.cwd)
            }
            RegistryKind::Pypi => {
                let path = parsed.cwd.join("requirements.txt");
                info!("Parsing {}", path.display());
                requirements.read(&path)
            }
        }
    }
}
