//! Package manager detection

use regex::Regex;

use crate::registry::RegistryKind;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
    Pip,
}

impl PackageManager {
    /// All managers in detection order (first match wins)
    pub const ALL: [PackageManager; 5] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
        PackageManager::Pip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
            PackageManager::Pip => "pip",
        }
    }

    /// Registry this manager resolves packages against
    pub fn registry_kind(&self) -> RegistryKind {
        match self {
            PackageManager::Npm
            | PackageManager::Yarn
            | PackageManager::Pnpm
            | PackageManager::Bun => RegistryKind::Npm,
            PackageManager::Pip => RegistryKind::Pypi,
        }
    }

    /// Pattern matching an install/add invocation anywhere in a command
    fn detect_pattern(&self) -> &'static str {
        match self {
            PackageManager::Npm => r"\bnpm\s+(install|i|add)\b",
            PackageManager::Yarn => r"\byarn\s+add\b",
            PackageManager::Pnpm => r"\bpnpm\s+(add|install)\b",
            PackageManager::Bun => r"\bbun\s+(add|install)\b",
            PackageManager::Pip => r"\bpip\s+install\b",
        }
    }

    /// Pattern stripping the install subcommand prefix before package extraction
    pub(crate) fn install_prefix_pattern(&self) -> &'static str {
        match self {
            PackageManager::Npm => r"^npm\s+(install|i|add)\s*",
            PackageManager::Yarn => r"^yarn\s+add\s*",
            PackageManager::Pnpm => r"^pnpm\s+(add|install)\s*",
            PackageManager::Bun => r"^bun\s+(add|install)\s*",
            PackageManager::Pip => r"^pip\s+install\s*",
        }
    }
}

/// Matches shell commands against the known manager invocation patterns
pub struct ManagerDetector {
    patterns: Vec<(PackageManager, Regex)>,
}

impl ManagerDetector {
    pub fn new() -> Self {
        Self {
            patterns: PackageManager::ALL
                .iter()
                .map(|manager| {
                    (
                        *manager,
                        Regex::new(manager.detect_pattern()).expect("invalid detect pattern"),
                    )
                })
                .collect(),
        }
    }

    /// Classifies a command; returns the first manager whose pattern matches
    pub fn detect(&self, command: &str) -> Option<PackageManager> {
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(command))
            .map(|(manager, _)| *manager)
    }
}

impl Default for ManagerDetector {
    fn default() -> Self {
        Self::new()
    }
}
