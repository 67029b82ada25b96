//! Install command parsing
//!
//! Turns a raw shell command into the effective working directory, the
//! detected package manager, and the explicitly named packages. Only the
//! minimal shell grammar the hook needs is understood: an optional leading
//! `cd <path> &&` prefix followed by a single manager invocation.

use std::path::{Component, Path, PathBuf};

use regex::Regex;

use crate::command::manager::{ManagerDetector, PackageManager};

/// Characters that introduce a version or tag specifier after a package name
const SPECIFIER_CHARS: [char; 6] = ['@', '=', '<', '>', '~', '!'];

/// A classified install command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub manager: PackageManager,
    /// Effective working directory after resolving a `cd <path> &&` prefix
    pub cwd: PathBuf,
    /// Packages named directly on the command line, version specifiers stripped
    pub explicit_packages: Vec<String>,
    /// Requirements file named via pip's `-r` flag, resolved against `cwd`
    pub requirements_file: Option<PathBuf>,
}

pub struct CommandInterpreter {
    detector: ManagerDetector,
    /// Matches a leading `cd <path> &&` prefix
    cd_re: Regex,
    /// Matches a flag token and its optional bare argument
    flag_re: Regex,
    /// Matches pip's `-r <file>` flag
    requirements_re: Regex,
    /// Install subcommand prefixes, one per manager
    prefix_res: Vec<(PackageManager, Regex)>,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self {
            detector: ManagerDetector::new(),
            cd_re: Regex::new(r"^cd\s+([^\s&]+)\s*&&\s*").expect("invalid cd pattern"),
            flag_re: Regex::new(r"\s+--?\w+(\s+\S+)?").expect("invalid flag pattern"),
            requirements_re: Regex::new(r"-r\s+(\S+)").expect("invalid requirements pattern"),
            prefix_res: PackageManager::ALL
                .iter()
                .map(|manager| {
                    (
                        *manager,
                        Regex::new(manager.install_prefix_pattern())
                            .expect("invalid prefix pattern"),
                    )
                })
                .collect(),
        }
    }

    /// Classifies a command line against the known manager patterns.
    ///
    /// Returns `None` when no package-manager invocation is recognized; the
    /// whole pipeline is a no-op in that case.
    pub fn interpret(&self, command: &str, process_cwd: &Path) -> Option<ParsedCommand> {
        let (cwd, command) = self.split_cd_prefix(command, process_cwd);

        let manager = self.detector.detect(command)?;

        // pip -r bypasses explicit-package extraction; the named file
        // becomes the manifest source.
        let requirements_file = if manager == PackageManager::Pip {
            self.requirements_re.captures(command).map(|caps| {
                let file = Path::new(caps.get(1).map_or("", |m| m.as_str()));
                if file.is_absolute() {
                    file.to_path_buf()
                } else {
                    cwd.join(file)
                }
            })
        } else {
            None
        };

        let explicit_packages = if requirements_file.is_some() {
            Vec::new()
        } else {
            self.extract_packages(command, manager)
        };

        Some(ParsedCommand {
            manager,
            cwd,
            explicit_packages,
            requirements_file,
        })
    }

    /// Resolves a leading `cd <path> &&` prefix and returns the effective
    /// working directory plus the remaining command text.
    fn split_cd_prefix<'a>(&self, command: &'a str, process_cwd: &Path) -> (PathBuf, &'a str) {
        let Some(caps) = self.cd_re.captures(command) else {
            return (process_cwd.to_path_buf(), command);
        };

        let cd_path = Path::new(caps.get(1).map_or("", |m| m.as_str()));
        let cwd = if cd_path.is_absolute() {
            cd_path.to_path_buf()
        } else {
            process_cwd.join(cd_path)
        };

        let rest = &command[caps.get(0).map_or(0, |m| m.end())..];
        (normalize(&cwd), rest)
    }

    /// Extracts package names from an install command, stripping the
    /// subcommand prefix, flags, and trailing version specifiers.
    ///
    /// A scoped name like `@types/node` truncates at its leading `@` and is
    /// discarded; explicit scoped packages never make it into the check set.
    fn extract_packages(&self, command: &str, manager: PackageManager) -> Vec<String> {
        let stripped = match self.prefix_res.iter().find(|(m, _)| *m == manager) {
            Some((_, prefix_re)) => prefix_re.replace(command, ""),
            None => command.into(),
        };
        let cleaned = self.flag_re.replace_all(&stripped, " ");

        cleaned
            .split_whitespace()
            .filter(|token| !token.starts_with('-'))
            .filter_map(|token| {
                let name = match token.find(SPECIFIER_CHARS) {
                    Some(index) => &token[..index],
                    None => token,
                };
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect()
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lexically normalizes a path (resolves `.` and `..` components without
/// touching the filesystem).
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = normalized.pop();
                if !popped && normalized.components().next() != Some(Component::RootDir) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
