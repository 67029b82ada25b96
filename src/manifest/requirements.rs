//! requirements.txt parser
//!
//! Line-oriented pinned-version format. Only `name<operator><version>` lines
//! are captured; everything else (comments, pip options, editable installs,
//! URLs) is silently ignored.
//!
//! Compound constraints like `>=1.0,<2.0` keep only the first numeric token,
//! which is all the major-version comparison needs.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

/// Parser for requirements.txt files
pub struct RequirementsParser {
    /// Matches `name<operator><version>`, e.g. `requests==2.28.0`
    line_re: Regex,
}

impl RequirementsParser {
    pub fn new() -> Self {
        Self {
            line_re: Regex::new(r"^([a-zA-Z0-9_-]+)\s*([=<>~!]+)\s*([\d.]+)")
                .expect("invalid requirements pattern"),
        }
    }

    /// Reads a requirements file into a name -> version map.
    ///
    /// A missing file yields an empty map, never an error.
    pub fn read(&self, path: &Path) -> IndexMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return IndexMap::new(),
        };

        let mut packages = IndexMap::new();
        for line in content.lines() {
            let line = line.trim();

            // Skip comments, empty lines, and pip options (-r, -e, ...)
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }

            if let Some(caps) = self.line_re.captures(line) {
                let name = caps.get(1).map_or("", |m| m.as_str());
                let version = caps.get(3).map_or("", |m| m.as_str());
                packages.insert(name.to_string(), version.to_string());
            }
        }

        packages
    }
}

impl Default for RequirementsParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_requirements(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("requirements.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_parses_pinned_and_ranged_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_requirements(
            &dir,
            "requests==2.28.0\nflask>=1.1.0\ndjango~=4.2\nnumpy!=1.24.0\n",
        );

        let packages = RequirementsParser::new().read(&path);

        assert_eq!(packages.get("requests"), Some(&"2.28.0".to_string()));
        assert_eq!(packages.get("flask"), Some(&"1.1.0".to_string()));
        assert_eq!(packages.get("django"), Some(&"4.2".to_string()));
        assert_eq!(packages.get("numpy"), Some(&"1.24.0".to_string()));
    }

    #[test]
    fn read_skips_comments_blank_lines_and_options() {
        let dir = TempDir::new().unwrap();
        let path = write_requirements(
            &dir,
            "# pinned deps\n\n-r base.txt\n-e .\n--index-url https://example.com\nrequests==2.28.0\n",
        );

        let packages = RequirementsParser::new().read(&path);

        assert_eq!(packages.len(), 1);
        assert_eq!(packages.get("requests"), Some(&"2.28.0".to_string()));
    }

    #[test]
    fn read_ignores_lines_without_version_pattern() {
        let dir = TempDir::new().unwrap();
        let path = write_requirements(
            &dir,
            "requests\nhttps://example.com/pkg.whl\nrequests==2.28.0\n",
        );

        let packages = RequirementsParser::new().read(&path);

        assert_eq!(packages.len(), 1);
        assert_eq!(packages.get("requests"), Some(&"2.28.0".to_string()));
    }

    #[test]
    fn read_keeps_first_numeric_token_of_compound_constraint() {
        let dir = TempDir::new().unwrap();
        let path = write_requirements(&dir, "celery>=5.0,<6.0\n");

        let packages = RequirementsParser::new().read(&path);

        assert_eq!(packages.get("celery"), Some(&"5.0".to_string()));
    }

    #[test]
    fn read_lets_later_lines_overwrite_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = write_requirements(&dir, "requests==2.27.0\nrequests==2.28.0\n");

        let packages = RequirementsParser::new().read(&path);

        assert_eq!(packages.len(), 1);
        assert_eq!(packages.get("requests"), Some(&"2.28.0".to_string()));
    }

    #[test]
    fn read_returns_empty_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let packages = RequirementsParser::new().read(&dir.path().join("requirements.txt"));

        assert!(packages.is_empty());
    }
}
