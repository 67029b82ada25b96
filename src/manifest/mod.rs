//! Dependency manifest readers
//! - package_json.rs: package.json dependency map
//! - requirements.rs: requirements.txt pinned-version lines

pub mod package_json;
pub mod requirements;

pub use requirements::RequirementsParser;
