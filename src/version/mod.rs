//! Version diff detection
//! - major.rs: major version extraction from constraint strings
//! - diff.rs: VersionDiff and the installed-vs-latest resolver
//! - filter.rs: redundant @types/* filtering

pub mod diff;
pub mod filter;
pub mod major;

pub use diff::{VersionDiff, resolve_diff};
pub use filter::filter_redundant_types;
pub use major::major_version;
