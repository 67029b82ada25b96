//! Major version extraction
//!
//! Versions flow in as arbitrary constraint strings (`^14.0.0`, `~=2.28`,
//! `>=1.0,<2.0`). Only the leading integer matters for breaking-change
//! detection, so constraint prefixes are skipped by scanning for the first
//! run of decimal digits instead of parsing the full constraint grammar.

/// Extracts the major version from a version or constraint string.
///
/// Returns the first maximal run of decimal digits found anywhere in the
/// string, or `None` when the string contains no digits (or the run
/// overflows u64).
pub fn major_version(version: &str) -> Option<u64> {
    let start = version.find(|c: char| c.is_ascii_digit())?;
    let digits = &version[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse().ok()
}
