//! Version comparison for detected tools

use anyhow::Result;
use semver::Version;

/// Parse version string, handling a leading `v` (as printed by `node --version`)
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Returns a warning if `found` is older than `minimum`.
/// Unparseable versions are not compared.
pub fn check_minimum(tool: &str, found: &str, minimum: &str) -> Option<String> {
    let found_ver = parse_version(found).ok()?;
    let min_ver = parse_version(minimum).ok()?;

    if found_ver < min_ver {
        Some(format!(
            "{} {} is older than {}, which the project generators expect. Consider upgrading.",
            tool, found_ver, min_ver
        ))
    } else {
        None
    }
}
