//! Compatibility gating against the execution platform version.
//!
//! A catalog entry may declare the platform versions its template
//! supports via `engine: {camunda: "<semver range>"}`. Only the
//! `camunda` key is interpreted; other platform names are ignored.

use crate::model::CatalogEntry;
use semver::{Version, VersionReq};

/// Whether a catalog entry's template supports the given execution
/// platform version.
///
/// No `engine` declaration, or one without a `camunda` key, means the
/// template is compatible with everything. An unparsable range cannot be
/// satisfied and gates the entry out.
pub fn is_template_compatible(entry: &CatalogEntry, platform_version: &str) -> bool {
    let Some(range) = entry.engine.as_ref().and_then(|e| e.get("camunda")) else {
        return true;
    };

    let Ok(req) = VersionReq::parse(range) else {
        tracing::debug!("unparsable engine range {:?} for template {}", range, entry.id);
        return false;
    };

    match coerce_version(platform_version) {
        Some(version) => req.matches(&version),
        None => false,
    }
}

/// Coerce a platform version string into a concrete semantic version.
///
/// A bare `major.minor` becomes `major.minor.0`; pre-release and build
/// metadata are dropped, since the gate compares released platform lines
/// rather than individual pre-releases.
fn coerce_version(platform_version: &str) -> Option<Version> {
    let core = platform_version
        .split(['-', '+'])
        .next()
        .unwrap_or_default();

    let mut parts = core.split('.');
    let major = parts.next()?.trim().parse().ok()?;
    let minor = parts.next().unwrap_or("0").trim().parse().ok()?;
    let patch = parts.next().unwrap_or("0").trim().parse().ok()?;

    Some(Version::new(major, minor, patch))
}
