//! Platform compatibility checks.
//!
//! Catalog versions declare the Rancher versions they support with
//! `minimum_rancher_version` / `maximum_rancher_version`. Both bounds are
//! inclusive and an empty bound is open-ended.

use semver::Version;

/// Parse a platform version leniently.
///
/// A leading `v` is stripped and missing minor/patch components are padded
/// with zero, so `v1.6` parses as `1.6.0`.
pub fn parse_platform_version(raw: &str) -> Result<Version, semver::Error> {
    let bare = raw.trim();
    let bare = bare.strip_prefix('v').unwrap_or(bare);

    let split = bare.find(['-', '+']).unwrap_or(bare.len());
    let (core, suffix) = bare.split_at(split);

    let mut padded = core.to_string();
    for _ in core.split('.').count()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    Version::parse(&padded)
}

/// Whether `target` lies within `[min, max]`.
///
/// A bound that is empty is unbounded. A bound that does not parse makes the
/// version incompatible.
pub fn version_in_range(min: &str, target: &Version, max: &str) -> bool {
    bound_holds(min, |bound| bound <= target) && bound_holds(max, |bound| target <= bound)
}

fn bound_holds(raw: &str, check: impl Fn(&Version) -> bool) -> bool {
    if raw.trim().is_empty() {
        return true;
    }
    match parse_platform_version(raw) {
        Ok(bound) => check(&bound),
        Err(e) => {
            tracing::debug!("Ignoring version with unparseable bound '{}': {}", raw, e);
            false
        }
    }
}
