//! Toolchain versions, read as semantic versions.
//!
//! Go reports versions like `1.16`, `1.21.3` or `1.21rc2`. These are padded
//! out to three components and handed to `semver`, so `1.16` reads as
//! `1.16.0` and `1.21rc2` as `1.21.0-rc2`. Release ranges are `VersionReq`
//! comparators, which never admit a pre-release.

use semver::{Comparator, Op, Prerelease};

/// A parsed toolchain version.
pub type Version = semver::Version;

/// A range of toolchain versions.
pub type VersionReq = semver::VersionReq;

/// Parse a Go toolchain version with its `go` prefix already removed.
///
/// A leading `v` and `+build` metadata are accepted. A pre-release tag may
/// follow the numbers directly (`1.21rc2`) or after a dash (`1.22-beta1`).
pub fn parse_toolchain_version(s: &str) -> Result<Version, semver::Error> {
    let s = s.strip_prefix('v').unwrap_or(s);
    let (s, build) = match s.split_once('+') {
        Some((version, build)) => (version, Some(build)),
        None => (s, None),
    };

    let numeric_end = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (numeric, pre) = s.split_at(numeric_end);
    let pre = pre.strip_prefix('-').unwrap_or(pre);

    let mut normalized = match numeric.split('.').count() {
        1 => format!("{}.0.0", numeric),
        2 => format!("{}.0", numeric),
        _ => numeric.to_string(),
    };
    if !pre.is_empty() || numeric_end < s.len() {
        normalized.push('-');
        normalized.push_str(pre);
    }
    if let Some(build) = build {
        normalized.push('+');
        normalized.push_str(build);
    }

    Version::parse(&normalized)
}

/// The half-open range `[major.minor, end)`; no `end` admits every later
/// release.
pub fn release_range(since: (u64, u64), end: Option<(u64, u64)>) -> VersionReq {
    let mut comparators = vec![comparator(Op::GreaterEq, since)];
    if let Some(end) = end {
        comparators.push(comparator(Op::Less, end));
    }
    VersionReq { comparators }
}

fn comparator(op: Op, (major, minor): (u64, u64)) -> Comparator {
    Comparator {
        op,
        major,
        minor: Some(minor),
        patch: Some(0),
        pre: Prerelease::EMPTY,
    }
}
