//! Build target platforms.
//!
//! A [`Platform`] is an `os/arch` pair a toolchain can build for. Identity is
//! the pair alone: the `default` flag rides along as an attribute and takes no
//! part in equality or hashing, so sets of platforms deduplicate by pair.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::FilterError;

/// Separator between the OS and architecture halves of a platform string.
pub const SEPARATOR: char = '/';

/// A combination of OS and architecture that can be built against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    os: String,
    arch: String,
    /// Whether the platform is built when no filters are given at all.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    default: bool,
}

impl Platform {
    /// Create a non-default platform. Both halves are lower-cased.
    pub fn new(os: impl AsRef<str>, arch: impl AsRef<str>) -> Self {
        Self {
            os: os.as_ref().to_lowercase(),
            arch: arch.as_ref().to_lowercase(),
            default: false,
        }
    }

    /// Return the same platform with its default flag replaced.
    pub fn with_default(self, default: bool) -> Self {
        Self { default, ..self }
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    pub fn is_default(&self) -> bool {
        self.default
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        self.os == other.os && self.arch == other.arch
    }
}

impl Eq for Platform {}

impl Hash for Platform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.os.hash(state);
        self.arch.hash(state);
    }
}

impl PartialOrd for Platform {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Platform {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.os, &self.arch).cmp(&(&other.os, &other.arch))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.os, SEPARATOR, self.arch)
    }
}

impl FromStr for Platform {
    type Err = FilterError;

    /// Parse a strict `os/arch` string. Exactly one separator and two
    /// non-empty halves are required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, arch) = split_pair(s).ok_or_else(|| FilterError::MalformedPair {
            token: s.to_string(),
        })?;
        Ok(Platform::new(os, arch))
    }
}

/// Split `os/arch` into its halves, rejecting a missing or repeated separator
/// and empty halves.
pub(crate) fn split_pair(s: &str) -> Option<(&str, &str)> {
    let (os, arch) = s.split_once(SEPARATOR)?;
    if os.is_empty() || arch.is_empty() || arch.contains(SEPARATOR) {
        return None;
    }
    Some((os, arch))
}

/// An unordered set of platforms, unique by `os/arch`.
///
/// Iteration order is unspecified. Callers that need a stable build order
/// should use [`PlatformSet::into_sorted_vec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlatformSet(HashSet<Platform>);

impl PlatformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a platform, replacing any existing entry with the same pair so
    /// the newer attributes win.
    pub fn insert(&mut self, platform: Platform) {
        self.0.replace(platform);
    }

    pub fn remove(&mut self, platform: &Platform) -> bool {
        self.0.remove(platform)
    }

    pub fn contains(&self, platform: &Platform) -> bool {
        self.0.contains(platform)
    }

    /// Look up the stored entry for a pair, including its default flag.
    pub fn get(&self, os: &str, arch: &str) -> Option<&Platform> {
        self.0.get(&Platform::new(os, arch))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Platform> {
        self.0.iter()
    }

    pub fn into_sorted_vec(self) -> Vec<Platform> {
        let mut platforms: Vec<_> = self.0.into_iter().collect();
        platforms.sort();
        platforms
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = Platform>>(iter: I) -> Self {
        let mut set = PlatformSet::new();
        for platform in iter {
            set.insert(platform);
        }
        set
    }
}

impl IntoIterator for PlatformSet {
    type Item = Platform;
    type IntoIter = hash_set::IntoIter<Platform>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlatformSet {
    type Item = &'a Platform;
    type IntoIter = hash_set::Iter<'a, Platform>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
