//! Platform filtering.
//!
//! Users narrow the build down with three token lists: operating systems,
//! architectures, and explicit `os/arch` pairs. Any token may be prefixed with
//! `!` to exclude instead of include. A [`FilterRequest`] collects the raw
//! tokens as flags are parsed; [`FilterRequest::to_filter`] splits them into
//! include and exclude sets, and [`resolve_platforms`] applies those sets to a
//! catalog snapshot.
//!
//! Resolution picks candidates from the most specific includes present:
//!
//! 1. pair includes, if any (OS and Arch includes are then ignored);
//! 2. otherwise the cross product of OS and Arch includes, if both are given;
//! 3. otherwise every platform of the included operating systems;
//! 4. otherwise the snapshot's default platforms.
//!
//! Exclusions are then applied to whichever candidates were picked.

mod token;

use std::collections::HashSet;
use tracing::debug;

use crate::catalog::Snapshot;
use crate::error::Result;
use crate::platform::{Platform, PlatformSet};

pub use token::{NEGATION, PairToken};

use token::split_negation;

/// Raw filter tokens as supplied on the command line.
///
/// Tokens are lower-cased and deduplicated, keeping the order they first
/// appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    os: Vec<String>,
    arch: Vec<String>,
    os_arch: Vec<PairToken>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a whitespace-separated list of OS tokens, e.g. `"linux !windows"`.
    pub fn add_os(&mut self, value: &str) -> Result<()> {
        append_names(&mut self.os, value)
    }

    /// Record a whitespace-separated list of architecture tokens.
    pub fn add_arch(&mut self, value: &str) -> Result<()> {
        append_names(&mut self.arch, value)
    }

    /// Record a whitespace-separated list of `os/arch` tokens.
    ///
    /// The whole value is validated before anything is recorded, so a bad
    /// token leaves earlier values untouched.
    pub fn add_os_arch(&mut self, value: &str) -> Result<()> {
        let tokens = value
            .split_whitespace()
            .map(PairToken::parse)
            .collect::<Result<Vec<_>>>()?;

        for token in tokens {
            if !self.os_arch.contains(&token) {
                self.os_arch.push(token);
            }
        }
        Ok(())
    }

    pub fn os(&self) -> &[String] {
        &self.os
    }

    pub fn arch(&self) -> &[String] {
        &self.arch
    }

    pub fn os_arch(&self) -> &[PairToken] {
        &self.os_arch
    }

    pub fn is_empty(&self) -> bool {
        self.os.is_empty() && self.arch.is_empty() && self.os_arch.is_empty()
    }

    /// Split the recorded tokens into include and exclude sets.
    pub fn to_filter(&self) -> PlatformFilter {
        let mut filter = PlatformFilter::default();

        for token in &self.os {
            match token.strip_prefix(NEGATION) {
                Some(name) => filter.exclude_os.insert(name.to_string()),
                None => filter.include_os.insert(token.clone()),
            };
        }

        for token in &self.arch {
            match token.strip_prefix(NEGATION) {
                Some(name) => filter.exclude_arch.insert(name.to_string()),
                None => filter.include_arch.insert(token.clone()),
            };
        }

        for token in &self.os_arch {
            let platform = Platform::new(&token.os, &token.arch);
            if token.negated {
                filter.exclude_pairs.insert(platform);
            } else {
                filter.include_pairs.insert(platform);
            }
        }

        filter
    }

    /// Resolve the recorded filters against a snapshot.
    pub fn platforms(&self, snapshot: &Snapshot) -> PlatformSet {
        resolve_platforms(snapshot, &self.to_filter())
    }
}

fn append_names(list: &mut Vec<String>, value: &str) -> Result<()> {
    let tokens = value
        .split_whitespace()
        .map(|token| split_negation(token).map(|_| token.to_lowercase()))
        .collect::<Result<Vec<_>>>()?;

    for token in tokens {
        if !list.contains(&token) {
            list.push(token);
        }
    }
    Ok(())
}

/// Parsed include and exclude sets.
///
/// OS and architecture names are expected in lower case, as produced by
/// [`FilterRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFilter {
    pub include_os: HashSet<String>,
    pub exclude_os: HashSet<String>,
    pub include_arch: HashSet<String>,
    pub exclude_arch: HashSet<String>,
    pub include_pairs: PlatformSet,
    pub exclude_pairs: PlatformSet,
}

impl PlatformFilter {
    /// Whether a candidate survives the exclusion pass.
    fn admits(&self, platform: &Platform) -> bool {
        if self.exclude_pairs.contains(platform) {
            return false;
        }

        if self.exclude_os.contains(platform.os()) || self.exclude_arch.contains(platform.arch())
        {
            return false;
        }

        if self.include_pairs.is_empty() {
            if !self.include_os.is_empty() && !self.include_os.contains(platform.os()) {
                return false;
            }
            if !self.include_arch.is_empty() && !self.include_arch.contains(platform.arch()) {
                return false;
            }
        }

        true
    }
}

/// Compute the platforms to build from a snapshot and a set of filters.
///
/// Returned platforms have their default flag cleared. An empty result means
/// there is nothing to build; it is not an error.
#[tracing::instrument(skip_all, fields(release = snapshot.release()))]
pub fn resolve_platforms(snapshot: &Snapshot, filter: &PlatformFilter) -> PlatformSet {
    let candidates: Vec<Platform> = if !filter.include_pairs.is_empty() {
        debug!("Selecting {} explicit pair(s)", filter.include_pairs.len());
        filter
            .include_pairs
            .iter()
            .filter(|p| snapshot.contains(p) && !filter.exclude_pairs.contains(p))
            .cloned()
            .collect()
    } else if !filter.include_os.is_empty() && !filter.include_arch.is_empty() {
        debug!(
            "Selecting {} OS x {} arch combination(s)",
            filter.include_os.len(),
            filter.include_arch.len()
        );
        filter
            .include_os
            .iter()
            .flat_map(|os| {
                filter
                    .include_arch
                    .iter()
                    .map(move |arch| Platform::new(os, arch))
            })
            .filter(|p| snapshot.contains(p))
            .collect()
    } else if !filter.include_os.is_empty() {
        debug!("Selecting every arch of {} OS(es)", filter.include_os.len());
        snapshot
            .iter()
            .filter(|p| filter.include_os.contains(p.os()))
            .cloned()
            .collect()
    } else {
        debug!("No includes given, selecting default platforms");
        snapshot.defaults().cloned().collect()
    };

    let result: PlatformSet = candidates
        .into_iter()
        .filter(|p| filter.admits(p))
        .map(|p| p.with_default(false))
        .collect();

    debug!("Resolved {} platform(s)", result.len());
    result
}
