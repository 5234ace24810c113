//! Platform catalog.
//!
//! The catalog holds the history of which platforms each toolchain release
//! supports, as a ladder of snapshots. Each snapshot is derived from the one
//! before it with [`add_drop`], and is bound to a half-open version range.
//! The ranges are contiguous and the last one is open-ended, so any release
//! newer than the last known one resolves to the newest snapshot.

mod history;
mod version;

use serde::Serialize;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::platform::{Platform, PlatformSet};

pub use version::{Version, VersionReq, parse_toolchain_version, release_range};

/// Prefix every toolchain version string starts with (`go1.21.3`).
pub const TOOLCHAIN_PREFIX: &str = "go";

static BUILTIN: LazyLock<HistoricalCatalog> =
    LazyLock::new(|| HistoricalCatalog::from_history(history::HISTORY));

/// The platforms supported by one toolchain release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    release: String,
    platforms: PlatformSet,
}

impl Snapshot {
    pub fn new(release: impl Into<String>, platforms: impl IntoIterator<Item = Platform>) -> Self {
        Self {
            release: release.into(),
            platforms: platforms.into_iter().collect(),
        }
    }

    /// The release this snapshot was introduced in, e.g. `1.16`.
    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    pub fn get(&self, os: &str, arch: &str) -> Option<&Platform> {
        self.platforms.get(os, arch)
    }

    pub fn contains(&self, platform: &Platform) -> bool {
        self.platforms.contains(platform)
    }

    /// Platforms built when the user supplies no filters.
    pub fn defaults(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.is_default())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Source of platform snapshots for a toolchain version.
#[cfg_attr(test, mockall::automock)]
pub trait Catalog: Send + Sync {
    /// Resolve a toolchain version string (`go1.16`) to its snapshot. Never
    /// fails: input that cannot be matched resolves to [`Catalog::latest`].
    fn supported_platforms(&self, version: &str) -> Arc<Snapshot>;

    /// The newest known snapshot.
    fn latest(&self) -> Arc<Snapshot>;
}

/// A snapshot together with the versions it applies to.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub range: VersionReq,
    pub snapshot: Arc<Snapshot>,
}

/// Catalog built from the recorded toolchain history.
#[derive(Debug, Clone)]
pub struct HistoricalCatalog {
    entries: Vec<CatalogEntry>,
    latest: Arc<Snapshot>,
}

impl HistoricalCatalog {
    /// The process-wide catalog of Go releases, built on first use.
    pub fn builtin() -> &'static HistoricalCatalog {
        &BUILTIN
    }

    fn from_history(releases: &[history::Release]) -> Self {
        let mut entries = Vec::with_capacity(releases.len());
        let mut current = PlatformSet::new();

        for (i, release) in releases.iter().enumerate() {
            current = add_drop(
                current,
                release.add.iter().map(port),
                release.drop.iter().map(port),
            );

            let (major, minor) = release.since;
            let end = releases.get(i + 1).map(|next| next.since);
            debug_assert!(end.is_none_or(|end| end > release.since));

            entries.push(CatalogEntry {
                snapshot: Arc::new(Snapshot {
                    release: format!("{}.{}", major, minor),
                    platforms: current.clone(),
                }),
                range: release_range(release.since, end),
            });
        }

        let latest = entries
            .last()
            .map(|entry| entry.snapshot.clone())
            .unwrap_or_default();

        Self { entries, latest }
    }

    /// The release ladder, oldest first.
    pub fn releases(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl Catalog for HistoricalCatalog {
    #[tracing::instrument(skip(self))]
    fn supported_platforms(&self, version: &str) -> Arc<Snapshot> {
        let Some(numeric) = version.strip_prefix(TOOLCHAIN_PREFIX) else {
            warn!("Unexpected toolchain version {:?}, using latest platforms", version);
            return self.latest();
        };

        let current = match parse_toolchain_version(numeric) {
            Ok(current) => current,
            Err(e) => {
                warn!("Unable to parse toolchain version {:?}: {}", numeric, e);
                return self.latest();
            }
        };

        match self.entries.iter().find(|e| e.range.matches(&current)) {
            Some(entry) => {
                debug!(
                    "Toolchain {} matches {}, using {} platform set",
                    current,
                    entry.range,
                    entry.snapshot.release()
                );
                entry.snapshot.clone()
            }
            None => {
                debug!("No release range admits {}, assuming latest", current);
                self.latest()
            }
        }
    }

    fn latest(&self) -> Arc<Snapshot> {
        self.latest.clone()
    }
}

/// Resolve a toolchain version string against the built-in catalog.
pub fn supported_platforms(version: &str) -> Arc<Snapshot> {
    HistoricalCatalog::builtin().supported_platforms(version)
}

/// Alias of [`supported_platforms`].
pub fn resolve_snapshot(version: &str) -> Arc<Snapshot> {
    supported_platforms(version)
}

/// Union `base` and `add`, then remove every pair found in `drop`.
///
/// When a pair appears in both `base` and `add`, the `add` entry wins, which
/// is how a release changes a port's default flag. Dropping a pair that is
/// not present is a no-op.
pub fn add_drop<B, A, D>(base: B, add: A, drop: D) -> PlatformSet
where
    B: IntoIterator<Item = Platform>,
    A: IntoIterator<Item = Platform>,
    D: IntoIterator<Item = Platform>,
{
    let drop: PlatformSet = drop.into_iter().collect();
    base.into_iter()
        .chain(add)
        .filter(|platform| !drop.contains(platform))
        .collect()
}

fn port(&(os, arch, default): &history::Port) -> Platform {
    Platform::new(os, arch).with_default(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;
    use std::sync::Mutex;

    fn p(os: &str, arch: &str, default: bool) -> Platform {
        Platform::new(os, arch).with_default(default)
    }

    fn none() -> Vec<Platform> {
        Vec::new()
    }

    fn names(snapshot: &Snapshot) -> HashSet<String> {
        snapshot.iter().map(ToString::to_string).collect()
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a fmt subscriber and return what it logged.
    fn captured_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_add_drop_union() {
        let result = add_drop(
            vec![p("linux", "amd64", true)],
            vec![p("js", "wasm", true)],
            none(),
        );
        assert_eq!(result.len(), 2);
        assert!(result.contains(&Platform::new("linux", "amd64")));
        assert!(result.contains(&Platform::new("js", "wasm")));
    }

    #[test]
    fn test_add_drop_add_wins() {
        let result = add_drop(
            vec![p("linux", "mips64", false), p("linux", "amd64", true)],
            vec![p("linux", "mips64", true)],
            none(),
        );
        assert_eq!(result.len(), 2);
        assert!(result.get("linux", "mips64").unwrap().is_default());
    }

    #[test]
    fn test_add_drop_drop_beats_add() {
        let result = add_drop(
            vec![p("nacl", "386", false)],
            vec![p("nacl", "arm", false)],
            vec![p("nacl", "386", false), p("nacl", "arm", false)],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_add_drop_ignores_default_when_dropping() {
        let result = add_drop(
            vec![p("darwin", "386", true)],
            none(),
            vec![p("darwin", "386", false)],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_add_drop_absent_drop_is_noop() {
        let base = vec![p("linux", "amd64", true), p("windows", "386", true)];
        let drop = vec![p("plan9", "arm", false)];

        let once = add_drop(base.clone(), none(), drop.clone());
        let twice = add_drop(once.clone(), none(), drop);
        assert_eq!(once, twice);
        assert_eq!(once, base.into_iter().collect::<PlatformSet>());
    }

    #[test]
    fn test_add_drop_dedupes_input() {
        let result = add_drop(
            vec![p("linux", "arm", true), p("linux", "arm", true)],
            vec![p("linux", "arm", false)],
            none(),
        );
        assert_eq!(result.len(), 1);
        assert!(!result.get("linux", "arm").unwrap().is_default());
    }

    #[test]
    fn test_go1_16_darwin_arm64_default() {
        let snapshot = supported_platforms("go1.16");
        assert_eq!(snapshot.release(), "1.16");
        let darwin = snapshot.get("darwin", "arm64").unwrap();
        assert!(darwin.is_default());
    }

    #[test]
    fn test_darwin_arm64_not_default_before_1_16() {
        let snapshot = supported_platforms("go1.15");
        assert!(!snapshot.get("darwin", "arm64").unwrap().is_default());
        assert!(snapshot.get("darwin", "386").is_none());
    }

    #[test]
    fn test_unparseable_versions_use_latest() {
        let latest = HistoricalCatalog::builtin().latest();
        for version in ["go0.9", "nonsense", "", "go", "gox.y", "devel go1.22", "1.16"] {
            let snapshot = supported_platforms(version);
            assert!(Arc::ptr_eq(&snapshot, &latest), "{version:?}");
        }
    }

    #[test]
    fn test_newer_versions_use_latest() {
        let latest = HistoricalCatalog::builtin().latest();
        assert_eq!(latest.release(), "1.23");
        for version in ["go1.23", "go1.23.4", "go1.30", "go2"] {
            assert!(Arc::ptr_eq(&supported_platforms(version), &latest));
        }
    }

    #[test]
    fn test_prerelease_uses_latest() {
        let latest = HistoricalCatalog::builtin().latest();
        for version in ["go1.16rc1", "go1.16beta1", "go1.16.1rc1"] {
            assert!(Arc::ptr_eq(&supported_platforms(version), &latest), "{version:?}");
        }
    }

    #[test]
    fn test_v_prefix_and_build_metadata() {
        assert_eq!(supported_platforms("gov1.16").release(), "1.16");
        assert_eq!(supported_platforms("go1.16+meta").release(), "1.16");
        assert_eq!(supported_platforms("go1.16.2+build.5").release(), "1.16");
    }

    #[test]
    fn test_missing_prefix_logs_warning() {
        let logs = captured_logs(|| {
            supported_platforms("1.16");
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Unexpected toolchain version"), "{logs}");
    }

    #[test]
    fn test_unparseable_version_logs_warning() {
        let logs = captured_logs(|| {
            supported_platforms("go1..2");
        });
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Unable to parse toolchain version"), "{logs}");
    }

    #[test]
    fn test_releases_labels_match_ranges() {
        for entry in HistoricalCatalog::builtin().releases() {
            let start = parse_toolchain_version(entry.snapshot.release()).unwrap();
            assert!(entry.range.matches(&start), "{}", entry.snapshot.release());
            assert!(Arc::ptr_eq(
                &supported_platforms(&format!("go{}", entry.snapshot.release())),
                &entry.snapshot
            ));
        }
    }

    #[test]
    fn test_patch_release_matches_minor() {
        assert_eq!(supported_platforms("go1.14.15").release(), "1.14");
        assert_eq!(supported_platforms("go1").release(), "1.0");
        assert_eq!(supported_platforms("go1.0.3").release(), "1.0");
    }

    #[test]
    fn test_gap_releases_share_previous_set() {
        assert_eq!(supported_platforms("go1.2").release(), "1.1");
        assert_eq!(
            names(&supported_platforms("go1.9")),
            names(&supported_platforms("go1.8"))
        );
    }

    #[test]
    fn test_snapshot_sizes() {
        assert_eq!(supported_platforms("go1.0").len(), 11);
        assert_eq!(HistoricalCatalog::builtin().latest().len(), 48);
    }

    #[test]
    fn test_mips64_default_changes_in_1_7() {
        assert!(!supported_platforms("go1.6").get("linux", "mips64").unwrap().is_default());
        assert!(supported_platforms("go1.7").get("linux", "mips64").unwrap().is_default());
        assert!(supported_platforms("go1.7").get("linux", "s390x").unwrap().is_default());
    }

    #[test]
    fn test_android_amd64_dropped_and_readded() {
        assert!(supported_platforms("go1.9").get("android", "amd64").is_some());
        assert!(supported_platforms("go1.10").get("android", "amd64").is_none());
        assert!(supported_platforms("go1.15").get("android", "amd64").is_none());
        assert!(supported_platforms("go1.16").get("android", "amd64").is_some());
    }

    #[test]
    fn test_nacl_dropped_in_1_14() {
        assert!(supported_platforms("go1.13").get("nacl", "arm").is_some());
        let snapshot = supported_platforms("go1.14");
        assert!(snapshot.iter().all(|p| p.os() != "nacl" || p.arch() == "amd64p32"));
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let releases = HistoricalCatalog::builtin().releases();
        assert_eq!(releases.first().unwrap().range.to_string(), ">=1.0.0, <1.1.0");
        assert_eq!(releases.last().unwrap().range.to_string(), ">=1.23.0");

        for minor in 0..=30 {
            for patch in [0, 7] {
                let version = Version::new(1, minor, patch);
                let matching = releases.iter().filter(|e| e.range.matches(&version)).count();
                assert_eq!(matching, 1, "{version}");
            }
        }
    }

    #[test]
    fn test_canonical_forms_round_trip() {
        for entry in HistoricalCatalog::builtin().releases() {
            for platform in entry.snapshot.iter() {
                let parsed: Platform = platform.to_string().parse().unwrap();
                assert_eq!(&parsed, platform);
            }
        }
    }

    #[test]
    fn test_empty_history_has_empty_latest() {
        let catalog = HistoricalCatalog::from_history(&[]);
        assert!(catalog.releases().is_empty());
        assert!(catalog.supported_platforms("go1.16").is_empty());
    }

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = Snapshot::new(
            "test",
            [p("darwin", "amd64", true), p("android", "arm", false)],
        );
        let defaults: Vec<_> = snapshot.defaults().map(ToString::to_string).collect();
        assert_eq!(defaults, ["darwin/amd64"]);
    }
}
