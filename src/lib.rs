//! Cross-build target resolution.
//!
//! Given a toolchain version and user filters, decide which `os/arch` pairs
//! to build for. The [`catalog`] maps a toolchain version to the platforms it
//! supports; the [`filter`] narrows that set down with OS, architecture and
//! pair filters.
//!
//! ```
//! use crossplat::catalog::supported_platforms;
//! use crossplat::filter::FilterRequest;
//!
//! let snapshot = supported_platforms("go1.21.3");
//!
//! let mut request = FilterRequest::new();
//! request.add_os("linux darwin").unwrap();
//! request.add_arch("!386").unwrap();
//!
//! let targets = request.platforms(&snapshot).into_sorted_vec();
//! assert!(targets.iter().any(|p| p.to_string() == "darwin/arm64"));
//! assert!(targets.iter().all(|p| p.arch() != "386"));
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod filter;
pub mod platform;

pub use catalog::{Catalog, HistoricalCatalog, Snapshot, resolve_snapshot, supported_platforms};
pub use error::FilterError;
pub use filter::{FilterRequest, PlatformFilter, resolve_platforms};
pub use platform::{Platform, PlatformSet};
