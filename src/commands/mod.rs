//! Command implementations for the `crossplat` binary.
//!
//! Commands take the catalog and an output writer as parameters so they can
//! be exercised against fixture snapshots in tests.

mod platforms;
mod releases;
mod resolve;

pub use platforms::platforms;
pub use releases::releases;
pub use resolve::{build_request, resolve};

use std::sync::Arc;

use crate::catalog::{Catalog, Snapshot};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One platform per line
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Pick the snapshot for an optional toolchain version.
fn snapshot_for<C: Catalog + ?Sized>(catalog: &C, toolchain: Option<&str>) -> Arc<Snapshot> {
    match toolchain {
        Some(version) => catalog.supported_platforms(version),
        None => catalog.latest(),
    }
}
